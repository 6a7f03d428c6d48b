//! Element categories used by the tree construction rules.
//!
//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)

use sprig_dom::{ElementData, Namespace};

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules:
/// HTML's address, applet, area, article, aside, base, basefont, bgsound,
/// blockquote, body, br, button, caption, center, col, colgroup, dd, details,
/// dir, div, dl, dt, embed, fieldset, figcaption, figure, footer, form, frame,
/// frameset, h1, h2, h3, h4, h5, h6, head, header, hgroup, hr, html, iframe,
/// img, input, keygen, li, link, listing, main, marquee, menu, meta, nav,
/// noembed, noframes, noscript, object, ol, p, param, plaintext, pre, script,
/// search, section, select, source, style, summary, table, tbody, td,
/// template, textarea, tfoot, th, thead, title, tr, track, ul, wbr, xmp;
/// MathML mi, MathML mo, MathML mn, MathML ms, MathML mtext, and MathML
/// annotation-xml; and SVG foreignObject, SVG desc, and SVG title."
#[must_use]
pub fn is_special(element: &ElementData) -> bool {
    match element.namespace {
        Namespace::Html => matches!(
            element.tag_name.as_str(),
            "address"
                | "applet"
                | "area"
                | "article"
                | "aside"
                | "base"
                | "basefont"
                | "bgsound"
                | "blockquote"
                | "body"
                | "br"
                | "button"
                | "caption"
                | "center"
                | "col"
                | "colgroup"
                | "dd"
                | "details"
                | "dir"
                | "div"
                | "dl"
                | "dt"
                | "embed"
                | "fieldset"
                | "figcaption"
                | "figure"
                | "footer"
                | "form"
                | "frame"
                | "frameset"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "head"
                | "header"
                | "hgroup"
                | "hr"
                | "html"
                | "iframe"
                | "img"
                | "input"
                | "keygen"
                | "li"
                | "link"
                | "listing"
                | "main"
                | "marquee"
                | "menu"
                | "meta"
                | "nav"
                | "noembed"
                | "noframes"
                | "noscript"
                | "object"
                | "ol"
                | "p"
                | "param"
                | "plaintext"
                | "pre"
                | "script"
                | "search"
                | "section"
                | "select"
                | "source"
                | "style"
                | "summary"
                | "table"
                | "tbody"
                | "td"
                | "template"
                | "textarea"
                | "tfoot"
                | "th"
                | "thead"
                | "title"
                | "tr"
                | "track"
                | "ul"
                | "wbr"
                | "xmp"
        ),
        Namespace::MathMl => matches!(
            element.tag_name.as_str(),
            "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
        ),
        Namespace::Svg => matches!(
            element.tag_name.as_str(),
            "foreignObject" | "desc" | "title"
        ),
        _ => false,
    }
}

/// [§ 13.2.4.2 Formatting](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
///
/// "The following HTML elements are those that end up in the list of active
/// formatting elements: a, b, big, code, em, font, i, nobr, s, small, strike,
/// strong, tt, and u."
#[must_use]
pub fn is_formatting(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "a" | "b"
            | "big"
            | "code"
            | "em"
            | "font"
            | "i"
            | "nobr"
            | "s"
            | "small"
            | "strike"
            | "strong"
            | "tt"
            | "u"
    )
}

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
///
/// "...while the current node is a dd element, a dt element, an li element,
/// an optgroup element, an option element, a p element, an rb element, an rp
/// element, an rt element, or an rtc element..."
#[must_use]
pub fn has_implied_end_tag(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "dd" | "dt" | "li" | "optgroup" | "option" | "p" | "rb" | "rp" | "rt" | "rtc"
    )
}

/// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-all-implied-end-tags-thoroughly)
///
/// "...while the current node is a caption element, a colgroup element, a dd
/// element, a dt element, an li element, an optgroup element, an option
/// element, a p element, an rb element, an rp element, an rt element, an rtc
/// element, a tbody element, a td element, a tfoot element, a th element, a
/// thead element, or a tr element..."
#[must_use]
pub fn has_implied_end_tag_thoroughly(tag_name: &str) -> bool {
    has_implied_end_tag(tag_name)
        || matches!(
            tag_name,
            "caption" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
        )
}

/// `h1` to `h6`.
#[must_use]
pub fn is_heading(tag_name: &str) -> bool {
    matches!(tag_name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// "applet", "marquee", "object": elements that push a marker.
#[must_use]
pub fn is_marker_element(tag_name: &str) -> bool {
    matches!(tag_name, "applet" | "marquee" | "object")
}

/// Elements whose start tag closes an open `p` element in button scope.
///
/// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
/// "A start tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "center", "details", "dialog", "dir", "div", "dl",
/// "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main",
/// "menu", "nav", "ol", "p", "search", "section", "summary", "ul""
#[must_use]
pub fn is_block_container(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "center"
            | "details"
            | "dialog"
            | "dir"
            | "div"
            | "dl"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "header"
            | "hgroup"
            | "main"
            | "menu"
            | "nav"
            | "ol"
            | "p"
            | "search"
            | "section"
            | "summary"
            | "ul"
    )
}

/// End tags that close a block: the set above plus `button`, `listing` and `pre`.
///
/// "An end tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "button", "center", "details", "dialog", "dir", "div", "dl",
/// "fieldset", "figcaption", "figure", "footer", "header", "hgroup",
/// "listing", "main", "menu", "nav", "ol", "pre", "search", "section",
/// "summary", "ul""
#[must_use]
pub fn is_block_end_tag(tag_name: &str) -> bool {
    (is_block_container(tag_name) && tag_name != "p")
        || matches!(tag_name, "button" | "listing" | "pre")
}

/// `tbody`, `tfoot`, `thead`.
#[must_use]
pub fn is_table_section(tag_name: &str) -> bool {
    matches!(tag_name, "tbody" | "tfoot" | "thead")
}

/// "table", "tbody", "tfoot", "thead", "tr": the nodes that switch on foster
/// parenting and on the pending table character tokens.
#[must_use]
pub fn is_table_structure(tag_name: &str) -> bool {
    matches!(tag_name, "table" | "tbody" | "tfoot" | "thead" | "tr")
}

/// "caption", "col", "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr":
/// start tags that end a caption or cell.
#[must_use]
pub fn is_table_content_start(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
    )
}

/// "body", "caption", "col", "colgroup", "html", "tbody", "td", "tfoot",
/// "th", "thead", "tr": end tags ignored in several table modes.
#[must_use]
pub fn is_ignored_table_end_tag(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr"
    )
}

/// Void elements: inserted and popped at once, self-closing flag acknowledged.
///
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
/// "area, base, br, col, embed, hr, img, input, link, meta, source, track, wbr"
#[must_use]
pub fn is_void(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
            | "basefont"
            | "bgsound"
            | "frame"
            | "keygen"
            | "param"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_depends_on_namespace() {
        assert!(is_special(&ElementData::new("title", Namespace::Html)));
        assert!(is_special(&ElementData::new("title", Namespace::Svg)));
        assert!(!is_special(&ElementData::new("title", Namespace::MathMl)));
        assert!(is_special(&ElementData::new("mi", Namespace::MathMl)));
        assert!(!is_special(&ElementData::new("span", Namespace::Html)));
    }

    #[test]
    fn test_block_end_tags() {
        assert!(is_block_end_tag("pre"));
        assert!(is_block_end_tag("div"));
        assert!(!is_block_end_tag("p"));
        assert!(!is_block_end_tag("span"));
    }
}
