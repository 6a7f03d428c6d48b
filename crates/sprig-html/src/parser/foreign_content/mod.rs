//! Foreign content parsing support for SVG and MathML.
//!
//! [§ 13.2.6.3 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)

pub mod mathml;
pub mod svg;

pub use mathml::adjust_mathml_attributes;
pub use svg::{adjust_svg_attributes, adjust_svg_tag_name};

use sprig_dom::{AttributesMap, DomAttribute, ElementData, Namespace};

use super::HTMLParser;
use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.6.3 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// "When the steps below require the user agent to adjust foreign attributes
/// for a token, then, if any of the attributes on the token match the strings
/// in the first column of the following table, let the attribute be a namespaced
/// attribute, with the prefix being the string in the second column, the local
/// name being the string in the third column, and the namespace being the
/// namespace in the fourth column."
///
/// Format: (`attribute_name`, prefix, `local_name`, namespace)
const FOREIGN_ATTRIBUTE_ADJUSTMENTS: &[(&str, Option<&str>, &str, Namespace)] = &[
    ("xlink:actuate", Some("xlink"), "actuate", Namespace::XLink),
    ("xlink:arcrole", Some("xlink"), "arcrole", Namespace::XLink),
    ("xlink:href", Some("xlink"), "href", Namespace::XLink),
    ("xlink:role", Some("xlink"), "role", Namespace::XLink),
    ("xlink:show", Some("xlink"), "show", Namespace::XLink),
    ("xlink:title", Some("xlink"), "title", Namespace::XLink),
    ("xlink:type", Some("xlink"), "type", Namespace::XLink),
    ("xml:lang", Some("xml"), "lang", Namespace::Xml),
    ("xml:space", Some("xml"), "space", Namespace::Xml),
    ("xmlns", None, "xmlns", Namespace::Xmlns),
    ("xmlns:xlink", Some("xmlns"), "xlink", Namespace::Xmlns),
];

/// Build the attribute list of a foreign element, placing `xlink:*`,
/// `xml:*` and `xmlns` attributes in their namespaces.
#[must_use]
pub fn adjust_foreign_attributes(attributes: &[Attribute]) -> AttributesMap {
    attributes
        .iter()
        .map(|attr| {
            FOREIGN_ATTRIBUTE_ADJUSTMENTS
                .iter()
                .find(|&&(from, ..)| from == attr.name)
                .map_or_else(
                    || DomAttribute::new(&attr.name, &attr.value),
                    |&(_, prefix, local_name, namespace)| DomAttribute {
                        name: local_name.to_string(),
                        prefix: prefix.map(str::to_string),
                        namespace: Some(namespace),
                        value: attr.value.clone(),
                    },
                )
        })
        .collect()
}

/// Apply the case adjustments for a start tag entering `namespace`: SVG tag
/// and attribute names, or the one MathML attribute.
#[must_use]
pub fn adjust_token_for_namespace(token: &Token, namespace: Namespace) -> Token {
    let Token::StartTag {
        name,
        self_closing,
        attributes,
    } = token
    else {
        return token.clone();
    };
    let mut attributes = attributes.clone();
    let name = match namespace {
        Namespace::Svg => {
            adjust_svg_attributes(&mut attributes);
            adjust_svg_tag_name(name).to_string()
        }
        Namespace::MathMl => {
            adjust_mathml_attributes(&mut attributes);
            name.clone()
        }
        _ => name.clone(),
    };
    Token::StartTag {
        name,
        self_closing: *self_closing,
        attributes,
    }
}

/// [§ 13.2.6.2 HTML integration point](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
#[must_use]
pub fn is_html_integration_point(element: &ElementData) -> bool {
    match element.namespace {
        Namespace::MathMl => mathml::is_html_integration_point(element),
        Namespace::Svg => svg::is_html_integration_point(&element.tag_name),
        _ => false,
    }
}

/// [§ 13.2.6.2 MathML text integration point](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
#[must_use]
pub fn is_mathml_text_integration_point(element: &ElementData) -> bool {
    element.namespace == Namespace::MathMl && mathml::is_text_integration_point(&element.tag_name)
}

/// "A start tag whose tag name is one of: "b", "big", "blockquote", "body",
/// "br", "center", "code", "dd", "div", "dl", "dt", "em", "embed", "h1",
/// "h2", "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing",
/// "menu", "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span",
/// "strong", "strike", "sub", "sup", "table", "tt", "u", "ul", "var"
///
/// A start tag whose tag name is "font", if the token has any attributes
/// named "color", "face", or "size"
///
/// An end tag whose tag name is "br", "p""
fn is_breakout(token: &Token) -> bool {
    match token {
        Token::StartTag { name, .. } => {
            matches!(
                name.as_str(),
                "b" | "big"
                    | "blockquote"
                    | "body"
                    | "br"
                    | "center"
                    | "code"
                    | "dd"
                    | "div"
                    | "dl"
                    | "dt"
                    | "em"
                    | "embed"
                    | "h1"
                    | "h2"
                    | "h3"
                    | "h4"
                    | "h5"
                    | "h6"
                    | "head"
                    | "hr"
                    | "i"
                    | "img"
                    | "li"
                    | "listing"
                    | "menu"
                    | "meta"
                    | "nobr"
                    | "ol"
                    | "p"
                    | "pre"
                    | "ruby"
                    | "s"
                    | "small"
                    | "span"
                    | "strong"
                    | "strike"
                    | "sub"
                    | "sup"
                    | "table"
                    | "tt"
                    | "u"
                    | "ul"
                    | "var"
            ) || (name == "font"
                && ["color", "face", "size"]
                    .iter()
                    .any(|attr| token.attribute(attr).is_some()))
        }
        Token::EndTag { name } => name == "br" || name == "p",
        _ => false,
    }
}

impl HTMLParser {
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(crate) fn process_foreign_content(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL
            //  Parse error. Insert a U+FFFD REPLACEMENT CHARACTER character."
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            //  Insert the token's character."
            // "Any other character token
            //  Insert the token's character. Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                for _ in data.matches('\0') {
                    self.parse_error("unexpected-null-character in foreign content");
                }
                if data
                    .chars()
                    .any(|c| c != '\0' && !Self::is_whitespace(c))
                {
                    self.frameset_ok = false;
                }
                self.insert_characters(&data.replace('\0', "\u{FFFD}"));
            }

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in foreign content"),

            _ if is_breakout(token) => {
                // "Parse error."
                self.parse_error("HTML tag breaks out of foreign content");

                // "While the current node is not a MathML text integration
                //  point, an HTML integration point, or an element in the HTML
                //  namespace, pop elements from the stack of open elements."
                while let Some(element) = self.current_element() {
                    if element.namespace == Namespace::Html
                        || is_mathml_text_integration_point(element)
                        || is_html_integration_point(element)
                    {
                        break;
                    }
                    let _ = self.open_elements.pop();
                }

                // "Reprocess the token according to the rules given in the
                //  section corresponding to the current insertion mode in HTML
                //  content."
                self.process_token(token);
            }

            // "Any other start tag"
            Token::StartTag { self_closing, .. } => {
                let namespace = self
                    .adjusted_current_node()
                    .and_then(|id| self.tree.as_element(id))
                    .map_or(Namespace::Html, |e| e.namespace);

                // "If the adjusted current node is an element in the MathML
                //  namespace, adjust MathML attributes for the token."
                // "If the adjusted current node is an element in the SVG
                //  namespace, and the token's tag name is one of the ones in
                //  the first column of the following table, change the tag
                //  name... adjust SVG attributes for the token."
                // "Adjust foreign attributes for the token."
                let adjusted = adjust_token_for_namespace(token, namespace);

                // "Insert a foreign element for the token, with adjusted
                //  current node's namespace and false."
                let _ = self.insert_foreign_element(&adjusted, namespace, false);

                // "If the token has its self-closing flag set, then run the
                //  appropriate steps from the following list:
                //  If the token's tag name is "script", and the new current
                //  node is in the SVG namespace: Acknowledge the token's
                //  self-closing flag, and then act as described in the steps
                //  for a "script" end tag below.
                //  Otherwise: Pop the current node off the stack of open
                //  elements and acknowledge the token's self-closing flag."
                if *self_closing {
                    let _ = self.open_elements.pop();
                }
            }

            // "An end tag whose tag name is "script", if the current node is
            //  an SVG script element: Pop the current node off the stack of
            //  open elements."
            Token::EndTag { name }
                if name == "script"
                    && self
                        .current_element()
                        .is_some_and(|e| e.is(Namespace::Svg, "script")) =>
            {
                let _ = self.open_elements.pop();
            }

            // "Any other end tag"
            Token::EndTag { name } => self.foreign_end_tag(token, name),

            Token::EndOfFile => self.process_token(token),
        }
    }

    fn foreign_end_tag(&mut self, token: &Token, name: &str) {
        // STEP 1: "Initialize node to be the current node (the bottommost
        //          node of the stack)."
        let Some(mut index) = self.open_elements.len().checked_sub(1) else {
            return;
        };

        // STEP 2: "If node's tag name, converted to ASCII lowercase, is not
        //          the same as the tag name of the token, then this is a parse
        //          error."
        if !self.tag_name_matches_lowercase(index, name) {
            self.parse_error("end tag does not match the current foreign element");
        }

        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of
            //          open elements, then return. (fragment case)"
            if index == 0 {
                return;
            }

            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the
            //          same as the tag name of the token, pop elements from the
            //          stack of open elements until node has been popped from
            //          the stack, and then return."
            if self.tag_name_matches_lowercase(index, name) {
                self.open_elements.truncate(index);
                return;
            }

            // STEP 5: "Set node to the previous entry in the stack of open elements."
            index -= 1;

            // STEP 6: "If node is not an element in the HTML namespace, return
            //          to the step labeled loop."
            let is_html = self
                .open_elements
                .get(index)
                .and_then(|id| self.tree.as_element(id))
                .is_some_and(|e| e.namespace == Namespace::Html);
            if is_html {
                break;
            }
        }

        // STEP 7: "Otherwise, process the token according to the rules given
        //          in the section corresponding to the current insertion mode
        //          in HTML content."
        self.process_token(token);
    }

    fn tag_name_matches_lowercase(&self, index: usize, name: &str) -> bool {
        self.open_elements
            .get(index)
            .and_then(|id| self.tree.as_element(id))
            .is_some_and(|e| e.tag_name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xlink_attributes_get_a_namespace() {
        let attrs = adjust_foreign_attributes(&[
            Attribute::new("xlink:href", "#a"),
            Attribute::new("xmlns", "http://www.w3.org/2000/svg"),
            Attribute::new("width", "10"),
        ]);
        assert_eq!(attrs.get_ns(Some(Namespace::XLink), "href"), Some("#a"));
        assert_eq!(attrs.get_ns(Some(Namespace::Xmlns), "xmlns"), Some("http://www.w3.org/2000/svg"));
        assert_eq!(attrs.get("width"), Some("10"));
    }

    #[test]
    fn test_font_breaks_out_only_with_presentational_attributes() {
        let plain = Token::start_tag("font");
        let colored = Token::StartTag {
            name: "font".to_string(),
            self_closing: false,
            attributes: vec![Attribute::new("color", "red")],
        };
        assert!(!is_breakout(&plain));
        assert!(is_breakout(&colored));
        assert!(is_breakout(&Token::end_tag("p")));
        assert!(!is_breakout(&Token::end_tag("div")));
    }
}
