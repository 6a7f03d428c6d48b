use sprig_dom::{DomAttribute, Namespace, NodeId, QuirksMode};

use crate::parser::foreign_content::adjust_token_for_namespace;
use crate::parser::open_elements::Scope;
use crate::parser::tag_sets::{
    is_block_container, is_block_end_tag, is_formatting, is_heading, is_marker_element, is_special,
};
use crate::parser::{HTMLParser, InsertionMode};
use crate::tokenizer::{Attribute, Token, TokenizerState};

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

impl HTMLParser {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(crate) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } => self.in_body_characters(data),

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in body"),

            Token::StartTag { name, .. } => self.in_body_start_tag(token, name),

            Token::EndTag { name } => self.in_body_end_tag(token, name),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                //  process the token using the rules for the "in template"
                //  insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    self.process_in_mode(InsertionMode::InTemplate, token);
                    return;
                }

                // "Otherwise, follow these steps:
                //  If there is a node in the stack of open elements that is not
                //  either a dd element, a dt element, an li element, an optgroup
                //  element, an option element, a p element, an rb element, an
                //  rp element, an rt element, an rtc element, a tbody element, a
                //  td element, a tfoot element, a th element, a thead element, a
                //  tr element, the body element, or the html element, then this
                //  is a parse error.
                //  Stop parsing."
                if self.has_unclosed_elements() {
                    self.parse_error("eof with open elements");
                }
                self.finish();
            }
        }
    }

    /// Character runs in body.
    ///
    /// "A character token that is U+0000 NULL: Parse error. Ignore the token."
    /// "A character token that is one of U+0009 CHARACTER TABULATION, ...
    ///  Reconstruct the active formatting elements, if any. Insert the token's
    ///  character."
    /// "Any other character token: Reconstruct the active formatting elements,
    ///  if any. Insert the token's character. Set the frameset-ok flag to "not ok"."
    pub(crate) fn in_body_characters(&mut self, data: &str) {
        let text = if data.contains('\0') {
            for _ in data.matches('\0') {
                self.parse_error("unexpected-null-character in body");
            }
            data.replace('\0', "")
        } else {
            data.to_string()
        };
        if text.is_empty() {
            return;
        }

        self.reconstruct_active_formatting_elements();
        self.insert_characters(&text);
        if text.chars().any(|c| !Self::is_whitespace(c)) {
            self.frameset_ok = false;
        }
    }

    #[allow(clippy::too_many_lines)]
    fn in_body_start_tag(&mut self, token: &Token, name: &str) {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                // "Parse error."
                self.parse_error("unexpected html start tag in body");

                // "If there is a template element on the stack of open
                //  elements, then ignore the token."
                if self.template_is_open() {
                    return;
                }

                // "Otherwise, for each attribute on the token, check to see if
                //  the attribute is already present on the top element of the
                //  stack of open elements. If it is not, add the attribute and
                //  its corresponding value to that element."
                if let Some(html) = self.open_elements.get(0) {
                    self.merge_attributes(html, token);
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title": Process the token using the rules for the
            //  "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
            | "template" | "title" => self.process_in_mode(InsertionMode::InHead, token),

            // "A start tag whose tag name is "body""
            "body" => {
                // "Parse error."
                self.parse_error("unexpected body start tag in body");

                // "If the second element on the stack of open elements is not a
                //  body element, if the stack of open elements has only one node
                //  on it, or if there is a template element on the stack of open
                //  elements, then ignore the token. (fragment case or there is a
                //  template element on the stack)"
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                if self.template_is_open() {
                    return;
                }

                // "Otherwise, set the frameset-ok flag to "not ok"; then, for
                //  each attribute on the token, check to see if the attribute
                //  is already present on the body element (the second element)
                //  on the stack of open elements, and if it is not, add the
                //  attribute and its corresponding value to that element."
                self.frameset_ok = false;
                self.merge_attributes(body, token);
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                // "Parse error."
                self.parse_error("unexpected frameset start tag in body");

                // "If the stack of open elements has only one node on it, or
                //  if the second element on the stack of open elements is not a
                //  body element, then ignore the token. (fragment case or there
                //  is a template element on the stack)"
                let Some(body) = self.second_element_if_body() else {
                    return;
                };

                // "If the frameset-ok flag is set to "not ok", ignore the token."
                if !self.frameset_ok {
                    return;
                }

                // "Otherwise, run the following steps:
                //  1. Remove the second element on the stack of open elements
                //     from its parent node, if it has one.
                //  2. Pop all the nodes from the bottom of the stack of open
                //     elements, from the current node up to, but not including,
                //     the root html element.
                //  3. Insert an HTML element for the token.
                //  4. Switch the insertion mode to "in frameset"."
                self.tree.detach(body);
                self.open_elements.truncate(1);
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "address", "article",
            //  "aside", "blockquote", "center", "details", "dialog", "dir",
            //  "div", "dl", "fieldset", "figcaption", "figure", "footer",
            //  "header", "hgroup", "main", "menu", "nav", "ol", "p", "search",
            //  "section", "summary", "ul": If the stack of open elements has a
            //  p element in button scope, then close a p element. Insert an
            //  HTML element for the token."
            _ if is_block_container(name) => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            _ if is_heading(name) => {
                // "If the stack of open elements has a p element in button
                //  scope, then close a p element."
                self.close_p_if_in_button_scope();

                // "If the current node is an HTML element whose tag name is one
                //  of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a
                //  parse error; pop the current node off the stack of open elements."
                if self
                    .current_element()
                    .is_some_and(|e| e.namespace == Namespace::Html && is_heading(&e.tag_name))
                {
                    self.parse_error("nested heading");
                    let _ = self.open_elements.pop();
                }

                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                // "If the stack of open elements has a p element in button
                //  scope, then close a p element."
                self.close_p_if_in_button_scope();
                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // "If the next token is a U+000A LINE FEED (LF) character
                //  token, then ignore that token and move on to the next one.
                //  (Newlines at the start of pre blocks are ignored as an
                //  authoring convenience.)"
                self.ignore_next_line_feed = true;
                // "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                // "If the form element pointer is not null, and there is no
                //  template element on the stack of open elements, then this is
                //  a parse error; ignore the token."
                let template_open = self.template_is_open();
                if self.form_element_pointer.is_some() && !template_open {
                    self.parse_error("nested form");
                    return;
                }

                // "Otherwise: If the stack of open elements has a p element in
                //  button scope, then close a p element. Insert an HTML element
                //  for the token, and, if there is no template element on the
                //  stack of open elements, set the form element pointer to
                //  point to the element created."
                self.close_p_if_in_button_scope();
                let form = self.insert_html_element(token);
                if !template_open {
                    self.form_element_pointer = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            "li" => self.in_body_list_item(token, &["li"]),

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.in_body_list_item(token, &["dd", "dt"]),

            // "A start tag whose tag name is "plaintext": If the stack of open
            //  elements has a p element in button scope, then close a p
            //  element. Insert an HTML element for the token. Switch the
            //  tokenizer to the PLAINTEXT state."
            "plaintext" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
                self.tokenizer.set_state(TokenizerState::PLAINTEXT);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "1. If the stack of open elements has a button element in
                //     scope, then run these substeps:
                //     1. Parse error.
                //     2. Generate implied end tags.
                //     3. Pop elements from the stack of open elements until a
                //        button element has been popped from the stack."
                if self
                    .open_elements
                    .has_in_scope(&self.tree, "button", Scope::Default)
                {
                    self.parse_error("nested button");
                    self.open_elements.generate_implied_end_tags(&self.tree, None);
                    let _ = self.open_elements.pop_tag(&self.tree, "button");
                }
                // "2. Reconstruct the active formatting elements, if any.
                //  3. Insert an HTML element for the token.
                //  4. Set the frameset-ok flag to "not ok"."
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a
                //  element between the end of the list and the last marker on
                //  the list (or the start of the list if there is no marker on
                //  the list), then this is a parse error; run the adoption
                //  agency algorithm for the token, then remove that element
                //  from the list of active formatting elements and the stack of
                //  open elements if the adoption agency algorithm didn't
                //  already remove it (it might not have if the element is not
                //  in table scope)."
                if let Some(existing) = self.active_formatting.find_after_last_marker("a") {
                    self.parse_error("nested a element");
                    let _ = self.run_adoption_agency("a");
                    self.active_formatting.remove(existing);
                    self.open_elements.remove_element(existing);
                }

                // "Reconstruct the active formatting elements, if any. Insert
                //  an HTML element for the token. Push onto the list of active
                //  formatting elements that element."
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                // "Reconstruct the active formatting elements, if any."
                self.reconstruct_active_formatting_elements();

                // "If the stack of open elements has a nobr element in scope,
                //  then this is a parse error; run the adoption agency algorithm
                //  for the token, then once again reconstruct the active
                //  formatting elements, if any."
                if self
                    .open_elements
                    .has_in_scope(&self.tree, "nobr", Scope::Default)
                {
                    self.parse_error("nested nobr");
                    let _ = self.run_adoption_agency("nobr");
                    self.reconstruct_active_formatting_elements();
                }

                // "Insert an HTML element for the token. Push onto the list of
                //  active formatting elements that element."
                let element = self.insert_html_element(token);
                self.active_formatting.push(element, token.clone());
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            //  "font", "i", "s", "small", "strike", "strong", "tt", "u":
            //  Reconstruct the active formatting elements, if any. Insert an
            //  HTML element for the token. Push onto the list of active
            //  formatting elements that element."
            _ if is_formatting(name) => self.insert_formatting_element(token),

            // "A start tag whose tag name is one of: "applet", "marquee",
            //  "object": Reconstruct the active formatting elements, if any.
            //  Insert an HTML element for the token. Insert a marker at the
            //  end of the list of active formatting elements. Set the
            //  frameset-ok flag to "not ok"."
            _ if is_marker_element(name) => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.active_formatting.insert_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table": If the Document is not
            //  set to quirks mode, and the stack of open elements has a p
            //  element in button scope, then close a p element. Insert an HTML
            //  element for the token. Set the frameset-ok flag to "not ok".
            //  Switch the insertion mode to "in table"."
            "table" => {
                if self.tree.quirks_mode() != QuirksMode::Quirks {
                    self.close_p_if_in_button_scope();
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            //  "img", "keygen", "wbr": Reconstruct the active formatting
            //  elements, if any. Insert an HTML element for the token.
            //  Immediately pop the current node off the stack of open elements.
            //  Acknowledge the token's self-closing flag, if it is set. Set the
            //  frameset-ok flag to "not ok"."
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                let _ = self.open_elements.pop();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input": Reconstruct the active
            //  formatting elements, if any. Insert an HTML element for the
            //  token. Immediately pop the current node off the stack of open
            //  elements. Acknowledge the token's self-closing flag, if it is
            //  set. If the token does not have an attribute with the name
            //  "type", or if it does, but that attribute's value is not an
            //  ASCII case-insensitive match for the string "hidden", then: set
            //  the frameset-ok flag to "not ok"."
            "input" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                let _ = self.open_elements.pop();
                if !token
                    .attribute("type")
                    .is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
                {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source",
            //  "track": Insert an HTML element for the token. Immediately pop
            //  the current node off the stack of open elements. Acknowledge
            //  the token's self-closing flag, if it is set."
            "param" | "source" | "track" => {
                let _ = self.insert_html_element(token);
                let _ = self.open_elements.pop();
            }

            // "A start tag whose tag name is "hr": If the stack of open
            //  elements has a p element in button scope, then close a p
            //  element. Insert an HTML element for the token. Immediately pop
            //  the current node off the stack of open elements. Acknowledge the
            //  token's self-closing flag, if it is set. Set the frameset-ok flag
            //  to "not ok"."
            "hr" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
                let _ = self.open_elements.pop();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image": Parse error. Change the
            //  token's tag name to "img" and reprocess it. (Don't ask.)"
            "image" => {
                self.parse_error("image start tag");
                if let Token::StartTag {
                    self_closing,
                    attributes,
                    ..
                } = token
                {
                    let img = Token::StartTag {
                        name: "img".to_string(),
                        self_closing: *self_closing,
                        attributes: attributes.clone(),
                    };
                    self.process_token(&img);
                }
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // "1. Insert an HTML element for the token.
                //  2. If the next token is a U+000A LINE FEED (LF) character
                //     token, then ignore that token and move on to the next one.
                //  3. Switch the tokenizer to the RCDATA state.
                //  4. Set the original insertion mode to the current insertion mode.
                //  5. Set the frameset-ok flag to "not ok".
                //  6. Switch the insertion mode to "text"."
                self.parse_text_element(token, TokenizerState::RCDATA);
                self.ignore_next_line_feed = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "xmp": If the stack of open
            //  elements has a p element in button scope, then close a p
            //  element. Reconstruct the active formatting elements, if any. Set
            //  the frameset-ok flag to "not ok". Follow the generic raw text
            //  element parsing algorithm."
            "xmp" => {
                self.close_p_if_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "iframe": Set the frameset-ok flag
            //  to "not ok". Follow the generic raw text element parsing algorithm."
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "noembed" / A start tag whose tag
            //  name is "noscript", if the scripting flag is enabled: Follow the
            //  generic raw text element parsing algorithm."
            "noembed" => self.parse_text_element(token, TokenizerState::RAWTEXT),
            "noscript" if self.config.scripting => {
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "select""
            "select" => {
                // "Reconstruct the active formatting elements, if any. Insert
                //  an HTML element for the token. Set the frameset-ok flag to
                //  "not ok"."
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;

                // "If the insertion mode is one of "in table", "in caption",
                //  "in table body", "in row", or "in cell", then switch the
                //  insertion mode to "in select in table". Otherwise, switch the
                //  insertion mode to "in select"."
                self.insertion_mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
            }

            // "A start tag whose tag name is one of: "optgroup", "option": If
            //  the current node is an option element, then pop the current node
            //  off the stack of open elements. Reconstruct the active formatting
            //  elements, if any. Insert an HTML element for the token."
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    let _ = self.open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rb", "rtc": If the stack
            //  of open elements has a ruby element in scope, then generate
            //  implied end tags. If the current node is not now a ruby
            //  element, this is a parse error. Insert an HTML element for the token."
            "rb" | "rtc" => {
                if self
                    .open_elements
                    .has_in_scope(&self.tree, "ruby", Scope::Default)
                {
                    self.open_elements.generate_implied_end_tags(&self.tree, None);
                    if !self.current_node_is("ruby") {
                        self.parse_error("ruby annotation outside ruby");
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rp", "rt": If the stack
            //  of open elements has a ruby element in scope, then generate
            //  implied end tags, except for rtc elements. If the current node
            //  is not now a rtc element or a ruby element, this is a parse
            //  error. Insert an HTML element for the token."
            "rp" | "rt" => {
                if self
                    .open_elements
                    .has_in_scope(&self.tree, "ruby", Scope::Default)
                {
                    self.open_elements
                        .generate_implied_end_tags(&self.tree, Some("rtc"));
                    if !self.current_node_is("rtc") && !self.current_node_is("ruby") {
                        self.parse_error("ruby annotation outside ruby");
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "math" / "svg": Reconstruct the
            //  active formatting elements, if any. Adjust MathML attributes
            //  (or SVG attributes) for the token. Adjust foreign attributes for
            //  the token. Insert a foreign element for the token, with the
            //  MathML namespace (or SVG namespace) and false. If the token has
            //  its self-closing flag set, pop the current node off the stack of
            //  open elements and acknowledge the token's self-closing flag."
            "math" | "svg" => {
                let namespace = if name == "math" {
                    Namespace::MathMl
                } else {
                    Namespace::Svg
                };
                self.reconstruct_active_formatting_elements();
                let adjusted = adjust_token_for_namespace(token, namespace);
                let _ = self.insert_foreign_element(&adjusted, namespace, false);
                if matches!(token, Token::StartTag { self_closing: true, .. }) {
                    let _ = self.open_elements.pop();
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            //  "thead", "tr": Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => self.parse_error("table structure start tag in body"),

            // "Any other start tag: Reconstruct the active formatting elements,
            //  if any. Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }
        }
    }

    fn in_body_end_tag(&mut self, token: &Token, name: &str) {
        match name {
            // "An end tag whose tag name is "template": Process the token using
            //  the rules for the "in head" insertion mode."
            "template" => self.process_in_mode(InsertionMode::InHead, token),

            // "An end tag whose tag name is "body" / "html""
            "body" | "html" => {
                // "If the stack of open elements does not have a body element
                //  in scope, this is a parse error; ignore the token."
                if !self
                    .open_elements
                    .has_in_scope(&self.tree, "body", Scope::Default)
                {
                    self.parse_error("body end tag without open body");
                    return;
                }

                // "Otherwise, if there is a node in the stack of open elements
                //  that is not either a dd element, ... the body element, or
                //  the html element, then this is a parse error."
                if self.has_unclosed_elements() {
                    self.parse_error("body end tag with open elements");
                }

                // "Switch the insertion mode to "after body"."
                self.insertion_mode = InsertionMode::AfterBody;

                // html: "Reprocess the token."
                if name == "html" {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "address", "article",
            //  "aside", "blockquote", "button", "center", "details", "dialog",
            //  "dir", "div", "dl", "fieldset", "figcaption", "figure",
            //  "footer", "header", "hgroup", "listing", "main", "menu", "nav",
            //  "ol", "pre", "search", "section", "summary", "ul""
            _ if is_block_end_tag(name) => {
                // "If the stack of open elements does not have an element in
                //  scope that is an HTML element with the same tag name as that
                //  of the token, then this is a parse error; ignore the token."
                if !self
                    .open_elements
                    .has_in_scope(&self.tree, name, Scope::Default)
                {
                    self.parse_error("end tag without matching open element");
                    return;
                }

                // "1. Generate implied end tags.
                //  2. If the current node is not an HTML element with the same
                //     tag name as that of the token, then this is a parse error.
                //  3. Pop elements from the stack of open elements until an
                //     HTML element with the same tag name as the token has been
                //     popped from the stack."
                self.open_elements.generate_implied_end_tags(&self.tree, None);
                if !self.current_node_is(name) {
                    self.parse_error("end tag with open child elements");
                }
                let _ = self.open_elements.pop_tag(&self.tree, name);
            }

            // "An end tag whose tag name is "form""
            "form" => self.in_body_form_end_tag(),

            // "An end tag whose tag name is "p": If the stack of open elements
            //  does not have a p element in button scope, then this is a parse
            //  error; insert an HTML element for a "p" start tag token with no
            //  attributes. Close a p element."
            "p" => {
                if !self.has_p_in_button_scope() {
                    self.parse_error("p end tag without open p");
                    let _ = self.insert_html_element(&Token::start_tag("p"));
                }
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            // "An end tag whose tag name is one of: "dd", "dt""
            "li" | "dd" | "dt" => {
                let scope = if name == "li" {
                    Scope::ListItem
                } else {
                    Scope::Default
                };

                // "If the stack of open elements does not have an element in
                //  (list item) scope that is an HTML element with the same tag
                //  name as that of the token, then this is a parse error;
                //  ignore the token."
                if !self.open_elements.has_in_scope(&self.tree, name, scope) {
                    self.parse_error("list item end tag without open item");
                    return;
                }

                // "1. Generate implied end tags, except for HTML elements with
                //     the same tag name as the token.
                //  2. If the current node is not an HTML element with the same
                //     tag name as that of the token, then this is a parse error.
                //  3. Pop elements from the stack of open elements until an HTML
                //     element with the same tag name as the token has been popped
                //     from the stack."
                self.open_elements
                    .generate_implied_end_tags(&self.tree, Some(name));
                if !self.current_node_is(name) {
                    self.parse_error("list item end tag with open child elements");
                }
                let _ = self.open_elements.pop_tag(&self.tree, name);
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            _ if is_heading(name) => {
                // "If the stack of open elements does not have an element in
                //  scope that is an HTML element and whose tag name is one of
                //  "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                //  error; ignore the token."
                if !self
                    .open_elements
                    .has_any_in_scope(&self.tree, HEADINGS, Scope::Default)
                {
                    self.parse_error("heading end tag without open heading");
                    return;
                }

                // "1. Generate implied end tags.
                //  2. If the current node is not an HTML element with the same
                //     tag name as that of the token, then this is a parse error.
                //  3. Pop elements from the stack of open elements until an HTML
                //     element whose tag name is one of "h1", "h2", "h3", "h4",
                //     "h5", or "h6" has been popped from the stack."
                self.open_elements.generate_implied_end_tags(&self.tree, None);
                if !self.current_node_is(name) {
                    self.parse_error("heading end tag does not match");
                }
                self.open_elements.pop_until_one_of(&self.tree, HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            //  "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            //  "tt", "u": Run the adoption agency algorithm for the token."
            _ if is_formatting(name) => {
                if !self.run_adoption_agency(name) {
                    self.any_other_end_tag(name);
                }
            }

            // "An end tag token whose tag name is one of: "applet", "marquee", "object""
            _ if is_marker_element(name) => {
                // "If the stack of open elements does not have an element in
                //  scope that is an HTML element with the same tag name as that
                //  of the token, then this is a parse error; ignore the token."
                if !self
                    .open_elements
                    .has_in_scope(&self.tree, name, Scope::Default)
                {
                    self.parse_error("end tag without matching open element");
                    return;
                }

                // "1. Generate implied end tags.
                //  2. If the current node is not an HTML element with the same
                //     tag name as that of the token, then this is a parse error.
                //  3. Pop elements from the stack of open elements until an HTML
                //     element with the same tag name as the token has been popped
                //     from the stack.
                //  4. Clear the list of active formatting elements up to the last marker."
                self.open_elements.generate_implied_end_tags(&self.tree, None);
                if !self.current_node_is(name) {
                    self.parse_error("end tag with open child elements");
                }
                let _ = self.open_elements.pop_tag(&self.tree, name);
                self.active_formatting.clear_to_last_marker();
            }

            // "An end tag whose tag name is "br": Parse error. Drop the
            //  attributes from the token, and act as described in the next
            //  entry; i.e. act as if this was a "br" start tag token with no
            //  attributes, rather than the end tag token that it actually is."
            "br" => {
                self.parse_error("br end tag");
                self.in_body_start_tag(&Token::start_tag("br"), "br");
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(name),
        }
    }

    /// "An end tag whose tag name is "form""
    fn in_body_form_end_tag(&mut self) {
        // "If there is no template element on the stack of open elements, then
        //  run these substeps:"
        if !self.template_is_open() {
            // "1. Let node be the element that the form element pointer is set to,
            //     or null if it is not set to an element.
            //  2. Set the form element pointer to null.
            //  3. If node is null or if the stack of open elements does not have
            //     node in scope, then this is a parse error; return and ignore
            //     the token."
            let node = self.form_element_pointer.take();
            let Some(node) = node.filter(|&n| {
                self.open_elements
                    .has_node_in_scope(&self.tree, n, Scope::Default)
            }) else {
                self.parse_error("form end tag without open form");
                return;
            };

            // "4. Generate implied end tags.
            //  5. If the current node is not node, then this is a parse error.
            //  6. Remove node from the stack of open elements."
            self.open_elements.generate_implied_end_tags(&self.tree, None);
            if self.current_node() != Some(node) {
                self.parse_error("form end tag with open child elements");
            }
            self.open_elements.remove_element(node);
            return;
        }

        // "If there is a template element on the stack of open elements, then
        //  run these substeps instead:
        //  1. If the stack of open elements does not have a form element in
        //     scope, then this is a parse error; return and ignore the token.
        //  2. Generate implied end tags.
        //  3. If the current node is not a form element, then this is a parse error.
        //  4. Pop elements from the stack of open elements until a form element
        //     has been popped from the stack."
        if !self
            .open_elements
            .has_in_scope(&self.tree, "form", Scope::Default)
        {
            self.parse_error("form end tag without open form");
            return;
        }
        self.open_elements.generate_implied_end_tags(&self.tree, None);
        if !self.current_node_is("form") {
            self.parse_error("form end tag with open child elements");
        }
        let _ = self.open_elements.pop_tag(&self.tree, "form");
    }

    /// The `li` start tag steps, shared with `dd`/`dt` (`closes` lists the
    /// names that close each other).
    fn in_body_list_item(&mut self, token: &Token, closes: &[&str]) {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        // STEP 2: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.open_elements.len()).rev() {
            let Some(node) = self.open_elements.get(index) else {
                break;
            };
            let Some(element) = self.tree.as_element(node) else {
                break;
            };

            // STEP 3: "Loop: If node is an li element, then run these substeps:
            //          1. Generate implied end tags, except for li elements.
            //          2. If the current node is not an li element, then this is
            //             a parse error.
            //          3. Pop elements from the stack of open elements until an
            //             li element has been popped from the stack.
            //          4. Jump to the step labeled done below."
            if element.namespace == Namespace::Html && closes.contains(&element.tag_name.as_str())
            {
                let name = element.tag_name.clone();
                self.open_elements
                    .generate_implied_end_tags(&self.tree, Some(&name));
                if !self.current_node_is(&name) {
                    self.parse_error("list item with open child elements");
                }
                let _ = self.open_elements.pop_tag(&self.tree, &name);
                break;
            }

            // STEP 4: "If node is in the special category, but is not an
            //          address, div, or p element, then jump to the step
            //          labeled done below."
            if is_special(element)
                && !(element.is_html("address") || element.is_html("div") || element.is_html("p"))
            {
                break;
            }

            // STEP 5: "Otherwise, set node to the previous entry in the stack
            //          of open elements and return to the step labeled loop."
        }

        // STEP 6: "Done: If the stack of open elements has a p element in
        //          button scope, then close a p element."
        self.close_p_if_in_button_scope();

        // STEP 7: "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(token);
    }

    fn insert_formatting_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let element = self.insert_html_element(token);
        self.active_formatting.push(element, token.clone());
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "When the steps above say the user agent is to close a p element, it
    /// means that the user agent must run the following steps:
    /// 1. Generate implied end tags, except for p elements.
    /// 2. If the current node is not a p element, then this is a parse error.
    /// 3. Pop elements from the stack of open elements until a p element has
    ///    been popped from the stack."
    pub(crate) fn close_p_element(&mut self) {
        self.open_elements
            .generate_implied_end_tags(&self.tree, Some("p"));
        if !self.current_node_is("p") {
            self.parse_error("p closed with open child elements");
        }
        let _ = self.open_elements.pop_tag(&self.tree, "p");
    }

    fn close_p_if_in_button_scope(&mut self) {
        if self.has_p_in_button_scope() {
            self.close_p_element();
        }
    }

    pub(crate) fn template_is_open(&self) -> bool {
        self.open_elements
            .find_last(&self.tree, "template")
            .is_some()
    }

    /// The body element when it is the second entry on the stack.
    fn second_element_if_body(&self) -> Option<NodeId> {
        self.open_elements
            .get(1)
            .filter(|&id| self.is_html_element(id, "body"))
    }

    /// Adds the token's attributes that `element` does not already have.
    fn merge_attributes(&mut self, element: NodeId, token: &Token) {
        let Token::StartTag { attributes, .. } = token else {
            return;
        };
        if let Some(data) = self.tree.as_element_mut(element) {
            for Attribute { name, value } in attributes {
                if !data.attrs.contains(name) {
                    data.attrs.push(DomAttribute::new(name, value));
                }
            }
        }
    }

    /// Whether an element other than the ones the end of the body may leave
    /// open is on the stack.
    fn has_unclosed_elements(&self) -> bool {
        self.open_elements.iter().any(|id| {
            self.tree.as_element(id).is_some_and(|e| {
                !(e.namespace == Namespace::Html
                    && matches!(
                        e.tag_name.as_str(),
                        "dd" | "dt"
                            | "li"
                            | "optgroup"
                            | "option"
                            | "p"
                            | "rb"
                            | "rp"
                            | "rt"
                            | "rtc"
                            | "tbody"
                            | "td"
                            | "tfoot"
                            | "th"
                            | "thead"
                            | "tr"
                            | "body"
                            | "html"
                    ))
            })
        })
    }
}
