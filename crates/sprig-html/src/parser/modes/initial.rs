use sprig_dom::{Namespace, NodeId, QuirksMode};

use crate::parser::quirks::{is_doctype_parse_error, quirks_mode_for_doctype};
use crate::parser::{HTMLParser, InsertionMode};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(crate) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            //  U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            //  RETURN (CR), or U+0020 SPACE: Ignore the token."
            Token::Character { data } => {
                let (_, rest) = Self::split_leading_whitespace(data);
                if !rest.is_empty() {
                    self.handle_initial_anything_else(&Token::text(rest));
                }
            }

            // "A comment token: Insert a comment as the last child of the
            //  Document object."
            Token::Comment { data } => self.insert_comment(data, Some((NodeId::ROOT, None))),

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                // "If the DOCTYPE token's name is not "html", or the token's
                //  public identifier is not missing, or the token's system
                //  identifier is neither missing nor "about:legacy-compat",
                //  then there is a parse error."
                if is_doctype_parse_error(
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                ) {
                    self.parse_error("unexpected DOCTYPE identifiers");
                }

                // "Append a DocumentType node to the Document node, with its
                //  name set to the name given in the DOCTYPE token, or the
                //  empty string if the name was missing; its public ID set to
                //  the public identifier given in the DOCTYPE token, or the
                //  empty string if the public identifier was missing; and its
                //  system ID set to the system identifier given in the DOCTYPE
                //  token, or the empty string if the system identifier was
                //  missing."
                let doctype = self.tree.create_doctype(
                    name.as_deref().unwrap_or_default(),
                    public_identifier.as_deref().unwrap_or_default(),
                    system_identifier.as_deref().unwrap_or_default(),
                );
                self.tree.append_child(NodeId::ROOT, doctype);

                // "Then, if the document is not an iframe srcdoc document, and
                //  the parser cannot change the mode flag is false, and the
                //  DOCTYPE token matches one of the conditions in the following
                //  list, then set the Document to quirks mode..."
                let mode = quirks_mode_for_doctype(
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                    *force_quirks,
                );
                self.tree.set_quirks_mode(mode);

                // "Then, switch the insertion mode to "before html"."
                self.insertion_mode = InsertionMode::BeforeHtml;
            }

            _ => self.handle_initial_anything_else(token),
        }
    }

    /// "If the document is not an iframe srcdoc document, then this is a
    /// parse error; if the parser cannot change the mode flag is false, set
    /// the Document to quirks mode. In any case, switch the insertion mode to
    /// "before html", then reprocess the token."
    fn handle_initial_anything_else(&mut self, token: &Token) {
        self.parse_error("missing DOCTYPE");
        self.tree.set_quirks_mode(QuirksMode::Quirks);
        self.insertion_mode = InsertionMode::BeforeHtml;
        self.process_token(token);
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(crate) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE before html"),

            // "A comment token: Insert a comment as the last child of the
            //  Document object."
            Token::Comment { data } => self.insert_comment(data, Some((NodeId::ROOT, None))),

            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            //  Ignore the token."
            Token::Character { data } => {
                let (_, rest) = Self::split_leading_whitespace(data);
                if !rest.is_empty() {
                    self.handle_before_html_anything_else(&Token::text(rest));
                }
            }

            // "A start tag whose tag name is "html": Create an element for the
            //  token in the HTML namespace, with the Document as the intended
            //  parent. Append it to the Document object. Put this element in
            //  the stack of open elements. Switch the insertion mode to
            //  "before head"."
            Token::StartTag { name, .. } if name == "html" => {
                let html = self.create_element_for_token(token, Namespace::Html);
                self.tree.append_child(NodeId::ROOT, html);
                self.open_elements.push(html);
                self.insertion_mode = InsertionMode::BeforeHead;
            }

            // "An end tag whose tag name is one of: "head", "body", "html",
            //  "br": Act as described in the "anything else" entry below."
            Token::EndTag { name } if matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.handle_before_html_anything_else(token);
            }

            // "Any other end tag: Parse error. Ignore the token."
            Token::EndTag { .. } => self.parse_error("unexpected end tag before html"),

            _ => self.handle_before_html_anything_else(token),
        }
    }

    /// "Create an html element whose node document is the Document object.
    /// Append it to the Document object. Put this element in the stack of
    /// open elements. Switch the insertion mode to "before head", then
    /// reprocess the token."
    fn handle_before_html_anything_else(&mut self, token: &Token) {
        let html = self.create_element_for_token(&Token::start_tag("html"), Namespace::Html);
        self.tree.append_child(NodeId::ROOT, html);
        self.open_elements.push(html);
        self.insertion_mode = InsertionMode::BeforeHead;
        self.process_token(token);
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(crate) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            //  Ignore the token."
            Token::Character { data } => {
                let (_, rest) = Self::split_leading_whitespace(data);
                if !rest.is_empty() {
                    self.handle_before_head_anything_else(&Token::text(rest));
                }
            }

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE before head"),

            // "A start tag whose tag name is "html": Process the token using
            //  the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "head": Insert an HTML element
            //  for the token. Set the head element pointer to the newly
            //  created head element. Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(token);
                self.head_element_pointer = Some(head);
                self.insertion_mode = InsertionMode::InHead;
            }

            // "An end tag whose tag name is one of: "head", "body", "html",
            //  "br": Act as described in the "anything else" entry below."
            Token::EndTag { name } if matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.handle_before_head_anything_else(token);
            }

            // "Any other end tag: Parse error. Ignore the token."
            Token::EndTag { .. } => self.parse_error("unexpected end tag before head"),

            _ => self.handle_before_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "head" start tag token with no
    /// attributes. Set the head element pointer to the newly created head
    /// element. Switch the insertion mode to "in head". Reprocess the current
    /// token."
    fn handle_before_head_anything_else(&mut self, token: &Token) {
        let head = self.insert_html_element(&Token::start_tag("head"));
        self.head_element_pointer = Some(head);
        self.insertion_mode = InsertionMode::InHead;
        self.process_token(token);
    }
}
