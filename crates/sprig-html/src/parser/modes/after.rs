use sprig_dom::NodeId;

use crate::parser::{HTMLParser, InsertionMode};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(crate) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            //  Process the token using the rules for the "in body" insertion mode."
            Token::Character { data } => {
                let (whitespace, rest) = Self::split_leading_whitespace(data);
                if !whitespace.is_empty() {
                    self.process_in_mode(InsertionMode::InBody, &Token::text(whitespace));
                }
                if !rest.is_empty() {
                    self.after_body_anything_else(&Token::text(rest));
                }
            }

            // "A comment token: Insert a comment as the last child of the first
            //  element in the stack of open elements (the html element)."
            Token::Comment { data } => {
                let html = self.open_elements.get(0).unwrap_or(NodeId::ROOT);
                self.insert_comment(data, Some((html, None)));
            }

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE after body"),

            // "A start tag whose tag name is "html": Process the token using
            //  the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "html": If the parser was created
            //  as part of the HTML fragment parsing algorithm, this is a parse
            //  error; ignore the token. (fragment case) Otherwise, switch the
            //  insertion mode to "after after body"."
            Token::EndTag { name } if name == "html" => {
                if self.fragment_context.is_some() {
                    self.parse_error("html end tag in fragment");
                } else {
                    self.insertion_mode = InsertionMode::AfterAfterBody;
                }
            }

            // "An end-of-file token: Stop parsing."
            Token::EndOfFile => self.finish(),

            _ => self.after_body_anything_else(token),
        }
    }

    /// "Anything else: Parse error. Switch the insertion mode to "in body" and
    /// reprocess the token."
    fn after_body_anything_else(&mut self, token: &Token) {
        self.parse_error("content after body");
        self.insertion_mode = InsertionMode::InBody;
        self.process_token(token);
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(crate) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } => self.insert_frameset_whitespace(data),

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in frameset"),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html": Process the token
                //  using the rules for the "in body" insertion mode."
                "html" => self.process_in_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is "frameset": Insert an HTML
                //  element for the token."
                "frameset" => {
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "frame": Insert an HTML
                //  element for the token. Immediately pop the current node off
                //  the stack of open elements. Acknowledge the token's
                //  self-closing flag, if it is set."
                "frame" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                }

                // "A start tag whose tag name is "noframes": Process the token
                //  using the rules for the "in head" insertion mode."
                "noframes" => self.process_in_mode(InsertionMode::InHead, token),

                _ => self.parse_error("unexpected start tag in frameset"),
            },

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                //  parse error; ignore the token. (fragment case)"
                if self.open_elements.len() <= 1 {
                    self.parse_error("frameset end tag at root");
                    return;
                }

                // "Otherwise, pop the current node from the stack of open elements."
                let _ = self.open_elements.pop();

                // "If the parser was not created as part of the HTML fragment
                //  parsing algorithm (fragment case), and the current node is
                //  no longer a frameset element, then switch the insertion mode
                //  to "after frameset"."
                if self.fragment_context.is_none() && !self.current_node_is("frameset") {
                    self.insertion_mode = InsertionMode::AfterFrameset;
                }
            }

            // "An end-of-file token: If the current node is not the root html
            //  element, then this is a parse error. Note: The current node can
            //  only be the root html element in the fragment case. Stop parsing."
            Token::EndOfFile => {
                if self.open_elements.len() > 1 {
                    self.parse_error("eof in frameset");
                }
                self.finish();
            }

            // "Anything else: Parse error. Ignore the token."
            Token::EndTag { .. } => self.parse_error("unexpected end tag in frameset"),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(crate) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } => self.insert_frameset_whitespace(data),

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE after frameset"),

            // "A start tag whose tag name is "html": Process the token using
            //  the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "html": Switch the insertion mode
            //  to "after after frameset"."
            Token::EndTag { name } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterFrameset;
            }

            // "A start tag whose tag name is "noframes": Process the token
            //  using the rules for the "in head" insertion mode."
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_in_mode(InsertionMode::InHead, token);
            }

            // "An end-of-file token: Stop parsing."
            Token::EndOfFile => self.finish(),

            // "Anything else: Parse error. Ignore the token."
            _ => self.parse_error("content after frameset"),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(crate) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A comment token: Insert a comment as the last child of the
            //  Document object."
            Token::Comment { data } => self.insert_comment(data, Some((NodeId::ROOT, None))),

            // "A DOCTYPE token / A character token that is one of U+0009
            //  CHARACTER TABULATION, ... / A start tag whose tag name is
            //  "html": Process the token using the rules for the "in body"
            //  insertion mode."
            Token::Doctype { .. } => self.process_in_mode(InsertionMode::InBody, token),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token);
            }
            Token::Character { data } => {
                let (whitespace, rest) = Self::split_leading_whitespace(data);
                if !whitespace.is_empty() {
                    self.process_in_mode(InsertionMode::InBody, &Token::text(whitespace));
                }
                if !rest.is_empty() {
                    self.after_body_anything_else(&Token::text(rest));
                }
            }

            // "An end-of-file token: Stop parsing."
            Token::EndOfFile => self.finish(),

            // "Anything else: Parse error. Switch the insertion mode to "in
            //  body" and reprocess the token."
            _ => self.after_body_anything_else(token),
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(crate) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            // "A comment token: Insert a comment as the last child of the
            //  Document object."
            Token::Comment { data } => self.insert_comment(data, Some((NodeId::ROOT, None))),

            Token::Doctype { .. } => self.process_in_mode(InsertionMode::InBody, token),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token);
            }
            Token::Character { data } => {
                let (whitespace, rest) = Self::split_leading_whitespace(data);
                if !whitespace.is_empty() {
                    self.process_in_mode(InsertionMode::InBody, &Token::text(whitespace));
                }
                if !rest.is_empty() {
                    self.parse_error("content after frameset");
                }
            }

            // "An end-of-file token: Stop parsing."
            Token::EndOfFile => self.finish(),

            // "A start tag whose tag name is "noframes": Process the token
            //  using the rules for the "in head" insertion mode."
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_in_mode(InsertionMode::InHead, token);
            }

            // "Anything else: Parse error. Ignore the token."
            _ => self.parse_error("content after frameset"),
        }
    }

    /// Frameset modes keep only the whitespace of a run: "A character token
    /// that is one of U+0009 CHARACTER TABULATION, ... Insert the character."
    /// Everything else is a parse error and dropped.
    fn insert_frameset_whitespace(&mut self, data: &str) {
        let whitespace: String = data.chars().filter(|&c| Self::is_whitespace(c)).collect();
        if whitespace.len() != data.len() {
            self.parse_error("text in frameset");
        }
        self.insert_characters(&whitespace);
    }
}
