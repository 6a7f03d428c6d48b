use crate::parser::{HTMLParser, InsertionMode};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(crate) fn handle_in_template_mode(&mut self, token: &Token) {
        match token {
            // "A character token / A comment token / A DOCTYPE token: Process
            //  the token using the rules for the "in body" insertion mode."
            Token::Character { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.process_in_mode(InsertionMode::InBody, token);
            }

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is one of: "base", "basefont",
                //  "bgsound", "link", "meta", "noframes", "script", "style",
                //  "template", "title": Process the token using the rules for
                //  the "in head" insertion mode."
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => {
                    self.process_in_mode(InsertionMode::InHead, token);
                }

                // "A start tag whose tag name is one of: "caption", "colgroup",
                //  "tbody", "tfoot", "thead": Pop the current template
                //  insertion mode off the stack of template insertion modes.
                //  Push "in table" onto the stack of template insertion modes
                //  so that it is the new current template insertion mode.
                //  Switch the insertion mode to "in table", and reprocess the token."
                "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => {
                    self.switch_template_mode(InsertionMode::InTable, token);
                }

                // "A start tag whose tag name is "col": ... "in column group""
                "col" => self.switch_template_mode(InsertionMode::InColumnGroup, token),

                // "A start tag whose tag name is "tr": ... "in table body""
                "tr" => self.switch_template_mode(InsertionMode::InTableBody, token),

                // "A start tag whose tag name is one of: "td", "th": ... "in row""
                "td" | "th" => self.switch_template_mode(InsertionMode::InRow, token),

                // "Any other start tag: ... "in body""
                _ => self.switch_template_mode(InsertionMode::InBody, token),
            },

            // "An end tag whose tag name is "template": Process the token using
            //  the rules for the "in head" insertion mode."
            Token::EndTag { name } if name == "template" => {
                self.process_in_mode(InsertionMode::InHead, token);
            }

            // "Any other end tag: Parse error. Ignore the token."
            Token::EndTag { .. } => self.parse_error("unexpected end tag in template"),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                //  elements, then stop parsing. (fragment case)"
                if !self.template_is_open() {
                    self.finish();
                    return;
                }

                // "Otherwise, this is a parse error.
                //  Pop elements from the stack of open elements until a template
                //  element has been popped from the stack.
                //  Clear the list of active formatting elements up to the last marker.
                //  Pop the current template insertion mode off the stack of
                //  template insertion modes.
                //  Reset the insertion mode appropriately.
                //  Reprocess the token."
                self.parse_error("eof in template");
                let _ = self.open_elements.pop_tag(&self.tree, "template");
                self.active_formatting.clear_to_last_marker();
                let _ = self.template_insertion_modes.pop();
                self.reset_insertion_mode_appropriately();
                self.process_token(token);
            }
        }
    }

    fn switch_template_mode(&mut self, mode: InsertionMode, token: &Token) {
        let _ = self.template_insertion_modes.pop();
        self.template_insertion_modes.push(mode);
        self.insertion_mode = mode;
        self.process_token(token);
    }
}
