use sprig_dom::Namespace;

use crate::parser::open_elements::Scope;
use crate::parser::{HTMLParser, InsertionMode};
use crate::tokenizer::{Token, TokenizerState};

impl HTMLParser {
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(crate) fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            //  Insert the character."
            Token::Character { data } => {
                let (whitespace, rest) = Self::split_leading_whitespace(data);
                self.insert_characters(whitespace);
                if !rest.is_empty() {
                    self.handle_in_head_anything_else(&Token::text(rest));
                }
            }

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in head"),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html": Process the token
                //  using the rules for the "in body" insertion mode."
                "html" => self.process_in_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is one of: "base", "basefont",
                //  "bgsound", "link": Insert an HTML element for the token.
                //  Immediately pop the current node off the stack of open
                //  elements. Acknowledge the token's self-closing flag, if it
                //  is set."
                //
                // "A start tag whose tag name is "meta"": the same, then the
                //  encoding steps, which do not apply to string input.
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                }

                // "A start tag whose tag name is "title": Follow the generic
                //  RCDATA element parsing algorithm."
                "title" => self.parse_text_element(token, TokenizerState::RCDATA),

                // "A start tag whose tag name is "noscript", if the scripting
                //  flag is enabled / A start tag whose tag name is one of:
                //  "noframes", "style": Follow the generic raw text element
                //  parsing algorithm."
                "noscript" if self.config.scripting => {
                    self.parse_text_element(token, TokenizerState::RAWTEXT);
                }
                "noframes" | "style" => self.parse_text_element(token, TokenizerState::RAWTEXT),

                // "A start tag whose tag name is "noscript", if the scripting
                //  flag is disabled: Insert an HTML element for the token.
                //  Switch the insertion mode to "in head noscript"."
                "noscript" => {
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InHeadNoscript;
                }

                // "A start tag whose tag name is "script""
                "script" => self.insert_script_element(token),

                // "A start tag whose tag name is "template""
                "template" => {
                    // "Insert an HTML element for the token."
                    let _ = self.insert_html_element(token);
                    // "Insert a marker at the end of the list of active
                    //  formatting elements."
                    self.active_formatting.insert_marker();
                    // "Set the frameset-ok flag to "not ok"."
                    self.frameset_ok = false;
                    // "Switch the insertion mode to "in template"."
                    self.insertion_mode = InsertionMode::InTemplate;
                    // "Push "in template" onto the stack of template insertion
                    //  modes so that it is the new current template insertion mode."
                    self.template_insertion_modes.push(InsertionMode::InTemplate);
                }

                // "A start tag whose tag name is "head": Parse error. Ignore the token."
                "head" => self.parse_error("unexpected head start tag in head"),

                _ => self.handle_in_head_anything_else(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "head": Pop the current node
                //  (which will be the head element) off the stack of open
                //  elements. Switch the insertion mode to "after head"."
                "head" => {
                    let _ = self.open_elements.pop();
                    self.insertion_mode = InsertionMode::AfterHead;
                }

                // "An end tag whose tag name is one of: "body", "html", "br":
                //  Act as described in the "anything else" entry below."
                "body" | "html" | "br" => self.handle_in_head_anything_else(token),

                // "An end tag whose tag name is "template""
                "template" => self.close_template_element(),

                // "Any other end tag: Parse error. Ignore the token."
                _ => self.parse_error("unexpected end tag in head"),
            },

            Token::EndOfFile => self.handle_in_head_anything_else(token),
        }
    }

    /// "Pop the current node (which will be the head element) off the stack
    /// of open elements. Switch the insertion mode to "after head".
    /// Reprocess the token."
    fn handle_in_head_anything_else(&mut self, token: &Token) {
        let _ = self.open_elements.pop();
        self.insertion_mode = InsertionMode::AfterHead;
        self.process_token(token);
    }

    /// [§ 13.2.6.4.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    /// "A start tag whose tag name is "script""
    fn insert_script_element(&mut self, token: &Token) {
        // STEP 1: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let place = self.appropriate_place_for_inserting(None);

        // STEP 2: "Let the element be the result of creating an element for
        //          the token in the given namespace, with the intended parent
        //          being the element in which the adjusted insertion location
        //          finds itself."
        // STEP 3: "Set the element's parser document to the Document, and
        //          set the element's force async to false."
        let script = self.create_element_for_token(token, Namespace::Html);

        // STEP 5: "Insert the newly created element at the adjusted
        //          insertion location."
        self.insert_at(place, script);

        // STEP 6: "Push the element onto the stack of open elements so that
        //          it is the new current node."
        self.open_elements.push(script);

        // STEP 7: "Switch the tokenizer to the script data state."
        self.tokenizer.set_state(TokenizerState::ScriptData);

        // STEP 8: "Set the original insertion mode to the current insertion mode."
        self.original_insertion_mode = Some(self.insertion_mode);

        // STEP 9: "Switch the insertion mode to "text"."
        self.insertion_mode = InsertionMode::Text;
    }

    /// "An end tag whose tag name is "template"", shared by in head and in
    /// template.
    pub(crate) fn close_template_element(&mut self) {
        // "If there is no template element on the stack of open elements,
        //  then this is a parse error; ignore the token."
        if self.open_elements.find_last(&self.tree, "template").is_none() {
            self.parse_error("template end tag without an open template");
            return;
        }

        // "Generate all implied end tags thoroughly."
        self.open_elements
            .generate_all_implied_end_tags_thoroughly(&self.tree);

        // "If the current node is not a template element, then this is a parse error."
        if !self.current_node_is("template") {
            self.parse_error("template end tag with open child elements");
        }

        // "Pop elements from the stack of open elements until a template
        //  element has been popped from the stack."
        let _ = self.open_elements.pop_tag(&self.tree, "template");

        // "Clear the list of active formatting elements up to the last marker."
        self.active_formatting.clear_to_last_marker();

        // "Pop the current template insertion mode off the stack of template
        //  insertion modes."
        let _ = self.template_insertion_modes.pop();

        // "Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(crate) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in noscript"),

            // "A start tag whose tag name is "html": Process the token using
            //  the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "noscript": Pop the current node
            //  (which will be a noscript element) from the stack of open
            //  elements; the new current node will be a head element. Switch
            //  the insertion mode to "in head"."
            Token::EndTag { name } if name == "noscript" => {
                let _ = self.open_elements.pop();
                self.insertion_mode = InsertionMode::InHead;
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            //  A comment token / A start tag whose tag name is one of:
            //  "basefont", "bgsound", "link", "meta", "noframes", "style":
            //  Process the token using the rules for the "in head" insertion mode."
            Token::Character { data } => {
                let (whitespace, rest) = Self::split_leading_whitespace(data);
                if !whitespace.is_empty() {
                    self.process_in_mode(InsertionMode::InHead, &Token::text(whitespace));
                }
                if !rest.is_empty() {
                    self.handle_in_head_noscript_anything_else(&Token::text(rest));
                }
            }
            Token::Comment { .. } => self.process_in_mode(InsertionMode::InHead, token),
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.process_in_mode(InsertionMode::InHead, token);
            }

            // "An end tag whose tag name is "br": Act as described in the
            //  "anything else" entry below."
            Token::EndTag { name } if name == "br" => {
                self.handle_in_head_noscript_anything_else(token);
            }

            // "A start tag whose tag name is one of: "head", "noscript" /
            //  Any other end tag: Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" || name == "noscript" => {
                self.parse_error("unexpected start tag in noscript");
            }
            Token::EndTag { .. } => self.parse_error("unexpected end tag in noscript"),

            _ => self.handle_in_head_noscript_anything_else(token),
        }
    }

    /// "Parse error. Pop the current node (which will be a noscript element)
    /// from the stack of open elements; the new current node will be a head
    /// element. Switch the insertion mode to "in head". Reprocess the token."
    fn handle_in_head_noscript_anything_else(&mut self, token: &Token) {
        self.parse_error("unexpected token in noscript");
        let _ = self.open_elements.pop();
        self.insertion_mode = InsertionMode::InHead;
        self.process_token(token);
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(crate) fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            //  Insert the character."
            Token::Character { data } => {
                let (whitespace, rest) = Self::split_leading_whitespace(data);
                self.insert_characters(whitespace);
                if !rest.is_empty() {
                    self.handle_after_head_anything_else(&Token::text(rest));
                }
            }

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE after head"),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html": Process the token
                //  using the rules for the "in body" insertion mode."
                "html" => self.process_in_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is "body": Insert an HTML element
                //  for the token. Set the frameset-ok flag to "not ok". Switch
                //  the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_html_element(token);
                    self.frameset_ok = false;
                    self.insertion_mode = InsertionMode::InBody;
                }

                // "A start tag whose tag name is "frameset": Insert an HTML
                //  element for the token. Switch the insertion mode to "in frameset"."
                "frameset" => {
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InFrameset;
                }

                // "A start tag whose tag name is one of: "base", "basefont",
                //  "bgsound", "link", "meta", "noframes", "script", "style",
                //  "template", "title""
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => {
                    // "Parse error."
                    self.parse_error("head element after head");

                    // "Push the node pointed to by the head element pointer
                    //  onto the stack of open elements."
                    let Some(head) = self.head_element_pointer else {
                        self.process_in_mode(InsertionMode::InHead, token);
                        return;
                    };
                    self.open_elements.push(head);

                    // "Process the token using the rules for the "in head"
                    //  insertion mode."
                    self.process_in_mode(InsertionMode::InHead, token);

                    // "Remove the node pointed to by the head element pointer
                    //  from the stack of open elements. (It might not be the
                    //  current node at this point.)"
                    self.open_elements.remove_element(head);
                }

                // "A start tag whose tag name is "head": Parse error. Ignore the token."
                "head" => self.parse_error("unexpected head start tag after head"),

                _ => self.handle_after_head_anything_else(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "template": Process the token
                //  using the rules for the "in head" insertion mode."
                "template" => self.process_in_mode(InsertionMode::InHead, token),

                // "An end tag whose tag name is one of: "body", "html", "br":
                //  Act as described in the "anything else" entry below."
                "body" | "html" | "br" => self.handle_after_head_anything_else(token),

                // "Any other end tag: Parse error. Ignore the token."
                _ => self.parse_error("unexpected end tag after head"),
            },

            Token::EndOfFile => self.handle_after_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "body" start tag token with no
    /// attributes. Switch the insertion mode to "in body". Reprocess the
    /// current token."
    fn handle_after_head_anything_else(&mut self, token: &Token) {
        let _ = self.insert_html_element(&Token::start_tag("body"));
        self.insertion_mode = InsertionMode::InBody;
        self.process_token(token);
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(crate) fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token: Insert the token's character."
            Token::Character { data } => self.insert_characters(data),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "Parse error."
                self.parse_error("eof in text element");

                // "If the current node is a script element, then set its
                //  already started to true."
                self.mark_script_started();

                // "Pop the current node off the stack of open elements."
                let _ = self.open_elements.pop();

                // "Switch the insertion mode to the original insertion mode
                //  and reprocess the token."
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);
                self.process_token(token);
            }

            // "An end tag whose tag name is "script""
            Token::EndTag { name } if name == "script" && self.current_node_is("script") => {
                // "Let script be the current node (which will be a script element)."
                let Some(script) = self.current_node() else {
                    return;
                };
                self.mark_script_started();

                // "Pop the current node off the stack of open elements."
                let _ = self.open_elements.pop();

                // "Switch the insertion mode to the original insertion mode."
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);

                // "Prepare the script element script." Running it is the
                // handler's business; it may pause the parser or write
                // markup at the insertion point.
                self.run_script_handler(script);
            }

            // "Any other end tag: Pop the current node off the stack of open
            //  elements. Switch the insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.open_elements.pop();
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);
            }

            // The tokenizer only produces text and end tags in the text states.
            _ => {}
        }
    }

    fn mark_script_started(&mut self) {
        if let Some(script) = self.current_node()
            && self.is_html_element(script, "script")
            && let Some(element) = self.tree.as_element_mut(script)
        {
            element.flags.already_started = true;
        }
    }

    /// Whether a `p` element is in button scope. Used by every block start tag.
    pub(crate) fn has_p_in_button_scope(&self) -> bool {
        self.open_elements
            .has_in_scope(&self.tree, "p", Scope::Button)
    }
}
