use sprig_dom::Namespace;

use crate::parser::open_elements::Scope;
use crate::parser::tag_sets::{is_ignored_table_end_tag, is_table_content_start, is_table_section};
use crate::parser::{HTMLParser, InsertionMode};
use crate::tokenizer::Token;

/// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
/// "clear the stack back to a table context"
const TABLE_CONTEXT: &[&str] = &["table", "template", "html"];

/// "clear the stack back to a table body context"
const TABLE_BODY_CONTEXT: &[&str] = &["tbody", "tfoot", "thead", "template", "html"];

/// "clear the stack back to a table row context"
const TABLE_ROW_CONTEXT: &[&str] = &["tr", "template", "html"];

const TABLE_SECTIONS: &[&str] = &["tbody", "thead", "tfoot"];

impl HTMLParser {
    // ===== in table =====

    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(crate) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody,
            //  template, tfoot, thead, or tr element: Let the pending table
            //  character tokens be an empty list of tokens. Let the original
            //  insertion mode be the current insertion mode. Switch the
            //  insertion mode to "in table text" and reprocess the token."
            Token::Character { .. }
                if self.current_element().is_some_and(|e| {
                    e.namespace == Namespace::Html
                        && matches!(
                            e.tag_name.as_str(),
                            "table" | "tbody" | "template" | "tfoot" | "thead" | "tr"
                        )
                }) =>
            {
                self.pending_table_characters.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.insertion_mode = InsertionMode::InTableText;
                self.process_token(token);
            }

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in table"),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "caption": Clear the stack
                //  back to a table context. Insert a marker at the end of the
                //  list of active formatting elements. Insert an HTML element
                //  for the token, then switch the insertion mode to "in caption"."
                "caption" => {
                    self.open_elements
                        .clear_to_context(&self.tree, TABLE_CONTEXT);
                    self.active_formatting.insert_marker();
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InCaption;
                }

                // "A start tag whose tag name is "colgroup": Clear the stack
                //  back to a table context. Insert an HTML element for the
                //  token, then switch the insertion mode to "in column group"."
                "colgroup" => {
                    self.open_elements
                        .clear_to_context(&self.tree, TABLE_CONTEXT);
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InColumnGroup;
                }

                // "A start tag whose tag name is "col": Clear the stack back
                //  to a table context. Insert an HTML element for a "colgroup"
                //  start tag token with no attributes, then switch the
                //  insertion mode to "in column group". Reprocess the current token."
                "col" => {
                    self.open_elements
                        .clear_to_context(&self.tree, TABLE_CONTEXT);
                    let _ = self.insert_html_element(&Token::start_tag("colgroup"));
                    self.insertion_mode = InsertionMode::InColumnGroup;
                    self.process_token(token);
                }

                // "A start tag whose tag name is one of: "tbody", "tfoot",
                //  "thead": Clear the stack back to a table context. Insert an
                //  HTML element for the token, then switch the insertion mode
                //  to "in table body"."
                _ if is_table_section(name) => {
                    self.open_elements
                        .clear_to_context(&self.tree, TABLE_CONTEXT);
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InTableBody;
                }

                // "A start tag whose tag name is one of: "td", "th", "tr":
                //  Clear the stack back to a table context. Insert an HTML
                //  element for a "tbody" start tag token with no attributes,
                //  then switch the insertion mode to "in table body".
                //  Reprocess the current token."
                "td" | "th" | "tr" => {
                    self.open_elements
                        .clear_to_context(&self.tree, TABLE_CONTEXT);
                    let _ = self.insert_html_element(&Token::start_tag("tbody"));
                    self.insertion_mode = InsertionMode::InTableBody;
                    self.process_token(token);
                }

                // "A start tag whose tag name is "table": Parse error. If the
                //  stack of open elements does not have a table element in
                //  table scope, ignore the token. Otherwise: Pop elements from
                //  this stack until a table element has been popped from the
                //  stack. Reset the insertion mode appropriately. Reprocess the token."
                "table" => {
                    self.parse_error("nested table");
                    if self.close_table() {
                        self.process_token(token);
                    }
                }

                // "A start tag whose tag name is one of: "style", "script",
                //  "template": Process the token using the rules for the "in
                //  head" insertion mode."
                "style" | "script" | "template" => {
                    self.process_in_mode(InsertionMode::InHead, token);
                }

                // "A start tag whose tag name is "input": If the token does
                //  not have an attribute with the name "type", or if it does,
                //  but that attribute's value is not an ASCII case-insensitive
                //  match for the string "hidden", then: act as described in the
                //  "anything else" entry below. Otherwise: Parse error. Insert
                //  an HTML element for the token. Pop that input element off
                //  the stack of open elements. Acknowledge the token's
                //  self-closing flag, if it is set."
                "input"
                    if token
                        .attribute("type")
                        .is_some_and(|t| t.eq_ignore_ascii_case("hidden")) =>
                {
                    self.parse_error("hidden input in table");
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                }

                // "A start tag whose tag name is "form": Parse error. If there
                //  is a template element on the stack of open elements, or if
                //  the form element pointer is not null, ignore the token.
                //  Otherwise: Insert an HTML element for the token, and set the
                //  form element pointer to point to the element created. Pop
                //  that form element off the stack of open elements."
                "form" => {
                    self.parse_error("form in table");
                    if self.template_is_open() || self.form_element_pointer.is_some() {
                        return;
                    }
                    let form = self.insert_html_element(token);
                    self.form_element_pointer = Some(form);
                    let _ = self.open_elements.pop();
                }

                _ => self.in_table_anything_else(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "table": If the stack of open
                //  elements does not have a table element in table scope, this
                //  is a parse error; ignore the token. Otherwise: Pop elements
                //  from this stack until a table element has been popped from
                //  the stack. Reset the insertion mode appropriately."
                "table" => {
                    if !self.close_table() {
                        self.parse_error("table end tag without open table");
                    }
                }

                // "An end tag whose tag name is one of: "body", "caption",
                //  "col", "colgroup", "html", "tbody", "td", "tfoot", "th",
                //  "thead", "tr": Parse error. Ignore the token."
                _ if is_ignored_table_end_tag(name) => {
                    self.parse_error("unexpected end tag in table");
                }

                // "An end tag whose tag name is "template": Process the token
                //  using the rules for the "in head" insertion mode."
                "template" => self.process_in_mode(InsertionMode::InHead, token),

                _ => self.in_table_anything_else(token),
            },

            // "An end-of-file token: Process the token using the rules for the
            //  "in body" insertion mode."
            Token::EndOfFile => self.process_in_mode(InsertionMode::InBody, token),

            Token::Character { .. } => self.in_table_anything_else(token),
        }
    }

    /// "Anything else: Parse error. Enable foster parenting, process the token
    /// using the rules for the "in body" insertion mode, and then disable
    /// foster parenting."
    fn in_table_anything_else(&mut self, token: &Token) {
        self.parse_error("content foster-parented out of table");
        self.foster_parenting = true;
        self.process_in_mode(InsertionMode::InBody, token);
        self.foster_parenting = false;
    }

    /// Pop up to and including the table element and reset the insertion
    /// mode. Returns `false` if no table is in table scope.
    fn close_table(&mut self) -> bool {
        if !self
            .open_elements
            .has_in_scope(&self.tree, "table", Scope::Table)
        {
            return false;
        }
        let _ = self.open_elements.pop_tag(&self.tree, "table");
        self.reset_insertion_mode_appropriately();
        true
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(crate) fn handle_in_table_text_mode(&mut self, token: &Token) {
        // "A character token that is U+0000 NULL: Parse error. Ignore the token."
        // "Any other character token: Append the character token to the
        //  pending table character tokens list."
        if let Token::Character { data } = token {
            for c in data.chars() {
                if c == '\0' {
                    self.parse_error("unexpected-null-character in table text");
                } else {
                    self.pending_table_characters.push(c);
                }
            }
            return;
        }

        // "Anything else: If any of the tokens in the pending table character
        //  tokens list are character tokens that are not ASCII whitespace, then
        //  this is a parse error: reprocess the character tokens in the pending
        //  table character tokens list using the rules given in the "anything
        //  else" entry in the "in table" insertion mode. Otherwise, insert the
        //  characters given by the pending table character tokens list."
        let pending = std::mem::take(&mut self.pending_table_characters);
        if pending.chars().any(|c| !Self::is_whitespace(c)) {
            self.in_table_anything_else(&Token::text(pending));
        } else {
            self.insert_characters(&pending);
        }

        // "Switch the insertion mode to the original insertion mode and
        //  reprocess the token."
        self.insertion_mode = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InTable);
        self.process_token(token);
    }

    // ===== caption and column groups =====

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(crate) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag { name } if name == "caption" => {
                if !self.close_caption() {
                    self.parse_error("caption end tag without open caption");
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr" / An end
            //  tag whose tag name is "table": If the stack of open elements
            //  does not have a caption element in table scope, this is a parse
            //  error; ignore the token. (fragment case) Otherwise: Generate
            //  implied end tags. If the current node is not a caption element,
            //  then this is a parse error. Pop elements from this stack until a
            //  caption element has been popped from the stack. Clear the list
            //  of active formatting elements up to the last marker. Switch the
            //  insertion mode to "in table". Reprocess the token."
            Token::StartTag { name, .. } if is_table_content_start(name) => {
                if self.close_caption() {
                    self.process_token(token);
                } else {
                    self.parse_error("table content in caption without open caption");
                }
            }
            Token::EndTag { name } if name == "table" => {
                if self.close_caption() {
                    self.process_token(token);
                } else {
                    self.parse_error("table end tag in caption without open caption");
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            //  "html", "tbody", "td", "tfoot", "th", "thead", "tr": Parse
            //  error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th"
                        | "thead" | "tr"
                ) =>
            {
                self.parse_error("unexpected end tag in caption");
            }

            // "Anything else: Process the token using the rules for the "in
            //  body" insertion mode."
            _ => self.process_in_mode(InsertionMode::InBody, token),
        }
    }

    /// The shared caption-closing steps. Returns `false` if no caption is in
    /// table scope.
    fn close_caption(&mut self) -> bool {
        if !self
            .open_elements
            .has_in_scope(&self.tree, "caption", Scope::Table)
        {
            return false;
        }
        self.open_elements.generate_implied_end_tags(&self.tree, None);
        if !self.current_node_is("caption") {
            self.parse_error("caption closed with open child elements");
        }
        let _ = self.open_elements.pop_tag(&self.tree, "caption");
        self.active_formatting.clear_to_last_marker();
        self.insertion_mode = InsertionMode::InTable;
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(crate) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            //  Insert the character."
            Token::Character { data } => {
                let (whitespace, rest) = Self::split_leading_whitespace(data);
                self.insert_characters(whitespace);
                if !rest.is_empty() {
                    self.in_column_group_anything_else(&Token::text(rest));
                }
            }

            // "A comment token: Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in column group"),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html": Process the token
                //  using the rules for the "in body" insertion mode."
                "html" => self.process_in_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is "col": Insert an HTML element
                //  for the token. Immediately pop the current node off the
                //  stack of open elements. Acknowledge the token's self-closing
                //  flag, if it is set."
                "col" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                }

                // "A start tag whose tag name is "template": Process the token
                //  using the rules for the "in head" insertion mode."
                "template" => self.process_in_mode(InsertionMode::InHead, token),

                _ => self.in_column_group_anything_else(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "colgroup": If the current node
                //  is not a colgroup element, then this is a parse error;
                //  ignore the token. Otherwise, pop the current node from the
                //  stack of open elements. Switch the insertion mode to "in table"."
                "colgroup" => {
                    if self.current_node_is("colgroup") {
                        let _ = self.open_elements.pop();
                        self.insertion_mode = InsertionMode::InTable;
                    } else {
                        self.parse_error("colgroup end tag without open colgroup");
                    }
                }

                // "An end tag whose tag name is "col": Parse error. Ignore the token."
                "col" => self.parse_error("col end tag"),

                // "An end tag whose tag name is "template": Process the token
                //  using the rules for the "in head" insertion mode."
                "template" => self.process_in_mode(InsertionMode::InHead, token),

                _ => self.in_column_group_anything_else(token),
            },

            // "An end-of-file token: Process the token using the rules for the
            //  "in body" insertion mode."
            Token::EndOfFile => self.process_in_mode(InsertionMode::InBody, token),
        }
    }

    /// "Anything else: If the current node is not a colgroup element, then
    /// this is a parse error; ignore the token. Otherwise, pop the current
    /// node from the stack of open elements. Switch the insertion mode to "in
    /// table". Reprocess the token."
    fn in_column_group_anything_else(&mut self, token: &Token) {
        if !self.current_node_is("colgroup") {
            self.parse_error("unexpected token in column group");
            return;
        }
        let _ = self.open_elements.pop();
        self.insertion_mode = InsertionMode::InTable;
        self.process_token(token);
    }

    // ===== table body, rows and cells =====

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(crate) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is "tr": Clear the stack back to a
            //  table body context. Insert an HTML element for the token, then
            //  switch the insertion mode to "in row"."
            Token::StartTag { name, .. } if name == "tr" => {
                self.open_elements
                    .clear_to_context(&self.tree, TABLE_BODY_CONTEXT);
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "th", "td": Parse error.
            //  Clear the stack back to a table body context. Insert an HTML
            //  element for a "tr" start tag token with no attributes, then
            //  switch the insertion mode to "in row". Reprocess the current token."
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.parse_error("cell outside of row");
                self.open_elements
                    .clear_to_context(&self.tree, TABLE_BODY_CONTEXT);
                let _ = self.insert_html_element(&Token::start_tag("tr"));
                self.insertion_mode = InsertionMode::InRow;
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead":
            //  If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as the
            //  token, this is a parse error; ignore the token. Otherwise: Clear
            //  the stack back to a table body context. Pop the current node
            //  from the stack of open elements. Switch the insertion mode to
            //  "in table"."
            Token::EndTag { name } if is_table_section(name) => {
                if !self
                    .open_elements
                    .has_in_scope(&self.tree, name, Scope::Table)
                {
                    self.parse_error("table section end tag without open section");
                    return;
                }
                self.open_elements
                    .clear_to_context(&self.tree, TABLE_BODY_CONTEXT);
                let _ = self.open_elements.pop();
                self.insertion_mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "tfoot", "thead" / An end tag whose tag
            //  name is "table": If the stack of open elements does not have a
            //  tbody, thead, or tfoot element in table scope, this is a parse
            //  error; ignore the token. Otherwise: Clear the stack back to a
            //  table body context. Pop the current node from the stack of open
            //  elements. Switch the insertion mode to "in table". Reprocess
            //  the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.close_table_section_and_reprocess(token);
            }
            Token::EndTag { name } if name == "table" => {
                self.close_table_section_and_reprocess(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "td", "th", "tr": Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.parse_error("unexpected end tag in table body");
            }

            // "Anything else: Process the token using the rules for the "in
            //  table" insertion mode."
            _ => self.process_in_mode(InsertionMode::InTable, token),
        }
    }

    fn close_table_section_and_reprocess(&mut self, token: &Token) {
        if !self
            .open_elements
            .has_any_in_scope(&self.tree, TABLE_SECTIONS, Scope::Table)
        {
            self.parse_error("no open table section");
            return;
        }
        self.open_elements
            .clear_to_context(&self.tree, TABLE_BODY_CONTEXT);
        let _ = self.open_elements.pop();
        self.insertion_mode = InsertionMode::InTable;
        self.process_token(token);
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(crate) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "th", "td": Clear the
            //  stack back to a table row context. Insert an HTML element for
            //  the token, then switch the insertion mode to "in cell". Insert a
            //  marker at the end of the list of active formatting elements."
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.open_elements
                    .clear_to_context(&self.tree, TABLE_ROW_CONTEXT);
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InCell;
                self.active_formatting.insert_marker();
            }

            // "An end tag whose tag name is "tr": If the stack of open elements
            //  does not have a tr element in table scope, this is a parse
            //  error; ignore the token. Otherwise: Clear the stack back to a
            //  table row context. Pop the current node (which will be a tr
            //  element) from the stack of open elements. Switch the insertion
            //  mode to "in table body"."
            Token::EndTag { name } if name == "tr" => {
                if !self.close_row() {
                    self.parse_error("tr end tag without open row");
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "tfoot", "thead", "tr" / An end tag whose
            //  tag name is "table": If the stack of open elements does not have
            //  a tr element in table scope, this is a parse error; ignore the
            //  token. Otherwise: Clear the stack back to a table row context.
            //  Pop the current node (which will be a tr element) from the stack
            //  of open elements. Switch the insertion mode to "in table body".
            //  Reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if self.close_row() {
                    self.process_token(token);
                } else {
                    self.parse_error("no open row");
                }
            }
            Token::EndTag { name } if name == "table" => {
                if self.close_row() {
                    self.process_token(token);
                } else {
                    self.parse_error("no open row");
                }
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead":
            //  If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as the
            //  token, this is a parse error; ignore the token. If the stack of
            //  open elements does not have a tr element in table scope, ignore
            //  the token. Otherwise: Clear the stack back to a table row
            //  context. Pop the current node (which will be a tr element) from
            //  the stack of open elements. Switch the insertion mode to "in
            //  table body". Reprocess the token."
            Token::EndTag { name } if is_table_section(name) => {
                if !self
                    .open_elements
                    .has_in_scope(&self.tree, name, Scope::Table)
                {
                    self.parse_error("table section end tag without open section");
                    return;
                }
                if self.close_row() {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "td", "th": Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.parse_error("unexpected end tag in row");
            }

            // "Anything else: Process the token using the rules for the "in
            //  table" insertion mode."
            _ => self.process_in_mode(InsertionMode::InTable, token),
        }
    }

    /// Returns `false` if no tr is in table scope.
    fn close_row(&mut self) -> bool {
        if !self
            .open_elements
            .has_in_scope(&self.tree, "tr", Scope::Table)
        {
            return false;
        }
        self.open_elements
            .clear_to_context(&self.tree, TABLE_ROW_CONTEXT);
        let _ = self.open_elements.pop();
        self.insertion_mode = InsertionMode::InTableBody;
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(crate) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name } if name == "td" || name == "th" => {
                // "If the stack of open elements does not have an element in
                //  table scope that is an HTML element with the same tag name
                //  as that of the token, then this is a parse error; ignore the token."
                if !self
                    .open_elements
                    .has_in_scope(&self.tree, name, Scope::Table)
                {
                    self.parse_error("cell end tag without open cell");
                    return;
                }

                // "1. Generate implied end tags.
                //  2. If the current node is not an HTML element with the same
                //     tag name as the token, then this is a parse error.
                //  3. Pop elements from the stack of open elements until an HTML
                //     element with the same tag name as the token has been popped
                //     from the stack.
                //  4. Clear the list of active formatting elements up to the last marker.
                //  5. Switch the insertion mode to "in row"."
                self.open_elements.generate_implied_end_tags(&self.tree, None);
                if !self.current_node_is(name) {
                    self.parse_error("cell closed with open child elements");
                }
                let _ = self.open_elements.pop_tag(&self.tree, name);
                self.active_formatting.clear_to_last_marker();
                self.insertion_mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr": Assert:
            //  The stack of open elements has a td or th element in table
            //  scope. Close the cell (see below) and reprocess the token."
            Token::StartTag { name, .. } if is_table_content_start(name) => {
                if !self
                    .open_elements
                    .has_any_in_scope(&self.tree, &["td", "th"], Scope::Table)
                {
                    self.parse_error("table content without open cell");
                    return;
                }
                self.close_the_cell();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html": Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html"
                ) =>
            {
                self.parse_error("unexpected end tag in cell");
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            //  "thead", "tr": If the stack of open elements does not have an
            //  element in table scope that is an HTML element with the same tag
            //  name as that of the token, then this is a parse error; ignore
            //  the token. Otherwise, close the cell (see below) and reprocess
            //  the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "table" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if !self
                    .open_elements
                    .has_in_scope(&self.tree, name, Scope::Table)
                {
                    self.parse_error("end tag without open table element");
                    return;
                }
                self.close_the_cell();
                self.process_token(token);
            }

            // "Anything else: Process the token using the rules for the "in
            //  body" insertion mode."
            _ => self.process_in_mode(InsertionMode::InBody, token),
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// "1. Generate implied end tags.
    ///  2. If the current node is not now a td element or a th element, then
    ///     this is a parse error.
    ///  3. Pop elements from the stack of open elements stack until a td
    ///     element or a th element has been popped from the stack.
    ///  4. Clear the list of active formatting elements up to the last marker.
    ///  5. Switch the insertion mode to "in row"."
    fn close_the_cell(&mut self) {
        self.open_elements.generate_implied_end_tags(&self.tree, None);
        if !self.current_node_is("td") && !self.current_node_is("th") {
            self.parse_error("cell closed with open child elements");
        }
        self.open_elements
            .pop_until_one_of(&self.tree, &["td", "th"]);
        self.active_formatting.clear_to_last_marker();
        self.insertion_mode = InsertionMode::InRow;
    }
}
