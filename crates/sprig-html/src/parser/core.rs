use strum_macros::Display;

use sprig_common::warning::warn_once;
use sprig_dom::{DomTree, ElementData, Namespace, NodeId, QuirksMode};

use super::active_formatting::ActiveFormattingElements;
use super::foreign_content::{is_html_integration_point, is_mathml_text_integration_point};
use super::open_elements::OpenElements;
use super::tag_sets::is_void;
use crate::config::ParserConfig;
use crate::tokenizer::{HTMLTokenizer, Token, TokenizerIssue, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// Which stage reported a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParseIssueKind {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    #[strum(to_string = "tokenizer")]
    Tokenizer,
    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
    #[strum(to_string = "tree construction")]
    TreeConstruction,
}

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// "This specification defines the parsing rules for HTML documents...
/// The handling of parse errors is well-defined."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Description of the parse error. Tokenizer errors use the WHATWG error code.
    pub message: String,
    /// Stage that reported it.
    pub kind: ParseIssueKind,
    /// Line and column (1-based) of the input at the time of the error.
    pub position: (usize, usize),
}

/// Callback run when a `script` end tag is processed. It may call
/// [`HTMLParser::pause`], [`HTMLParser::resume`] or [`HTMLParser::write`].
pub type ScriptHandler = Box<dyn FnMut(&mut HTMLParser, NodeId)>;

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser. Owns the tokenizer and pulls tokens from it as input
/// arrives through [`Self::feed`], building a [`DomTree`].
pub struct HTMLParser {
    pub(crate) tokenizer: HTMLTokenizer,

    /// DOM tree with parent/sibling pointers.
    /// `NodeId::ROOT` (index 0) is the Document node.
    pub(crate) tree: DomTree,

    pub(crate) config: ParserConfig,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(crate) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    /// "the original insertion mode"
    pub(crate) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    /// "the stack of template insertion modes"
    pub(crate) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(crate) open_elements: OpenElements,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(crate) active_formatting: ActiveFormattingElements,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(crate) head_element_pointer: Option<NodeId>,

    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(crate) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    /// "The frameset-ok flag is set to "ok" when the parser is created."
    pub(crate) frameset_ok: bool,

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(crate) foster_parenting: bool,

    /// Set after `pre`, `listing` and `textarea` start tags: "If the next
    /// token is a U+000A LINE FEED (LF) character token, then ignore that token".
    pub(crate) ignore_next_line_feed: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    /// "the pending table character tokens"
    pub(crate) pending_table_characters: String,

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    /// The context element of the fragment case.
    pub(crate) fragment_context: Option<NodeId>,

    /// Nesting count of [`Self::pause`] calls.
    pause_depth: usize,

    /// Set by the end-of-file token or [`Self::stop_parsing`].
    stopped: bool,

    /// True while the script handler runs.
    running_script: bool,

    /// Parse issues encountered during parsing.
    issues: Vec<ParseIssue>,

    script_handler: Option<ScriptHandler>,
}

impl Default for HTMLParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HTMLParser {
    /// Create a document parser with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a document parser.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        // DomTree::new() creates the Document node at NodeId::ROOT
        Self {
            tokenizer: HTMLTokenizer::with_config(config),
            tree: DomTree::new(),
            config,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            open_elements: OpenElements::new(),
            active_formatting: ActiveFormattingElements::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            frameset_ok: true,
            foster_parenting: false,
            ignore_next_line_feed: false,
            pending_table_characters: String::new(),
            fragment_context: None,
            pause_depth: 0,
            stopped: false,
            running_script: false,
            issues: Vec::new(),
            script_handler: None,
        }
    }

    // ===== input =====

    /// Feed a chunk of markup. With `is_last` the input is declared complete
    /// and parsing runs to the end-of-file token. Does nothing once parsing
    /// has stopped.
    pub fn feed(&mut self, chunk: &str, is_last: bool) {
        if self.stopped {
            return;
        }
        self.tokenizer.feed(chunk);
        if is_last {
            self.tokenizer.end();
        }
        // Inside the script handler the pump that ran the script picks the
        // input up once the handler returns.
        if !self.running_script {
            self.pump();
        }
    }

    /// Declare the end of input.
    pub fn end(&mut self) {
        self.feed("", true);
    }

    /// [§ 8.4.3 document.write()](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#document-write-steps)
    ///
    /// "Insert input into the input stream just before the insertion point."
    ///
    /// Tokenizes the inserted markup before returning, unless the parser is
    /// paused. A token left incomplete at the end of `markup` continues with
    /// the input that follows it.
    pub fn write(&mut self, markup: &str) {
        if self.stopped {
            return;
        }
        let len = self.tokenizer.insert_at_cursor(markup);
        self.tokenizer.push_limit(len);
        self.pump();
        self.tokenizer.pop_limit();
    }

    /// Stop pulling tokens until a matching [`Self::resume`]. Input fed
    /// meanwhile is buffered.
    pub const fn pause(&mut self) {
        self.pause_depth += 1;
    }

    /// Undo one [`Self::pause`]. Parsing continues once no pause is left.
    pub fn resume(&mut self) {
        if self.pause_depth == 0 {
            return;
        }
        self.pause_depth -= 1;
        if self.pause_depth == 0 && !self.running_script {
            self.pump();
        }
    }

    /// Whether a [`Self::pause`] is in effect.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.pause_depth > 0
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements." Later calls to
    /// [`Self::feed`] and [`Self::write`] do nothing. Character data the
    /// tokenizer has already consumed is inserted first.
    pub fn stop_parsing(&mut self) {
        if !self.stopped
            && let Some(data) = self.tokenizer.take_pending_text()
        {
            self.dispatch(&Token::Character { data });
        }
        self.stopped = true;
        self.open_elements.clear();
        self.active_formatting.clear();
    }

    /// Whether parsing has finished or was stopped.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Install the callback run after each `script` end tag.
    pub fn set_script_handler(&mut self, handler: impl FnMut(&mut Self, NodeId) + 'static) {
        self.script_handler = Some(Box::new(handler));
    }

    // ===== output =====

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Consume the parser and return the tree.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Parse issues from both stages, in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The document mode chosen from the DOCTYPE.
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.tree.quirks_mode()
    }

    // ===== driving =====

    /// Pull tokens until the tokenizer needs more input, the parser is
    /// paused, or parsing stops.
    fn pump(&mut self) {
        while !self.stopped && self.pause_depth == 0 {
            // [§ 13.2.5.42](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
            // "If there is an adjusted current node and it is not an element
            // in the HTML namespace, then switch to the CDATA section state."
            let foreign = self
                .adjusted_current_node()
                .and_then(|id| self.tree.as_element(id))
                .is_some_and(|e| e.namespace != Namespace::Html);
            self.tokenizer.set_cdata_allowed(foreign);

            let Some(token) = self.tokenizer.next_token() else {
                break;
            };
            self.collect_tokenizer_errors();
            self.dispatch(&token);
        }
        self.collect_tokenizer_errors();
    }

    fn collect_tokenizer_errors(&mut self) {
        for TokenizerIssue {
            error,
            line,
            column,
        } in self.tokenizer.take_errors()
        {
            let message = error.to_string();
            if self.config.report_warnings {
                warn_once("HTML Tokenizer", &message);
            }
            if self.config.collect_issues {
                self.issues.push(ParseIssue {
                    message,
                    kind: ParseIssueKind::Tokenizer,
                    position: (line, column),
                });
            }
        }
    }

    /// Record a tree construction parse error.
    pub(crate) fn parse_error(&mut self, message: &str) {
        if self.config.report_warnings {
            warn_once("HTML Parser", message);
        }
        if self.config.collect_issues {
            self.issues.push(ParseIssue {
                message: message.to_string(),
                kind: ParseIssueKind::TreeConstruction,
                position: self.tokenizer.position(),
            });
        }
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    fn dispatch(&mut self, token: &Token) {
        if std::mem::take(&mut self.ignore_next_line_feed)
            && let Token::Character { data } = token
            && let Some(rest) = data.strip_prefix('\n')
        {
            if !rest.is_empty() {
                self.dispatch(&Token::text(rest));
            }
            return;
        }

        if self.uses_html_rules(token) {
            if let Token::StartTag {
                name,
                self_closing: true,
                ..
            } = token
                && !is_void(name)
                && !matches!(name.as_str(), "svg" | "math")
            {
                self.parse_error("non-void-html-element-start-tag-with-trailing-solidus");
            }
            self.process_token(token);
        } else {
            self.process_foreign_content(token);
        }
    }

    /// "As each token is emitted from the tokenizer, the user agent must
    /// follow the appropriate steps from the following list, known as the
    /// tree construction dispatcher: If the stack of open elements is empty /
    /// If the adjusted current node is an element in the HTML namespace / ...
    /// Process the token according to the rules given in the section
    /// corresponding to the current insertion mode in HTML content."
    fn uses_html_rules(&self, token: &Token) -> bool {
        let Some(element) = self
            .adjusted_current_node()
            .and_then(|id| self.tree.as_element(id))
        else {
            return true;
        };

        if element.namespace == Namespace::Html || token.is_eof() {
            return true;
        }

        let is_start = matches!(token, Token::StartTag { .. });
        let is_characters = matches!(token, Token::Character { .. });
        let start_name = match token {
            Token::StartTag { name, .. } => Some(name.as_str()),
            _ => None,
        };

        // "If the adjusted current node is a MathML text integration point
        //  and the token is a start tag whose tag name is neither "mglyph"
        //  nor "malignmark"" / "...and the token is a character token"
        if is_mathml_text_integration_point(element)
            && (is_characters
                || (is_start && !matches!(start_name, Some("mglyph" | "malignmark"))))
        {
            return true;
        }

        // "If the adjusted current node is a MathML annotation-xml element
        //  and the token is a start tag whose tag name is "svg""
        if element.is(Namespace::MathMl, "annotation-xml") && start_name == Some("svg") {
            return true;
        }

        // "If the adjusted current node is an HTML integration point and the
        //  token is a start tag" / "...and the token is a character token"
        is_html_integration_point(element) && (is_start || is_characters)
    }

    /// Process `token` by the rules of the current insertion mode.
    pub(crate) fn process_token(&mut self, token: &Token) {
        self.process_in_mode(self.insertion_mode, token);
    }

    /// "Process the token using the rules for the X insertion mode."
    pub(crate) fn process_in_mode(&mut self, mode: InsertionMode, token: &Token) {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),

            // ===== TABLE PARSING MODES =====
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),

            // ===== FORM AND TEMPLATE MODES =====
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),

            // ===== AFTER MODES =====
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#the-end)
    ///
    /// Reached through the end-of-file token.
    pub(crate) fn finish(&mut self) {
        self.stop_parsing();
    }

    /// Run the installed script handler for `script`.
    pub(crate) fn run_script_handler(&mut self, script: NodeId) {
        if let Some(mut handler) = self.script_handler.take() {
            let was_running = std::mem::replace(&mut self.running_script, true);
            handler(self, script);
            self.running_script = was_running;
            if self.script_handler.is_none() {
                self.script_handler = Some(handler);
            }
        }
    }

    // ===== helpers =====

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    pub(crate) const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    /// Split a character run at its first non-whitespace character.
    pub(crate) fn split_leading_whitespace(data: &str) -> (&str, &str) {
        let end = data
            .find(|c: char| !Self::is_whitespace(c))
            .unwrap_or(data.len());
        data.split_at(end)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    pub(crate) fn current_node(&self) -> Option<NodeId> {
        self.open_elements.current()
    }

    pub(crate) fn current_element(&self) -> Option<&ElementData> {
        self.current_node().and_then(|id| self.tree.as_element(id))
    }

    /// Whether the current node is an HTML element named `tag_name`.
    pub(crate) fn current_node_is(&self, tag_name: &str) -> bool {
        self.open_elements.current_is(&self.tree, tag_name)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it (fragment case); otherwise,
    /// the adjusted current node is the current node."
    pub(crate) fn adjusted_current_node(&self) -> Option<NodeId> {
        match self.fragment_context {
            Some(context) if self.open_elements.len() == 1 => Some(context),
            _ => self.current_node(),
        }
    }

    /// Whether `id` is an HTML element named `tag_name`.
    pub(crate) fn is_html_element(&self, id: NodeId, tag_name: &str) -> bool {
        self.tree.as_element(id).is_some_and(|e| e.is_html(tag_name))
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// "The generic raw text element parsing algorithm and the generic RCDATA
    /// element parsing algorithm consist of the following steps.
    /// 1. Insert an HTML element for the token.
    /// 2. If the algorithm that was invoked is the generic raw text element
    ///    parsing algorithm, switch the tokenizer to the RAWTEXT state;
    ///    otherwise the algorithm invoked was the generic RCDATA element
    ///    parsing algorithm, switch the tokenizer to the RCDATA state.
    /// 3. Set the original insertion mode to the current insertion mode.
    /// 4. Then, switch the insertion mode to "text"."
    pub(crate) fn parse_text_element(&mut self, token: &Token, state: TokenizerState) {
        let _ = self.insert_html_element(token);
        self.tokenizer.set_state(state);
        self.original_insertion_mode = Some(self.insertion_mode);
        self.insertion_mode = InsertionMode::Text;
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(crate) fn reset_insertion_mode_appropriately(&mut self) {
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..self.open_elements.len()).rev() {
            let Some(mut node) = self.open_elements.get(index) else {
                continue;
            };

            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true, and, if the parser was
            //          created as part of the HTML fragment parsing algorithm
            //          (fragment case), set node to the context element passed
            //          to that algorithm."
            let last = index == 0;
            if last && let Some(context) = self.fragment_context {
                node = context;
            }

            let Some(element) = self.tree.as_element(node) else {
                continue;
            };
            if element.namespace != Namespace::Html {
                if last {
                    self.insertion_mode = InsertionMode::InBody;
                    return;
                }
                continue;
            }

            let mode = match element.tag_name.as_str() {
                // STEP 4: "If node is a select element, run these substeps:"
                "select" => {
                    // "If last is true, jump to the step below labeled done."
                    // "Let ancestor be node."
                    // "Loop: If ancestor is the first node in the stack of
                    //  open elements, jump to the step below labeled done."
                    // "If ancestor is a template node, jump to done."
                    // "If ancestor is a table node, switch the insertion mode
                    //  to "in select in table" and return."
                    // "Done: Switch the insertion mode to "in select" and return."
                    let mut mode = InsertionMode::InSelect;
                    if !last {
                        for ancestor_index in (1..index).rev() {
                            let Some(ancestor) = self.open_elements.get(ancestor_index) else {
                                continue;
                            };
                            if self.is_html_element(ancestor, "template") {
                                break;
                            }
                            if self.is_html_element(ancestor, "table") {
                                mode = InsertionMode::InSelectInTable;
                                break;
                            }
                        }
                    }
                    Some(mode)
                }
                // STEP 5: "If node is a td or th element and last is false, then
                //          switch the insertion mode to "in cell" and return."
                "td" | "th" if !last => Some(InsertionMode::InCell),
                // STEP 6: "If node is a tr element, then switch the insertion
                //          mode to "in row" and return."
                "tr" => Some(InsertionMode::InRow),
                // STEP 7: "If node is a tbody, thead, or tfoot element..."
                "tbody" | "thead" | "tfoot" => Some(InsertionMode::InTableBody),
                // STEP 8: "If node is a caption element..."
                "caption" => Some(InsertionMode::InCaption),
                // STEP 9: "If node is a colgroup element..."
                "colgroup" => Some(InsertionMode::InColumnGroup),
                // STEP 10: "If node is a table element..."
                "table" => Some(InsertionMode::InTable),
                // STEP 11: "If node is a template element, then switch the
                //           insertion mode to the current template insertion
                //           mode and return."
                "template" => Some(
                    self.template_insertion_modes
                        .last()
                        .copied()
                        .unwrap_or(InsertionMode::InTemplate),
                ),
                // STEP 12: "If node is a head element and last is false, then
                //           switch the insertion mode to "in head" and return."
                "head" if !last => Some(InsertionMode::InHead),
                // STEP 13: "If node is a body element..."
                "body" => Some(InsertionMode::InBody),
                // STEP 14: "If node is a frameset element..."
                "frameset" => Some(InsertionMode::InFrameset),
                // STEP 15: "If node is an html element, run these substeps:
                //           If the head element pointer is null, switch the
                //           insertion mode to "before head" and return.
                //           Otherwise, the head element pointer is not null,
                //           switch the insertion mode to "after head" and return."
                "html" => Some(if self.head_element_pointer.is_none() {
                    InsertionMode::BeforeHead
                } else {
                    InsertionMode::AfterHead
                }),
                _ => None,
            };

            if let Some(mode) = mode {
                self.insertion_mode = mode;
                return;
            }

            // STEP 16: "If last is true, then switch the insertion mode to "in
            //           body" and return. (fragment case)"
            if last {
                self.insertion_mode = InsertionMode::InBody;
                return;
            }
            // STEP 17-18: "Let node now be the node before node in the stack of
            //              open elements. Return to the step labeled loop."
        }
        self.insertion_mode = InsertionMode::InBody;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_leading_whitespace() {
        assert_eq!(HTMLParser::split_leading_whitespace("  \nab c"), ("  \n", "ab c"));
        assert_eq!(HTMLParser::split_leading_whitespace("   "), ("   ", ""));
        assert_eq!(HTMLParser::split_leading_whitespace("x"), ("", "x"));
    }

    #[test]
    fn test_paused_parser_buffers_input() {
        let mut parser = HTMLParser::new();
        parser.pause();
        parser.feed("<p>hello", true);
        assert!(parser.tree().document_element().is_none());

        parser.resume();
        assert!(parser.is_stopped());
        assert_eq!(parser.tree().text_content(NodeId::ROOT), "hello");
    }

    #[test]
    fn test_feed_after_stop_is_ignored() {
        let mut parser = HTMLParser::new();
        parser.feed("<p>a</p>", false);
        parser.stop_parsing();
        parser.feed("<p>b", true);
        assert_eq!(parser.tree().text_content(NodeId::ROOT), "a");
    }
}
