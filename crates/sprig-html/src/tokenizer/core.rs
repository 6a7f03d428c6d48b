use std::collections::VecDeque;

use strum_macros::Display;

use super::errors::TokenizerIssue;
use super::input::{InputStream, NextChar};
use super::scratch::TokenScratch;
use super::token::Token;
use crate::config::ParserConfig;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in § 13.2.5,
/// except that the character reference sub-states (§ 13.2.5.73 to § 13.2.5.80)
/// are resolved inside [`TokenizerState::CharacterReference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    RCDATA,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RAWTEXT,
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ScriptData,
    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    PLAINTEXT,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    RCDATALessThanSign,
    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    RCDATAEndTagOpen,
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    RCDATAEndTagName,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RAWTEXTLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RAWTEXTEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RAWTEXTEndTagName,
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    ScriptDataLessThanSign,
    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    ScriptDataEndTagOpen,
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ScriptDataEndTagName,
    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    ScriptDataEscapeStart,
    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    ScriptDataEscapeStartDash,
    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    ScriptDataEscaped,
    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    ScriptDataEscapedDash,
    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    ScriptDataEscapedDashDash,
    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    ScriptDataEscapedLessThanSign,
    /// [§ 13.2.5.24 Script data escaped end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-open-state)
    ScriptDataEscapedEndTagOpen,
    /// [§ 13.2.5.25 Script data escaped end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-name-state)
    ScriptDataEscapedEndTagName,
    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    ScriptDataDoubleEscapeStart,
    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    ScriptDataDoubleEscaped,
    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    ScriptDataDoubleEscapedDash,
    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    ScriptDataDoubleEscapedDashDash,
    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    ScriptDataDoubleEscapedLessThanSign,
    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    ScriptDataDoubleEscapeEnd,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    CommentLessThanSign,
    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    CommentLessThanSignBang,
    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    CommentLessThanSignBangDash,
    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    CommentLessThanSignBangDashDash,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    CommentEndBang,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    DOCTYPE,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDOCTYPEName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DOCTYPEName,
    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    AfterDOCTYPEName,
    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    AfterDOCTYPEPublicKeyword,
    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    BeforeDOCTYPEPublicIdentifier,
    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    DOCTYPEPublicIdentifierDoubleQuoted,
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    DOCTYPEPublicIdentifierSingleQuoted,
    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    AfterDOCTYPEPublicIdentifier,
    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    BetweenDOCTYPEPublicAndSystemIdentifiers,
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    AfterDOCTYPESystemKeyword,
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    BeforeDOCTYPESystemIdentifier,
    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    DOCTYPESystemIdentifierDoubleQuoted,
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    DOCTYPESystemIdentifierSingleQuoted,
    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    AfterDOCTYPESystemIdentifier,
    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    BogusDOCTYPE,
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    CDATASection,
    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    CDATASectionBracket,
    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    CDATASectionEnd,
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReference,
}

impl TokenizerState {
    /// The state a start tag for `tag_name` puts the tokenizer in when the
    /// element's content is text only, per the generic raw text and RCDATA
    /// element parsing algorithms.
    ///
    /// Returns `None` for elements whose content is tokenized normally.
    #[must_use]
    pub fn for_text_element(tag_name: &str, scripting: bool) -> Option<Self> {
        match tag_name {
            "title" | "textarea" => Some(Self::RCDATA),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(Self::RAWTEXT),
            "noscript" if scripting => Some(Self::RAWTEXT),
            "script" => Some(Self::ScriptData),
            "plaintext" => Some(Self::PLAINTEXT),
            _ => None,
        }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to tokenize HTML."
///
/// The tokenizer is incremental. Input arrives through [`Self::feed`], tokens
/// leave through [`Self::next_token`], and the tree builder steers it between
/// tokens with [`Self::set_state`].
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) return_state: Option<TokenizerState>,
    pub(super) input: InputStream,
    /// `None` is EOF.
    pub(super) current_input_character: Option<char>,
    // When true, the next step will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    pub(super) scratch: TokenScratch,
    /// Character data not yet handed out. Flushed before any other token.
    pub(super) pending_text: String,
    pub(super) queue: VecDeque<Token>,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    /// "The last start tag token emitted is used as part of the tree construction stage
    /// and in the RCDATA, RAWTEXT, and script data states."
    pub(super) last_start_tag_name: Option<String>,

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    /// "If there is an adjusted current node and it is not an element in the HTML namespace"
    pub(super) cdata_allowed: bool,
    /// Set by a state that needs more lookahead than is buffered.
    pub(super) suspended: bool,
    /// The end-of-file token has been queued.
    pub(super) finished: bool,
    pub(super) errors: Vec<TokenizerIssue>,
    pub(super) config: ParserConfig,
}

impl Default for HTMLTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HTMLTokenizer {
    /// Create a tokenizer with the default configuration.
    ///
    /// "The tokenizer state machine consists of the states defined in the
    /// following subsections. The initial state is the data state."
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a tokenizer with the given configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            state: TokenizerState::Data,
            return_state: None,
            input: InputStream::new(),
            current_input_character: None,
            reconsume: false,
            scratch: TokenScratch::default(),
            pending_text: String::new(),
            queue: VecDeque::new(),
            last_start_tag_name: None,
            cdata_allowed: false,
            suspended: false,
            finished: false,
            errors: Vec::new(),
            config,
        }
    }

    // ===== input =====

    /// Append a chunk of input.
    pub fn feed(&mut self, chunk: &str) {
        self.input.push_chunk(chunk);
    }

    /// Declare the end of input. Partial lookaheads now resolve against what
    /// remains and the tokenizer will eventually emit [`Token::EndOfFile`].
    pub const fn end(&mut self) {
        self.input.set_eof();
    }

    /// Insert markup directly at the scanner cursor. Returns its length in bytes.
    pub fn insert_at_cursor(&mut self, markup: &str) -> usize {
        self.input.insert_at_cursor(markup)
    }

    /// Tokenize no further than `len` bytes past the cursor until
    /// [`Self::pop_limit`] is called.
    pub fn push_limit(&mut self, len: usize) {
        self.input.push_limit(len);
    }

    /// Remove the innermost scanner limit.
    pub fn pop_limit(&mut self) {
        self.input.pop_limit();
    }

    // ===== tree builder controls =====

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Switch state from outside the state machine. Used by the tree builder
    /// after start tags such as `<title>` or `<script>`.
    pub const fn set_state(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// Set the name used to decide "appropriate end tag". Fragment parsing seeds
    /// it from the context element.
    pub fn set_last_start_tag(&mut self, name: &str) {
        self.last_start_tag_name = Some(name.to_string());
    }

    /// Allow or forbid CDATA sections. The tree builder allows them while the
    /// adjusted current node is not in the HTML namespace.
    pub const fn set_cdata_allowed(&mut self, allowed: bool) {
        self.cdata_allowed = allowed;
    }

    /// Parse errors seen so far.
    #[must_use]
    pub fn errors(&self) -> &[TokenizerIssue] {
        &self.errors
    }

    /// Hand over the parse errors collected so far.
    pub fn take_errors(&mut self) -> Vec<TokenizerIssue> {
        std::mem::take(&mut self.errors)
    }

    /// Character data consumed but not yet emitted as a token. Only handed
    /// over when no other token is queued ahead of it.
    pub(crate) fn take_pending_text(&mut self) -> Option<String> {
        if !self.queue.is_empty() || self.pending_text.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.pending_text))
    }

    /// True once the end-of-file token has been produced.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished && self.queue.is_empty()
    }

    /// Line and column of the last consumed character.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        self.input.position()
    }

    // ===== driving =====

    /// Produce the next token, or `None` when more input is needed (or the
    /// end-of-file token has already been returned).
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.finished || !self.step() {
                return None;
            }
        }
    }

    /// Run one state. Returns false when the state cannot make progress until
    /// more input arrives.
    fn step(&mut self) -> bool {
        // Each state begins by consuming the next input character,
        // unless we're reconsuming from a previous state transition.
        if self.reconsume {
            self.reconsume = false;
        } else {
            match self.input.next_char() {
                NextChar::Char(c) => self.current_input_character = Some(c),
                NextChar::Eof => self.current_input_character = None,
                NextChar::Pending => return false,
            }
        }

        self.dispatch();

        if self.suspended {
            // Retry the same character in the same state once input arrives.
            self.suspended = false;
            self.reconsume = true;
            return false;
        }
        true
    }

    fn dispatch(&mut self) {
        use TokenizerState as S;
        match self.state {
            S::Data => self.handle_data_state(),
            S::RCDATA => self.handle_rcdata_state(),
            S::RAWTEXT => self.handle_rawtext_state(),
            S::ScriptData => self.handle_script_data_state(),
            S::PLAINTEXT => self.handle_plaintext_state(),
            S::TagOpen => self.handle_tag_open_state(),
            S::EndTagOpen => self.handle_end_tag_open_state(),
            S::TagName => self.handle_tag_name_state(),
            S::RCDATALessThanSign => self.handle_text_less_than_sign_state(S::RCDATA, S::RCDATAEndTagOpen),
            S::RCDATAEndTagOpen => self.handle_text_end_tag_open_state(S::RCDATA, S::RCDATAEndTagName),
            S::RCDATAEndTagName => self.handle_text_end_tag_name_state(S::RCDATA),
            S::RAWTEXTLessThanSign => self.handle_text_less_than_sign_state(S::RAWTEXT, S::RAWTEXTEndTagOpen),
            S::RAWTEXTEndTagOpen => self.handle_text_end_tag_open_state(S::RAWTEXT, S::RAWTEXTEndTagName),
            S::RAWTEXTEndTagName => self.handle_text_end_tag_name_state(S::RAWTEXT),
            S::ScriptDataLessThanSign => self.handle_script_data_less_than_sign_state(),
            S::ScriptDataEndTagOpen => self.handle_text_end_tag_open_state(S::ScriptData, S::ScriptDataEndTagName),
            S::ScriptDataEndTagName => self.handle_text_end_tag_name_state(S::ScriptData),
            S::ScriptDataEscapeStart => self.handle_script_data_escape_start_state(),
            S::ScriptDataEscapeStartDash => self.handle_script_data_escape_start_dash_state(),
            S::ScriptDataEscaped => self.handle_script_data_escaped_state(),
            S::ScriptDataEscapedDash => self.handle_script_data_escaped_dash_state(),
            S::ScriptDataEscapedDashDash => self.handle_script_data_escaped_dash_dash_state(),
            S::ScriptDataEscapedLessThanSign => self.handle_script_data_escaped_less_than_sign_state(),
            S::ScriptDataEscapedEndTagOpen => {
                self.handle_text_end_tag_open_state(S::ScriptDataEscaped, S::ScriptDataEscapedEndTagName);
            }
            S::ScriptDataEscapedEndTagName => self.handle_text_end_tag_name_state(S::ScriptDataEscaped),
            S::ScriptDataDoubleEscapeStart => self.handle_script_data_double_escape_start_state(),
            S::ScriptDataDoubleEscaped => self.handle_script_data_double_escaped_state(),
            S::ScriptDataDoubleEscapedDash => self.handle_script_data_double_escaped_dash_state(),
            S::ScriptDataDoubleEscapedDashDash => self.handle_script_data_double_escaped_dash_dash_state(),
            S::ScriptDataDoubleEscapedLessThanSign => {
                self.handle_script_data_double_escaped_less_than_sign_state();
            }
            S::ScriptDataDoubleEscapeEnd => self.handle_script_data_double_escape_end_state(),
            S::BeforeAttributeName => self.handle_before_attribute_name_state(),
            S::AttributeName => self.handle_attribute_name_state(),
            S::AfterAttributeName => self.handle_after_attribute_name_state(),
            S::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            S::AttributeValueDoubleQuoted => self.handle_attribute_value_quoted_state('"'),
            S::AttributeValueSingleQuoted => self.handle_attribute_value_quoted_state('\''),
            S::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            S::AfterAttributeValueQuoted => self.handle_after_attribute_value_quoted_state(),
            S::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            S::BogusComment => self.handle_bogus_comment_state(),
            S::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            S::CommentStart => self.handle_comment_start_state(),
            S::CommentStartDash => self.handle_comment_start_dash_state(),
            S::Comment => self.handle_comment_state(),
            S::CommentLessThanSign => self.handle_comment_less_than_sign_state(),
            S::CommentLessThanSignBang => self.handle_comment_less_than_sign_bang_state(),
            S::CommentLessThanSignBangDash => self.handle_comment_less_than_sign_bang_dash_state(),
            S::CommentLessThanSignBangDashDash => self.handle_comment_less_than_sign_bang_dash_dash_state(),
            S::CommentEndDash => self.handle_comment_end_dash_state(),
            S::CommentEnd => self.handle_comment_end_state(),
            S::CommentEndBang => self.handle_comment_end_bang_state(),
            S::DOCTYPE => self.handle_doctype_state(),
            S::BeforeDOCTYPEName => self.handle_before_doctype_name_state(),
            S::DOCTYPEName => self.handle_doctype_name_state(),
            S::AfterDOCTYPEName => self.handle_after_doctype_name_state(),
            S::AfterDOCTYPEPublicKeyword => self.handle_after_doctype_public_keyword_state(),
            S::BeforeDOCTYPEPublicIdentifier => self.handle_before_doctype_public_identifier_state(),
            S::DOCTYPEPublicIdentifierDoubleQuoted => self.handle_doctype_public_identifier_quoted_state('"'),
            S::DOCTYPEPublicIdentifierSingleQuoted => self.handle_doctype_public_identifier_quoted_state('\''),
            S::AfterDOCTYPEPublicIdentifier => self.handle_after_doctype_public_identifier_state(),
            S::BetweenDOCTYPEPublicAndSystemIdentifiers => {
                self.handle_between_doctype_public_and_system_identifiers_state();
            }
            S::AfterDOCTYPESystemKeyword => self.handle_after_doctype_system_keyword_state(),
            S::BeforeDOCTYPESystemIdentifier => self.handle_before_doctype_system_identifier_state(),
            S::DOCTYPESystemIdentifierDoubleQuoted => self.handle_doctype_system_identifier_quoted_state('"'),
            S::DOCTYPESystemIdentifierSingleQuoted => self.handle_doctype_system_identifier_quoted_state('\''),
            S::AfterDOCTYPESystemIdentifier => self.handle_after_doctype_system_identifier_state(),
            S::BogusDOCTYPE => self.handle_bogus_doctype_state(),
            S::CDATASection => self.handle_cdata_section_state(),
            S::CDATASectionBracket => self.handle_cdata_section_bracket_state(),
            S::CDATASectionEnd => self.handle_cdata_section_end_state(),
            S::CharacterReference => self.handle_character_reference_state(),
        }
    }
}

/// Tokenize a complete document on its own, without a tree builder.
///
/// Start tags for text-only elements (`title`, `textarea`, `style`, `script`,
/// `plaintext`, ...) switch the tokenizer state the way the tree builder
/// would, so their content comes out as character data.
#[must_use]
pub fn tokenize(html: &str) -> Vec<Token> {
    tokenize_with_config(html, ParserConfig::default())
}

/// [`tokenize`] with an explicit configuration.
#[must_use]
pub fn tokenize_with_config(html: &str, config: ParserConfig) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::with_config(config);
    tokenizer.feed(html);
    tokenizer.end();
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        if let Token::StartTag { name, .. } = &token
            && let Some(state) = TokenizerState::for_text_element(name, config.scripting)
        {
            tokenizer.set_state(state);
        }
        tokens.push(token);
    }
    tokens
}
