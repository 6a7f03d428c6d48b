//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token")
//! - End tag matching for the text states
//! - Parse error recording

use sprig_common::warning::warn_once;

use super::core::{HTMLTokenizer, TokenizerState};
use super::errors::{TokenizerError, TokenizerIssue};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// Give up on the current character until more input arrives. The
    /// state must not have changed anything before calling this.
    pub(super) const fn suspend(&mut self) {
        self.suspended = true;
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// NOTE: HTML tokenizer uses a subset excluding CR (which is normalized earlier).
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        // "U+0009 CHARACTER TABULATION (tab)"
        // "U+000A LINE FEED (LF)"
        // "U+000C FORM FEED (FF)"
        // "U+0020 SPACE"
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current input character as a character token."
    pub(super) fn emit_char(&mut self, c: char) {
        self.pending_text.push(c);
    }

    /// Emit a character token for each character of `s`.
    pub(super) fn emit_str(&mut self, s: &str) {
        self.pending_text.push_str(s);
    }

    /// Emit the current input character, then every following character up
    /// to the next one for which `stop` is true. Text states use this to take
    /// whole runs instead of stepping once per character.
    pub(super) fn emit_char_and_run(&mut self, c: char, stop: impl Fn(char) -> bool) {
        self.pending_text.push(c);
        let run = self.input.take_run(stop);
        self.pending_text.push_str(run);
    }

    /// Queue a non-character token, flushing buffered character data first.
    pub(super) fn emit_token(&mut self, token: Token) {
        self.flush_text();
        self.queue.push_back(token);
    }

    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let data = core::mem::take(&mut self.pending_text);
            self.queue.push_back(Token::Character { data });
        }
    }

    /// "Emit the current tag token."
    pub(super) fn emit_current_tag(&mut self) {
        if self.scratch.is_end_tag() {
            // [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error. When an end tag token is
            // emitted with its self-closing flag set, that is an
            // end-tag-with-trailing-solidus parse error."
            if self.scratch.end_tag_has_attributes() {
                self.parse_error(TokenizerError::EndTagWithAttributes);
            }
            if self.scratch.end_tag_has_self_closing() {
                self.parse_error(TokenizerError::EndTagWithTrailingSolidus);
            }
        }
        let token = self.scratch.take_tag();
        if let Token::StartTag { name, .. } = &token {
            self.last_start_tag_name = Some(name.clone());
        }
        self.emit_token(token);
    }

    /// "Emit the comment token."
    pub(super) fn emit_current_comment(&mut self) {
        let token = self.scratch.take_comment();
        self.emit_token(token);
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_current_doctype(&mut self) {
        let token = self.scratch.take_doctype();
        self.emit_token(token);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof(&mut self) {
        self.emit_token(Token::EndOfFile);
        self.finished = true;
    }

    /// Emit "a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
    /// character token, and a character token for each of the characters in
    /// the temporary buffer (in the order they were added to the buffer)."
    pub(super) fn emit_less_than_solidus_and_temporary_buffer(&mut self) {
        self.pending_text.push_str("</");
        self.pending_text.push_str(&self.scratch.temporary_buffer);
    }
}

// =============================================================================
// End Tag Matching
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        self.scratch.is_end_tag()
            && self
                .last_start_tag_name
                .as_deref()
                .is_some_and(|last| last == self.scratch.tag_name())
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors in HTML are not fatal - the tokenizer recovers and continues.
    pub(super) fn parse_error(&mut self, error: TokenizerError) {
        let (line, column) = self.input.position();
        let issue = TokenizerIssue {
            error,
            line,
            column,
        };
        if self.config.report_warnings {
            warn_once("HTML Tokenizer", &issue.to_string());
        }
        if self.config.collect_issues {
            self.errors.push(issue);
        }
    }
}
