//! Comment, DOCTYPE and CDATA section states.
//!
//! [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
//! through [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::errors::TokenizerError;
use super::input::Lookahead;

// =============================================================================
// Comments
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            // "EOF - Emit the comment. Emit an end-of-file token."
            None => {
                self.emit_current_comment();
                self.emit_eof();
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append a
            // U+FFFD REPLACEMENT CHARACTER character to the comment token's data."
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_comment('\u{FFFD}');
            }
            // "Anything else - Append the current input character to the comment token's data."
            Some(c) => {
                self.scratch.push_comment(c);
                let run = self.input.take_run(|c| matches!(c, '>' | '\0'));
                self.scratch.push_str_comment(run);
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Entered with the `!` as the current input character, so the lookahead
    /// starts right after it.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        let comment = self.input.lookahead("--", false);
        let doctype = self.input.lookahead("DOCTYPE", true);
        let cdata = self.input.lookahead("[CDATA[", false);

        // "If the next two characters are both U+002D HYPHEN-MINUS characters (-),
        // consume those two characters, create a comment token whose data is the
        // empty string, and switch to the comment start state."
        if comment == Lookahead::Match {
            self.input.advance(2);
            self.scratch.begin_comment();
            self.switch_to(TokenizerState::CommentStart);
            return;
        }

        // "Otherwise, if the next seven characters are an ASCII case-insensitive
        // match for the word "DOCTYPE", then consume those characters and switch
        // to the DOCTYPE state."
        if doctype == Lookahead::Match {
            self.input.advance(7);
            self.switch_to(TokenizerState::DOCTYPE);
            return;
        }

        // "Otherwise, if there is an adjusted current node and it is not an element
        // in the HTML namespace and the next seven characters are a case-sensitive
        // match for the string "[CDATA[" (...), then consume those characters and
        // switch to the CDATA section state."
        if cdata == Lookahead::Match {
            self.input.advance(7);
            if self.cdata_allowed {
                self.switch_to(TokenizerState::CDATASection);
            } else {
                // "Otherwise, this is a cdata-in-html-content parse error. Create a
                // comment token whose data is the "[CDATA[" string. Switch to the
                // bogus comment state."
                self.parse_error(TokenizerError::CdataInHtmlContent);
                self.scratch.begin_comment();
                self.scratch.push_str_comment("[CDATA[");
                self.switch_to(TokenizerState::BogusComment);
            }
            return;
        }

        if [comment, doctype, cdata].contains(&Lookahead::Pending) {
            self.suspend();
            return;
        }

        // "Otherwise, this is an incorrectly-opened-comment parse error. Create a
        // comment token whose data is the empty string. Switch to the bogus comment
        // state (don't consume anything in the current state)."
        self.parse_error(TokenizerError::IncorrectlyOpenedComment);
        self.scratch.begin_comment();
        self.switch_to(TokenizerState::BogusComment);
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-closing-of-empty-comment
            // parse error. Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.parse_error(TokenizerError::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.parse_error(TokenizerError::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => self.eof_in_comment(),
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to the comment
            // token's data. Reconsume in the comment state."
            Some(_) => {
                self.scratch.push_comment('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Append the current input character to the
            // comment token's data. Switch to the comment less-than sign state."
            Some('<') => {
                self.scratch.push_comment('<');
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_comment('\u{FFFD}');
            }
            None => self.eof_in_comment(),
            Some(c) => {
                self.scratch.push_comment(c);
                let run = self.input.take_run(|c| matches!(c, '<' | '-' | '\0'));
                self.scratch.push_str_comment(run);
            }
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('!') => {
                self.scratch.push_comment('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            Some('<') => self.scratch.push_comment('<'),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentLessThanSignBangDash),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentLessThanSignBangDashDash),
            _ => self.reconsume_in(TokenizerState::CommentEndDash),
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>), EOF - Reconsume in the comment end state."
            Some('>') | None => self.reconsume_in(TokenizerState::CommentEnd),
            // "Anything else - This is a nested-comment parse error. Reconsume in the
            // comment end state."
            Some(_) => {
                self.parse_error(TokenizerError::NestedComment);
                self.reconsume_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.scratch.push_comment('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            // "U+002D HYPHEN-MINUS (-) - Append a U+002D HYPHEN-MINUS character (-) to
            // the comment token's data."
            Some('-') => self.scratch.push_comment('-'),
            None => self.eof_in_comment(),
            // "Anything else - Append two U+002D HYPHEN-MINUS characters (-) to the
            // comment token's data. Reconsume in the comment state."
            Some(_) => {
                self.scratch.push_str_comment("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.scratch.push_str_comment("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an incorrectly-closed-comment parse
            // error. Switch to the data state. Emit the comment token."
            Some('>') => {
                self.parse_error(TokenizerError::IncorrectlyClosedComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.scratch.push_str_comment("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// "This is an eof-in-comment parse error. Emit the comment token. Emit an
    /// end-of-file token."
    fn eof_in_comment(&mut self) {
        self.parse_error(TokenizerError::EofInComment);
        self.emit_current_comment();
        self.emit_eof();
    }
}

// =============================================================================
// DOCTYPE
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            // "EOF - This is an eof-in-doctype parse error. Create a new DOCTYPE token.
            // Set its force-quirks flag to on. Emit the current token. Emit an
            // end-of-file token."
            None => {
                self.scratch.begin_doctype();
                self.eof_in_doctype();
            }
            // "Anything else - This is a missing-whitespace-before-doctype-name parse
            // error. Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.parse_error(TokenizerError::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "ASCII upper alpha - Create a new DOCTYPE token. Set the token's name to
            // the lowercase version of the current input character. Switch to the
            // DOCTYPE name state."
            Some(c) if c.is_ascii_uppercase() => {
                self.scratch.begin_doctype();
                self.scratch.push_doctype_name(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.begin_doctype();
                self.scratch.push_doctype_name('\u{FFFD}');
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-name parse error.
            // Create a new DOCTYPE token. Set its force-quirks flag to on. Switch to the
            // data state. Emit the current token."
            Some('>') => {
                self.parse_error(TokenizerError::MissingDoctypeName);
                self.scratch.begin_doctype();
                self.scratch.set_force_quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => {
                self.scratch.begin_doctype();
                self.eof_in_doctype();
            }
            Some(c) => {
                self.scratch.begin_doctype();
                self.scratch.push_doctype_name(c);
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDOCTYPEName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some(c) if c.is_ascii_uppercase() => {
                self.scratch.push_doctype_name(c.to_ascii_lowercase());
            }
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_doctype_name('\u{FFFD}');
            }
            None => self.eof_in_doctype(),
            Some(c) => self.scratch.push_doctype_name(c),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                // "If the six characters starting from the current input character are an
                // ASCII case-insensitive match for the word "PUBLIC", then consume those
                // characters and switch to the after DOCTYPE public keyword state.
                //
                // Otherwise, if the six characters starting from the current input
                // character are an ASCII case-insensitive match for the word "SYSTEM",
                // then consume those characters and switch to the after DOCTYPE system
                // keyword state."
                let keyword = match c.to_ascii_uppercase() {
                    'P' => Some(("UBLIC", TokenizerState::AfterDOCTYPEPublicKeyword)),
                    'S' => Some(("YSTEM", TokenizerState::AfterDOCTYPESystemKeyword)),
                    _ => None,
                };
                if let Some((rest, next)) = keyword {
                    match self.input.lookahead(rest, true) {
                        Lookahead::Match => {
                            self.input.advance(rest.len());
                            self.switch_to(next);
                            return;
                        }
                        Lookahead::Pending => {
                            self.suspend();
                            return;
                        }
                        Lookahead::NoMatch => {}
                    }
                }
                // "Otherwise, this is an invalid-character-sequence-after-doctype-name
                // parse error. Set the current DOCTYPE token's force-quirks flag to on.
                // Reconsume in the bogus DOCTYPE state."
                self.parse_error(TokenizerError::InvalidCharacterSequenceAfterDoctypeName);
                self.scratch.set_force_quirks();
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn handle_after_doctype_public_keyword_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEPublicIdentifier);
            }
            // "U+0022 QUOTATION MARK (") - This is a
            // missing-whitespace-after-doctype-public-keyword parse error. Set the
            // current DOCTYPE token's public identifier to the empty string (not
            // missing), then switch to the DOCTYPE public identifier (double-quoted)
            // state."
            Some(q @ ('"' | '\'')) => {
                self.parse_error(TokenizerError::MissingWhitespaceAfterDoctypePublicKeyword);
                self.open_public_identifier(q);
            }
            Some('>') => self.missing_identifier(TokenizerError::MissingDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(TokenizerError::MissingQuoteBeforeDoctypePublicIdentifier),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(q @ ('"' | '\'')) => self.open_public_identifier(q),
            Some('>') => self.missing_identifier(TokenizerError::MissingDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(TokenizerError::MissingQuoteBeforeDoctypePublicIdentifier),
        }
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_public_identifier_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterDOCTYPEPublicIdentifier),
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_public_identifier('\u{FFFD}');
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-doctype-public-identifier
            // parse error. Set the current DOCTYPE token's force-quirks flag to on.
            // Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => self.missing_identifier(TokenizerError::AbruptDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(c) => self.scratch.push_public_identifier(c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some(q @ ('"' | '\'')) => {
                self.parse_error(
                    TokenizerError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.open_system_identifier(q);
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(TokenizerError::MissingQuoteBeforeDoctypeSystemIdentifier),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some(q @ ('"' | '\'')) => self.open_system_identifier(q),
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(TokenizerError::MissingQuoteBeforeDoctypeSystemIdentifier),
        }
    }

    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_system_keyword_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPESystemIdentifier);
            }
            Some(q @ ('"' | '\'')) => {
                self.parse_error(TokenizerError::MissingWhitespaceAfterDoctypeSystemKeyword);
                self.open_system_identifier(q);
            }
            Some('>') => self.missing_identifier(TokenizerError::MissingDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(TokenizerError::MissingQuoteBeforeDoctypeSystemIdentifier),
        }
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(q @ ('"' | '\'')) => self.open_system_identifier(q),
            Some('>') => self.missing_identifier(TokenizerError::MissingDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(TokenizerError::MissingQuoteBeforeDoctypeSystemIdentifier),
        }
    }

    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_system_identifier_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterDOCTYPESystemIdentifier),
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_system_identifier('\u{FFFD}');
            }
            Some('>') => self.missing_identifier(TokenizerError::AbruptDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(c) => self.scratch.push_system_identifier(c),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            // "Anything else - This is an
            // unexpected-character-after-doctype-system-identifier parse error.
            // Reconsume in the bogus DOCTYPE state. (This does not set the current
            // DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error(TokenizerError::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some('\0') => self.parse_error(TokenizerError::UnexpectedNullCharacter),
            None => {
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {}
        }
    }

    fn open_public_identifier(&mut self, quote: char) {
        self.scratch.init_public_identifier();
        self.switch_to(if quote == '"' {
            TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted
        } else {
            TokenizerState::DOCTYPEPublicIdentifierSingleQuoted
        });
    }

    fn open_system_identifier(&mut self, quote: char) {
        self.scratch.init_system_identifier();
        self.switch_to(if quote == '"' {
            TokenizerState::DOCTYPESystemIdentifierDoubleQuoted
        } else {
            TokenizerState::DOCTYPESystemIdentifierSingleQuoted
        });
    }

    /// An identifier was expected but the DOCTYPE ended: force quirks and emit.
    fn missing_identifier(&mut self, error: TokenizerError) {
        self.parse_error(error);
        self.scratch.set_force_quirks();
        self.switch_to(TokenizerState::Data);
        self.emit_current_doctype();
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on. Reconsume in the
    /// bogus DOCTYPE state."
    fn bogus_doctype(&mut self, error: TokenizerError) {
        self.parse_error(error);
        self.scratch.set_force_quirks();
        self.reconsume_in(TokenizerState::BogusDOCTYPE);
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error(TokenizerError::EofInDoctype);
        self.scratch.set_force_quirks();
        self.emit_current_doctype();
        self.emit_eof();
    }
}

// =============================================================================
// CDATA sections
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    pub(super) fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.switch_to(TokenizerState::CDATASectionBracket),
            // "EOF - This is an eof-in-cdata parse error. Emit an end-of-file token."
            None => {
                self.parse_error(TokenizerError::EofInCdata);
                self.emit_eof();
            }
            // NUL passes through untouched; the tree builder replaces it in
            // foreign content.
            Some(c) => self.emit_char_and_run(c, |c| c == ']'),
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(super) fn handle_cdata_section_bracket_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.switch_to(TokenizerState::CDATASectionEnd),
            _ => {
                self.emit_char(']');
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(super) fn handle_cdata_section_end_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.emit_char(']'),
            Some('>') => self.switch_to(TokenizerState::Data),
            _ => {
                self.emit_str("]]");
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }
}
