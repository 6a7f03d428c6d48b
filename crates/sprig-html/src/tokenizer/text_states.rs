//! Data, RCDATA, RAWTEXT, script data and PLAINTEXT states.
//!
//! [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
//! through [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::errors::TokenizerError;
use super::token::Token;

impl HTMLTokenizer {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    pub(super) fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::Data);
                self.reconsume_in(TokenizerState::CharacterReference);
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => {
                if !self.try_simple_tag() {
                    self.switch_to(TokenizerState::TagOpen);
                }
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            //
            // The tree builder decides whether to drop it or replace it.
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.emit_char('\0');
            }
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof(),
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.emit_char_and_run(c, |c| matches!(c, '&' | '<' | '\0')),
        }
    }

    /// Simple tag fast path: `<name>` and `</name>` with a lowercase ASCII name
    /// and nothing else inside the brackets. The full tag states would produce
    /// the same token.
    fn try_simple_tag(&mut self) -> bool {
        if !self.config.simple_tag_fast_path {
            return false;
        }
        let Some(tag) = self.input.match_simple_tag() else {
            return false;
        };
        self.input.advance(tag.len);
        let token = if tag.is_end {
            Token::EndTag { name: tag.name }
        } else {
            self.last_start_tag_name = Some(tag.name.clone());
            Token::start_tag(tag.name)
        };
        self.emit_token(token);
        true
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    pub(super) fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&)"
            // "Set the return state to the RCDATA state. Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::RCDATA);
                self.reconsume_in(TokenizerState::CharacterReference);
            }
            // "U+003C LESS-THAN SIGN (<)"
            // "Switch to the RCDATA less-than sign state."
            Some('<') => self.switch_to(TokenizerState::RCDATALessThanSign),
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Emit a U+FFFD REPLACEMENT
            // CHARACTER character token."
            Some('\0') => self.null_to_replacement(),
            // "EOF"
            // "Emit an end-of-file token."
            None => self.emit_eof(),
            // "Anything else"
            // "Emit the current input character as a character token."
            Some(c) => self.emit_char_and_run(c, |c| matches!(c, '&' | '<' | '\0')),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    pub(super) fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<)"
            // "Switch to the RAWTEXT less-than sign state."
            Some('<') => self.switch_to(TokenizerState::RAWTEXTLessThanSign),
            Some('\0') => self.null_to_replacement(),
            None => self.emit_eof(),
            Some(c) => self.emit_char_and_run(c, |c| matches!(c, '<' | '\0')),
        }
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    pub(super) fn handle_script_data_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<)"
            // "Switch to the script data less-than sign state."
            Some('<') => self.switch_to(TokenizerState::ScriptDataLessThanSign),
            Some('\0') => self.null_to_replacement(),
            None => self.emit_eof(),
            Some(c) => self.emit_char_and_run(c, |c| matches!(c, '<' | '\0')),
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    pub(super) fn handle_plaintext_state(&mut self) {
        match self.current_input_character {
            Some('\0') => self.null_to_replacement(),
            None => self.emit_eof(),
            Some(c) => self.emit_char_and_run(c, |c| c == '\0'),
        }
    }

    /// "This is an unexpected-null-character parse error. Emit a U+FFFD
    /// REPLACEMENT CHARACTER character token."
    fn null_to_replacement(&mut self) {
        self.parse_error(TokenizerError::UnexpectedNullCharacter);
        self.emit_char('\u{FFFD}');
    }

    // ===== end tags inside text =====

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    pub(super) fn handle_text_less_than_sign_state(
        &mut self,
        text_state: TokenizerState,
        end_tag_open_state: TokenizerState,
    ) {
        match self.current_input_character {
            // "U+002F SOLIDUS (/)"
            // "Set the temporary buffer to the empty string. Switch to the ... end tag open state."
            Some('/') => {
                self.scratch.temporary_buffer.clear();
                self.switch_to(end_tag_open_state);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token. Reconsume in the ... state."
            _ => {
                self.emit_char('<');
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    /// and its RAWTEXT, script data and script data escaped counterparts.
    pub(super) fn handle_text_end_tag_open_state(
        &mut self,
        text_state: TokenizerState,
        end_tag_name_state: TokenizerState,
    ) {
        match self.current_input_character {
            // "ASCII alpha"
            // "Create a new end tag token, set its tag name to the empty string. Reconsume in
            // the ... end tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.scratch.begin_end_tag();
                self.reconsume_in(end_tag_name_state);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token and a U+002F SOLIDUS character token.
            // Reconsume in the ... state."
            _ => {
                self.emit_str("</");
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// and its RAWTEXT, script data and script data escaped counterparts.
    pub(super) fn handle_text_end_tag_name_state(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)"
            // "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)"
            // "U+0020 SPACE"
            // "If the current end tag token is an appropriate end tag token, then switch to the
            // before attribute name state. Otherwise, treat it as per the "anything else" entry below."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/)"
            // "If the current end tag token is an appropriate end tag token, then switch to the
            // self-closing start tag state."
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "If the current end tag token is an appropriate end tag token, then switch to the
            // data state and emit the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character (add 0x0020 to the
            // character's code point) to the current tag token's tag name. Append the current
            // input character to the temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                self.scratch.push_tag_name(c.to_ascii_lowercase());
                self.scratch.temporary_buffer.push(c);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character token,
            // and a character token for each of the characters in the temporary buffer (in the
            // order they were added to the buffer). Reconsume in the ... state."
            _ => {
                self.emit_less_than_solidus_and_temporary_buffer();
                self.reconsume_in(text_state);
            }
        }
    }

    // ===== script data escapes =====

    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn handle_script_data_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.scratch.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEndTagOpen);
            }
            // "U+0021 EXCLAMATION MARK (!)"
            // "Switch to the script data escape start state. Emit a U+003C LESS-THAN SIGN
            // character token and a U+0021 EXCLAMATION MARK character token."
            Some('!') => {
                self.switch_to(TokenizerState::ScriptDataEscapeStart);
                self.emit_str("<!");
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptData);
            }
        }
    }

    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    pub(super) fn handle_script_data_escape_start_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::ScriptDataEscapeStartDash);
            self.emit_char('-');
        } else {
            self.reconsume_in(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    pub(super) fn handle_script_data_escape_start_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
            self.emit_char('-');
        } else {
            self.reconsume_in(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    pub(super) fn handle_script_data_escaped_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataEscapedDash);
                self.emit_char('-');
            }
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => self.null_to_replacement(),
            // "EOF - This is an eof-in-script-html-comment-like-text parse error.
            // Emit an end-of-file token."
            None => {
                self.parse_error(TokenizerError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => self.emit_char_and_run(c, |c| matches!(c, '-' | '<' | '\0')),
        }
    }

    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    pub(super) fn handle_script_data_escaped_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
                self.emit_char('-');
            }
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.null_to_replacement();
            }
            None => {
                self.parse_error(TokenizerError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    pub(super) fn handle_script_data_escaped_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.emit_char('-'),
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the script data state. Emit a U+003E GREATER-THAN SIGN character token."
            Some('>') => {
                self.switch_to(TokenizerState::ScriptData);
                self.emit_char('>');
            }
            Some('\0') => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.null_to_replacement();
            }
            None => {
                self.parse_error(TokenizerError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_escaped_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.scratch.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEscapedEndTagOpen);
            }
            // "ASCII alpha"
            // "Set the temporary buffer to the empty string. Emit a U+003C LESS-THAN SIGN
            // character token. Reconsume in the script data double escape start state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.scratch.temporary_buffer.clear();
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptDataDoubleEscapeStart);
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    pub(super) fn handle_script_data_double_escape_start_state(&mut self) {
        self.double_escape_boundary(
            TokenizerState::ScriptDataDoubleEscaped,
            TokenizerState::ScriptDataEscaped,
        );
    }

    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    pub(super) fn handle_script_data_double_escape_end_state(&mut self) {
        self.double_escape_boundary(
            TokenizerState::ScriptDataEscaped,
            TokenizerState::ScriptDataDoubleEscaped,
        );
    }

    /// Shared body of the double escape start and end states.
    ///
    /// "If the temporary buffer is the string "script", then switch to the
    /// `on_script` state. Otherwise, switch to the `otherwise` state. Emit the
    /// current input character as a character token."
    fn double_escape_boundary(&mut self, on_script: TokenizerState, otherwise: TokenizerState) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) || c == '/' || c == '>' => {
                if self.scratch.temporary_buffer == "script" {
                    self.switch_to(on_script);
                } else {
                    self.switch_to(otherwise);
                }
                self.emit_char(c);
            }
            // "ASCII upper alpha: Append the lowercase version of the current input
            // character to the temporary buffer. Emit the current input character."
            Some(c) if c.is_ascii_alphabetic() => {
                self.scratch.temporary_buffer.push(c.to_ascii_lowercase());
                self.emit_char(c);
            }
            _ => self.reconsume_in(otherwise),
        }
    }

    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    pub(super) fn handle_script_data_double_escaped_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedDash);
                self.emit_char('-');
            }
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('\0') => self.null_to_replacement(),
            None => {
                self.parse_error(TokenizerError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => self.emit_char_and_run(c, |c| matches!(c, '-' | '<' | '\0')),
        }
    }

    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedDashDash);
                self.emit_char('-');
            }
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('\0') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.null_to_replacement();
            }
            None => {
                self.parse_error(TokenizerError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.emit_char('-'),
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('>') => {
                self.switch_to(TokenizerState::ScriptData);
                self.emit_char('>');
            }
            Some('\0') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.null_to_replacement();
            }
            None => {
                self.parse_error(TokenizerError::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_double_escaped_less_than_sign_state(&mut self) {
        if self.current_input_character == Some('/') {
            self.scratch.temporary_buffer.clear();
            self.switch_to(TokenizerState::ScriptDataDoubleEscapeEnd);
            self.emit_char('/');
        } else {
            self.reconsume_in(TokenizerState::ScriptDataDoubleEscaped);
        }
    }
}
