//! Tag and attribute states.
//!
//! [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
//! through [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::errors::TokenizerError;

impl HTMLTokenizer {
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    pub(super) fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration open state."
            //
            // Reconsumed so that the declaration state can look ahead from here.
            Some('!') => self.reconsume_in(TokenizerState::MarkupDeclarationOpen),
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            // "ASCII alpha - Create a new start tag token, set its tag name to the
            // empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.scratch.begin_start_tag();
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the bogus
            // comment state."
            Some('?') => {
                self.parse_error(TokenizerError::UnexpectedQuestionMarkInsteadOfTagName);
                self.scratch.begin_comment();
                self.reconsume_in(TokenizerState::BogusComment);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token and an end-of-file token."
            None => {
                self.parse_error(TokenizerError::EofBeforeTagName);
                self.emit_char('<');
                self.emit_eof();
            }
            // "Anything else - This is an invalid-first-character-of-tag-name parse
            // error. Emit a U+003C LESS-THAN SIGN character token. Reconsume in the
            // data state."
            Some(_) => {
                self.parse_error(TokenizerError::InvalidFirstCharacterOfTagName);
                self.emit_char('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    pub(super) fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            // "ASCII alpha - Create a new end tag token, set its tag name to the empty
            // string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.scratch.begin_end_tag();
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name parse
            // error. Switch to the data state."
            Some('>') => {
                self.parse_error(TokenizerError::MissingEndTagName);
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token, a U+002F SOLIDUS character token and
            // an end-of-file token."
            None => {
                self.parse_error(TokenizerError::EofBeforeTagName);
                self.emit_str("</");
                self.emit_eof();
            }
            // "Anything else - This is an invalid-first-character-of-tag-name parse
            // error. Create a comment token whose data is the empty string.
            // Reconsume in the bogus comment state."
            Some(_) => {
                self.parse_error(TokenizerError::InvalidFirstCharacterOfTagName);
                self.scratch.begin_comment();
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    pub(super) fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED,
            // U+0020 SPACE - Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the
            // current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            // "ASCII upper alpha - Append the lowercase version of the current input
            // character (add 0x0020 to the character's code point) to the current
            // tag token's tag name."
            Some(c) if c.is_ascii_uppercase() => {
                self.scratch.push_tag_name(c.to_ascii_lowercase());
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append
            // a U+FFFD REPLACEMENT CHARACTER character to the current tag token's
            // tag name."
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_tag_name('\u{FFFD}');
            }
            // "EOF - This is an eof-in-tag parse error. Emit an end-of-file token."
            None => self.eof_in_tag(),
            // "Anything else - Append the current input character to the current tag
            // token's tag name."
            Some(c) => self.scratch.push_tag_name(c),
        }
    }

    /// "This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The tag under construction is dropped.
    fn eof_in_tag(&mut self) {
        self.parse_error(TokenizerError::EofInTag);
        self.emit_eof();
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    pub(super) fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED,
            // U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF - Reconsume in
            // the after attribute name state."
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error. Start a new
            // attribute in the current tag token. Set that attribute's name to the
            // current input character, and its value to the empty string. Switch to
            // the attribute name state."
            Some('=') => {
                self.parse_error(TokenizerError::UnexpectedEqualsSignBeforeAttributeName);
                self.scratch.start_attribute();
                self.scratch.push_attribute_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            // "Anything else - Start a new attribute in the current tag token. Set
            // that attribute name and value to the empty string. Reconsume in the
            // attribute name state."
            Some(_) => {
                self.scratch.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    pub(super) fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED,
            // U+0020 SPACE, U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF -
            // Reconsume in the after attribute name state."
            Some(c) if Self::is_whitespace_char(c) => self.leave_attribute_name(TokenizerState::AfterAttributeName, true),
            Some('/' | '>') | None => self.leave_attribute_name(TokenizerState::AfterAttributeName, true),
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value state."
            Some('=') => self.leave_attribute_name(TokenizerState::BeforeAttributeValue, false),
            // "ASCII upper alpha - Append the lowercase version of the current input
            // character to the current attribute's name."
            Some(c) if c.is_ascii_uppercase() => {
                self.scratch.push_attribute_name(c.to_ascii_lowercase());
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append a
            // U+FFFD REPLACEMENT CHARACTER to the current attribute's name."
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_attribute_name('\u{FFFD}');
            }
            // "U+0022 QUOTATION MARK (\"), U+0027 APOSTROPHE ('), U+003C LESS-THAN SIGN (<) -
            // This is an unexpected-character-in-attribute-name parse error. Treat it as per the
            // 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.parse_error(TokenizerError::UnexpectedCharacterInAttributeName);
                self.scratch.push_attribute_name(c);
            }
            // "Anything else - Append the current input character to the current attribute's name."
            Some(c) => self.scratch.push_attribute_name(c),
        }
    }

    /// "When the user agent leaves the attribute name state (and before emitting
    /// the tag token, if appropriate), the complete attribute's name must be
    /// compared to the other attributes on the same token; if there is already
    /// an attribute on the token with the exact same name, then this is a
    /// duplicate-attribute parse error and the new attribute must be removed
    /// from the token."
    ///
    /// The duplicate is dropped when committed; its value is never recorded.
    fn leave_attribute_name(&mut self, next: TokenizerState, reconsume: bool) {
        if self.scratch.finish_attribute_name() {
            self.parse_error(TokenizerError::DuplicateAttribute);
        }
        if reconsume {
            self.reconsume_in(next);
        } else {
            self.switch_to(next);
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    pub(super) fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value state."
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            None => self.eof_in_tag(),
            // "Anything else - Start a new attribute in the current tag token. Set that
            // attribute name and value to the empty string. Reconsume in the attribute name state."
            Some(_) => {
                self.scratch.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    pub(super) fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0022 QUOTATION MARK (") - Switch to the attribute value (double-quoted) state."
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            // "U+0027 APOSTROPHE (') - Switch to the attribute value (single-quoted) state."
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-attribute-value parse
            // error. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.parse_error(TokenizerError::MissingAttributeValue);
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            // "Anything else - Reconsume in the attribute value (unquoted) state."
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    pub(super) fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            // "U+0022 QUOTATION MARK (") - Switch to the after attribute value (quoted) state."
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            // "U+0026 AMPERSAND (&) - Set the return state to the attribute value
            // (double-quoted) state. Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(self.state);
                self.reconsume_in(TokenizerState::CharacterReference);
            }
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_attribute_value('\u{FFFD}');
            }
            None => self.eof_in_tag(),
            Some(c) => self.scratch.push_attribute_value(c),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    pub(super) fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueUnquoted);
                self.reconsume_in(TokenizerState::CharacterReference);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.scratch.push_attribute_value('\u{FFFD}');
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C LESS-THAN SIGN (<),
            // U+003D EQUALS SIGN (=), U+0060 GRAVE ACCENT (`) - This is an
            // unexpected-character-in-unquoted-attribute-value parse error."
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.parse_error(TokenizerError::UnexpectedCharacterInUnquotedAttributeValue);
                self.scratch.push_attribute_value(c);
            }
            None => self.eof_in_tag(),
            Some(c) => self.scratch.push_attribute_value(c),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    pub(super) fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            None => self.eof_in_tag(),
            // "Anything else - This is a missing-whitespace-between-attributes parse
            // error. Reconsume in the before attribute name state."
            Some(_) => {
                self.parse_error(TokenizerError::MissingWhitespaceBetweenAttributes);
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    pub(super) fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Set the self-closing flag of the current
            // tag token. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.scratch.set_self_closing();
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            None => self.eof_in_tag(),
            // "Anything else - This is an unexpected-solidus-in-tag parse error.
            // Reconsume in the before attribute name state."
            Some(_) => {
                self.parse_error(TokenizerError::UnexpectedSolidusInTag);
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }
}
