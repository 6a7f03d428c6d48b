//! Character reference resolution.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The WHATWG per-character sub-states (named, ambiguous
//! ampersand, numeric, hexadecimal, decimal, numeric end) are folded into
//! [`resolve`], a pure function over the lookahead that follows the `&`.
//! The tokenizer calls it from the single character reference state and
//! suspends when the answer depends on input that has not arrived yet.

use super::core::{HTMLTokenizer, TokenizerState};
use super::errors::TokenizerError;
use super::named_character_references::{
    MAX_ENTITY_NAME_LENGTH, MAX_LEGACY_NAME_LENGTH, lookup_entity, lookup_legacy_entity,
};

/// The decoded replacement for a character reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharRefValue {
    /// A numeric reference, after replacement-table mapping.
    Code(char),
    /// A named reference: one or two code points from the entity table.
    Named(&'static str),
}

impl CharRefValue {
    /// Append the replacement to `out`.
    pub fn push_to(self, out: &mut String) {
        match self {
            Self::Code(c) => out.push(c),
            Self::Named(s) => out.push_str(s),
        }
    }
}

/// Outcome of resolving the input after an `&`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharRefResolution {
    /// A reference was recognised.
    Match {
        /// The replacement text.
        value: CharRefValue,
        /// Input bytes consumed after the `&`, including any `;`.
        consumed: usize,
        /// Parse errors raised while resolving.
        errors: Vec<TokenizerError>,
    },
    /// Not a reference. The `&` is literal and nothing after it is consumed.
    NoMatch {
        /// A parse error raised while looking, if any.
        error: Option<TokenizerError>,
    },
    /// The answer depends on input that has not arrived yet.
    Pending,
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: [(u32, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// Resolve the character reference whose text starts at `input` (the
/// characters right after the `&`).
///
/// `in_attribute` is true when the reference is "consumed as part of an
/// attribute"; the no-semicolon legacy names are not recognised there.
/// `more_input_possible` is false once the caller knows `input` is all that
/// remains, so every partial match resolves against what is there.
#[must_use]
pub fn resolve(input: &str, in_attribute: bool, more_input_possible: bool) -> CharRefResolution {
    match input.as_bytes().first() {
        None if more_input_possible => CharRefResolution::Pending,
        None => CharRefResolution::NoMatch { error: None },
        Some(b'#') => resolve_numeric(input, more_input_possible),
        Some(b) if b.is_ascii_alphanumeric() => resolve_named(input, in_attribute, more_input_possible),
        Some(_) => CharRefResolution::NoMatch { error: None },
    }
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
fn resolve_numeric(input: &str, more_input_possible: bool) -> CharRefResolution {
    let bytes = input.as_bytes();
    // "U+0078 LATIN SMALL LETTER X, U+0058 LATIN CAPITAL LETTER X"
    let (radix, digits_start) = match bytes.get(1) {
        Some(b'x' | b'X') => (16, 2),
        Some(_) => (10, 1),
        None if more_input_possible => return CharRefResolution::Pending,
        None => (10, 1),
    };

    let digit_count = bytes[digits_start..]
        .iter()
        .take_while(|b| char::from(**b).is_digit(radix))
        .count();
    let digits_end = digits_start + digit_count;
    if digits_end == bytes.len() && more_input_possible {
        return CharRefResolution::Pending;
    }

    // "This is an absence-of-digits-in-numeric-character-reference parse error.
    // Flush code points consumed as a character reference."
    if digit_count == 0 {
        return CharRefResolution::NoMatch {
            error: Some(TokenizerError::AbsenceOfDigitsInNumericCharacterReference),
        };
    }

    // The accumulated value saturates; anything past 0x10FFFF is out of range anyway.
    let code = input[digits_start..digits_end]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0u32, |acc, d| acc.saturating_mul(radix).saturating_add(d));

    let mut errors = Vec::new();
    let mut consumed = digits_end;
    if bytes.get(digits_end) == Some(&b';') {
        consumed += 1;
    } else {
        // "This is a missing-semicolon-after-character-reference parse error."
        errors.push(TokenizerError::MissingSemicolonAfterCharacterReference);
    }

    let value = numeric_replacement(code, &mut errors);
    CharRefResolution::Match {
        value: CharRefValue::Code(value),
        consumed,
        errors,
    }
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
fn numeric_replacement(code: u32, errors: &mut Vec<TokenizerError>) -> char {
    // "If the number is 0x00, then this is a null-character-reference parse error.
    // Set the character reference code to 0xFFFD."
    if code == 0 {
        errors.push(TokenizerError::NullCharacterReference);
        return '\u{FFFD}';
    }
    // "If the number is greater than 0x10FFFF, then this is a
    // character-reference-outside-unicode-range parse error."
    if code > 0x0010_FFFF {
        errors.push(TokenizerError::CharacterReferenceOutsideUnicodeRange);
        return '\u{FFFD}';
    }
    // "If the number is a surrogate, then this is a surrogate-character-reference
    // parse error."
    if (0xD800..=0xDFFF).contains(&code) {
        errors.push(TokenizerError::SurrogateCharacterReference);
        return '\u{FFFD}';
    }
    // "If the number is a noncharacter, then this is a
    // noncharacter-character-reference parse error."
    if (0xFDD0..=0xFDEF).contains(&code) || code & 0xFFFE == 0xFFFE {
        errors.push(TokenizerError::NoncharacterCharacterReference);
    }
    // "If the number is 0x0D, or a control that's not ASCII whitespace, then this
    // is a control-character-reference parse error."
    let is_control = code <= 0x1F || (0x7F..=0x9F).contains(&code);
    let is_ascii_whitespace = matches!(code, 0x09 | 0x0A | 0x0C | 0x20);
    if code == 0x0D || (is_control && !is_ascii_whitespace) {
        errors.push(TokenizerError::ControlCharacterReference);
    }
    if let Some(&(_, replacement)) = C1_REPLACEMENTS.iter().find(|(from, _)| *from == code) {
        return replacement;
    }
    char::from_u32(code).unwrap_or('\u{FFFD}')
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
fn resolve_named(input: &str, in_attribute: bool, more_input_possible: bool) -> CharRefResolution {
    let bytes = input.as_bytes();
    let scan_limit = MAX_ENTITY_NAME_LENGTH + 1;
    let run = bytes
        .iter()
        .take(scan_limit)
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if run == bytes.len() && run < scan_limit && more_input_possible {
        return CharRefResolution::Pending;
    }

    let name = &input[..run];
    let terminated = bytes.get(run) == Some(&b';');
    if terminated
        && let Some(value) = lookup_entity(name)
    {
        return CharRefResolution::Match {
            value: CharRefValue::Named(value),
            consumed: run + 1,
            errors: Vec::new(),
        };
    }

    // Legacy names match the longest prefix, without a semicolon, outside
    // attribute values only.
    if !in_attribute {
        for len in (2..=run.min(MAX_LEGACY_NAME_LENGTH)).rev() {
            if let Some(value) = lookup_legacy_entity(&name[..len]) {
                return CharRefResolution::Match {
                    value: CharRefValue::Named(value),
                    consumed: len,
                    errors: vec![TokenizerError::MissingSemicolonAfterCharacterReference],
                };
            }
        }
    }

    // [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    // "U+003B SEMICOLON (;) This is an unknown-named-character-reference parse error."
    CharRefResolution::NoMatch {
        error: terminated.then_some(TokenizerError::UnknownNamedCharacterReference),
    }
}

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Returns true if the return state is an attribute value state.
    /// Per spec: "consumed as part of an attribute"
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Entered by reconsuming the `&`. The lookahead is everything after it.
    pub(super) fn handle_character_reference_state(&mut self) {
        let in_attribute = self.is_consumed_as_part_of_attribute();
        let more_input_possible = self.input.more_input_possible();
        match resolve(self.input.available(), in_attribute, more_input_possible) {
            CharRefResolution::Pending => self.suspend(),
            CharRefResolution::NoMatch { error } => {
                if let Some(error) = error {
                    self.parse_error(error);
                }
                self.flush_code_points_consumed_as_character_reference("&");
                self.switch_to_return_state();
            }
            CharRefResolution::Match {
                value,
                consumed,
                errors,
            } => {
                self.input.advance(consumed);
                for error in errors {
                    self.parse_error(error);
                }
                let mut replacement = String::new();
                value.push_to(&mut replacement);
                self.flush_code_points_consumed_as_character_reference(&replacement);
                self.switch_to_return_state();
            }
        }
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    fn flush_code_points_consumed_as_character_reference(&mut self, text: &str) {
        if self.is_consumed_as_part_of_attribute() {
            self.scratch.push_str_attribute_value(text);
        } else {
            self.emit_str(text);
        }
    }

    fn switch_to_return_state(&mut self) {
        let state = self.return_state.take().unwrap_or(TokenizerState::Data);
        self.switch_to(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(input: &str, in_attribute: bool) -> Option<(String, usize)> {
        match resolve(input, in_attribute, false) {
            CharRefResolution::Match {
                value, consumed, ..
            } => {
                let mut out = String::new();
                value.push_to(&mut out);
                Some((out, consumed))
            }
            _ => None,
        }
    }

    #[test]
    fn test_named_with_semicolon() {
        assert_eq!(decoded("amp;", false), Some(("&".to_string(), 4)));
        assert_eq!(decoded("amp;", true), Some(("&".to_string(), 4)));
    }

    #[test]
    fn test_numeric_decimal_and_hex() {
        assert_eq!(decoded("#65;", false), Some(("A".to_string(), 4)));
        assert_eq!(decoded("#x41;", false), Some(("A".to_string(), 5)));
        assert_eq!(decoded("#X41", false), Some(("A".to_string(), 4)));
    }

    #[test]
    fn test_numeric_replacements() {
        assert_eq!(decoded("#0;", false), Some(("\u{FFFD}".to_string(), 3)));
        assert_eq!(decoded("#x80;", false), Some(("\u{20AC}".to_string(), 5)));
        assert_eq!(decoded("#xD800;", false), Some(("\u{FFFD}".to_string(), 7)));
        assert_eq!(
            decoded("#99999999999999999999;", false).map(|(s, _)| s),
            Some("\u{FFFD}".to_string())
        );
        assert_eq!(decoded("#x1F600;", false), Some(("\u{1F600}".to_string(), 8)));
    }

    #[test]
    fn test_absence_of_digits() {
        assert_eq!(
            resolve("#;", false, false),
            CharRefResolution::NoMatch {
                error: Some(TokenizerError::AbsenceOfDigitsInNumericCharacterReference)
            }
        );
    }

    #[test]
    fn test_unknown_named_reference() {
        assert_eq!(
            resolve("unknown;", false, false),
            CharRefResolution::NoMatch {
                error: Some(TokenizerError::UnknownNamedCharacterReference)
            }
        );
    }

    #[test]
    fn test_legacy_prefix_outside_attribute_only() {
        assert_eq!(decoded("notit;", false), Some(("\u{AC}".to_string(), 3)));
        assert_eq!(decoded("notit;", true), None);
        assert_eq!(decoded("copy", false), Some(("\u{A9}".to_string(), 4)));
    }

    #[test]
    fn test_two_code_point_entity() {
        assert_eq!(decoded("nvlt;", false), Some(("<\u{20D2}".to_string(), 5)));
    }

    #[test]
    fn test_pending_until_terminated() {
        assert_eq!(resolve("am", false, true), CharRefResolution::Pending);
        assert_eq!(resolve("#x4", false, true), CharRefResolution::Pending);
        assert_eq!(resolve("", false, true), CharRefResolution::Pending);
        assert_eq!(decoded("am", false), None);
    }
}
