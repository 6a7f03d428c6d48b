//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether they
//! are syntactically correct or not. Certain points in the parsing algorithm are
//! said to be parse errors. The error handling for parse errors is well-defined."
//!
//! Tokenizer errors never stop tokenization. They are recorded with the
//! position of the character that triggered them.

use thiserror::Error;

/// A tokenizer parse error. `Display` yields the WHATWG error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[allow(missing_docs)]
pub enum TokenizerError {
    #[error("abrupt-closing-of-empty-comment")]
    AbruptClosingOfEmptyComment,
    #[error("abrupt-doctype-public-identifier")]
    AbruptDoctypePublicIdentifier,
    #[error("abrupt-doctype-system-identifier")]
    AbruptDoctypeSystemIdentifier,
    #[error("absence-of-digits-in-numeric-character-reference")]
    AbsenceOfDigitsInNumericCharacterReference,
    #[error("cdata-in-html-content")]
    CdataInHtmlContent,
    #[error("character-reference-outside-unicode-range")]
    CharacterReferenceOutsideUnicodeRange,
    #[error("control-character-reference")]
    ControlCharacterReference,
    #[error("duplicate-attribute")]
    DuplicateAttribute,
    #[error("end-tag-with-attributes")]
    EndTagWithAttributes,
    #[error("end-tag-with-trailing-solidus")]
    EndTagWithTrailingSolidus,
    #[error("eof-before-tag-name")]
    EofBeforeTagName,
    #[error("eof-in-cdata")]
    EofInCdata,
    #[error("eof-in-comment")]
    EofInComment,
    #[error("eof-in-doctype")]
    EofInDoctype,
    #[error("eof-in-script-html-comment-like-text")]
    EofInScriptHtmlCommentLikeText,
    #[error("eof-in-tag")]
    EofInTag,
    #[error("incorrectly-closed-comment")]
    IncorrectlyClosedComment,
    #[error("incorrectly-opened-comment")]
    IncorrectlyOpenedComment,
    #[error("invalid-character-sequence-after-doctype-name")]
    InvalidCharacterSequenceAfterDoctypeName,
    #[error("invalid-first-character-of-tag-name")]
    InvalidFirstCharacterOfTagName,
    #[error("missing-attribute-value")]
    MissingAttributeValue,
    #[error("missing-doctype-name")]
    MissingDoctypeName,
    #[error("missing-doctype-public-identifier")]
    MissingDoctypePublicIdentifier,
    #[error("missing-doctype-system-identifier")]
    MissingDoctypeSystemIdentifier,
    #[error("missing-end-tag-name")]
    MissingEndTagName,
    #[error("missing-quote-before-doctype-public-identifier")]
    MissingQuoteBeforeDoctypePublicIdentifier,
    #[error("missing-quote-before-doctype-system-identifier")]
    MissingQuoteBeforeDoctypeSystemIdentifier,
    #[error("missing-semicolon-after-character-reference")]
    MissingSemicolonAfterCharacterReference,
    #[error("missing-whitespace-after-doctype-public-keyword")]
    MissingWhitespaceAfterDoctypePublicKeyword,
    #[error("missing-whitespace-after-doctype-system-keyword")]
    MissingWhitespaceAfterDoctypeSystemKeyword,
    #[error("missing-whitespace-before-doctype-name")]
    MissingWhitespaceBeforeDoctypeName,
    #[error("missing-whitespace-between-attributes")]
    MissingWhitespaceBetweenAttributes,
    #[error("missing-whitespace-between-doctype-public-and-system-identifiers")]
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    #[error("nested-comment")]
    NestedComment,
    #[error("noncharacter-character-reference")]
    NoncharacterCharacterReference,
    #[error("null-character-reference")]
    NullCharacterReference,
    #[error("surrogate-character-reference")]
    SurrogateCharacterReference,
    #[error("unexpected-character-after-doctype-system-identifier")]
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    #[error("unexpected-character-in-attribute-name")]
    UnexpectedCharacterInAttributeName,
    #[error("unexpected-character-in-unquoted-attribute-value")]
    UnexpectedCharacterInUnquotedAttributeValue,
    #[error("unexpected-equals-sign-before-attribute-name")]
    UnexpectedEqualsSignBeforeAttributeName,
    #[error("unexpected-null-character")]
    UnexpectedNullCharacter,
    #[error("unexpected-question-mark-instead-of-tag-name")]
    UnexpectedQuestionMarkInsteadOfTagName,
    #[error("unexpected-solidus-in-tag")]
    UnexpectedSolidusInTag,
    #[error("unknown-named-character-reference")]
    UnknownNamedCharacterReference,
}

/// A recorded tokenizer error with its source position (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerIssue {
    /// The error.
    pub error: TokenizerError,
    /// Line of the character that triggered the error.
    pub line: usize,
    /// Column of the character that triggered the error.
    pub column: usize,
}

impl core::fmt::Display for TokenizerIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.error)
    }
}
