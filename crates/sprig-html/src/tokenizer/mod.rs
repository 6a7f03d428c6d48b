//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard, fed incrementally through
//! [`HTMLTokenizer::feed`].

/// Character reference parsing per § 13.2.5.72 to § 13.2.5.80.
pub mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Tokenizer parse error codes.
pub mod errors;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Incremental input buffer with newline normalization.
pub mod input;
mod markup_states;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
mod scratch;
mod tag_states;
mod text_states;
/// Token types produced by the tokenizer.
pub mod token;

pub use character_reference::{CharRefResolution, CharRefValue, resolve};
pub use self::core::{HTMLTokenizer, TokenizerState, tokenize, tokenize_with_config};
pub use errors::{TokenizerError, TokenizerIssue};
pub use input::{InputStream, Lookahead, NextChar, normalize_newlines};
pub use token::{Attribute, Token};
