//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The tree builder: insertion modes, the stack of open elements, the list
//! of active formatting elements, foreign content and fragment parsing.

mod active_formatting;
mod adoption_agency;
mod core;
mod dump;
/// SVG and MathML adjustments and the rules for parsing tokens in foreign content.
pub mod foreign_content;
mod fragment;
mod insertion;
mod modes;
/// The stack of open elements and its scopes.
pub mod open_elements;
/// Quirks mode determination from the DOCTYPE.
pub mod quirks;
/// Element categories used by the insertion modes.
pub mod tag_sets;

pub use self::core::{HTMLParser, InsertionMode, ParseIssue, ParseIssueKind, ScriptHandler};
pub use active_formatting::{ActiveFormattingElements, FormattingEntry};
pub use dump::{dump_tree, print_tree};
pub use fragment::FragmentContext;
