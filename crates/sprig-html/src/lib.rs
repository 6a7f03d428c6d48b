//! Incremental HTML tokenizer and tree builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Every tokenizer state, including script data escapes and CDATA sections
//!   - Named and numeric character reference resolution
//!   - Chunked input with suspension at any character boundary
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All insertion modes, including tables, select, templates and framesets
//!   - Adoption agency algorithm, foster parenting and Noah's Ark clause
//!   - SVG and MathML foreign content
//!   - Quirks mode from the DOCTYPE
//!   - Reentrant `write` and pause/resume around scripts
//!
//! - **Fragment parsing** ([WHATWG § 13.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments))
//!
//! # Example
//!
//! ```
//! use sprig_html::{HTMLParser, dump_tree};
//! use sprig_dom::NodeId;
//!
//! let mut parser = HTMLParser::new();
//! parser.feed("<p>Hello", false);
//! parser.feed(" world</p>", true);
//! let tree = parser.into_tree();
//! assert!(dump_tree(&tree, NodeId::ROOT).contains("\"Hello world\""));
//! ```

/// Parser options.
pub mod config;
/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use sprig_dom::{DomTree, NodeId};

pub use config::ParserConfig;
pub use parser::{
    FragmentContext, HTMLParser, InsertionMode, ParseIssue, ParseIssueKind, ScriptHandler,
    dump_tree, print_tree,
};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerError, TokenizerState, tokenize};

/// Parse a complete document with the default configuration.
#[must_use]
pub fn parse_document(html: &str) -> DomTree {
    let mut parser = HTMLParser::new();
    parser.feed(html, true);
    parser.into_tree()
}

/// Parse `html` as the contents of `context`. The returned node is the
/// fragment root; its children are the parsed nodes.
#[must_use]
pub fn parse_fragment(html: &str, context: &FragmentContext) -> (DomTree, NodeId) {
    let mut parser = HTMLParser::new_fragment(context.clone(), ParserConfig::default());
    parser.feed(html, true);
    parser.into_fragment()
}
