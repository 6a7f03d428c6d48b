//! Sprig CLI
//!
//! Tokenize or parse an HTML file (or an inline string) and print the result.

use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};
use sprig_dom::{DomTree, Namespace, NodeId, NodeType};
use sprig_html::{
    FragmentContext, HTMLParser, HTMLTokenizer, ParseIssue, ParserConfig, Token, TokenizerState,
    dump_tree, print_tree,
};

/// Sprig: inspect how HTML is tokenized and parsed
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the DOM tree of a file
    sprig ./index.html

    # Print the token stream
    sprig --tokens --html '<p class=x>Hi'

    # Parse as the contents of a <tr>
    sprig --fragment tr --html '<td>cell'

    # Feed three characters at a time
    sprig --chunk-size 3 ./index.html
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse an HTML string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print tokens instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Print JSON
    #[arg(long)]
    json: bool,

    /// Print the tree in html5lib test format
    #[arg(long, conflicts_with = "json")]
    html5lib: bool,

    /// Parse as a fragment of this context element (`svg:` or `math:` prefix for foreign contexts)
    #[arg(long, value_name = "TAG")]
    fragment: Option<String>,

    /// Enable the scripting flag
    #[arg(long)]
    scripting: bool,

    /// Feed the input this many characters at a time
    #[arg(long, value_name = "N")]
    chunk_size: Option<NonZeroUsize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let html = load_input(&cli)?;
    let chunks = split_chunks(&html, cli.chunk_size);
    let config = ParserConfig::default().with_scripting(cli.scripting);

    if cli.tokens {
        let tokens = tokenize_chunks(&chunks, config);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            println!("{}", "=== Tokens ===".bold());
            for token in &tokens {
                println!("{token:?}");
            }
        }
        return Ok(());
    }

    let mut parser = match &cli.fragment {
        Some(tag) => HTMLParser::new_fragment(fragment_context(tag), config),
        None => HTMLParser::with_config(config),
    };
    for chunk in &chunks {
        parser.feed(chunk, false);
    }
    parser.end();
    let issues = parser.issues().to_vec();

    let (tree, root) = if cli.fragment.is_some() {
        parser.into_fragment()
    } else {
        (parser.into_tree(), NodeId::ROOT)
    };

    if cli.json {
        let output = json!({
            "tree": node_to_json(&tree, root),
            "errors": issues.iter().map(issue_to_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "=== DOM Tree ===".bold());
    if cli.html5lib {
        print!("{}", dump_tree(&tree, root));
    } else {
        print_tree(&tree, root, 0);
    }

    if !issues.is_empty() {
        println!("\n{}", "=== Parse Errors ===".bold());
        for issue in &issues {
            let (line, column) = issue.position;
            println!(
                "{} {} {}",
                format!("{line}:{column}").dimmed(),
                issue.kind.yellow(),
                issue.message
            );
        }
    }

    Ok(())
}

fn load_input(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        return Ok(html.clone());
    }
    let Some(path) = &cli.path else {
        bail!("Pass a file path or --html");
    };
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Split `input` into runs of `size` characters.
fn split_chunks(input: &str, size: Option<NonZeroUsize>) -> Vec<&str> {
    let Some(size) = size else {
        return vec![input];
    };
    let mut chunks = Vec::new();
    let mut start = 0;
    for (count, (index, _)) in input.char_indices().enumerate() {
        if count > 0 && count % size.get() == 0 {
            chunks.push(&input[start..index]);
            start = index;
        }
    }
    chunks.push(&input[start..]);
    chunks
}

/// Tokenize without a tree builder. Text-only elements switch the
/// tokenizer state the way the tree builder would.
fn tokenize_chunks(chunks: &[&str], config: ParserConfig) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::with_config(config);
    let mut tokens = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        tokenizer.feed(chunk);
        if i + 1 == chunks.len() {
            tokenizer.end();
        }
        while let Some(token) = tokenizer.next_token() {
            if let Token::StartTag { name, .. } = &token
                && let Some(state) = TokenizerState::for_text_element(name, config.scripting)
            {
                tokenizer.set_state(state);
            }
            tokens.push(token);
        }
    }
    tokens
}

fn fragment_context(tag: &str) -> FragmentContext {
    match tag.split_once(':') {
        Some(("svg", name)) => FragmentContext::new(name).with_namespace(Namespace::Svg),
        Some(("math", name)) => FragmentContext::new(name).with_namespace(Namespace::MathMl),
        _ => FragmentContext::new(tag.to_ascii_lowercase()),
    }
}

fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };

    let mut value = match &node.node_type {
        NodeType::Document => json!({ "type": "document" }),
        NodeType::DocumentFragment => json!({ "type": "fragment" }),
        NodeType::Doctype(doctype) => json!({
            "type": "doctype",
            "name": doctype.name,
            "publicId": doctype.public_id,
            "systemId": doctype.system_id,
        }),
        NodeType::Element(data) => {
            let attributes: Map<String, Value> = data
                .attrs
                .iter()
                .map(|attr| (attr.qualified_name(), Value::from(attr.value.as_str())))
                .collect();
            let mut element = json!({
                "type": "element",
                "tagName": data.tag_name,
                "namespace": data.namespace.short_name(),
                "attributes": attributes,
            });
            if let Some(contents) = data.template_contents {
                element["content"] = node_to_json(tree, contents);
            }
            element
        }
        NodeType::Text(text) => json!({ "type": "text", "content": text }),
        NodeType::Comment(text) => json!({ "type": "comment", "content": text }),
    };

    let children: Vec<Value> = tree
        .children(id)
        .iter()
        .map(|&child| node_to_json(tree, child))
        .collect();
    if !children.is_empty() {
        value["children"] = Value::Array(children);
    }
    value
}

fn issue_to_json(issue: &ParseIssue) -> Value {
    json!({
        "stage": issue.kind.to_string(),
        "message": issue.message,
        "line": issue.position.0,
        "column": issue.position.1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_chunks_respects_char_boundaries() {
        let chunks = split_chunks("a\u{00E9}bc", NonZeroUsize::new(2));
        assert_eq!(chunks, vec!["a\u{00E9}", "bc"]);
    }

    #[test]
    fn test_split_chunks_without_size() {
        assert_eq!(split_chunks("abc", None), vec!["abc"]);
    }

    #[test]
    fn test_tokenize_chunks_switches_text_states() {
        let tokens = tokenize_chunks(&["<tit", "le><b></title>"], ParserConfig::default());
        assert_eq!(tokens[1], Token::text("<b>"));
    }

    #[test]
    fn test_fragment_context_namespace_prefix() {
        assert_eq!(fragment_context("svg:g").namespace, Namespace::Svg);
        assert_eq!(fragment_context("TD").tag_name, "td");
    }

    #[test]
    fn test_node_to_json_nests_children() {
        let mut parser = HTMLParser::new();
        parser.feed("<p id=a>x", true);
        let tree = parser.into_tree();
        let value = node_to_json(&tree, NodeId::ROOT);
        let body = &value["children"][0]["children"][1];
        assert_eq!(body["tagName"], "body");
        assert_eq!(body["children"][0]["attributes"]["id"], "a");
    }
}
