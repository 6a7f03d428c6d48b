//! Property tests for chunked input.
//!
//! Splitting the input at arbitrary character boundaries must not change the
//! tokens or the tree, and the simple tag fast path must agree with the full
//! tag states.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sprig_dom::NodeId;
use sprig_html::tokenizer::tokenize_with_config;
use sprig_html::{HTMLParser, HTMLTokenizer, ParserConfig, Token, TokenizerState, dump_tree};

/// Markup assembled from pieces that exercise most tokenizer states.
#[derive(Debug, Clone)]
struct Markup(String);

const PIECES: &[&str] = &[
    "<!DOCTYPE html>",
    "<p>",
    "</p>",
    "<div class=\"a b\">",
    "</div>",
    "<b>",
    "</b>",
    "<i>",
    "</i>",
    "<br/>",
    "<img src=x alt='y'>",
    "<table>",
    "<tr>",
    "<td>",
    "</table>",
    "<select><option>",
    "</select>",
    "<title>t&amp;</title>",
    "<textarea>\nx</textarea>",
    "<script>if (a<b) {}</script>",
    "<script><!--<script></script>--></script>",
    "<style>p{}</style>",
    "<svg><path d='M0'/><![CDATA[c]]></svg>",
    "<math><mi>x</mi></math>",
    "<template><p>t</template>",
    "<!-- note -->",
    "<!-x->",
    "<?pi?>",
    "&amp;",
    "&notit;",
    "&#x41;",
    "&#128;",
    "&",
    "<",
    "text ",
    " ",
    "\n",
    "\r\n",
    "\0",
    "\u{00E9}",
];

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = usize::arbitrary(g) % 24;
        let mut out = String::new();
        for _ in 0..count {
            if let Some(piece) = g.choose(PIECES) {
                out.push_str(piece);
            }
        }
        Self(out)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// Cut `input` into chunks at the char boundaries picked by `cuts`.
fn split_at_boundaries<'a>(input: &'a str, cuts: &[usize]) -> Vec<&'a str> {
    let boundaries: Vec<usize> = input
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(input.len()))
        .collect();
    let mut points: Vec<usize> = cuts
        .iter()
        .map(|cut| boundaries[cut % boundaries.len()])
        .collect();
    points.sort_unstable();
    points.dedup();

    let mut chunks = Vec::new();
    let mut start = 0;
    for point in points {
        chunks.push(&input[start..point]);
        start = point;
    }
    chunks.push(&input[start..]);
    chunks
}

/// Tokenize chunk by chunk, switching text states the way [`tokenize_with_config`] does.
fn tokenize_chunked(chunks: &[&str]) -> Vec<Token> {
    let config = ParserConfig::default();
    let mut tokenizer = HTMLTokenizer::with_config(config);
    let mut tokens = Vec::new();
    let drain = |tokenizer: &mut HTMLTokenizer, tokens: &mut Vec<Token>| {
        while let Some(token) = tokenizer.next_token() {
            if let Token::StartTag { name, .. } = &token
                && let Some(state) = TokenizerState::for_text_element(name, config.scripting)
            {
                tokenizer.set_state(state);
            }
            tokens.push(token);
        }
    };
    for chunk in chunks {
        tokenizer.feed(chunk);
        drain(&mut tokenizer, &mut tokens);
    }
    tokenizer.end();
    drain(&mut tokenizer, &mut tokens);
    tokens
}

fn parse_chunked(chunks: &[&str]) -> String {
    let mut parser = HTMLParser::new();
    for chunk in chunks {
        parser.feed(chunk, false);
    }
    parser.end();
    dump_tree(parser.tree(), NodeId::ROOT)
}

#[quickcheck]
fn prop_split_feed_gives_same_tokens(markup: Markup, cuts: Vec<usize>) -> bool {
    let whole = tokenize_with_config(&markup.0, ParserConfig::default());
    let chunks = split_at_boundaries(&markup.0, &cuts);
    tokenize_chunked(&chunks) == whole
}

#[quickcheck]
fn prop_split_feed_gives_same_tree(markup: Markup, cuts: Vec<usize>) -> bool {
    let whole = parse_chunked(&[&markup.0]);
    let chunks = split_at_boundaries(&markup.0, &cuts);
    parse_chunked(&chunks) == whole
}

#[quickcheck]
fn prop_fast_path_matches_full_states(markup: Markup) -> bool {
    let fast = tokenize_with_config(&markup.0, ParserConfig::default());
    let slow = tokenize_with_config(
        &markup.0,
        ParserConfig::default().with_simple_tag_fast_path(false),
    );
    fast == slow
}

#[test]
fn test_one_character_at_a_time() {
    let input = "<!DOCTYPE html><title>a&amp;b</title><p class=x>&notin; &#x41;<!--c--></p>";
    let chunks: Vec<&str> = split_at_boundaries(input, &(0..input.len()).collect::<Vec<_>>());
    assert_eq!(parse_chunked(&chunks), parse_chunked(&[input]));
}

#[test]
fn test_crlf_split_across_chunks() {
    assert_eq!(parse_chunked(&["a\r", "\nb"]), parse_chunked(&["a\nb"]));
}

#[test]
fn test_reference_split_across_chunks() {
    assert_eq!(parse_chunked(&["&no", "tin;"]), parse_chunked(&["&notin;"]));
}

#[test]
fn test_nested_write_keeps_document_order() {
    let mut parser = HTMLParser::new();
    parser.set_script_handler(|parser, script| {
        let text = parser.tree().text_content(script);
        if text == "outer" {
            parser.write("<p>one</p>");
            parser.write("<p>two</p>");
        }
    });
    parser.feed("<body><script>outer</script><p>three</p>", true);

    let tree = parser.into_tree();
    let body = tree.body().expect("body");
    assert_eq!(tree.text_content(body), "outeronetwothree");
}

#[test]
fn test_write_with_incomplete_tag_continues_into_input() {
    let mut parser = HTMLParser::new();
    parser.set_script_handler(|parser, _| parser.write("<p id="));
    parser.feed("<body><script></script>\"x\">y", true);

    let dump = dump_tree(parser.tree(), NodeId::ROOT);
    assert!(dump.contains("<p>\n|       id=\"x\"\n|       \"y\""), "{dump}");
}
