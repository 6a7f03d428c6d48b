//! Integration tests for the HTML tokenizer.

use sprig_html::tokenizer::tokenize_with_config;
use sprig_html::{Attribute, HTMLTokenizer, ParserConfig, Token, TokenizerError, TokenizerState, tokenize};

/// Helper to drain every token from a tokenizer started in `state`.
fn tokenize_in_state(input: &str, state: TokenizerState, last_start_tag: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new();
    tokenizer.set_state(state);
    tokenizer.set_last_start_tag(last_start_tag);
    tokenizer.feed(input);
    tokenizer.end();
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        tokens.push(token);
    }
    tokens
}

/// Helper to collect the text of every character token.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(data.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_plain_text_is_one_run() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens, vec![Token::text("Hello"), Token::EndOfFile]);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            force_quirks,
            ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier, &None);
            assert!(!force_quirks);
        }
        other => panic!("Expected DOCTYPE token, got {other:?}"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    match &tokens[0] {
        Token::Doctype {
            public_identifier,
            system_identifier,
            ..
        } => {
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
        }
        other => panic!("Expected DOCTYPE token, got {other:?}"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    assert!(matches!(
        tokens[0],
        Token::Doctype {
            force_quirks: true,
            ..
        }
    ));
}

#[test]
fn test_start_and_end_tags() {
    let tokens = tokenize("<div></div>");
    assert_eq!(
        tokens,
        vec![Token::start_tag("div"), Token::end_tag("div"), Token::EndOfFile]
    );
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DiV></DIV>");
    assert_eq!(tokens[0].tag_name(), Some("div"));
    assert_eq!(tokens[1].tag_name(), Some("div"));
}

#[test]
fn test_attributes_in_all_quoting_styles() {
    let tokens = tokenize(r#"<input type="text" name='q' value=x disabled>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(
                attributes,
                &vec![
                    Attribute::new("type", "text"),
                    Attribute::new("name", "q"),
                    Attribute::new("value", "x"),
                    Attribute::new("disabled", ""),
                ]
            );
        }
        other => panic!("Expected start tag, got {other:?}"),
    }
}

#[test]
fn test_duplicate_attribute_keeps_first_value() {
    let mut tokenizer = HTMLTokenizer::new();
    tokenizer.feed(r#"<a href="one" href="two">"#);
    tokenizer.end();
    let token = tokenizer.next_token();
    assert_eq!(
        token.as_ref().and_then(|t| t.attribute("href")),
        Some("one")
    );
    assert!(
        tokenizer
            .errors()
            .iter()
            .any(|issue| issue.error == TokenizerError::DuplicateAttribute)
    );
}

#[test]
fn test_self_closing_flag() {
    let tokens = tokenize("<br/>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag { name, self_closing: true, .. } if name == "br"
    ));
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: " hello ".to_string()
        }
    );
}

#[test]
fn test_bogus_comment_from_question_mark() {
    let tokens = tokenize("<?xml version?>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "?xml version?".to_string()
        }
    );
}

#[test]
fn test_cdata_is_a_bogus_comment_in_html_content() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "[CDATA[x]]"));
}

#[test]
fn test_cdata_section_when_allowed() {
    let mut tokenizer = HTMLTokenizer::new();
    tokenizer.set_cdata_allowed(true);
    tokenizer.feed("<![CDATA[a<b]]>");
    tokenizer.end();
    assert_eq!(tokenizer.next_token(), Some(Token::text("a<b")));
}

#[test]
fn test_character_references_in_text() {
    assert_eq!(text_of(&tokenize("&amp;")), "&");
    assert_eq!(text_of(&tokenize("&#65;")), "A");
    assert_eq!(text_of(&tokenize("&#x41;")), "A");
    assert_eq!(text_of(&tokenize("&unknown;")), "&unknown;");
}

#[test]
fn test_legacy_reference_in_text_but_not_attribute() {
    // "&not" is a legacy name, so "&notit;" decodes in text...
    assert_eq!(text_of(&tokenize("&notit;")), "\u{00AC}it;");

    // ...but not inside an attribute, where the next character is alphanumeric.
    let tokens = tokenize(r#"<a title="&notit;">"#);
    assert_eq!(tokens[0].attribute("title"), Some("&notit;"));
}

#[test]
fn test_numeric_reference_replacements() {
    assert_eq!(text_of(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#x110000;")), "\u{FFFD}");
}

#[test]
fn test_title_content_is_rcdata() {
    let tokens = tokenize("<title><b>&amp;</b></title>");
    assert_eq!(tokens[1], Token::text("<b>&</b>"));
    assert_eq!(tokens[2], Token::end_tag("title"));
}

#[test]
fn test_style_content_is_rawtext() {
    let tokens = tokenize("<style>a &amp; b</style>");
    assert_eq!(tokens[1], Token::text("a &amp; b"));
}

#[test]
fn test_script_data_escapes() {
    let tokens = tokenize("<script><!--</script>--></script>");
    // The first end tag is inside an escaped comment but still closes the script.
    assert_eq!(tokens[1], Token::text("<!--"));
    assert_eq!(tokens[2], Token::end_tag("script"));
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize("<plaintext></plaintext>");
    assert_eq!(tokens[1], Token::text("</plaintext>"));
    assert!(tokens[2].is_eof());
}

#[test]
fn test_nul_is_replaced_in_rcdata_and_rawtext() {
    let rcdata = tokenize_in_state("a\0b", TokenizerState::RCDATA, "title");
    assert_eq!(text_of(&rcdata), "a\u{FFFD}b");

    let rawtext = tokenize_in_state("a\0b", TokenizerState::RAWTEXT, "style");
    assert_eq!(text_of(&rawtext), "a\u{FFFD}b");
}

#[test]
fn test_nul_in_data_is_passed_through_with_an_error() {
    let mut tokenizer = HTMLTokenizer::new();
    tokenizer.feed("a\0b");
    tokenizer.end();
    assert_eq!(tokenizer.next_token(), Some(Token::text("a\0b")));
    assert_eq!(
        tokenizer.errors()[0].error,
        TokenizerError::UnexpectedNullCharacter
    );
}

#[test]
fn test_crlf_normalized() {
    assert_eq!(text_of(&tokenize("a\r\nb\rc")), "a\nb\nc");
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize("text<div class=");
    assert_eq!(tokens, vec![Token::text("text"), Token::EndOfFile]);
}

#[test]
fn test_error_positions_are_recorded() {
    let mut tokenizer = HTMLTokenizer::new();
    tokenizer.feed("line one\n<a b c b>");
    tokenizer.end();
    while tokenizer.next_token().is_some() {}
    let issue = &tokenizer.errors()[0];
    assert_eq!(issue.error, TokenizerError::DuplicateAttribute);
    assert_eq!(issue.line, 2);
}

#[test]
fn test_fast_path_matches_full_states() {
    let input = "<div><p>one</p><span>two</span></div>";
    let fast = tokenize_with_config(input, ParserConfig::default());
    let slow = tokenize_with_config(
        input,
        ParserConfig::default().with_simple_tag_fast_path(false),
    );
    assert_eq!(fast, slow);
}

#[test]
fn test_incremental_feed_waits_for_complete_tag() {
    let mut tokenizer = HTMLTokenizer::new();
    tokenizer.feed("<di");
    assert_eq!(tokenizer.next_token(), None);
    tokenizer.feed("v>");
    assert_eq!(tokenizer.next_token(), Some(Token::start_tag("div")));
}

#[test]
fn test_is_finished_once_end_of_file_is_taken() {
    let mut tokenizer = HTMLTokenizer::new();
    tokenizer.feed("<p>x");
    tokenizer.end();
    assert!(!tokenizer.is_finished());

    let mut last = None;
    while let Some(token) = tokenizer.next_token() {
        last = Some(token);
    }
    assert_eq!(last, Some(Token::EndOfFile));
    assert!(tokenizer.is_finished());
}
