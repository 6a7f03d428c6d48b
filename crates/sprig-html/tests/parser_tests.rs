//! Integration tests for the HTML parser.
//!
//! Expected trees use the html5lib tree-construction format produced by
//! [`dump_tree`].

use std::cell::RefCell;
use std::rc::Rc;

use sprig_dom::{NodeId, QuirksMode};
use sprig_html::{
    FragmentContext, HTMLParser, InsertionMode, ParseIssueKind, ParserConfig, dump_tree,
    parse_document, parse_fragment,
};

const HTML_HEAD_BODY: &str = "| <html>\n|   <head>\n|   <body>\n";

/// Helper to parse a complete document and dump it.
fn dump(html: &str) -> String {
    dump_tree(&parse_document(html), NodeId::ROOT)
}

/// Helper for documents whose content all lands in `body`.
fn body(lines: &[&str]) -> String {
    let mut expected = HTML_HEAD_BODY.to_string();
    for line in lines {
        expected.push_str("|     ");
        expected.push_str(line);
        expected.push('\n');
    }
    expected
}

fn quirks_of(html: &str) -> QuirksMode {
    let mut parser = HTMLParser::new();
    parser.feed(html, true);
    parser.quirks_mode()
}

#[test]
fn test_implied_html_head_body() {
    assert_eq!(dump("<p>Hello"), body(&["<p>", "  \"Hello\""]));
}

#[test]
fn test_empty_document_gets_skeleton() {
    assert_eq!(dump(""), HTML_HEAD_BODY);
}

#[test]
fn test_doctype_node() {
    assert_eq!(
        dump("<!DOCTYPE html>"),
        format!("| <!DOCTYPE html>\n{HTML_HEAD_BODY}")
    );
}

#[test]
fn test_head_content_stays_in_head() {
    assert_eq!(
        dump("<title>t</title>x"),
        "| <html>\n|   <head>\n|     <title>\n|       \"t\"\n|   <body>\n|     \"x\"\n"
    );
}

#[test]
fn test_misnested_formatting_is_reported_and_repaired() {
    assert_eq!(
        dump("<b>1<i>2</b>3</i>"),
        body(&[
            "<b>",
            "  \"1\"",
            "  <i>",
            "    \"2\"",
            "<i>",
            "  \"3\"",
        ])
    );
}

#[test]
fn test_adoption_agency_moves_block_out_of_formatting() {
    assert_eq!(
        dump("<b>1<p>2</b>3</p>"),
        body(&[
            "<b>",
            "  \"1\"",
            "<p>",
            "  <b>",
            "    \"2\"",
            "  \"3\"",
        ])
    );
}

#[test]
fn test_formatting_is_reconstructed_after_block_end() {
    assert_eq!(
        dump("<p><b>x</p>y"),
        body(&["<p>", "  <b>", "    \"x\"", "<b>", "  \"y\""])
    );
}

#[test]
fn test_noahs_ark_limits_identical_entries_to_three() {
    assert_eq!(
        dump("<p><b><b><b><b><p>x"),
        body(&[
            "<p>",
            "  <b>",
            "    <b>",
            "      <b>",
            "        <b>",
            "<p>",
            "  <b>",
            "    <b>",
            "      <b>",
            "        \"x\"",
        ])
    );
}

#[test]
fn test_text_in_table_is_foster_parented() {
    assert_eq!(
        dump("<table>X<tr><td>Y</td></tr></table>"),
        body(&[
            "\"X\"",
            "<table>",
            "  <tbody>",
            "    <tr>",
            "      <td>",
            "        \"Y\"",
        ])
    );
}

#[test]
fn test_element_in_table_is_foster_parented() {
    assert_eq!(
        dump("<table><div>x</div></table>"),
        body(&["<div>", "  \"x\"", "<table>"])
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    assert_eq!(
        dump("<table> <tr><td>x</td></tr></table>"),
        body(&[
            "<table>",
            "  \" \"",
            "  <tbody>",
            "    <tr>",
            "      <td>",
            "        \"x\"",
        ])
    );
}

#[test]
fn test_select_options() {
    assert_eq!(
        dump("<select><option>a<option>b</select>"),
        body(&[
            "<select>",
            "  <option>",
            "    \"a\"",
            "  <option>",
            "    \"b\"",
        ])
    );
}

#[test]
fn test_textarea_drops_leading_newline() {
    assert_eq!(
        dump("<textarea>\nx</textarea>"),
        body(&["<textarea>", "  \"x\""])
    );
}

#[test]
fn test_template_contents() {
    assert_eq!(
        dump("<template><p>x</p></template>"),
        "| <html>\n|   <head>\n|     <template>\n|       content\n|         <p>\n|           \"x\"\n|   <body>\n"
    );
}

#[test]
fn test_frameset_replaces_body() {
    assert_eq!(
        dump("<frameset><frame></frameset>"),
        "| <html>\n|   <head>\n|   <frameset>\n|     <frame>\n"
    );
}

#[test]
fn test_comment_after_html_goes_to_document() {
    assert_eq!(
        dump("<html></html><!--c-->"),
        format!("{HTML_HEAD_BODY}| <!-- c -->\n")
    );
}

#[test]
fn test_svg_names_are_adjusted() {
    assert_eq!(
        dump(r#"<svg viewbox="0 0 1 1"><foreignobject><p>x</p></foreignobject></svg>"#),
        body(&[
            "<svg svg>",
            "  viewBox=\"0 0 1 1\"",
            "  <svg foreignObject>",
            "    <p>",
            "      \"x\"",
        ])
    );
}

#[test]
fn test_mathml_elements() {
    assert_eq!(
        dump("<math><mi>x</mi></math>"),
        body(&["<math math>", "  <math mi>", "    \"x\""])
    );
}

#[test]
fn test_html_start_tag_breaks_out_of_svg() {
    assert_eq!(dump("<svg><p>x"), body(&["<svg svg>", "<p>", "  \"x\""]));
}

#[test]
fn test_nul_is_dropped_in_body_and_replaced_in_foreign_content() {
    assert_eq!(dump("a\0b"), body(&["\"ab\""]));
    assert_eq!(
        dump("<svg>a\0b</svg>"),
        body(&["<svg svg>", "  \"a\u{FFFD}b\""])
    );
}

#[test]
fn test_cdata_section_inside_svg() {
    assert_eq!(
        dump("<svg><![CDATA[a<b]]></svg>"),
        body(&["<svg svg>", "  \"a<b\""])
    );
}

#[test]
fn test_quirks_mode_from_doctype() {
    assert_eq!(quirks_of("<p>"), QuirksMode::Quirks);
    assert_eq!(quirks_of("<!DOCTYPE html>"), QuirksMode::NoQuirks);
    assert_eq!(
        quirks_of(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#),
        QuirksMode::Quirks
    );
    assert_eq!(
        quirks_of(
            r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
        ),
        QuirksMode::LimitedQuirks
    );
}

#[test]
fn test_table_closes_paragraph_only_outside_quirks() {
    assert_eq!(dump("<p><table>"), body(&["<p>", "  <table>"]));
    assert_eq!(
        dump("<!DOCTYPE html><p><table>"),
        format!("| <!DOCTYPE html>\n{}", body(&["<p>", "<table>"]))
    );
}

#[test]
fn test_scripting_flag_makes_noscript_raw_text() {
    let mut parser = HTMLParser::with_config(ParserConfig::default().with_scripting(true));
    parser.feed("<body><noscript><b>x</b></noscript>", true);
    assert_eq!(
        dump_tree(parser.tree(), NodeId::ROOT),
        body(&["<noscript>", "  \"<b>x</b>\""])
    );
}

#[test]
fn test_parse_fragment_in_row_context() {
    let (tree, root) = parse_fragment("<td>x", &FragmentContext::new("tr"));
    assert_eq!(dump_tree(&tree, root), "| <td>\n|   \"x\"\n");
}

#[test]
fn test_parse_fragment_in_body_context() {
    let (tree, root) = parse_fragment("a<b>c</b>", &FragmentContext::new("div"));
    assert_eq!(dump_tree(&tree, root), "| \"a\"\n| <b>\n|   \"c\"\n");
}

#[test]
fn test_script_handler_sees_complete_script_text() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut parser = HTMLParser::new();
    parser.set_script_handler(move |parser, script| {
        sink.borrow_mut().push(parser.tree().text_content(script));
    });
    parser.feed("<script>var a", false);
    parser.feed(" = 1;</scr", false);
    assert!(seen.borrow().is_empty());
    parser.feed("ipt>", true);

    assert_eq!(*seen.borrow(), vec!["var a = 1;".to_string()]);
}

#[test]
fn test_write_from_script_handler_inserts_before_remaining_input() {
    let mut parser = HTMLParser::new();
    parser.set_script_handler(|parser, _| parser.write("<p>written</p>"));
    parser.feed("<script></script><div>after</div>", true);

    let tree = parser.into_tree();
    let body_id = tree.body().expect("body");
    assert_eq!(tree.text_content(body_id), "writtenafter");
}

#[test]
fn test_pause_from_script_handler_buffers_input() {
    let mut parser = HTMLParser::new();
    parser.set_script_handler(|parser, _| parser.pause());
    parser.feed("<script></script><div>after</div>", true);

    assert!(parser.is_paused());
    assert!(!parser.is_stopped());
    assert_eq!(parser.tree().text_content(NodeId::ROOT), "");

    parser.resume();
    assert!(parser.is_stopped());
    assert_eq!(parser.tree().text_content(NodeId::ROOT), "after");
}

/// Parse three scripts with `handler` running before each one records its text.
fn scripts_seen(handler: fn(&mut HTMLParser)) -> Vec<String> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut parser = HTMLParser::new();
    parser.set_script_handler(move |parser, script| {
        handler(parser);
        sink.borrow_mut().push(parser.tree().text_content(script));
    });
    parser.feed("<script>1</script><script>2</script><script>3</script>", true);
    assert!(parser.is_stopped());

    seen.take()
}

#[test]
fn test_pause_and_resume_inside_script_handler_keeps_handler() {
    let seen = scripts_seen(|parser| {
        parser.pause();
        parser.resume();
    });
    assert_eq!(seen, vec!["1", "2", "3"]);
}

#[test]
fn test_feed_inside_script_handler_keeps_handler() {
    let seen = scripts_seen(|parser| parser.feed("", false));
    assert_eq!(seen, vec!["1", "2", "3"]);
}

#[test]
fn test_feed_inside_script_handler_is_parsed_after_the_script() {
    let mut parser = HTMLParser::new();
    let mut fed = false;
    parser.set_script_handler(move |parser, _| {
        if !fed {
            fed = true;
            parser.feed("<i>late</i>", false);
        }
    });
    parser.feed("<script></script><b>x</b>", false);
    parser.end();

    let tree = parser.into_tree();
    let body_id = tree.body().expect("body");
    assert_eq!(tree.text_content(body_id), "xlate");
}

#[test]
fn test_stop_inside_script_handler_keeps_written_text() {
    let mut parser = HTMLParser::new();
    parser.set_script_handler(|parser, _| {
        parser.write("<b>w");
        parser.stop_parsing();
    });
    parser.feed("<body><script></script>", true);

    assert_eq!(
        dump_tree(parser.tree(), NodeId::ROOT),
        body(&["<script>", "<b>", "  \"w\""])
    );
}

#[test]
fn test_insertion_mode_while_streaming() {
    let mut parser = HTMLParser::new();
    parser.feed("<table><tr>", false);
    assert_eq!(parser.insertion_mode(), InsertionMode::InRow);
    parser.feed("<td>", false);
    assert_eq!(parser.insertion_mode(), InsertionMode::InCell);
}

#[test]
fn test_issues_from_both_stages() {
    let mut parser = HTMLParser::new();
    parser.feed("<!DOCTYPE html><p>a\0b</q>", true);

    let issues = parser.issues();
    assert!(
        issues
            .iter()
            .any(|i| i.kind == ParseIssueKind::Tokenizer && i.message == "unexpected-null-character")
    );
    assert!(
        issues
            .iter()
            .any(|i| i.kind == ParseIssueKind::TreeConstruction)
    );
}

#[test]
fn test_issues_can_be_disabled() {
    let mut parser = HTMLParser::with_config(ParserConfig::default().with_collect_issues(false));
    parser.feed("<p>a\0b</q>", true);
    assert!(parser.issues().is_empty());
}
