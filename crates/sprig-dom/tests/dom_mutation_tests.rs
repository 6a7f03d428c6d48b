//! Tests for the arena's mutators and queries as the tree builder uses them.

use sprig_dom::{AttributesMap, DomAttribute, DomTree, Namespace, NodeId, NodeType, QuirksMode};

/// Helper to create an HTML element node.
fn html_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(tag, Namespace::Html, AttributesMap::new())
}

/// Parent with children `a`, `b`, `c` in that order.
fn three_children(tree: &mut DomTree) -> (NodeId, [NodeId; 3]) {
    let parent = html_element(tree, "ul");
    let kids = ["a", "b", "c"].map(|tag| html_element(tree, tag));
    for kid in kids {
        tree.append_child(parent, kid);
    }
    (parent, kids)
}

/// Assert that the sibling links of `parent`'s children match its child list.
fn assert_links_consistent(tree: &DomTree, parent: NodeId) {
    let children = tree.children(parent);
    for (i, &child) in children.iter().enumerate() {
        assert_eq!(tree.parent(child), Some(parent));
        let prev = i.checked_sub(1).map(|p| children[p]);
        assert_eq!(tree.prev_sibling(child), prev, "prev of child {i}");
        assert_eq!(tree.next_sibling(child), children.get(i + 1).copied(), "next of child {i}");
    }
}

// ========== creation ==========

#[test]
fn test_create_element_keeps_namespace() {
    let mut tree = DomTree::new();
    let svg = tree.create_element("svg", Namespace::Svg, AttributesMap::new());
    let path = tree.create_element("foreignObject", Namespace::Svg, AttributesMap::new());
    tree.append_child(svg, path);

    let element = tree.as_element(path).expect("element");
    assert!(element.is(Namespace::Svg, "foreignObject"));
    assert!(!element.is_html("foreignObject"));
    assert_eq!(tree.parent(path), Some(svg));
    assert_eq!(tree.parent(svg), None);
}

#[test]
fn test_new_nodes_are_detached() {
    let mut tree = DomTree::new();
    let text = tree.create_text("x");
    let comment = tree.create_comment("c");

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.parent(text), None);
    assert_eq!(tree.children(NodeId::ROOT), &[] as &[NodeId]);
    assert_eq!(tree.as_text(text), Some("x"));
    assert_eq!(tree.as_text(comment), None);
    assert!(tree.as_element(text).is_none());
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);
    let z = html_element(&mut tree, "z");

    tree.insert_before(parent, z, a);

    assert_eq!(tree.children(parent), &[z, a, b, c]);
    assert_eq!(tree.first_child(parent), Some(z));
    assert_links_consistent(&tree, parent);
}

#[test]
fn test_insert_before_middle_child() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);
    let z = html_element(&mut tree, "z");

    tree.insert_before(parent, z, c);

    assert_eq!(tree.children(parent), &[a, b, z, c]);
    assert_eq!(tree.preceding_siblings(c).collect::<Vec<_>>(), vec![z, b, a]);
    assert_links_consistent(&tree, parent);
}

#[test]
fn test_insert_before_moves_a_sibling_within_the_same_parent() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);

    tree.insert_before(parent, c, a);

    assert_eq!(tree.children(parent), &[c, a, b]);
    assert_eq!(tree.last_child(parent), Some(b));
    assert_links_consistent(&tree, parent);
}

// ========== detach ==========

#[test]
fn test_detach_middle_child_joins_neighbours() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);

    tree.detach(b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.next_sibling(b), None);

    // A second detach has nothing to unlink.
    tree.detach(b);
    assert_eq!(tree.children(parent), &[a, c]);
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_after_existing() {
    let mut tree = DomTree::new();
    let (from, [a, b, c]) = three_children(&mut tree);
    let to = html_element(&mut tree, "ol");
    let existing = html_element(&mut tree, "li");
    tree.append_child(to, existing);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing, a, b, c]);
    assert_links_consistent(&tree, to);
}

#[test]
fn test_move_children_from_empty_parent() {
    let mut tree = DomTree::new();
    let from = html_element(&mut tree, "div");
    let (to, kids) = three_children(&mut tree);

    tree.move_children(from, to);

    assert_eq!(tree.children(to), &kids);
}

// ========== navigation ==========

#[test]
fn test_ancestors_walk_to_the_root() {
    let mut tree = DomTree::new();
    let html = html_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let (list, [_, b, _]) = three_children(&mut tree);
    tree.append_child(html, list);

    assert_eq!(tree.ancestors(b).collect::<Vec<_>>(), vec![list, html, NodeId::ROOT]);
    assert!(tree.is_descendant_of(b, NodeId::ROOT));
    assert!(!tree.is_descendant_of(b, b));
    assert_eq!(tree.ancestors(NodeId::ROOT).next(), None);
}

#[test]
fn test_template_contents_are_outside_the_tree() {
    let mut tree = DomTree::new();
    let template = html_element(&mut tree, "template");
    let contents = tree.template_contents(template).expect("template contents");
    let text = tree.create_text("inside");
    tree.append_child(contents, text);

    assert!(tree.children(template).is_empty());
    assert_eq!(tree.text_content(template), "");
    assert_eq!(tree.text_content(contents), "inside");
    assert!(!tree.is_descendant_of(text, template));
}

// ========== reparenting ==========

#[test]
fn test_append_child_moves_from_previous_parent() {
    let mut tree = DomTree::new();
    let first = html_element(&mut tree, "div");
    let second = html_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, first);
    tree.append_child(NodeId::ROOT, second);

    let a = html_element(&mut tree, "a");
    let b = html_element(&mut tree, "b");
    tree.append_child(first, a);
    tree.append_child(first, b);

    tree.append_child(second, a);

    assert_eq!(tree.children(first), &[b]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.children(second), &[a]);
    assert_eq!(tree.parent(a), Some(second));
}

#[test]
fn test_insert_before_missing_reference_appends() {
    let mut tree = DomTree::new();
    let parent = html_element(&mut tree, "div");
    let stranger = html_element(&mut tree, "span");
    let a = html_element(&mut tree, "a");
    let b = html_element(&mut tree, "b");
    tree.append_child(parent, a);

    tree.insert_before(parent, b, stranger);

    assert_eq!(tree.children(parent), &[a, b]);
}

#[test]
fn test_remove_child_of_other_parent_is_noop() {
    let mut tree = DomTree::new();
    let parent = html_element(&mut tree, "div");
    let other = html_element(&mut tree, "div");
    let child = html_element(&mut tree, "p");
    tree.append_child(parent, child);

    tree.remove_child(other, child);

    assert_eq!(tree.parent(child), Some(parent));
}

// ========== node data ==========

#[test]
fn test_template_gets_contents_fragment() {
    let mut tree = DomTree::new();
    let template = html_element(&mut tree, "template");
    let contents = tree.template_contents(template).expect("template contents");
    assert!(matches!(
        tree.get(contents).map(|n| &n.node_type),
        Some(NodeType::DocumentFragment)
    ));

    let svg_template = tree.create_element("template", Namespace::Svg, AttributesMap::new());
    assert_eq!(tree.template_contents(svg_template), None);
}

#[test]
fn test_attributes_keep_order_and_replace_on_set() {
    let mut tree = DomTree::new();
    let attrs: AttributesMap = [DomAttribute::new("b", "1"), DomAttribute::new("a", "2")]
        .into_iter()
        .collect();
    let el = tree.create_element("div", Namespace::Html, attrs);

    tree.set_attribute(el, "b", "3");
    tree.set_attribute(el, "c", "4");

    let names: Vec<_> = tree
        .as_element(el)
        .unwrap()
        .attrs
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, ["b", "a", "c"]);
    assert_eq!(tree.get_attribute(el, "b"), Some("3"));
}

#[test]
fn test_namespaced_attribute_lookup() {
    let mut attrs = AttributesMap::new();
    attrs.push(DomAttribute {
        name: "href".to_string(),
        prefix: Some("xlink".to_string()),
        namespace: Some(Namespace::XLink),
        value: "#a".to_string(),
    });

    assert_eq!(attrs.get("xlink:href"), Some("#a"));
    assert_eq!(attrs.get("href"), None);
    assert_eq!(attrs.get_ns(Some(Namespace::XLink), "href"), Some("#a"));
}

#[test]
fn test_document_accessors() {
    let mut tree = DomTree::new();
    let doctype = tree.create_doctype("html", "", "");
    tree.append_child(NodeId::ROOT, doctype);
    let html = html_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let head = html_element(&mut tree, "head");
    let body = html_element(&mut tree, "body");
    tree.append_child(html, head);
    tree.append_child(html, body);
    let text = tree.create_text("hi");
    tree.append_child(body, text);
    tree.append_text(text, " there");

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.text_content(html), "hi there");
    assert!(tree.is_descendant_of(text, html));

    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
    tree.set_quirks_mode(QuirksMode::Quirks);
    assert_eq!(tree.quirks_mode(), QuirksMode::Quirks);
}
