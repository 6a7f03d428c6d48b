//! Tree printers for debugging, tests and the command line.

use std::fmt::Write as _;

use sprig_dom::{DomTree, ElementData, Namespace, NodeId, NodeType};

/// Print the subtree at `id` to stdout, one node per line.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Document => {
                println!("{prefix}Document");
            }
            NodeType::DocumentFragment => {
                println!("{prefix}#document-fragment");
            }
            NodeType::Doctype(doctype) => {
                println!("{prefix}<!DOCTYPE {}>", doctype.name);
            }
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|attr| {
                            if attr.value.is_empty() {
                                attr.qualified_name()
                            } else {
                                format!("{}=\"{}\"", attr.qualified_name(), attr.value)
                            }
                        })
                        .collect();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
                if let Some(contents) = data.template_contents {
                    print_tree(tree, contents, indent + 1);
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
            NodeType::Comment(data) => {
                println!("{prefix}<!-- {data} -->");
            }
        }
        for &child_id in tree.children(id) {
            print_tree(tree, child_id, indent + 1);
        }
    }
}

/// Serialize the children of `id` in the html5lib tree-construction test
/// format:
///
/// ```text
/// | <html>
/// |   <head>
/// |   <body>
/// |     <p>
/// |       class="x"
/// |       "text"
/// ```
#[must_use]
pub fn dump_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(id) {
        dump_node(tree, child, 0, &mut out);
    }
    out
}

fn dump_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    match &node.node_type {
        NodeType::Document | NodeType::DocumentFragment => {}
        NodeType::Doctype(doctype) => {
            if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
                let _ = writeln!(out, "| {indent}<!DOCTYPE {}>", doctype.name);
            } else {
                let _ = writeln!(
                    out,
                    "| {indent}<!DOCTYPE {} \"{}\" \"{}\">",
                    doctype.name, doctype.public_id, doctype.system_id
                );
            }
        }
        NodeType::Element(data) => {
            let _ = writeln!(out, "| {indent}<{}>", element_label(data));

            let mut attrs: Vec<(String, &str)> = data
                .attrs
                .iter()
                .map(|attr| {
                    let name = match attr.namespace {
                        Some(ns) => format!("{} {}", ns.short_name(), attr.name),
                        None => attr.name.clone(),
                    };
                    (name, attr.value.as_str())
                })
                .collect();
            attrs.sort();
            for (name, value) in attrs {
                let _ = writeln!(out, "| {indent}  {name}=\"{value}\"");
            }

            if let Some(contents) = data.template_contents {
                let _ = writeln!(out, "| {indent}  content");
                for &child in tree.children(contents) {
                    dump_node(tree, child, depth + 2, out);
                }
            }
        }
        NodeType::Text(data) => {
            let _ = writeln!(out, "| {indent}\"{data}\"");
        }
        NodeType::Comment(data) => {
            let _ = writeln!(out, "| {indent}<!-- {data} -->");
        }
    }

    for &child in tree.children(id) {
        dump_node(tree, child, depth + 1, out);
    }
}

/// `svg path`, `math mi`, or the bare name for HTML elements.
fn element_label(data: &ElementData) -> String {
    match data.namespace {
        Namespace::Html => data.tag_name.clone(),
        ns => format!("{} {}", ns.short_name(), data.tag_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_dom::AttributesMap;

    #[test]
    fn test_dump_sorts_attributes_and_nests() {
        let mut tree = DomTree::new();
        let mut attrs = AttributesMap::new();
        attrs.set("id", "a");
        attrs.set("class", "b");
        let div = tree.create_element("div", Namespace::Html, attrs);
        tree.append_child(NodeId::ROOT, div);
        let text = tree.create_text("hi");
        tree.append_child(div, text);

        assert_eq!(
            dump_tree(&tree, NodeId::ROOT),
            "| <div>\n|   class=\"b\"\n|   id=\"a\"\n|   \"hi\"\n"
        );
    }

    #[test]
    fn test_dump_prefixes_foreign_elements() {
        let mut tree = DomTree::new();
        let svg = tree.create_element("svg", Namespace::Svg, AttributesMap::new());
        tree.append_child(NodeId::ROOT, svg);
        assert_eq!(dump_tree(&tree, NodeId::ROOT), "| <svg svg>\n");
    }
}
