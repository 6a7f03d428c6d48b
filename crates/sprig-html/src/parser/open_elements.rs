//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
//!
//! "Initially, the stack of open elements is empty. The stack grows
//! downwards; the topmost node on the stack is the first one added to the
//! stack, and the bottommost node of the stack is the most recently added
//! node in the stack."
//!
//! Index 0 is the topmost node (the `html` element once parsing starts);
//! the last entry is the current node.

use sprig_dom::{DomTree, ElementData, Namespace, NodeId};

use super::tag_sets::{has_implied_end_tag, has_implied_end_tag_thoroughly};

/// The boundary set a scope query stops at.
///
/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope": adds `ol` and `ul`.
    ListItem,
    /// "has an element in button scope": adds `button`.
    Button,
    /// "has an element in table scope": only `html`, `table`, `template`.
    Table,
    /// "has an element in select scope": every element except `optgroup`
    /// and `option`.
    Select,
}

impl Scope {
    /// Whether `element` ends a search in this scope.
    fn is_boundary(self, element: &ElementData) -> bool {
        match self {
            Self::Default => is_default_scope_boundary(element),
            Self::ListItem => {
                is_default_scope_boundary(element)
                    || element.is_html("ol")
                    || element.is_html("ul")
            }
            Self::Button => is_default_scope_boundary(element) || element.is_html("button"),
            Self::Table => {
                element.is_html("html") || element.is_html("table") || element.is_html("template")
            }
            Self::Select => !(element.is_html("optgroup") || element.is_html("option")),
        }
    }
}

/// "The stack of open elements is said to have a particular element in scope
/// when it has that element in the specific scope consisting of the
/// following element types: applet, caption, html, table, td, th, marquee,
/// object, template, MathML mi, MathML mo, MathML mn, MathML ms, MathML
/// mtext, MathML annotation-xml, SVG foreignObject, SVG desc, SVG title"
fn is_default_scope_boundary(element: &ElementData) -> bool {
    match element.namespace {
        Namespace::Html => matches!(
            element.tag_name.as_str(),
            "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object"
                | "template"
        ),
        Namespace::MathMl => matches!(
            element.tag_name.as_str(),
            "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
        ),
        Namespace::Svg => matches!(
            element.tag_name.as_str(),
            "foreignObject" | "desc" | "title"
        ),
        _ => false,
    }
}

/// The stack of open elements. Entries are arena ids, so identity is index
/// identity and removing an entry never invalidates the node elsewhere.
#[derive(Debug, Clone, Default)]
pub struct OpenElements {
    elements: Vec<NodeId>,
}

impl OpenElements {
    /// An empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Push onto the stack; the node becomes the current node.
    pub fn push(&mut self, id: NodeId) {
        self.elements.push(id);
    }

    /// Pop the current node.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.elements.pop()
    }

    /// "The current node is the bottommost node in this stack of open elements."
    #[must_use]
    pub fn current(&self) -> Option<NodeId> {
        self.elements.last().copied()
    }

    /// Number of open elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The entry at `index`, counting from the topmost node.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.elements.get(index).copied()
    }

    /// Entries from the topmost node to the current node.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.elements.iter().copied()
    }

    /// Whether `id` is on the stack.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.elements.contains(&id)
    }

    /// Index of `id`, counting from the topmost node.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.elements.iter().rposition(|&e| e == id)
    }

    /// Insert `id` at `index`, shifting later entries toward the current node.
    pub fn insert(&mut self, index: usize, id: NodeId) {
        self.elements.insert(index.min(self.elements.len()), id);
    }

    /// `removeElement`: splice `id` out from anywhere. No effect if absent.
    pub fn remove_element(&mut self, id: NodeId) {
        if let Some(index) = self.position(id) {
            let _ = self.elements.remove(index);
        }
    }

    /// Replace `old` with `new` in place.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        if let Some(index) = self.position(old) {
            self.elements[index] = new;
        }
    }

    /// Keep only the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.elements.truncate(len);
    }

    /// Pop everything.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Whether the current node is an HTML element named `tag_name`.
    #[must_use]
    pub fn current_is(&self, tree: &DomTree, tag_name: &str) -> bool {
        self.current()
            .and_then(|id| tree.as_element(id))
            .is_some_and(|e| e.is_html(tag_name))
    }

    /// The most recently pushed HTML element named `tag_name`.
    #[must_use]
    pub fn find_last(&self, tree: &DomTree, tag_name: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .rev()
            .copied()
            .find(|&id| tree.as_element(id).is_some_and(|e| e.is_html(tag_name)))
    }

    /// `popTag`: pop until an HTML element named `tag_name` has been popped.
    pub fn pop_tag(&mut self, tree: &DomTree, tag_name: &str) -> Option<NodeId> {
        while let Some(id) = self.elements.pop() {
            if tree.as_element(id).is_some_and(|e| e.is_html(tag_name)) {
                return Some(id);
            }
        }
        None
    }

    /// `popElementType`: pop until an HTML element whose name is in
    /// `tag_names` has been popped.
    pub fn pop_until_one_of(&mut self, tree: &DomTree, tag_names: &[&str]) {
        while let Some(id) = self.elements.pop() {
            if tree
                .as_element(id)
                .is_some_and(|e| e.namespace == Namespace::Html && tag_names.contains(&e.tag_name.as_str()))
            {
                return;
            }
        }
    }

    /// `popElement`: pop down to and including `node`.
    pub fn pop_element(&mut self, node: NodeId) {
        debug_assert!(self.contains(node), "popped an element that is not open");
        if let Some(index) = self.position(node) {
            self.elements.truncate(index);
        }
    }

    /// `clearToContext`: "pop elements from the stack of open elements until
    /// the current node is" one of the HTML elements named in `tag_names`.
    pub fn clear_to_context(&mut self, tree: &DomTree, tag_names: &[&str]) {
        while let Some(id) = self.current() {
            let stop = tree
                .as_element(id)
                .is_some_and(|e| e.namespace == Namespace::Html && tag_names.contains(&e.tag_name.as_str()));
            if stop {
                return;
            }
            let _ = self.elements.pop();
        }
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "...while the current node is a dd element, a dt element, an li
    /// element, an optgroup element, an option element, a p element, an rb
    /// element, an rp element, an rt element, or an rtc element, the UA must
    /// pop the current node off the stack of open elements."
    ///
    /// "If a step requires the UA to generate implied end tags but lists an
    /// element to exclude from the process, then the UA must perform the
    /// above steps as if that element was not in the above list."
    pub fn generate_implied_end_tags(&mut self, tree: &DomTree, except: Option<&str>) {
        while let Some(element) = self.current().and_then(|id| tree.as_element(id)) {
            let name = element.tag_name.as_str();
            if element.namespace != Namespace::Html
                || !has_implied_end_tag(name)
                || except == Some(name)
            {
                return;
            }
            let _ = self.elements.pop();
        }
    }

    /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-all-implied-end-tags-thoroughly)
    pub fn generate_all_implied_end_tags_thoroughly(&mut self, tree: &DomTree) {
        while let Some(element) = self.current().and_then(|id| tree.as_element(id)) {
            if element.namespace != Namespace::Html
                || !has_implied_end_tag_thoroughly(&element.tag_name)
            {
                return;
            }
            let _ = self.elements.pop();
        }
    }

    /// [§ 13.2.4.2 Has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "1. Initialize node to be the current node (the bottommost node of the stack).
    ///  2. If node is the target node, terminate in a match state.
    ///  3. Otherwise, if node is one of the element types in list, terminate in a failure state.
    ///  4. Otherwise, set node to the previous entry in the stack of open
    ///     elements and return to step 2."
    #[must_use]
    pub fn has_in_scope(&self, tree: &DomTree, tag_name: &str, scope: Scope) -> bool {
        self.has_any_in_scope(tree, &[tag_name], scope)
    }

    /// Scope test for any HTML element named in `tag_names` (headings, table
    /// sections, cells).
    #[must_use]
    pub fn has_any_in_scope(&self, tree: &DomTree, tag_names: &[&str], scope: Scope) -> bool {
        for &id in self.elements.iter().rev() {
            let Some(element) = tree.as_element(id) else {
                continue;
            };
            if element.namespace == Namespace::Html && tag_names.contains(&element.tag_name.as_str())
            {
                return true;
            }
            if scope.is_boundary(element) {
                return false;
            }
        }
        false
    }

    /// Scope test against a specific node rather than a tag name.
    #[must_use]
    pub fn has_node_in_scope(&self, tree: &DomTree, node: NodeId, scope: Scope) -> bool {
        for &id in self.elements.iter().rev() {
            if id == node {
                return true;
            }
            if tree.as_element(id).is_some_and(|e| scope.is_boundary(e)) {
                return false;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use sprig_dom::AttributesMap;

    use super::*;

    fn open(tree: &mut DomTree, stack: &mut OpenElements, name: &str, ns: Namespace) -> NodeId {
        let id = tree.create_element(name, ns, AttributesMap::new());
        let parent = stack.current().unwrap_or(NodeId::ROOT);
        tree.append_child(parent, id);
        stack.push(id);
        id
    }

    #[test]
    fn test_scope_stops_at_boundary() {
        let mut tree = DomTree::new();
        let mut stack = OpenElements::new();
        let _ = open(&mut tree, &mut stack, "html", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "p", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "table", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "td", Namespace::Html);

        assert!(!stack.has_in_scope(&tree, "p", Scope::Default));
        assert!(stack.has_in_scope(&tree, "td", Scope::Table));
        assert!(stack.has_in_scope(&tree, "table", Scope::Table));
    }

    #[test]
    fn test_button_and_list_item_scope() {
        let mut tree = DomTree::new();
        let mut stack = OpenElements::new();
        let _ = open(&mut tree, &mut stack, "html", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "p", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "button", Namespace::Html);
        assert!(stack.has_in_scope(&tree, "p", Scope::Default));
        assert!(!stack.has_in_scope(&tree, "p", Scope::Button));

        let _ = open(&mut tree, &mut stack, "li", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "ul", Namespace::Html);
        assert!(!stack.has_in_scope(&tree, "li", Scope::ListItem));
    }

    #[test]
    fn test_select_scope_is_inverted() {
        let mut tree = DomTree::new();
        let mut stack = OpenElements::new();
        let _ = open(&mut tree, &mut stack, "html", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "select", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "optgroup", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "option", Namespace::Html);
        assert!(stack.has_in_scope(&tree, "select", Scope::Select));

        let _ = open(&mut tree, &mut stack, "b", Namespace::Html);
        assert!(!stack.has_in_scope(&tree, "select", Scope::Select));
    }

    #[test]
    fn test_foreign_boundaries() {
        let mut tree = DomTree::new();
        let mut stack = OpenElements::new();
        let _ = open(&mut tree, &mut stack, "html", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "p", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "svg", Namespace::Svg);
        assert!(stack.has_in_scope(&tree, "p", Scope::Default));
        let _ = open(&mut tree, &mut stack, "foreignObject", Namespace::Svg);
        assert!(!stack.has_in_scope(&tree, "p", Scope::Default));
    }

    #[test]
    fn test_implied_end_tags_respect_exception() {
        let mut tree = DomTree::new();
        let mut stack = OpenElements::new();
        let _ = open(&mut tree, &mut stack, "html", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "div", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "li", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "p", Namespace::Html);

        stack.generate_implied_end_tags(&tree, Some("li"));
        assert!(stack.current_is(&tree, "li"));
        stack.generate_implied_end_tags(&tree, None);
        assert!(stack.current_is(&tree, "div"));
    }

    #[test]
    fn test_pop_tag_and_remove_element() {
        let mut tree = DomTree::new();
        let mut stack = OpenElements::new();
        let html = open(&mut tree, &mut stack, "html", Namespace::Html);
        let div = open(&mut tree, &mut stack, "div", Namespace::Html);
        let span = open(&mut tree, &mut stack, "span", Namespace::Html);

        stack.remove_element(div);
        assert_eq!(stack.iter().collect::<Vec<_>>(), vec![html, span]);
        stack.remove_element(div);
        assert_eq!(stack.len(), 2);

        assert_eq!(stack.pop_tag(&tree, "html"), Some(html));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_clear_to_context_keeps_html() {
        let mut tree = DomTree::new();
        let mut stack = OpenElements::new();
        let html = open(&mut tree, &mut stack, "html", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "div", Namespace::Html);
        let _ = open(&mut tree, &mut stack, "span", Namespace::Html);

        stack.clear_to_context(&tree, &["table", "template", "html"]);
        assert_eq!(stack.current(), Some(html));
    }
}
