//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//!
//! "Initially, the list of active formatting elements is empty. It is used
//! to handle mis-nested formatting element tags."

use sprig_dom::NodeId;

use super::HTMLParser;
use crate::tokenizer::{Attribute, Token};

/// "The list contains elements in the formatting category, and markers."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattingEntry {
    /// "A marker is an entry in the list of active formatting elements that
    /// is distinct from any element."
    ///
    /// Pushed when entering applet, object, marquee, template, td, th and
    /// caption.
    Marker,
    /// A formatting element and the token it was created for. Recreated
    /// elements clone the token's attributes, not the live element's.
    Element {
        /// The element in the arena.
        node: NodeId,
        /// The start tag the element was created from.
        token: Token,
    },
}

impl FormattingEntry {
    /// The element, if this entry is not a marker.
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        match self {
            Self::Element { node, .. } => Some(*node),
            Self::Marker => None,
        }
    }
}

/// The list itself. Identity is by `NodeId`.
#[derive(Debug, Clone, Default)]
pub struct ActiveFormattingElements {
    entries: Vec<FormattingEntry>,
}

impl ActiveFormattingElements {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries, markers included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FormattingEntry> {
        self.entries.get(index)
    }

    /// The most recently added entry.
    #[must_use]
    pub fn last(&self) -> Option<&FormattingEntry> {
        self.entries.last()
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, FormattingEntry> {
        self.entries.iter()
    }

    /// "insert a marker at the end of the list of active formatting elements"
    pub fn insert_marker(&mut self) {
        self.entries.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// "1. If there are already three elements in the list of active
    /// formatting elements after the last marker, if any, or anywhere in the
    /// list if there are no markers, that have the same tag name, namespace,
    /// and attributes as element, then remove the earliest such element from
    /// the list of active formatting elements. For these purposes, the
    /// attributes must be compared as they were when the elements were
    /// created by the parser; two elements have the same attributes if all
    /// their parsed attributes can be paired such that the two attributes in
    /// each pair have identical names, namespaces, and values (the order of
    /// the attributes does not matter).
    ///
    /// 2. Add element to the list of active formatting elements."
    pub fn push(&mut self, node: NodeId, token: Token) {
        let mut count = 0;
        let mut earliest = None;
        for (index, entry) in self.entries.iter().enumerate().rev() {
            match entry {
                FormattingEntry::Marker => break,
                FormattingEntry::Element { token: existing, .. } => {
                    if same_tag_and_attributes(existing, &token) {
                        count += 1;
                        earliest = Some(index);
                    }
                }
            }
        }

        if count >= 3
            && let Some(index) = earliest
        {
            let _ = self.entries.remove(index);
        }

        self.entries.push(FormattingEntry::Element { node, token });
    }

    /// Remove the entry for `node`. No effect if absent.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(index) = self.index_of(node) {
            let _ = self.entries.remove(index);
        }
    }

    /// Point the entry for `old` at `new`, keeping its token.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        if let Some(index) = self.index_of(old)
            && let FormattingEntry::Element { node, .. } = &mut self.entries[index]
        {
            *node = new;
        }
    }

    /// Insert an element entry at `index` (the adoption agency bookmark).
    pub fn insert_at(&mut self, index: usize, node: NodeId, token: Token) {
        let index = index.min(self.entries.len());
        self.entries
            .insert(index, FormattingEntry::Element { node, token });
    }

    /// Position of the entry for `node`.
    #[must_use]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|entry| entry.node() == Some(node))
    }

    /// Whether `node` has an entry.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.index_of(node).is_some()
    }

    /// The token `node` was created from.
    #[must_use]
    pub fn token_for(&self, node: NodeId) -> Option<&Token> {
        self.entries.iter().rev().find_map(|entry| match entry {
            FormattingEntry::Element { node: n, token } if *n == node => Some(token),
            _ => None,
        })
    }

    /// "the last element in the list of active formatting elements that is
    /// between the end of the list and the last marker in the list, if any,
    /// or the start of the list otherwise, and has the tag name"
    #[must_use]
    pub fn find_after_last_marker(&self, tag_name: &str) -> Option<NodeId> {
        for entry in self.entries.iter().rev() {
            match entry {
                FormattingEntry::Marker => return None,
                FormattingEntry::Element { node, token } => {
                    if token.tag_name() == Some(tag_name) {
                        return Some(*node);
                    }
                }
            }
        }
        None
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "1. Let entry be the last (most recently added) entry in the list.
    ///  2. Remove entry from the list.
    ///  3. If entry was a marker, then stop the algorithm at this point.
    ///  4. Go to step 1."
    pub fn clear_to_last_marker(&mut self) {
        while let Some(entry) = self.entries.pop() {
            if entry == FormattingEntry::Marker {
                break;
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn set_node(&mut self, index: usize, new: NodeId) {
        if let Some(FormattingEntry::Element { node, .. }) = self.entries.get_mut(index) {
            *node = new;
        }
    }
}

/// Noah's Ark equality: same tag name and the same attribute set in any order.
fn same_tag_and_attributes(a: &Token, b: &Token) -> bool {
    let (
        Token::StartTag {
            name: a_name,
            attributes: a_attrs,
            ..
        },
        Token::StartTag {
            name: b_name,
            attributes: b_attrs,
            ..
        },
    ) = (a, b)
    else {
        return false;
    };
    a_name == b_name
        && a_attrs.len() == b_attrs.len()
        && a_attrs.iter().all(|attr| contains_attr(b_attrs, attr))
}

fn contains_attr(attrs: &[Attribute], attr: &Attribute) -> bool {
    attrs.iter().any(|a| a == attr)
}

impl HTMLParser {
    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    pub(crate) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        //
        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there
        //          is nothing to reconstruct; stop this algorithm."
        match self.active_formatting.last() {
            None | Some(FormattingEntry::Marker) => return,
            Some(FormattingEntry::Element { node, .. }) => {
                if self.open_elements.contains(*node) {
                    return;
                }
            }
        }

        // STEP 3: "Let entry be the last (most recently added) element in the
        //          list of active formatting elements."
        let mut index = self.active_formatting.len() - 1;

        // STEP 4-6: Rewind.
        // "If there are no entries before entry in the list of active
        //  formatting elements, then jump to the step labeled create."
        // "Let entry be the entry one earlier than entry..."
        // "If entry is neither a marker nor an element that is also in the
        //  stack of open elements, go to the step labeled rewind."
        while index > 0 {
            let open = match self.active_formatting.get(index - 1) {
                Some(FormattingEntry::Marker) | None => true,
                Some(FormattingEntry::Element { node, .. }) => self.open_elements.contains(*node),
            };
            if open {
                break;
            }
            index -= 1;
        }

        // STEP 7-10: Advance and create.
        while index < self.active_formatting.len() {
            let Some(FormattingEntry::Element { token, .. }) = self.active_formatting.get(index)
            else {
                index += 1;
                continue;
            };
            let token = token.clone();

            // STEP 8: "Create: Insert an HTML element for the token for which
            //          the element entry was created, to obtain new element."
            let new_element = self.insert_html_element(&token);

            // STEP 9: "Replace the entry for entry in the list with an entry
            //          for new element."
            self.active_formatting.set_node(index, new_element);

            // STEP 10: "If the entry for new element in the list of active
            //           formatting elements is not the last entry in the list,
            //           return to the step labeled advance."
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, attrs: &[(&str, &str)]) -> Token {
        Token::StartTag {
            name: name.to_string(),
            self_closing: false,
            attributes: attrs.iter().map(|(n, v)| Attribute::new(*n, *v)).collect(),
        }
    }

    #[test]
    fn test_noahs_ark_keeps_three() {
        let mut list = ActiveFormattingElements::new();
        for i in 0..4 {
            list.push(NodeId(i + 1), tag("b", &[("class", "x")]));
        }
        assert_eq!(list.len(), 3);
        assert!(!list.contains(NodeId(1)));
        assert!(list.contains(NodeId(4)));
    }

    #[test]
    fn test_noahs_ark_ignores_attribute_order() {
        let mut list = ActiveFormattingElements::new();
        list.push(NodeId(1), tag("b", &[("a", "1"), ("b", "2")]));
        list.push(NodeId(2), tag("b", &[("b", "2"), ("a", "1")]));
        list.push(NodeId(3), tag("b", &[("a", "1"), ("b", "2")]));
        list.push(NodeId(4), tag("b", &[("a", "1"), ("b", "2")]));
        assert!(!list.contains(NodeId(1)));

        list.push(NodeId(5), tag("b", &[("a", "1")]));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_noahs_ark_stops_at_marker() {
        let mut list = ActiveFormattingElements::new();
        for i in 0..3 {
            list.push(NodeId(i + 1), tag("i", &[]));
        }
        list.insert_marker();
        list.push(NodeId(10), tag("i", &[]));
        assert_eq!(list.len(), 5);
        assert!(list.contains(NodeId(1)));
    }

    #[test]
    fn test_find_and_clear_to_marker() {
        let mut list = ActiveFormattingElements::new();
        list.push(NodeId(1), tag("a", &[]));
        list.insert_marker();
        list.push(NodeId(2), tag("b", &[]));

        assert_eq!(list.find_after_last_marker("b"), Some(NodeId(2)));
        assert_eq!(list.find_after_last_marker("a"), None);

        list.clear_to_last_marker();
        assert_eq!(list.len(), 1);
        assert_eq!(list.find_after_last_marker("a"), Some(NodeId(1)));
    }

    #[test]
    fn test_reconstruction_is_idempotent() {
        let mut parser = HTMLParser::new();
        parser.feed("<p><b><i>one</p>", false);
        // </p> popped b and i; both still sit in the list.
        assert_eq!(parser.active_formatting.len(), 2);
        assert!(!parser.open_elements.contains(
            parser.active_formatting.get(1).and_then(FormattingEntry::node).unwrap_or(NodeId::ROOT)
        ));

        parser.reconstruct_active_formatting_elements();
        let depth = parser.open_elements.len();
        let nodes = parser.tree().len();

        parser.reconstruct_active_formatting_elements();
        assert_eq!(parser.open_elements.len(), depth);
        assert_eq!(parser.tree().len(), nodes);
    }
}
