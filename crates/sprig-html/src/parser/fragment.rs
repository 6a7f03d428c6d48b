//! [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)

use sprig_dom::{AttributesMap, DomAttribute, DomTree, Namespace, NodeId, QuirksMode};

use super::{HTMLParser, InsertionMode};
use crate::config::ParserConfig;
use crate::tokenizer::TokenizerState;

/// The context element a fragment is parsed for, as in `innerHTML`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentContext {
    /// Local name of the context element.
    pub tag_name: String,
    /// Namespace of the context element.
    pub namespace: Namespace,
    /// Attributes of the context element. Only `encoding` on MathML
    /// `annotation-xml` changes how the fragment parses.
    pub attributes: AttributesMap,
    /// "If the context element's node document is in quirks mode, then let
    /// the Document be in quirks mode."
    pub quirks_mode: QuirksMode,
}

impl FragmentContext {
    /// An HTML context element with no attributes, in no-quirks mode.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            namespace: Namespace::Html,
            attributes: AttributesMap::new(),
            quirks_mode: QuirksMode::NoQuirks,
        }
    }

    /// A context element in `namespace`.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Add an attribute to the context element.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(DomAttribute::new(name, value));
        self
    }

    /// Set the document mode the fragment inherits.
    #[must_use]
    pub const fn with_quirks_mode(mut self, quirks_mode: QuirksMode) -> Self {
        self.quirks_mode = quirks_mode;
        self
    }
}

impl HTMLParser {
    /// [§ 13.4 The HTML fragment parsing algorithm](https://html.spec.whatwg.org/multipage/parsing.html#html-fragment-parsing-algorithm)
    ///
    /// Creates a parser whose output is the children of a synthetic `html`
    /// root, retrieved with [`Self::into_fragment`].
    #[must_use]
    pub fn new_fragment(context: FragmentContext, config: ParserConfig) -> Self {
        // STEP 1-3: "Create a new Document node, and mark it as being an HTML
        //            document. If the context element's node document is in
        //            quirks mode, then let the Document be in quirks mode.
        //            Otherwise, if the context element's node document is in
        //            limited-quirks mode, then let the Document be in
        //            limited-quirks mode. Otherwise, leave the Document in
        //            no-quirks mode."
        let mut parser = Self::with_config(config);
        parser.tree.set_quirks_mode(context.quirks_mode);

        // The context element lives in the same arena but is never attached.
        let context_element = parser.tree.create_element(
            &context.tag_name,
            context.namespace,
            context.attributes.clone(),
        );

        // STEP 4: "Set the state of the HTML parser's tokenization stage as
        //          follows, switching on the context element:"
        if context.namespace == Namespace::Html {
            let state = TokenizerState::for_text_element(&context.tag_name, config.scripting);
            if let Some(state) = state {
                parser.tokenizer.set_state(state);
            }
            parser.tokenizer.set_last_start_tag(&context.tag_name);
        }

        // STEP 5: "Let root be the result of creating an element given
        //          document, "html", and the HTML namespace."
        // STEP 6: "Append the element root to the Document node created above."
        // STEP 7: "Set up the parser's stack of open elements so that it
        //          contains just the single element root."
        let root = parser
            .tree
            .create_element("html", Namespace::Html, AttributesMap::new());
        parser.tree.append_child(NodeId::ROOT, root);
        parser.open_elements.push(root);
        parser.fragment_context = Some(context_element);

        // STEP 8: "If the context element is a template element, then push
        //          "in template" onto the stack of template insertion modes so
        //          that it is the new current template insertion mode."
        if context.namespace == Namespace::Html && context.tag_name == "template" {
            parser
                .template_insertion_modes
                .push(InsertionMode::InTemplate);
        }

        // STEP 10: "Reset the parser's insertion mode appropriately."
        parser.reset_insertion_mode_appropriately();

        // STEP 11: "Set the parser's form element pointer to the nearest node
        //           to the context element that is a form element (going
        //           straight up the ancestor chain, and including the element
        //           itself, if it is a form element), if any."
        if context.namespace == Namespace::Html && context.tag_name == "form" {
            parser.form_element_pointer = Some(context_element);
        }

        parser
    }

    /// Consume the parser and return the tree with the fragment root. The
    /// fragment is the root's children.
    #[must_use]
    pub fn into_fragment(self) -> (DomTree, NodeId) {
        let root = self
            .tree
            .children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.tree.as_element(id).is_some())
            .unwrap_or(NodeId::ROOT);
        (self.tree, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(context: FragmentContext, input: &str) -> (DomTree, NodeId) {
        let mut parser = HTMLParser::new_fragment(context, ParserConfig::default());
        parser.feed(input, true);
        parser.into_fragment()
    }

    #[test]
    fn test_context_selects_insertion_mode() {
        let parser = HTMLParser::new_fragment(FragmentContext::new("tr"), ParserConfig::default());
        assert_eq!(parser.insertion_mode(), InsertionMode::InRow);

        let parser = HTMLParser::new_fragment(FragmentContext::new("div"), ParserConfig::default());
        assert_eq!(parser.insertion_mode(), InsertionMode::InBody);
    }

    #[test]
    fn test_textarea_context_reads_markup_as_text() {
        let (tree, root) = parse(FragmentContext::new("textarea"), "<b>bold</b>");
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(tree.text_content(root), "<b>bold</b>");
    }

    #[test]
    fn test_cell_context_keeps_cells_open() {
        let (tree, root) = parse(FragmentContext::new("td"), "a<td>b");
        // The nested td is ignored: the context cell is not on the stack.
        assert_eq!(tree.text_content(root), "ab");
    }
}
