//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)

use sprig_dom::{AttributesMap, DomAttribute, Namespace, NodeId, NodeType};

use super::HTMLParser;
use super::foreign_content::adjust_foreign_attributes;
use super::tag_sets::is_table_structure;
use crate::tokenizer::Token;

/// A parent and the child to insert before (`None` appends).
pub(crate) type InsertionPlace = (NodeId, Option<NodeId>);

impl HTMLParser {
    /// [§ 13.2.6.1 Appropriate place for inserting a node](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    pub(crate) fn appropriate_place_for_inserting(
        &self,
        override_target: Option<NodeId>,
    ) -> InsertionPlace {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the current node."
        let target = override_target
            .or_else(|| self.open_elements.current())
            .unwrap_or(NodeId::ROOT);

        // STEP 2: "Determine the adjusted insertion location using the first
        //          matching steps from the following list:"
        let fosters = self.foster_parenting
            && self.tree.as_element(target).is_some_and(|e| {
                e.namespace == Namespace::Html && is_table_structure(&e.tag_name)
            });

        let (parent, before) = if fosters {
            self.foster_parent_location()
        } else {
            // "Otherwise: Let adjusted insertion location be inside target,
            //  after its last child (if any)."
            (target, None)
        };

        // STEP 3: "If the adjusted insertion location is inside a template
        //          element, let it instead be inside the template element's
        //          template contents, after its last child (if any)."
        match self.tree.template_contents(parent) {
            Some(contents) => (contents, None),
            None => (parent, before),
        }
    }

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    fn foster_parent_location(&self) -> InsertionPlace {
        // STEP 2.1: "Let last template be the last template element in the
        //            stack of open elements, if any."
        // STEP 2.2: "Let last table be the last table element in the stack of
        //            open elements, if any."
        let last_template = self.open_elements.find_last(&self.tree, "template");
        let last_table = self.open_elements.find_last(&self.tree, "table");

        // STEP 2.3: "If there is a last template and either there is no last
        //            table, or there is one, but last template is lower (more
        //            recently added) than last table in the stack of open
        //            elements, then: let adjusted insertion location be inside
        //            last template's template contents, after its last child
        //            (if any), and abort these steps."
        if let Some(template) = last_template {
            let template_is_lower = last_table.is_none_or(|table| {
                self.open_elements.position(template) > self.open_elements.position(table)
            });
            if template_is_lower {
                let contents = self.tree.template_contents(template).unwrap_or(template);
                return (contents, None);
            }
        }

        // STEP 2.4: "If there is no last table, then let adjusted insertion
        //            location be inside the first element in the stack of open
        //            elements (the html element), after its last child (if
        //            any), and abort these steps. (fragment case)"
        let Some(table) = last_table else {
            return (self.open_elements.get(0).unwrap_or(NodeId::ROOT), None);
        };

        // STEP 2.5: "If last table has a parent node, then let adjusted
        //            insertion location be inside last table's parent node,
        //            immediately before last table, and abort these steps."
        if let Some(parent) = self.tree.parent(table) {
            return (parent, Some(table));
        }

        // STEP 2.6: "Let previous element be the element immediately above
        //            last table in the stack of open elements."
        // STEP 2.7: "Let adjusted insertion location be inside previous
        //            element, after its last child (if any)."
        let previous = self
            .open_elements
            .position(table)
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.open_elements.get(index))
            .unwrap_or(NodeId::ROOT);
        (previous, None)
    }

    pub(crate) fn insert_at(&mut self, place: InsertionPlace, node: NodeId) {
        match place {
            (parent, Some(reference)) => self.tree.insert_before(parent, node, reference),
            (parent, None) => self.tree.append_child(parent, node),
        }
    }

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Foreign elements get their `xlink:*`, `xml:*` and `xmlns` attributes
    /// placed in the matching namespace. Case adjustments are the caller's job.
    pub(crate) fn create_element_for_token(&mut self, token: &Token, namespace: Namespace) -> NodeId {
        let (name, attributes) = match token {
            Token::StartTag {
                name, attributes, ..
            } => (name.as_str(), attributes.as_slice()),
            Token::EndTag { name } => (name.as_str(), [].as_slice()),
            _ => ("", [].as_slice()),
        };

        let attrs: AttributesMap = if namespace == Namespace::Html {
            attributes
                .iter()
                .map(|attr| DomAttribute::new(&attr.name, &attr.value))
                .collect()
        } else {
            adjust_foreign_attributes(attributes)
        };

        let id = self.tree.create_element(name, namespace, attrs);
        if let Some(element) = self.tree.as_element_mut(id) {
            element.flags.parser_inserted = true;
        }
        id
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "When the steps below require the user agent to insert an HTML element
    /// for a token, the user agent must insert a foreign element for the
    /// token, with the HTML namespace and false."
    pub(crate) fn insert_html_element(&mut self, token: &Token) -> NodeId {
        self.insert_foreign_element(token, Namespace::Html, false)
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    pub(crate) fn insert_foreign_element(
        &mut self,
        token: &Token,
        namespace: Namespace,
        only_add_to_element_stack: bool,
    ) -> NodeId {
        // STEP 1: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let place = self.appropriate_place_for_inserting(None);

        // STEP 2: "Let element be the result of creating an element for the
        //          token in the given namespace, with the intended parent being
        //          the element in which the adjusted insertion location finds
        //          itself."
        let element = self.create_element_for_token(token, namespace);

        // STEP 3: "If onlyAddToElementStack is false, then run insert an
        //          element at the adjusted insertion location with element."
        if !only_add_to_element_stack {
            self.insert_at(place, element);
        }

        // STEP 4: "Push element onto the stack of open elements so that it is
        //          the new current node."
        self.open_elements.push(element);

        // STEP 5: "Return element."
        element
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// Inserts a whole run. Adjacent text merges into the preceding text
    /// node, including when foster parenting puts it before a table.
    pub(crate) fn insert_characters(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }

        // STEP 2: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let (parent, before) = self.appropriate_place_for_inserting(None);

        // STEP 3: "If the adjusted insertion location is in a Document node,
        //          then return."
        if matches!(
            self.tree.get(parent).map(|n| &n.node_type),
            Some(NodeType::Document)
        ) {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        //          insertion location, then append data to that Text node's data."
        let previous = match before {
            Some(reference) => self.tree.prev_sibling(reference),
            None => self.tree.last_child(parent),
        };
        if let Some(previous) = previous
            && self.tree.as_text(previous).is_some()
        {
            self.tree.append_text(previous, data);
            return;
        }

        // STEP 5: "Otherwise, create a new Text node whose data is data and
        //          whose node document is the same as that of the element in
        //          which the adjusted insertion location finds itself, and
        //          insert the newly created node at the adjusted insertion
        //          location."
        let text = self.tree.create_text(data);
        self.insert_at((parent, before), text);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    ///
    /// "1. Let data be the data given in the comment token being processed.
    ///  2. If position was specified, then let the adjusted insertion location
    ///     be position. Otherwise, let adjusted insertion location be the
    ///     appropriate place for inserting a node.
    ///  3. Create a Comment node whose data attribute is set to data and whose
    ///     node document is the same as that of the node in which the adjusted
    ///     insertion location finds itself.
    ///  4. Insert the newly created node at the adjusted insertion location."
    pub(crate) fn insert_comment(&mut self, data: &str, position: Option<InsertionPlace>) {
        let place = position.unwrap_or_else(|| self.appropriate_place_for_inserting(None));
        let comment = self.tree.create_comment(data);
        self.insert_at(place, comment);
    }
}
