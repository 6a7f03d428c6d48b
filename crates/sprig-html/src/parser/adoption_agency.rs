//! [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)

use sprig_dom::Namespace;

use super::HTMLParser;
use super::open_elements::Scope;
use super::tag_sets::is_special;

/// "If outer loop counter is greater than or equal to 8, then return."
const OUTER_LOOP_LIMIT: usize = 8;

/// "If inner loop counter is greater than 3 and node is in the list of active
/// formatting elements, then remove node from the list of active formatting
/// elements."
const INNER_LOOP_LIMIT: usize = 3;

impl HTMLParser {
    /// Run the adoption agency algorithm for an end tag named `subject`.
    ///
    /// Returns `false` when the caller must "act as described in the "any
    /// other end tag" entry" instead.
    #[allow(clippy::too_many_lines)]
    pub(crate) fn run_adoption_agency(&mut self, subject: &str) -> bool {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && self.is_html_element(current, subject)
            && !self.active_formatting.contains(current)
        {
            let _ = self.open_elements.pop();
            return true;
        }

        // STEP 3-4: outer loop
        for _ in 0..OUTER_LOOP_LIMIT {
            // STEP 4.3: "Let formatting element be the last element in the list
            //            of active formatting elements that: is between the end
            //            of the list and the last marker in the list, if any, or
            //            the start of the list otherwise, and has the tag name
            //            subject. If there is no such element, then return and
            //            instead act as described in the "any other end tag" entry
            //            above."
            let Some(formatting_element) = self.active_formatting.find_after_last_marker(subject)
            else {
                return false;
            };

            // STEP 4.4: "If formatting element is not in the stack of open
            //            elements, then this is a parse error; remove the element
            //            from the list, and return."
            let Some(formatting_index) = self.open_elements.position(formatting_element) else {
                self.parse_error("formatting element not open");
                self.active_formatting.remove(formatting_element);
                return true;
            };

            // STEP 4.5: "If formatting element is in the stack of open elements,
            //            but the element is not in scope, then this is a parse
            //            error; return."
            if !self
                .open_elements
                .has_node_in_scope(&self.tree, formatting_element, Scope::Default)
            {
                self.parse_error("formatting element not in scope");
                return true;
            }

            // STEP 4.6: "If formatting element is not the current node, this is
            //            a parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.parse_error("formatting element is not the current node");
            }

            // STEP 4.7: "Let furthest block be the topmost node in the stack of
            //            open elements that is lower in the stack than formatting
            //            element, and is an element in the special category."
            let furthest_block_index = (formatting_index + 1..self.open_elements.len()).find(|&i| {
                self.open_elements
                    .get(i)
                    .and_then(|id| self.tree.as_element(id))
                    .is_some_and(is_special)
            });

            // STEP 4.8: "If there is no furthest block, then the UA must first
            //            pop all the nodes from the bottom of the stack of open
            //            elements, from the current node up to and including
            //            formatting element, then remove formatting element from
            //            the list of active formatting elements, and finally return."
            let Some(furthest_block_index) = furthest_block_index else {
                self.open_elements.truncate(formatting_index);
                self.active_formatting.remove(formatting_element);
                return true;
            };
            let Some(furthest_block) = self.open_elements.get(furthest_block_index) else {
                return true;
            };

            // STEP 4.9: "Let common ancestor be the element immediately above
            //            formatting element in the stack of open elements."
            let Some(common_ancestor) = formatting_index
                .checked_sub(1)
                .and_then(|i| self.open_elements.get(i))
            else {
                return true;
            };

            // STEP 4.10: "Let a bookmark note the position of formatting element
            //             in the list of active formatting elements relative to
            //             the elements on either side of it in the list."
            let Some(mut bookmark) = self.active_formatting.index_of(formatting_element) else {
                return true;
            };

            // STEP 4.11: "Let node and last node be furthest block."
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block;

            // STEP 4.12-13: inner loop
            let mut inner_loop_counter = 0;
            loop {
                // STEP 4.13.1: "Increment inner loop counter by 1."
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node in
                //               the stack of open elements, or if node is no
                //               longer in the stack of open elements (e.g.
                //               because it got removed by this algorithm), the
                //               element that was immediately above node in the
                //               stack of open elements before node was removed."
                node_index -= 1;
                let Some(mut node) = self.open_elements.get(node_index) else {
                    break;
                };

                // STEP 4.13.3: "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // STEP 4.13.4: "If inner loop counter is greater than 3 and node
                //               is in the list of active formatting elements,
                //               then remove node from the list of active
                //               formatting elements."
                if inner_loop_counter > INNER_LOOP_LIMIT
                    && let Some(index) = self.active_formatting.index_of(node)
                {
                    self.active_formatting.remove(node);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //               elements, then remove node from the stack of open
                //               elements and continue."
                let Some(token) = self.active_formatting.token_for(node).cloned() else {
                    self.open_elements.remove_element(node);
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //               element node was created, in the HTML namespace,
                //               with common ancestor as the intended parent;
                //               replace the entry for node in the list of active
                //               formatting elements with an entry for the new
                //               element, replace the entry for node in the stack
                //               of open elements with an entry for the new
                //               element, and let node be the new element."
                let replacement = self.create_element_for_token(&token, Namespace::Html);
                self.active_formatting.replace(node, replacement);
                self.open_elements.replace(node, replacement);
                node = replacement;

                // STEP 4.13.7: "If last node is furthest block, then move the
                //               aforementioned bookmark to be immediately after
                //               the new node in the list of active formatting
                //               elements."
                if last_node == furthest_block
                    && let Some(index) = self.active_formatting.index_of(node)
                {
                    bookmark = index + 1;
                }

                // STEP 4.13.8: "Append last node to node."
                self.tree.append_child(node, last_node);

                // STEP 4.13.9: "Set last node to node."
                last_node = node;
            }

            // STEP 4.14: "Insert whatever last node ended up being in the
            //             previous step at the appropriate place for inserting a
            //             node, but using common ancestor as the override target."
            self.tree.detach(last_node);
            let place = self.appropriate_place_for_inserting(Some(common_ancestor));
            self.insert_at(place, last_node);

            // STEP 4.15: "Create an element for the token for which formatting
            //             element was created, in the HTML namespace, with
            //             furthest block as the intended parent."
            let Some(token) = self.active_formatting.token_for(formatting_element).cloned() else {
                return true;
            };
            let new_element = self.create_element_for_token(&token, Namespace::Html);

            // STEP 4.16: "Take all of the child nodes of furthest block and
            //             append them to the element created in the last step."
            self.tree.move_children(furthest_block, new_element);

            // STEP 4.17: "Append that new element to furthest block."
            self.tree.append_child(furthest_block, new_element);

            // STEP 4.18: "Remove formatting element from the list of active
            //             formatting elements, and insert the new element into
            //             the list of active formatting elements at the position
            //             of the aforementioned bookmark."
            if let Some(index) = self.active_formatting.index_of(formatting_element) {
                self.active_formatting.remove(formatting_element);
                if index < bookmark {
                    bookmark -= 1;
                }
            }
            self.active_formatting
                .insert_at(bookmark, new_element, token);

            // STEP 4.19: "Remove formatting element from the stack of open
            //             elements, and insert the new element into the stack of
            //             open elements immediately below the position of furthest
            //             block in that stack."
            self.open_elements.remove_element(formatting_element);
            if let Some(index) = self.open_elements.position(furthest_block) {
                self.open_elements.insert(index + 1, new_element);
            }
        }

        true
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    /// "Any other end tag"
    pub(crate) fn any_other_end_tag(&mut self, name: &str) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.open_elements.len()).rev() {
            let Some(node) = self.open_elements.get(index) else {
                return;
            };
            let Some(element) = self.tree.as_element(node) else {
                return;
            };

            // STEP 2: "Loop: If node is an HTML element with the same tag name
            //          as the token, then:
            //          1. Generate implied end tags, except for HTML elements
            //             with the same tag name as the token.
            //          2. If node is not the current node, then this is a parse error.
            //          3. Pop all the nodes from the current node up to node,
            //             including node, then stop these steps."
            if element.is_html(name) {
                self.open_elements
                    .generate_implied_end_tags(&self.tree, Some(name));
                if self.current_node() != Some(node) {
                    self.parse_error("end tag with open child elements");
                }
                self.open_elements.pop_element(node);
                return;
            }

            // STEP 3: "Otherwise, if node is in the special category, then this
            //          is a parse error; ignore the token, and return."
            if is_special(element) {
                self.parse_error("end tag crosses a special element");
                return;
            }

            // STEP 4-5: "Set node to the previous entry in the stack of open
            //            elements. Return to the step labeled loop."
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::HTMLParser;
    use sprig_dom::{DomTree, NodeId};

    fn parse(input: &str) -> DomTree {
        let mut parser = HTMLParser::new();
        parser.feed(input, true);
        parser.into_tree()
    }

    fn child_names(tree: &DomTree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .iter()
            .filter_map(|&c| tree.as_element(c).map(|e| e.tag_name.clone()))
            .collect()
    }

    #[test]
    fn test_misnested_formatting_is_cloned_into_block() {
        let tree = parse("<b>1<p>2</b>3</p>");
        let body = tree.body().unwrap();
        assert_eq!(child_names(&tree, body), vec!["b", "p"]);

        let p = tree.children(body)[1];
        assert_eq!(child_names(&tree, p), vec!["b"]);
        assert_eq!(tree.text_content(p), "23");
    }

    #[test]
    fn test_unmatched_end_tag_inside_special_is_ignored() {
        let tree = parse("<div><span>x</div></span>y");
        let body = tree.body().unwrap();
        assert_eq!(child_names(&tree, body), vec!["div"]);
        assert_eq!(tree.text_content(body), "xy");
    }
}
