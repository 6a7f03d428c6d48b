//! Side buffers for the token under construction.
//!
//! Every piece of state a tag, comment or DOCTYPE accumulates while the
//! tokenizer walks through its states lives here. The `begin_*` methods are
//! the only places these buffers are reset.

use super::token::{Attribute, Token};

/// Buffers for the token currently being built.
#[derive(Debug, Default)]
pub struct TokenScratch {
    tag_name: String,
    is_end_tag: bool,
    self_closing: bool,
    attributes: Vec<Attribute>,
    attribute_name: String,
    attribute_value: String,
    attribute_in_progress: bool,
    attribute_is_duplicate: bool,
    end_tag_had_attributes: bool,
    comment: String,
    doctype_name: Option<String>,
    public_identifier: Option<String>,
    system_identifier: Option<String>,
    force_quirks: bool,
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    /// "The temporary buffer". Used by end tag matching in the text states
    /// and by the script data double escape states.
    pub temporary_buffer: String,
}

impl TokenScratch {
    // ===== reset points =====

    /// "Create a new start tag token, set its tag name to the empty string."
    pub fn begin_start_tag(&mut self) {
        self.begin_tag(false);
    }

    /// "Create a new end tag token, set its tag name to the empty string."
    pub fn begin_end_tag(&mut self) {
        self.begin_tag(true);
    }

    fn begin_tag(&mut self, is_end_tag: bool) {
        self.tag_name.clear();
        self.is_end_tag = is_end_tag;
        self.self_closing = false;
        self.attributes.clear();
        self.attribute_name.clear();
        self.attribute_value.clear();
        self.attribute_in_progress = false;
        self.attribute_is_duplicate = false;
        self.end_tag_had_attributes = false;
    }

    /// "Create a comment token whose data is the empty string."
    pub fn begin_comment(&mut self) {
        self.comment.clear();
    }

    /// "Create a new DOCTYPE token." All identifiers start out missing.
    pub fn begin_doctype(&mut self) {
        self.doctype_name = None;
        self.public_identifier = None;
        self.system_identifier = None;
        self.force_quirks = false;
    }

    // ===== tags =====

    /// Append to the current tag token's tag name.
    pub fn push_tag_name(&mut self, c: char) {
        self.tag_name.push(c);
    }

    /// Replace the tag name wholesale.
    #[cfg(test)]
    pub fn set_tag_name(&mut self, name: &str) {
        self.tag_name.clear();
        self.tag_name.push_str(name);
    }

    /// The tag name collected so far.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// True when the current tag token is an end tag.
    #[must_use]
    pub const fn is_end_tag(&self) -> bool {
        self.is_end_tag
    }

    /// "Set the self-closing flag of the current tag token."
    pub const fn set_self_closing(&mut self) {
        self.self_closing = true;
    }

    /// True if the self-closing flag was set on an end tag.
    #[must_use]
    pub const fn end_tag_has_self_closing(&self) -> bool {
        self.is_end_tag && self.self_closing
    }

    /// True if an attribute was started on an end tag.
    #[must_use]
    pub const fn end_tag_has_attributes(&self) -> bool {
        self.end_tag_had_attributes
    }

    // ===== attributes =====

    /// "Start a new attribute in the current tag token." Commits the previous
    /// attribute first.
    pub fn start_attribute(&mut self) {
        self.commit_attribute();
        self.attribute_in_progress = true;
        self.attribute_is_duplicate = false;
        if self.is_end_tag {
            self.end_tag_had_attributes = true;
        }
    }

    /// Append to the current attribute's name.
    pub fn push_attribute_name(&mut self, c: char) {
        self.attribute_name.push(c);
    }

    /// Append to the current attribute's value.
    pub fn push_attribute_value(&mut self, c: char) {
        if !self.attribute_is_duplicate {
            self.attribute_value.push(c);
        }
    }

    /// Append a string to the current attribute's value.
    pub fn push_str_attribute_value(&mut self, s: &str) {
        if !self.attribute_is_duplicate {
            self.attribute_value.push_str(s);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before emitting the
    /// tag token, if appropriate), the complete attribute's name must be compared to
    /// the other attributes on the same token; if there is already an attribute on
    /// the token with the exact same name, then this is a duplicate-attribute parse
    /// error and the new attribute must be removed from the token."
    ///
    /// Returns true when the name is a duplicate.
    pub fn finish_attribute_name(&mut self) -> bool {
        if !self.attribute_in_progress {
            return false;
        }
        let duplicate = self
            .attributes
            .iter()
            .any(|attr| attr.name == self.attribute_name);
        self.attribute_is_duplicate = duplicate;
        duplicate
    }

    /// Move the attribute being built onto the token, unless it was a duplicate.
    pub fn commit_attribute(&mut self) {
        if !self.attribute_in_progress {
            return;
        }
        self.attribute_in_progress = false;
        let name = core::mem::take(&mut self.attribute_name);
        let value = core::mem::take(&mut self.attribute_value);
        if self.attribute_is_duplicate || self.is_end_tag {
            return;
        }
        // The name check normally happened on leaving the attribute name
        // state; repeat it for attributes cut short by the end of a tag.
        if self.attributes.iter().any(|attr| attr.name == name) {
            return;
        }
        self.attributes.push(Attribute { name, value });
    }

    /// Build the finished tag token.
    pub fn take_tag(&mut self) -> Token {
        self.commit_attribute();
        let name = core::mem::take(&mut self.tag_name);
        if self.is_end_tag {
            Token::EndTag { name }
        } else {
            Token::StartTag {
                name,
                self_closing: self.self_closing,
                attributes: core::mem::take(&mut self.attributes),
            }
        }
    }

    // ===== comments =====

    /// Append to the comment token's data.
    pub fn push_comment(&mut self, c: char) {
        self.comment.push(c);
    }

    /// Append a string to the comment token's data.
    pub fn push_str_comment(&mut self, s: &str) {
        self.comment.push_str(s);
    }

    /// Build the finished comment token.
    pub fn take_comment(&mut self) -> Token {
        Token::Comment {
            data: core::mem::take(&mut self.comment),
        }
    }

    // ===== DOCTYPE =====

    /// Append to the DOCTYPE name, creating it if missing.
    pub fn push_doctype_name(&mut self, c: char) {
        self.doctype_name.get_or_insert_with(String::new).push(c);
    }

    /// "Set the DOCTYPE token's public identifier to the empty string (not missing)."
    pub fn init_public_identifier(&mut self) {
        self.public_identifier = Some(String::new());
    }

    /// Append to the public identifier.
    pub fn push_public_identifier(&mut self, c: char) {
        self.public_identifier.get_or_insert_with(String::new).push(c);
    }

    /// "Set the DOCTYPE token's system identifier to the empty string (not missing)."
    pub fn init_system_identifier(&mut self) {
        self.system_identifier = Some(String::new());
    }

    /// Append to the system identifier.
    pub fn push_system_identifier(&mut self, c: char) {
        self.system_identifier.get_or_insert_with(String::new).push(c);
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    pub const fn set_force_quirks(&mut self) {
        self.force_quirks = true;
    }

    /// Build the finished DOCTYPE token.
    pub fn take_doctype(&mut self) -> Token {
        Token::Doctype {
            name: self.doctype_name.take(),
            public_identifier: self.public_identifier.take(),
            system_identifier: self.system_identifier.take(),
            force_quirks: self.force_quirks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(scratch: &mut TokenScratch, name: &str, value: &str) -> bool {
        scratch.start_attribute();
        name.chars().for_each(|c| scratch.push_attribute_name(c));
        let duplicate = scratch.finish_attribute_name();
        value.chars().for_each(|c| scratch.push_attribute_value(c));
        duplicate
    }

    #[test]
    fn test_first_attribute_wins() {
        let mut scratch = TokenScratch::default();
        scratch.begin_start_tag();
        scratch.set_tag_name("a");
        assert!(!attribute(&mut scratch, "href", "one"));
        assert!(attribute(&mut scratch, "href", "two"));
        assert_eq!(
            scratch.take_tag(),
            Token::StartTag {
                name: "a".to_string(),
                self_closing: false,
                attributes: vec![Attribute::new("href", "one")],
            }
        );
    }

    #[test]
    fn test_begin_resets_previous_tag() {
        let mut scratch = TokenScratch::default();
        scratch.begin_start_tag();
        scratch.set_tag_name("img");
        let _ = attribute(&mut scratch, "src", "x");
        scratch.set_self_closing();
        scratch.begin_end_tag();
        scratch.set_tag_name("p");
        assert_eq!(scratch.take_tag(), Token::end_tag("p"));
    }

    #[test]
    fn test_end_tag_attributes_are_dropped() {
        let mut scratch = TokenScratch::default();
        scratch.begin_end_tag();
        scratch.set_tag_name("div");
        let _ = attribute(&mut scratch, "class", "x");
        assert!(scratch.end_tag_has_attributes());
        assert_eq!(scratch.take_tag(), Token::end_tag("div"));
    }

    #[test]
    fn test_doctype_identifiers_distinguish_missing_from_empty() {
        let mut scratch = TokenScratch::default();
        scratch.begin_doctype();
        scratch.init_public_identifier();
        assert_eq!(
            scratch.take_doctype(),
            Token::Doctype {
                name: None,
                public_identifier: Some(String::new()),
                system_identifier: None,
                force_quirks: false,
            }
        );
    }
}
