//! Integration tests for named character reference lookup and resolution.

use sprig_html::tokenizer::named_character_references::{
    LEGACY_ENTITIES, MAX_LEGACY_NAME_LENGTH, lookup_entity, lookup_legacy_entity,
};
use sprig_html::tokenizer::{CharRefResolution, resolve};

/// Helper to resolve a complete reference and return its replacement text.
fn decode(input: &str, in_attribute: bool) -> Option<String> {
    match resolve(input, in_attribute, false) {
        CharRefResolution::Match { value, .. } => {
            let mut out = String::new();
            value.push_to(&mut out);
            Some(out)
        }
        _ => None,
    }
}

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("gt"), Some(">"));
    assert_eq!(lookup_entity("quot"), Some("\""));
    assert_eq!(lookup_entity("nbsp"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!(lookup_entity("AMP"), Some("&"));
    assert_eq!(lookup_entity("Amp"), None);
}

#[test]
fn test_legacy_lookup_rejects_modern_names() {
    assert_eq!(lookup_legacy_entity("amp"), Some("&"));
    assert_eq!(lookup_legacy_entity("not"), Some("\u{00AC}"));
    assert_eq!(lookup_legacy_entity("notin"), None);
    assert_eq!(lookup_legacy_entity("alpha"), None);
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_every_legacy_name_is_in_the_table() {
    for name in LEGACY_ENTITIES {
        assert!(lookup_entity(name).is_some(), "missing {name}");
        assert!(name.len() <= MAX_LEGACY_NAME_LENGTH);
    }
}

#[test]
fn test_resolve_prefers_longest_name() {
    assert_eq!(decode("notin;", false).as_deref(), Some("\u{2209}"));
    assert_eq!(decode("not;", false).as_deref(), Some("\u{00AC}"));
}

#[test]
fn test_resolve_in_attribute_context() {
    // With a semicolon the name decodes everywhere.
    assert_eq!(decode("amp;", true).as_deref(), Some("&"));
    // A legacy name followed by an alphanumeric stays literal in attributes.
    assert_eq!(decode("ampx", true), None);
    // A legacy name followed by "=" stays literal too.
    assert_eq!(decode("amp=", true), None);
    // Outside attributes both decode.
    assert_eq!(decode("ampx", false).as_deref(), Some("&"));
}

#[test]
fn test_unknown_name_is_literal() {
    assert!(matches!(
        resolve("unknown;", false, false),
        CharRefResolution::NoMatch { .. }
    ));
}
