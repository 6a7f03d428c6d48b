//! Parser diagnostics with colored terminal output.
//!
//! Provides deduplication so a document that repeats the same mistake a
//! thousand times produces one line. Used by the tokenizer and the tree
//! builder when a caller opts into warnings.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Report a diagnostic (prints once per unique component/message pair).
///
/// # Example
/// ```
/// sprig_common::warning::warn_once("HTML Tokenizer", "eof-in-tag");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{}", format!("[Sprig {component}] ⚠ {message}").yellow());
    }
}

/// Whether `warn_once` has already reported this message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call before parsing an unrelated document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("Test", "recorded-once");
        assert!(has_warned("Test", "recorded-once"));
        assert!(!has_warned("Test", "never-sent"));
    }

    #[test]
    fn test_components_are_separate_keys() {
        warn_once("Alpha", "shared-message");
        assert!(has_warned("Alpha", "shared-message"));
        assert!(!has_warned("Beta", "shared-message"));
    }
}
