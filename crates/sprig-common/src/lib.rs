//! Common utilities for the Sprig parser crates.
//!
//! This crate provides shared infrastructure used by the DOM and HTML crates:
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod warning;
