//! Common utilities for the triage analyzer.
//!
//! This crate provides shared infrastructure used by the grammar, analyzer and CLI crates:
//! - **Warning System** - deduplicated diagnostics for constructs the analyzer does not categorize

pub mod warning;
