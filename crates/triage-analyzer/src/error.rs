//! Error types for the analyzer.
//!
//! Selector-level syntax trouble is never an error here: it is repaired or
//! recorded as a finding. These types cover the failures that end a file's
//! analysis or the whole run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A file could not be analyzed.
///
/// Each variant names the file by scan path. The run continues with the next
/// file; the failure is reported alongside the other results.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The file could not be read.
    #[error("{scan_path}: could not read file: {source}")]
    Io {
        /// The file's scan path.
        scan_path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A selector used a combinator the decomposer does not model.
    #[error("Unknown combinator type in {scan_path} @ {line}: {combinator}")]
    UnmodeledCombinator {
        /// The file's scan path.
        scan_path: String,
        /// Line of the selector.
        line: usize,
        /// The combinator as written.
        combinator: String,
    },

    /// A selector used a simple selector the decomposer does not model.
    #[error("Unknown simple selector type in {scan_path} @ {line}: {simple}")]
    UnmodeledSimple {
        /// The file's scan path.
        scan_path: String,
        /// Line of the selector.
        line: usize,
        /// The simple selector as written.
        simple: String,
    },

    /// An at-rule block list held a rule the orchestrator does not model there.
    #[error("Unknown @rule block list item {construct} in {scan_path} @ line {line}")]
    UnmodeledBlockListItem {
        /// The file's scan path.
        scan_path: String,
        /// Line of the enclosing block list.
        line: usize,
        /// The offending rule, e.g. `@import`.
        construct: String,
    },
}

/// The vocabulary tables could not be loaded.
#[derive(Debug, Error)]
pub enum VocabularyError {
    /// A table file could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        /// The table file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A table is not valid JSON.
    #[error("{table} is not valid JSON: {source}")]
    Json {
        /// Which table.
        table: &'static str,
        /// The parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A table is valid JSON of the wrong shape.
    #[error("{table} is malformed: {reason}")]
    Shape {
        /// Which table.
        table: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// The source tree could not be scanned.
#[derive(Debug, Error)]
pub enum PickerError {
    /// The source path does not exist.
    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    /// Walking the directory tree failed.
    #[error("could not scan {}: {source}", path.display())]
    Walk {
        /// The path being walked.
        path: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// The bundled MIME type table is malformed.
    #[error("MIME type table is malformed: {0}")]
    MimeTable(#[from] serde_json::Error),
}
