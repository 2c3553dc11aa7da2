//! Selector triage for CSS source trees.
//!
//! Every stylesheet in a tree is parsed, and each of its selectors goes through
//! a repair, decomposition and classification pipeline:
//!
//! - **Cleaner** - textual repairs for selectors the strict grammar rejects,
//!   each one recorded as a notice or warning
//! - **Decomposer** - parses the (repaired) selector into [`ast::Sequence`]s of
//!   [`ast::Token`]s, retrying with the cleaner a bounded number of times
//! - **Classifier** - files element and class names under Plain Old Simple
//!   HTML, microformats and microformats2
//!
//! The [`Analyzer`] drives a whole run: the [`Picker`] enumerates the files,
//! [`css::analyze_file`] handles each stylesheet and [`Analysis`] collects the
//! results.
//!
//! # Example
//! ```ignore
//! let analyzer = Analyzer::new(Vocabulary::bundled()?);
//! let analysis = analyzer.analyze(Path::new("site/"), &mut Silent)?;
//! println!("{} errors", analysis.css_totals().errors);
//! ```

/// Results of a whole run.
pub mod analysis;
/// The run driver.
pub mod analyzer;
/// Selector decomposition with bounded repair.
pub mod ast;
/// Vocabulary classification of selector tokens.
pub mod classifier;
/// Textual selector repairs.
pub mod cleaner;
/// File-level stylesheet analysis.
pub mod css;
/// Error types.
pub mod error;
/// Syntax and semantics findings.
pub mod findings;
/// Progress reporting hooks.
pub mod monitor;
/// Source tree enumeration.
pub mod picker;
/// Vocabulary tables.
pub mod vocabulary;

// Re-exports for convenience
pub use analysis::{Analysis, CssTotals, FileReport};
pub use analyzer::Analyzer;
pub use ast::{CombinatorKind, Decomposer, MAX_REPAIR_ROUNDS, Sequence, Token};
pub use classifier::Classifier;
pub use cleaner::{Cleaned, clean};
pub use css::{FileAnalysis, Stats, analyze_file, analyze_source};
pub use error::{AnalysisError, PickerError, VocabularyError};
pub use findings::{
    Category, Microformats2, PrefixFormat, PrefixHit, RepairKind, Replacement, SelectorFailure,
    Semantics, Severity, Syntax,
};
pub use monitor::{Monitor, Silent};
pub use picker::{FileDescriptor, Picker, ScanStatus, natural_cmp};
pub use vocabulary::Vocabulary;
