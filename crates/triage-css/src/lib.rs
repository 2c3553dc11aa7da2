//! CSS tokenizer, tolerant stylesheet parser, compact serializer and strict
//! selector grammar for the triage analyzer.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types: ident, function, at-keyword, hash, string, url, number, dimension, etc.
//!   - Comment handling
//!   - Escape sequences
//!   - Source spans with line numbers
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Stylesheet parsing that never fails, recording issues instead
//!   - Rules sorted by shape: style rules, conditional block lists, keyframes,
//!     `@charset`, `@import`, declaration at-rules and statements
//!   - Selector lists split on top-level commas
//!
//! - **Compact serializer** ([§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization))
//!   - The minified rendering of a parsed stylesheet
//!
//! - **CSS Selectors** ([Selectors Level 3](https://www.w3.org/TR/selectors-3/))
//!   - Type, class, ID, universal, attribute and nesting selectors
//!   - Structural, link, user-action and UI pseudo-classes, `:not()`, `:lang()`
//!   - `::first-line`, `::first-letter`, `::before`, `::after`
//!   - All combinators, including the column combinator
//!
//! # Not Yet Implemented
//!
//! - Selector matching
//! - Namespace prefixes in selectors
//! - Level 4 functional pseudo-classes (`:is()`, `:where()`, `:has()`)

/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Strict selector grammar per [Selectors Level 3](https://www.w3.org/TR/selectors-3/).
pub mod selector;
/// Compact stylesheet serialization.
pub mod serializer;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

// Re-exports for convenience
pub use parser::{
    AtRuleBlockList, AtRuleSet, AtStatement, CSSParser, CharsetRule, ComponentValue, Declaration,
    ImportRule, KeyframesRule, ParseIssue, Rule, StyleRule, Stylesheet,
};
pub use selector::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, Nth, PseudoClass,
    PseudoElement, SelectorError, SelectorList, SimpleSelector, parse_selector_list,
};
pub use tokenizer::{CSSToken, CSSTokenizer, Span, Token};
