//! File-level analysis of one stylesheet.
//!
//! The stylesheet is parsed with the tolerant parser, measured against its
//! compact form, and every selector is handed to the [`Decomposer`] together
//! with the line it was found on.

use std::collections::BTreeMap;
use std::fs;

use serde::Serialize;
use triage_common::warning::warn_once;
use triage_css::{AtRuleBlockList, AtRuleSet, ParseIssue, Rule, StyleRule, Stylesheet};

use crate::ast::Decomposer;
use crate::error::AnalysisError;
use crate::findings::{Semantics, Syntax};
use crate::picker::FileDescriptor;
use crate::vocabulary::Vocabulary;

/// MIME type of the files analyzed here.
pub const CSS_MIME_TYPE: &str = "text/css";

/// Section name of selectors outside any at-rule block.
pub const ROOT_SECTION: &str = "root";

/// At-rules with a declaration block that carry nothing worth reporting.
const IGNORED_AT_RULE_SETS: [&str; 3] = ["-ms-viewport", "viewport", "page"];

/// Byte-size statistics of a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Raw size in bytes.
    pub size: usize,
    /// Size of the compact form in bytes.
    pub minified_size: usize,
    /// Bytes the compact form saves.
    pub whitespace: usize,
    /// `whitespace` as a percentage of `size`, to two decimal places.
    pub whitespace_percent: String,
}

impl Stats {
    /// Measure a stylesheet of `size` raw bytes whose compact form is `minified_size` bytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn measure(size: usize, minified_size: usize) -> Self {
        let whitespace = size.saturating_sub(minified_size);
        let whitespace_percent = if size == 0 {
            "0.00".to_string()
        } else {
            format!("{:.2}", 100.0 * whitespace as f64 / size as f64)
        };
        Self {
            size,
            minified_size,
            whitespace,
            whitespace_percent,
        }
    }
}

/// Everything learned from one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAnalysis {
    /// Always `text/css`.
    pub mime_type: String,
    /// Path of the file relative to the scanned root.
    pub scan_path: String,
    /// Size statistics.
    pub stats: Stats,
    /// Raw selectors by section, then line. The section is `root` or the
    /// prelude of the enclosing at-rule block.
    pub selectors_by_line: BTreeMap<String, BTreeMap<usize, Vec<String>>>,
    /// `@import` urls by line.
    pub imports_by_line: BTreeMap<usize, String>,
    /// `@font-face` family names by line.
    pub fonts_by_line: BTreeMap<usize, Vec<String>>,
    /// Names of at-rules that are not categorized, by line.
    pub unsupported_at_rules: BTreeMap<usize, Vec<String>>,
    /// Problems the stylesheet parser recovered from.
    pub parse_issues: Vec<ParseIssue>,
    /// Syntax findings.
    pub syntax: Syntax,
    /// Semantics findings.
    pub semantics: Semantics,
}

impl FileAnalysis {
    /// Number of selectors found, across all sections.
    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.selectors_by_line
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }
}

/// Read and analyze the stylesheet `descriptor` names.
///
/// # Errors
///
/// If the file cannot be read, or uses a construct the analysis does not model.
pub fn analyze_file(
    descriptor: &FileDescriptor,
    vocabulary: &Vocabulary,
) -> Result<FileAnalysis, AnalysisError> {
    let bytes = fs::read(descriptor.full_path()).map_err(|source| AnalysisError::Io {
        scan_path: descriptor.scan_path.clone(),
        source,
    })?;
    analyze_source(descriptor, &bytes, vocabulary)
}

/// Analyze stylesheet bytes already in memory.
///
/// Invalid UTF-8 is replaced, not rejected.
///
/// # Errors
///
/// If the stylesheet uses a construct the analysis does not model.
pub fn analyze_source(
    descriptor: &FileDescriptor,
    bytes: &[u8],
    vocabulary: &Vocabulary,
) -> Result<FileAnalysis, AnalysisError> {
    let source = String::from_utf8_lossy(bytes);
    let stylesheet = Stylesheet::parse(&source);
    for issue in &stylesheet.issues {
        log::debug!("{} @ line {}: {}", descriptor.scan_path, issue.line, issue.message);
    }

    let stats = Stats::measure(bytes.len(), stylesheet.to_compact_string().len());

    let mut walker = Walker {
        scan_path: &descriptor.scan_path,
        decomposer: Decomposer::new(&descriptor.scan_path, vocabulary),
        selectors_by_line: BTreeMap::new(),
        imports_by_line: BTreeMap::new(),
        fonts_by_line: BTreeMap::new(),
        unsupported_at_rules: BTreeMap::new(),
    };
    walker.top_level(&stylesheet.rules)?;

    let Walker {
        decomposer,
        selectors_by_line,
        imports_by_line,
        fonts_by_line,
        unsupported_at_rules,
        ..
    } = walker;
    let (syntax, semantics) = decomposer.into_findings();

    Ok(FileAnalysis {
        mime_type: CSS_MIME_TYPE.to_string(),
        scan_path: descriptor.scan_path.clone(),
        stats,
        selectors_by_line,
        imports_by_line,
        fonts_by_line,
        unsupported_at_rules,
        parse_issues: stylesheet.issues,
        syntax,
        semantics,
    })
}

struct Walker<'a> {
    scan_path: &'a str,
    decomposer: Decomposer<'a>,
    selectors_by_line: BTreeMap<String, BTreeMap<usize, Vec<String>>>,
    imports_by_line: BTreeMap<usize, String>,
    fonts_by_line: BTreeMap<usize, Vec<String>>,
    unsupported_at_rules: BTreeMap<usize, Vec<String>>,
}

impl Walker<'_> {
    fn top_level(&mut self, rules: &[Rule]) -> Result<(), AnalysisError> {
        for rule in rules {
            match rule {
                Rule::Style(style) => self.style_rule(style, ROOT_SECTION)?,
                Rule::BlockList(block_list) => self.block_list(block_list)?,
                Rule::Keyframes(_) | Rule::Charset(_) => {}
                Rule::Import(import) => {
                    let _ = self.imports_by_line.insert(import.line, import.url.clone());
                }
                Rule::RuleSet(rule_set) => self.rule_set(rule_set),
                Rule::Statement(statement) => self.uncategorized(&statement.name, statement.line),
            }
        }
        Ok(())
    }

    fn block_list(&mut self, block_list: &AtRuleBlockList) -> Result<(), AnalysisError> {
        let section = if block_list.prelude.is_empty() {
            format!("@{}", block_list.name)
        } else {
            block_list.prelude.clone()
        };
        for rule in &block_list.rules {
            match rule {
                Rule::Style(style) => self.style_rule(style, &section)?,
                Rule::BlockList(nested) => self.block_list(nested)?,
                Rule::Keyframes(_) => {}
                Rule::RuleSet(rule_set) => self.rule_set(rule_set),
                Rule::Import(_) | Rule::Charset(_) | Rule::Statement(_) => {
                    return Err(AnalysisError::UnmodeledBlockListItem {
                        scan_path: self.scan_path.to_string(),
                        line: block_list.line,
                        construct: construct_name(rule),
                    });
                }
            }
        }
        Ok(())
    }

    fn style_rule(&mut self, style: &StyleRule, section: &str) -> Result<(), AnalysisError> {
        for selector in &style.selectors {
            self.selectors_by_line
                .entry(section.to_string())
                .or_default()
                .entry(style.line)
                .or_default()
                .push(selector.clone());
            self.decomposer.analyze_selector(selector, style.line)?;
        }
        Ok(())
    }

    fn rule_set(&mut self, rule_set: &AtRuleSet) {
        let name = rule_set.name.to_ascii_lowercase();
        if name == "font-face" {
            for declaration in &rule_set.declarations {
                if declaration.name.eq_ignore_ascii_case("font-family") {
                    self.fonts_by_line
                        .entry(rule_set.line)
                        .or_default()
                        .extend(declaration.list_items());
                }
            }
        } else if !IGNORED_AT_RULE_SETS.contains(&name.as_str()) {
            self.uncategorized(&rule_set.name, rule_set.line);
        }
    }

    fn uncategorized(&mut self, name: &str, line: usize) {
        let _ = warn_once("CSS", &format!("not yet categorized: @{name}"));
        self.unsupported_at_rules
            .entry(line)
            .or_default()
            .push(format!("@{name}"));
    }
}

fn construct_name(rule: &Rule) -> String {
    match rule {
        Rule::Import(_) => "@import".to_string(),
        Rule::Charset(_) => "@charset".to_string(),
        Rule::Statement(statement) => format!("@{}", statement.name),
        Rule::Style(_) => "style rule".to_string(),
        Rule::BlockList(block_list) => format!("@{}", block_list.name),
        Rule::Keyframes(keyframes) => format!("@{}", keyframes.keyword),
        Rule::RuleSet(rule_set) => format!("@{}", rule_set.name),
    }
}
