//! Line-numbered findings collected while analyzing one stylesheet.
//!
//! Syntax findings record how selectors were repaired, or that they could not
//! be. Semantics findings record which vocabulary the selectors lean on.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// How serious a syntax finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
pub enum Severity {
    /// Valid but non-standard or useless syntax.
    #[strum(serialize = "notices")]
    #[serde(rename = "notices")]
    Notice,
    /// Invalid syntax the analyzer could repair.
    #[strum(serialize = "warnings")]
    #[serde(rename = "warnings")]
    Warning,
    /// Invalid syntax the analyzer could not repair.
    #[strum(serialize = "errors")]
    #[serde(rename = "errors")]
    Error,
}

/// The kind of repair the cleaner made to a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RepairKind {
    /// `:-webkit-*`, `::-moz-*` and other vendor pseudos were removed.
    UnrecognizedVendorExtension,
    /// `:any-link`, `:dir()`, `:fullscreen`, `:host()` or `:host-context()` was removed.
    ExperimentalPseudoClass,
    /// `::placeholder`, `::backdrop`, `::marker` or a spelling/grammar error pseudo was removed.
    ExperimentalPseudoElement,
    /// `:nth-*(0)` became `:nth-*(0n)`.
    Ordinality,
    /// A pseudo-element written with one colon got its second colon.
    PseudoElementConfusion,
    /// A pseudo-class written with two colons lost one.
    PseudoClassConfusion,
    /// An empty `:not()` was removed.
    EmptyNot,
    /// A class or id used as an `:nth-*()` position became `0n`.
    BadPseudoClassPosition,
    /// A zero-width character was removed.
    BadCharacters,
    /// A quoted `:not()` argument was unquoted.
    QuoteAllTheThings,
}

impl RepairKind {
    /// The severity this kind of repair is reported at.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::UnrecognizedVendorExtension
            | Self::ExperimentalPseudoClass
            | Self::ExperimentalPseudoElement
            | Self::Ordinality => Severity::Notice,
            Self::PseudoElementConfusion
            | Self::PseudoClassConfusion
            | Self::EmptyNot
            | Self::BadPseudoClassPosition
            | Self::BadCharacters
            | Self::QuoteAllTheThings => Severity::Warning,
        }
    }

    /// The severity and kind together.
    #[must_use]
    pub const fn category(self) -> Category {
        Category {
            severity: self.severity(),
            kind: self,
        }
    }

    /// Every repair kind reported at `severity`, in report order.
    pub fn with_severity(severity: Severity) -> impl Iterator<Item = Self> {
        Self::iter().filter(move |kind| kind.severity() == severity)
    }

    /// One-sentence explanation shown in reports.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UnrecognizedVendorExtension => {
                "The vendor extensions activate new and experimental features in browsers."
            }
            Self::ExperimentalPseudoClass => {
                "There are non-standard, experimental pseudo-classes used here."
            }
            Self::ExperimentalPseudoElement => {
                "There are non-standard, experimental pseudo-elements used here."
            }
            Self::Ordinality => {
                "A structural pseudo-class with a position argument of 0 will not match any elements (indexes start at 1)."
            }
            Self::PseudoElementConfusion => "Pseudo-class syntax used for a pseudo-element.",
            Self::PseudoClassConfusion => "Pseudo-element syntax used for a pseudo-class.",
            Self::EmptyNot => {
                "The :not() pseudo-class requires a comma-separated list of one or more selectors as its argument."
            }
            Self::BadPseudoClassPosition => {
                "The position argument must be of the form <An+B> | even | odd."
            }
            Self::BadCharacters => {
                "Selectors may not include extended white-space characters, e.g.: <200b>, <200c>, <200d>."
            }
            Self::QuoteAllTheThings => {
                "Selectors in the argument of a negation pseudo-class should not be quoted like string literals."
            }
        }
    }
}

/// Where a repair is filed: `notices/ordinality`, `warnings/empty-not`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
    /// The severity bucket.
    pub severity: Severity,
    /// The repair kind within it.
    pub kind: RepairKind,
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.severity, self.kind)
    }
}

/// One textual repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// The selector as it was before the cleaning pass.
    pub before: String,
    /// The text that was matched.
    #[serde(rename = "match")]
    pub matched: String,
    /// The text it was replaced with.
    pub after: String,
}

/// A selector that could not be repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorFailure {
    /// The selector as written in the stylesheet.
    pub before: String,
    /// The selector as it stood when repair gave up.
    pub after: String,
    /// Why the last parse failed.
    pub exception: String,
}

/// Replacements by kind, then by line.
pub type ReplacementsByLine = BTreeMap<RepairKind, BTreeMap<usize, Vec<Replacement>>>;

/// Syntax findings for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Syntax {
    /// Repairs of valid but non-standard syntax.
    pub notices: ReplacementsByLine,
    /// Repairs of invalid syntax.
    pub warnings: ReplacementsByLine,
    /// Selectors that could not be repaired, by line.
    pub errors: BTreeMap<usize, Vec<SelectorFailure>>,
}

impl Syntax {
    /// File a replacement under its kind's severity.
    pub fn record(&mut self, line: usize, kind: RepairKind, replacement: Replacement) {
        if let Some(bucket) = self.replacements_mut(kind.severity()) {
            bucket
                .entry(kind)
                .or_default()
                .entry(line)
                .or_default()
                .push(replacement);
        }
    }

    /// File an unrecoverable selector.
    pub fn record_failure(&mut self, line: usize, failure: SelectorFailure) {
        self.errors.entry(line).or_default().push(failure);
    }

    /// The replacements filed at `severity`. Errors hold no replacements.
    #[must_use]
    pub const fn replacements(&self, severity: Severity) -> Option<&ReplacementsByLine> {
        match severity {
            Severity::Notice => Some(&self.notices),
            Severity::Warning => Some(&self.warnings),
            Severity::Error => None,
        }
    }

    const fn replacements_mut(&mut self, severity: Severity) -> Option<&mut ReplacementsByLine> {
        match severity {
            Severity::Notice => Some(&mut self.notices),
            Severity::Warning => Some(&mut self.warnings),
            Severity::Error => None,
        }
    }

    /// Number of records at `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        match self.replacements(severity) {
            Some(bucket) => bucket.values().flat_map(BTreeMap::values).map(Vec::len).sum(),
            None => self.errors.values().map(Vec::len).sum(),
        }
    }

    /// Whether nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// A class token whose one- or two-letter prefix might collide with a future
/// microformats2 prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixHit {
    /// Line of the selector.
    pub line_number: usize,
    /// The class token as written.
    pub token: String,
}

/// Prefix hits by prefix, split by prefix length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PrefixFormat {
    /// One-letter prefixes, e.g. `x` for `x-large`.
    pub single_letter: BTreeMap<String, Vec<PrefixHit>>,
    /// Two-letter prefixes, e.g. `js` for `js-toggle`.
    pub double_letter: BTreeMap<String, Vec<PrefixHit>>,
}

/// Microformats2 findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Microformats2 {
    /// Known microformats2 class names, e.g. `h-card`.
    pub well_known: BTreeMap<String, Vec<usize>>,
    /// Unknown class names using an `h-`, `p-`, `u-`, `dt-` or `e-` prefix.
    pub well_known_format: BTreeMap<String, Vec<usize>>,
    /// Other one- or two-letter prefixes.
    pub prefix_format: PrefixFormat,
}

/// Semantics findings for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Semantics {
    /// Elements that are not Plain Old Simple HTML, with the lines using them.
    pub posh: BTreeMap<String, Vec<usize>>,
    /// Classic microformats class names, with the lines using them.
    pub microformats: BTreeMap<String, Vec<usize>>,
    /// Microformats2-shaped class names.
    pub microformats2: Microformats2,
}

fn hits(map: &BTreeMap<String, Vec<usize>>) -> usize {
    map.values().map(Vec::len).sum()
}

impl Semantics {
    /// Number of non-POSH element uses.
    #[must_use]
    pub fn posh_count(&self) -> usize {
        hits(&self.posh)
    }

    /// Number of classic microformats class uses.
    #[must_use]
    pub fn microformats_count(&self) -> usize {
        hits(&self.microformats)
    }

    /// Number of well-known and well-known-format microformats2 class uses.
    /// Prefix-format hits are not counted.
    #[must_use]
    pub fn microformats2_count(&self) -> usize {
        hits(&self.microformats2.well_known) + hits(&self.microformats2.well_known_format)
    }

    /// Number of speculative prefix-format hits.
    #[must_use]
    pub fn prefix_format_count(&self) -> usize {
        let prefix = &self.microformats2.prefix_format;
        prefix
            .single_letter
            .values()
            .chain(prefix.double_letter.values())
            .map(Vec::len)
            .sum()
    }
}
