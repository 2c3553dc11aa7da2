//! Vocabulary classification of selector tokens.

use crate::ast::Token;
use crate::findings::{PrefixHit, Semantics};
use crate::vocabulary::Vocabulary;

/// Prefixes microformats2 reserves for its class names.
const MICROFORMATS2_PREFIXES: [&str; 5] = ["h", "e", "u", "dt", "p"];

/// Files each token of a selector under the vocabulary it uses.
pub struct Classifier<'a> {
    vocabulary: &'a Vocabulary,
    semantics: Semantics,
}

impl<'a> Classifier<'a> {
    /// Create a classifier with no findings yet.
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            semantics: Semantics::default(),
        }
    }

    /// Classify one token found on `line`.
    ///
    /// Only element names and class names can be findings. A pseudo-class
    /// argument is classified like any other token.
    pub fn classify(&mut self, token: &Token, line: usize) {
        match token {
            Token::Type(element) => {
                if !self.vocabulary.is_posh(element) {
                    self.semantics
                        .posh
                        .entry(element.clone())
                        .or_default()
                        .push(line);
                }
            }
            Token::ClassName(class) => self.class_name(class, line),
            Token::PseudoClass {
                parameter: Some(parameter),
                ..
            } => self.classify(parameter, line),
            Token::PseudoClass {
                parameter: None, ..
            }
            | Token::Id(_)
            | Token::Attribute(_)
            | Token::PseudoElement(_)
            | Token::Universal
            | Token::ValuePosition(_)
            | Token::ValueLanguage(_) => {}
        }
    }

    /// STEP 1: A known microformats class name is filed as such.
    /// STEP 2: Anything without a one- or two-letter prefix is an ordinary class name.
    /// STEP 3: A microformats2 prefix is filed as well-known or well-known format.
    /// STEP 4: Any other short prefix is filed by its length.
    fn class_name(&mut self, token: &str, line: usize) {
        let normalized = token.to_ascii_lowercase();

        // STEP 1
        if self.vocabulary.is_microformats(&normalized) {
            self.semantics
                .microformats
                .entry(normalized)
                .or_default()
                .push(line);
            return;
        }

        // STEP 2
        let Some((prefix, _)) = normalized.split_once('-') else {
            return;
        };
        if !(1..=2).contains(&prefix.len()) || !prefix.bytes().all(|b| b.is_ascii_lowercase()) {
            return;
        }

        // STEP 3
        let microformats2 = &mut self.semantics.microformats2;
        if MICROFORMATS2_PREFIXES.contains(&prefix) {
            let bucket = if self.vocabulary.is_microformats2(&normalized) {
                &mut microformats2.well_known
            } else {
                &mut microformats2.well_known_format
            };
            bucket.entry(normalized).or_default().push(line);
            return;
        }

        // STEP 4
        let bucket = if prefix.len() == 2 {
            &mut microformats2.prefix_format.double_letter
        } else {
            &mut microformats2.prefix_format.single_letter
        };
        bucket.entry(prefix.to_string()).or_default().push(PrefixHit {
            line_number: line,
            token: token.to_string(),
        });
    }

    /// The findings so far.
    #[must_use]
    pub const fn semantics(&self) -> &Semantics {
        &self.semantics
    }

    /// Give up the findings.
    #[must_use]
    pub fn into_semantics(self) -> Semantics {
        self.semantics
    }
}
