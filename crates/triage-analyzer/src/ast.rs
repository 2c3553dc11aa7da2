//! Selector decomposition.
//!
//! A selector is parsed with the strict grammar and mapped into a closed set
//! of [`Token`]s chained into [`Sequence`]s. When the grammar rejects it, the
//! cleaner repairs it and parsing is retried, a bounded number of times.

use triage_css::selector::{
    Combinator, ComplexSelector, CompoundSelector, Nth, PseudoClass, SelectorList,
    SimpleSelector, parse_selector_list,
};

use crate::classifier::Classifier;
use crate::cleaner;
use crate::error::AnalysisError;
use crate::findings::{Semantics, SelectorFailure, Syntax};
use crate::vocabulary::Vocabulary;

/// Most cleaning rounds attempted for one selector before it is given up on.
pub const MAX_REPAIR_ROUNDS: usize = 10;

/// One simple part of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An element name, as written.
    Type(String),
    /// A class name, as written.
    ClassName(String),
    /// An id.
    Id(String),
    /// An attribute selector, by attribute name.
    Attribute(String),
    /// A pseudo-class, with its argument if it takes one.
    PseudoClass {
        /// The pseudo-class name.
        name: String,
        /// The argument, for `:not()`, `:lang()` and `:nth-*()`.
        parameter: Option<Box<Token>>,
    },
    /// A pseudo-element name.
    PseudoElement(String),
    /// `*`
    Universal,
    /// An `An+B` argument.
    ValuePosition(Nth),
    /// A `:lang()` argument.
    ValueLanguage(String),
}

/// The relationship between two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorKind {
    /// `a > b`
    Child,
    /// `a b`
    Descendant,
    /// `a + b`
    AdjacentSibling,
    /// `a ~ b`
    GeneralSibling,
}

/// A compound selector's tokens and, if more follows, how the rest relates.
///
/// `a > span.foo` is `Sequence { [Type(a)], Child -> Sequence { [Type(span), ClassName(foo)] } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The tokens of this compound selector.
    pub simples: Vec<Token>,
    /// The combinator and the sequence to its right.
    pub combinator: Option<(CombinatorKind, Box<Sequence>)>,
}

/// Decomposes and classifies the selectors of one file.
pub struct Decomposer<'a> {
    scan_path: &'a str,
    classifier: Classifier<'a>,
    syntax: Syntax,
}

impl<'a> Decomposer<'a> {
    /// Create a decomposer for the file at `scan_path`.
    #[must_use]
    pub fn new(scan_path: &'a str, vocabulary: &'a Vocabulary) -> Self {
        Self {
            scan_path,
            classifier: Classifier::new(vocabulary),
            syntax: Syntax::default(),
        }
    }

    /// Analyze one selector found on `line`.
    ///
    /// STEP 1: An empty selector is nothing to analyze. Repairs can empty one.
    /// STEP 2: If the selector parses, classify every token of every sequence.
    /// STEP 3: Otherwise clean it. Record the repairs and go round again.
    /// STEP 4: If cleaning changes nothing, or the round limit is reached,
    ///         record the selector as unrecoverable.
    ///
    /// # Errors
    ///
    /// Only for constructs the grammar accepts that the decomposer does not model.
    /// Syntax trouble is recorded, never returned.
    pub fn analyze_selector(&mut self, selector: &str, line: usize) -> Result<(), AnalysisError> {
        let mut current = selector.trim().to_string();

        for round in 0..=MAX_REPAIR_ROUNDS {
            // STEP 1
            if current.is_empty() {
                return Ok(());
            }

            // STEP 2
            let error = match parse_selector_list(&current) {
                Ok(list) => {
                    for sequence in &self.decompose(&list, line)? {
                        self.walk(sequence, line);
                    }
                    return Ok(());
                }
                Err(error) => error,
            };

            // STEP 4
            if round == MAX_REPAIR_ROUNDS {
                self.give_up(
                    selector,
                    &current,
                    line,
                    format!("repair limit of {MAX_REPAIR_ROUNDS} rounds reached: {error}"),
                );
                return Ok(());
            }

            // STEP 3
            let cleaned = cleaner::clean(&current);
            if cleaned.count == 0 {
                self.give_up(selector, &current, line, error.to_string());
                return Ok(());
            }
            for (category, replacements) in cleaned.replacements {
                for replacement in replacements {
                    log::debug!(
                        "{} @ line {line}: {category} {:?} => {:?}",
                        self.scan_path,
                        replacement.matched,
                        replacement.after
                    );
                    self.syntax.record(line, category.kind, replacement);
                }
            }
            current = cleaned.selector;
        }
        Ok(())
    }

    /// Map a parsed selector list to one [`Sequence`] chain per selector.
    ///
    /// # Errors
    ///
    /// If a selector uses a simple selector or combinator that has no [`Token`]
    /// or [`CombinatorKind`].
    pub fn decompose(&self, list: &SelectorList, line: usize) -> Result<Vec<Sequence>, AnalysisError> {
        let mut sequences = Vec::with_capacity(list.selectors.len());
        for complex in &list.selectors {
            sequences.extend(self.sequence(complex, line)?);
        }
        Ok(sequences)
    }

    /// The syntax findings so far.
    #[must_use]
    pub const fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// The semantics findings so far.
    #[must_use]
    pub const fn semantics(&self) -> &Semantics {
        self.classifier.semantics()
    }

    /// Give up the findings.
    #[must_use]
    pub fn into_findings(self) -> (Syntax, Semantics) {
        (self.syntax, self.classifier.into_semantics())
    }

    fn give_up(&mut self, original: &str, current: &str, line: usize, exception: String) {
        log::debug!("{} @ line {line}: giving up on {original:?}: {exception}", self.scan_path);
        self.syntax.record_failure(
            line,
            SelectorFailure {
                before: original.to_string(),
                after: current.to_string(),
                exception,
            },
        );
    }

    fn walk(&mut self, sequence: &Sequence, line: usize) {
        for token in &sequence.simples {
            self.classifier.classify(token, line);
        }
        if let Some((_, next)) = &sequence.combinator {
            self.walk(next, line);
        }
    }

    /// Chain a complex selector's compounds into sequences, right to left.
    fn sequence(&self, complex: &ComplexSelector, line: usize) -> Result<Option<Sequence>, AnalysisError> {
        let mut compounds = complex.compounds.iter().rev();
        let Some(subject) = compounds.next() else {
            return Ok(None);
        };
        let mut sequence = Sequence {
            simples: self.tokens(subject, line)?,
            combinator: None,
        };
        for (compound, combinator) in compounds.zip(complex.combinators.iter().rev()) {
            sequence = Sequence {
                simples: self.tokens(compound, line)?,
                combinator: Some((self.combinator(*combinator, line)?, Box::new(sequence))),
            };
        }
        Ok(Some(sequence))
    }

    fn tokens(&self, compound: &CompoundSelector, line: usize) -> Result<Vec<Token>, AnalysisError> {
        compound
            .simple_selectors
            .iter()
            .map(|simple| self.token(simple, line))
            .collect()
    }

    fn token(&self, simple: &SimpleSelector, line: usize) -> Result<Token, AnalysisError> {
        Ok(match simple {
            SimpleSelector::Type(name) => Token::Type(name.clone()),
            SimpleSelector::Universal => Token::Universal,
            SimpleSelector::Class(name) => Token::ClassName(name.clone()),
            SimpleSelector::Id(id) => Token::Id(id.clone()),
            SimpleSelector::Attribute(attribute) => Token::Attribute(attribute.name().to_string()),
            SimpleSelector::PseudoElement(element) => Token::PseudoElement(element.name().to_string()),
            SimpleSelector::PseudoClass(pseudo_class) => {
                let parameter = match pseudo_class {
                    PseudoClass::Not(inner) => Some(self.token(inner, line)?),
                    PseudoClass::Lang(language) => Some(Token::ValueLanguage(language.clone())),
                    PseudoClass::NthChild(nth)
                    | PseudoClass::NthLastChild(nth)
                    | PseudoClass::NthOfType(nth)
                    | PseudoClass::NthLastOfType(nth) => Some(Token::ValuePosition(*nth)),
                    _ => None,
                };
                Token::PseudoClass {
                    name: pseudo_class.name().to_string(),
                    parameter: parameter.map(Box::new),
                }
            }
            SimpleSelector::Nesting => return Err(self.unmodeled_simple(line, "&")),
            other => return Err(self.unmodeled_simple(line, &format!("{other:?}"))),
        })
    }

    fn combinator(&self, combinator: Combinator, line: usize) -> Result<CombinatorKind, AnalysisError> {
        Ok(match combinator {
            Combinator::Child => CombinatorKind::Child,
            Combinator::Descendant => CombinatorKind::Descendant,
            Combinator::NextSibling => CombinatorKind::AdjacentSibling,
            Combinator::SubsequentSibling => CombinatorKind::GeneralSibling,
            Combinator::Column => return Err(self.unmodeled_combinator(line, "||")),
            other => return Err(self.unmodeled_combinator(line, &format!("{other:?}"))),
        })
    }

    fn unmodeled_simple(&self, line: usize, simple: &str) -> AnalysisError {
        AnalysisError::UnmodeledSimple {
            scan_path: self.scan_path.to_string(),
            line,
            simple: simple.to_string(),
        }
    }

    fn unmodeled_combinator(&self, line: usize, combinator: &str) -> AnalysisError {
        AnalysisError::UnmodeledCombinator {
            scan_path: self.scan_path.to_string(),
            line,
            combinator: combinator.to_string(),
        }
    }
}
