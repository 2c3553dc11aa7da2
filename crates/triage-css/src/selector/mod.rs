//! Strict CSS selector grammar.
//!
//! This module parses selector text per the subset of
//! [Selectors Level 3](https://www.w3.org/TR/selectors-3/) that the analyzer
//! models, plus the Level 4 nesting selector and column combinator. Unlike the
//! stylesheet parser it does not recover: malformed or unsupported syntax is a
//! [`SelectorError`], which is what lets callers detect and repair it.
//!
//! Rejected on purpose:
//! - pseudo-elements written with a single colon (`a:after`)
//! - pseudo-classes written with two colons (`a::hover`)
//! - vendor-prefixed and otherwise unknown pseudo-classes and pseudo-elements
//! - `:nth-*()` with a bare position of `0`, which never matches
//! - empty or quoted `:not()` arguments
//! - zero-width characters inside identifiers

use core::fmt;

use thiserror::Error;

/// A selector that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {position}")]
pub struct SelectorError {
    /// What was wrong.
    pub message: String,
    /// Code point offset into the selector text where parsing stopped.
    pub position: usize,
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type."
    ///
    /// Examples: `div`, `p`, `span`, `body`, `h1`
    Type(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*)."
    Universal,

    /// [CSS Nesting § 2.1](https://www.w3.org/TR/css-nesting-1/#nest-selector)
    /// "The nesting selector, written as &, represents the elements matched by
    /// the parent rule."
    Nesting,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// Examples: `.highlight`, `.h-card`, `.nav-item`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// Examples: `#main`, `#header`
    Id(String),

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute(AttributeSelector),

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    PseudoClass(PseudoClass),

    /// [§ 11 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    PseudoElement(PseudoElement),
}

/// Attribute selectors per [§ 6.4](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]` - "Represents an element with the att attribute"
    Exists(String),
    /// `[attr=value]` - "whose value is exactly 'val'"
    Equals(String, String),
    /// `[attr~=value]` - "a whitespace-separated list of words, one of which is exactly 'val'"
    Includes(String, String),
    /// `[attr|=value]` - "either being exactly 'val' or beginning with 'val' immediately followed by '-'"
    DashMatch(String, String),
    /// `[attr^=value]` - "begins with the prefix 'val'"
    PrefixMatch(String, String),
    /// `[attr$=value]` - "ends with the suffix 'val'"
    SuffixMatch(String, String),
    /// `[attr*=value]` - "contains at least one instance of the substring 'val'"
    SubstringMatch(String, String),
}

impl AttributeSelector {
    /// The attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exists(name)
            | Self::Equals(name, _)
            | Self::Includes(name, _)
            | Self::DashMatch(name, _)
            | Self::PrefixMatch(name, _)
            | Self::SuffixMatch(name, _)
            | Self::SubstringMatch(name, _) => name,
        }
    }
}

/// [§ 14.1 An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// "The An+B notation defines an integer step (A) and offset (B), and represents
/// the An+Bth elements in a list, for every positive integer or zero value of n."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nth {
    /// The step.
    pub a: i32,
    /// The offset.
    pub b: i32,
}

impl fmt::Display for Nth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.a, self.b) {
            (0, b) => write!(f, "{b}"),
            (a, 0) => write!(f, "{a}n"),
            (a, b) => write!(f, "{a}n{b:+}"),
        }
    }
}

/// Pseudo-classes per [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PseudoClass {
    /// `:root`
    Root,
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:first-of-type`
    FirstOfType,
    /// `:last-of-type`
    LastOfType,
    /// `:only-child`
    OnlyChild,
    /// `:only-of-type`
    OnlyOfType,
    /// `:empty`
    Empty,
    /// `:link`
    Link,
    /// `:visited`
    Visited,
    /// `:hover`
    Hover,
    /// `:active`
    Active,
    /// `:focus`
    Focus,
    /// `:target`
    Target,
    /// `:enabled`
    Enabled,
    /// `:disabled`
    Disabled,
    /// `:checked`
    Checked,
    /// [§ 4.3 The Negation Pseudo-class](https://www.w3.org/TR/selectors-3/#negation)
    /// "The negation pseudo-class, :not(X), is a functional notation taking a simple
    /// selector (excluding the negation pseudo-class itself) as an argument."
    Not(Box<SimpleSelector>),
    /// [§ 7.2 The Language Pseudo-class](https://www.w3.org/TR/selectors-4/#the-lang-pseudo)
    Lang(String),
    /// `:nth-child(An+B)`
    NthChild(Nth),
    /// `:nth-last-child(An+B)`
    NthLastChild(Nth),
    /// `:nth-of-type(An+B)`
    NthOfType(Nth),
    /// `:nth-last-of-type(An+B)`
    NthLastOfType(Nth),
}

impl PseudoClass {
    /// The pseudo-class name, without the colon or arguments.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::FirstChild => "first-child",
            Self::LastChild => "last-child",
            Self::FirstOfType => "first-of-type",
            Self::LastOfType => "last-of-type",
            Self::OnlyChild => "only-child",
            Self::OnlyOfType => "only-of-type",
            Self::Empty => "empty",
            Self::Link => "link",
            Self::Visited => "visited",
            Self::Hover => "hover",
            Self::Active => "active",
            Self::Focus => "focus",
            Self::Target => "target",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Checked => "checked",
            Self::Not(_) => "not",
            Self::Lang(_) => "lang",
            Self::NthChild(_) => "nth-child",
            Self::NthLastChild(_) => "nth-last-child",
            Self::NthOfType(_) => "nth-of-type",
            Self::NthLastOfType(_) => "nth-last-of-type",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "root" => Self::Root,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "first-of-type" => Self::FirstOfType,
            "last-of-type" => Self::LastOfType,
            "only-child" => Self::OnlyChild,
            "only-of-type" => Self::OnlyOfType,
            "empty" => Self::Empty,
            "link" => Self::Link,
            "visited" => Self::Visited,
            "hover" => Self::Hover,
            "active" => Self::Active,
            "focus" => Self::Focus,
            "target" => Self::Target,
            "enabled" => Self::Enabled,
            "disabled" => Self::Disabled,
            "checked" => Self::Checked,
            _ => return None,
        })
    }
}

/// [§ 7 Pseudo-elements](https://www.w3.org/TR/selectors-3/#pseudo-elements)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoElement {
    /// `::first-line`
    FirstLine,
    /// `::first-letter`
    FirstLetter,
    /// `::before`
    Before,
    /// `::after`
    After,
}

impl PseudoElement {
    /// The pseudo-element name, without the colons.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstLine => "first-line",
            Self::FirstLetter => "first-letter",
            Self::Before => "before",
            Self::After => "after",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "first-line" => Some(Self::FirstLine),
            "first-letter" => Some(Self::FirstLetter),
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            _ => None,
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors, in source order.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Combinator {
    /// [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators) whitespace
    Descendant,
    /// [§ 16.2](https://www.w3.org/TR/selectors-4/#child-combinators) `>`
    Child,
    /// [§ 16.3](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators) `+`
    NextSibling,
    /// [§ 16.4](https://www.w3.org/TR/selectors-4/#general-sibling-combinators) `~`
    SubsequentSibling,
    /// [§ 17.1](https://www.w3.org/TR/selectors-4/#the-column-combinator) `||`
    Column,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a chain of one or more compound selectors separated
/// by combinators."
///
/// Stored left to right: `combinators[i]` joins `compounds[i]` to `compounds[i + 1]`,
/// so there is always exactly one fewer combinator than compound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The compound selectors, in source order.
    pub compounds: Vec<CompoundSelector>,
    /// The combinators between consecutive compounds.
    pub combinators: Vec<Combinator>,
}

/// [§ 4.1 Selector Lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "A comma-separated list of selectors represents the union of all elements
/// selected by each of the individual selectors in the list."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    /// The complex selectors, in source order.
    pub selectors: Vec<ComplexSelector>,
}

/// Parse selector text into a [`SelectorList`].
///
/// # Errors
///
/// Returns a [`SelectorError`] for any syntax outside the modeled grammar.
pub fn parse_selector_list(raw: &str) -> Result<SelectorList, SelectorError> {
    SelectorParser::new(raw, 0).parse_list()
}

/// Cursor over selector text, with `offset` added to reported positions so
/// errors inside function arguments point into the whole selector.
struct SelectorParser {
    input: Vec<char>,
    position: usize,
    offset: usize,
}

impl SelectorParser {
    fn new(input: &str, offset: usize) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            offset,
        }
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            let _ = self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            let _ = self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => {
                    let _ = self.consume();
                }
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some('|') if self.peek_at(1) == Some('|') => {
                    let _ = self.consume();
                    Combinator::Column
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(c) => return Err(self.unexpected(c)),
            };
            if combinator != Combinator::Descendant {
                let _ = self.consume();
                let _ = self.skip_whitespace();
            }
            if matches!(self.peek(), None | Some(',')) {
                return Err(self.error("combinator is not followed by a selector"));
            }
            compounds.push(self.parse_compound()?);
            combinators.push(combinator);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    /// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
    ///
    /// "If it contains a type selector or universal selector, that selector must
    /// come first in the sequence."
    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut simple_selectors = Vec::new();

        if self.peek() == Some('*') {
            let _ = self.consume();
            simple_selectors.push(SimpleSelector::Universal);
        } else if self.would_start_ident() {
            simple_selectors.push(SimpleSelector::Type(self.consume_ident("element name")?));
        }

        loop {
            let simple = match self.peek() {
                Some('.') => {
                    let _ = self.consume();
                    SimpleSelector::Class(self.consume_ident("class name")?)
                }
                Some('#') => {
                    let _ = self.consume();
                    SimpleSelector::Id(self.consume_name("id")?)
                }
                Some('&') => {
                    let _ = self.consume();
                    SimpleSelector::Nesting
                }
                Some('[') => self.parse_attribute()?,
                Some(':') => self.parse_pseudo()?,
                Some('*') => {
                    return Err(self.error("universal selector must start a compound selector"));
                }
                Some(_) if self.would_start_ident() && !simple_selectors.is_empty() => {
                    return Err(self.error("type selector must start a compound selector"));
                }
                _ => break,
            };
            simple_selectors.push(simple);
        }

        if simple_selectors.is_empty() {
            return Err(match self.peek() {
                Some(c) if is_forbidden(c) => self.unexpected(c),
                _ => self.error("expected a selector"),
            });
        }
        Ok(CompoundSelector { simple_selectors })
    }

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    fn parse_attribute(&mut self) -> Result<SimpleSelector, SelectorError> {
        let _ = self.consume(); // [
        let _ = self.skip_whitespace();
        let name = self.consume_ident("attribute name")?;
        let _ = self.skip_whitespace();

        let operator = match self.consume() {
            Some(']') => return Ok(SimpleSelector::Attribute(AttributeSelector::Exists(name))),
            Some('=') => '=',
            Some(op @ ('~' | '|' | '^' | '$' | '*')) if self.peek() == Some('=') => {
                let _ = self.consume();
                op
            }
            _ => return Err(self.error("malformed attribute selector")),
        };

        let _ = self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let _ = self.consume();
                self.consume_string(quote)?
            }
            _ => self.consume_ident("attribute value")?,
        };
        let _ = self.skip_whitespace();

        // [§ 6.3 Case-sensitivity](https://www.w3.org/TR/selectors-4/#attribute-case)
        if matches!(self.peek(), Some('i' | 'I' | 's' | 'S')) && self.peek_at(1) != Some(']') {
            return Err(self.error("malformed attribute selector"));
        }
        if matches!(self.peek(), Some('i' | 'I' | 's' | 'S')) {
            let _ = self.consume();
            let _ = self.skip_whitespace();
        }
        if self.consume() != Some(']') {
            return Err(self.error("attribute selector is not closed"));
        }

        Ok(SimpleSelector::Attribute(match operator {
            '=' => AttributeSelector::Equals(name, value),
            '~' => AttributeSelector::Includes(name, value),
            '|' => AttributeSelector::DashMatch(name, value),
            '^' => AttributeSelector::PrefixMatch(name, value),
            '$' => AttributeSelector::SuffixMatch(name, value),
            _ => AttributeSelector::SubstringMatch(name, value),
        }))
    }

    fn parse_pseudo(&mut self) -> Result<SimpleSelector, SelectorError> {
        let _ = self.consume(); // :
        let is_element = self.peek() == Some(':');
        if is_element {
            let _ = self.consume();
        }
        let name = self.consume_ident("pseudo-class name")?;
        let lower = name.to_ascii_lowercase();

        if is_element {
            return match PseudoElement::from_name(&lower) {
                Some(element) if self.peek() != Some('(') => Ok(SimpleSelector::PseudoElement(element)),
                _ if PseudoClass::from_name(&lower).is_some() => Err(self.error(&format!(
                    "pseudo-class ':{lower}' written with two colons"
                ))),
                _ => Err(self.error(&format!("unknown pseudo-element '::{name}'"))),
            };
        }

        if self.peek() != Some('(') {
            if let Some(pseudo_class) = PseudoClass::from_name(&lower) {
                return Ok(SimpleSelector::PseudoClass(pseudo_class));
            }
            if PseudoElement::from_name(&lower).is_some() {
                return Err(self.error(&format!(
                    "pseudo-element '::{lower}' written with a single colon"
                )));
            }
            return Err(self.error(&format!("unknown pseudo-class ':{name}'")));
        }

        let _ = self.consume(); // (
        let (argument, argument_offset) = self.consume_argument()?;
        let nth = || parse_nth(&argument).map_err(|message| self.error_at(argument_offset, &message));

        let pseudo_class = match lower.as_str() {
            "not" => PseudoClass::Not(Box::new(self.parse_negation(&argument, argument_offset)?)),
            "lang" => {
                let language = argument.trim();
                if language.is_empty()
                    || !language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                {
                    return Err(self.error_at(argument_offset, "malformed language range"));
                }
                PseudoClass::Lang(language.to_string())
            }
            "nth-child" => PseudoClass::NthChild(nth()?),
            "nth-last-child" => PseudoClass::NthLastChild(nth()?),
            "nth-of-type" => PseudoClass::NthOfType(nth()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(nth()?),
            _ => return Err(self.error(&format!("unknown pseudo-class ':{name}()'"))),
        };
        Ok(SimpleSelector::PseudoClass(pseudo_class))
    }

    /// "The negation pseudo-class ... taking a simple selector (excluding the
    /// negation pseudo-class itself) as an argument."
    fn parse_negation(&self, argument: &str, offset: usize) -> Result<SimpleSelector, SelectorError> {
        let leading = argument.chars().take_while(|c| is_whitespace(*c)).count();
        let mut inner = Self::new(argument.trim(), offset + leading);
        if inner.input.is_empty() {
            return Err(self.error_at(offset, "negation has no argument"));
        }
        let compound = inner.parse_compound()?;
        if let Some(c) = inner.peek() {
            return Err(match c {
                ' ' | '\t' | '\n' | '>' | '+' | '~' | ',' => {
                    inner.error("negation takes a single simple selector")
                }
                c => inner.unexpected(c),
            });
        }
        let mut simples = compound.simple_selectors.into_iter();
        match (simples.next(), simples.next()) {
            (Some(SimpleSelector::PseudoClass(PseudoClass::Not(_))), None) => {
                Err(self.error_at(offset, "negation cannot be nested"))
            }
            (Some(SimpleSelector::PseudoElement(_)), None) => {
                Err(self.error_at(offset, "negation cannot take a pseudo-element"))
            }
            (Some(simple), None) => Ok(simple),
            _ => Err(self.error_at(offset, "negation takes a single simple selector")),
        }
    }

    /// Consume a parenthesized argument up to its balancing `)`, respecting quotes.
    /// Returns the argument text and its absolute offset.
    fn consume_argument(&mut self) -> Result<(String, usize), SelectorError> {
        let start = self.position;
        let mut depth = 1u32;
        let mut quote: Option<char> = None;

        while let Some(c) = self.consume() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), '\\') => {
                    let _ = self.consume();
                }
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '(') => depth += 1,
                (None, ')') => {
                    depth -= 1;
                    if depth == 0 {
                        let argument: String = self.input[start..self.position - 1].iter().collect();
                        return Ok((argument, self.offset + start));
                    }
                }
                (None, _) => {}
            }
        }
        Err(self.error("argument is not closed"))
    }

    fn consume_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    if let Some(c) = self.consume() {
                        value.push(c);
                    }
                }
                Some('\n') | None => return Err(self.error("string is not closed")),
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident(&self) -> bool {
        match self.peek() {
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(is_ident_start_char)
                    || second == Some('-')
                    || (second == Some('\\') && self.peek_at(2).is_some_and(|c| c != '\n'))
            }
            Some('\\') => self.peek_at(1).is_some_and(|c| c != '\n'),
            Some(c) => is_ident_start_char(c),
            None => false,
        }
    }

    /// Consume an identifier, which must start like one.
    fn consume_ident(&mut self, what: &str) -> Result<String, SelectorError> {
        if !self.would_start_ident() {
            return Err(match self.peek() {
                Some(c) if is_forbidden(c) => self.unexpected(c),
                _ => self.error(&format!("expected {what}")),
            });
        }
        self.consume_name(what)
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_name(&mut self, what: &str) -> Result<String, SelectorError> {
        let mut result = String::new();
        loop {
            match self.peek() {
                Some(c) if is_ident_char(c) => {
                    result.push(c);
                    let _ = self.consume();
                }
                Some('\\') if self.peek_at(1).is_some_and(|c| c != '\n') => {
                    let _ = self.consume();
                    result.push(self.consume_escape());
                }
                _ => break,
            }
        }
        if result.is_empty() {
            return Err(self.error(&format!("expected {what}")));
        }
        Ok(result)
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    fn consume_escape(&mut self) -> char {
        let mut hex = String::new();
        while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            if let Some(c) = self.consume() {
                hex.push(c);
            }
        }
        if hex.is_empty() {
            return self.consume().unwrap_or('\u{FFFD}');
        }
        if self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|&cp| cp != 0)
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}')
    }

    /// Skip whitespace, reporting whether there was any.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.position;
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
        self.position > start
    }

    fn unexpected(&self, c: char) -> SelectorError {
        if is_forbidden(c) {
            self.error(&format!("invalid character U+{:04X}", u32::from(c)))
        } else {
            self.error(&format!("unexpected '{c}'"))
        }
    }

    fn error(&self, message: &str) -> SelectorError {
        self.error_at(self.offset + self.position, message)
    }

    #[allow(clippy::unused_self)]
    fn error_at(&self, position: usize, message: &str) -> SelectorError {
        SelectorError {
            message: message.to_string(),
            position,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// [§ 14.1 An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// STEP 1: `odd` and `even` are keywords for `2n+1` and `2n`.
/// STEP 2: With an `n`, the part before it is A (empty, `+` or `-` mean 1 or -1)
///         and the part after it, if any, must be a signed integer B.
/// STEP 3: Without an `n`, the whole argument is B. A bare `0` is rejected:
///         positions start at 1, so it can never match.
fn parse_nth(argument: &str) -> Result<Nth, String> {
    let compact: String = argument
        .chars()
        .filter(|c| !is_whitespace(*c))
        .collect::<String>()
        .to_ascii_lowercase();
    let malformed = || format!("position '{}' is not of the form An+B, even or odd", argument.trim());

    // STEP 1
    match compact.as_str() {
        "odd" => return Ok(Nth { a: 2, b: 1 }),
        "even" => return Ok(Nth { a: 2, b: 0 }),
        _ => {}
    }

    // STEP 2
    if let Some((a_part, b_part)) = compact.split_once('n') {
        let a = match a_part {
            "" | "+" => 1,
            "-" => -1,
            digits => parse_integer(digits).ok_or_else(malformed)?,
        };
        let b = if b_part.is_empty() {
            0
        } else if b_part.starts_with(['+', '-']) {
            parse_integer(b_part).ok_or_else(malformed)?
        } else {
            return Err(malformed());
        };
        return Ok(Nth { a, b });
    }

    // STEP 3
    let b = parse_integer(&compact).ok_or_else(malformed)?;
    if b == 0 {
        return Err("position 0 never matches (positions start at 1)".to_string());
    }
    Ok(Nth { a: 0, b })
}

/// A signed integer with only ASCII digits after the sign.
fn parse_integer(text: &str) -> Option<i32> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Zero-width and byte-order-mark characters are never part of an identifier.
const fn is_forbidden(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Check if a character can start an identifier.
/// [§ 4.2 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    (c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()) && !is_forbidden(c)
}

/// Check if a character can continue an identifier.
/// [§ 4.2 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}
