//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! The parser is tolerant: it never fails. Anything it cannot make sense of is
//! recorded as a [`ParseIssue`] and parsing resumes at the next rule. Rules are
//! sorted into the handful of shapes the analyzer cares about, each tagged with
//! the line it starts on.

use core::fmt;
use core::ops::Range;

use serde::Serialize;

use crate::tokenizer::{CSSToken, CSSTokenizer, Token};

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, as written.
    pub name: String,
    /// The property value as component values, without `!important`.
    pub value: Vec<ComponentValue>,
    /// The property value as compact source text, without `!important`.
    pub text: String,
    /// Whether the declaration has `!important`.
    pub important: bool,
    /// Line the property name is on.
    pub line: usize,
}

impl Declaration {
    /// The value's compact source text.
    #[must_use]
    pub fn value_string(&self) -> &str {
        &self.text
    }

    /// Split a comma-separated value into its items.
    ///
    /// Items that are a lone string or `url()` are unwrapped to their contents;
    /// anything else is rendered as space-separated component values. This is
    /// the shape of `font-family` and `src` lists.
    #[must_use]
    pub fn list_items(&self) -> Vec<String> {
        self.value
            .split(|cv| matches!(cv, ComponentValue::Token(CSSToken::Comma)))
            .filter_map(|item| {
                let meaningful: Vec<&ComponentValue> = item
                    .iter()
                    .filter(|cv| !matches!(cv, ComponentValue::Token(CSSToken::Whitespace)))
                    .collect();
                match meaningful.as_slice() {
                    [] => None,
                    [single] => Some(single.string_or_url().unwrap_or_else(|| single.to_string())),
                    many => Some(
                        many.iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" "),
                    ),
                }
            })
            .collect()
    }
}

/// [§ 5.4.9 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
///
/// A component value in a declaration or prelude.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CSSToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments.
        value: Vec<ComponentValue>,
    },
    /// A simple block.
    Block {
        /// The opening token character.
        token: char,
        /// The block contents.
        value: Vec<ComponentValue>,
    },
}

impl ComponentValue {
    /// Unwrap a string token, a `<url-token>` or a `url("...")` function.
    #[must_use]
    pub fn string_or_url(&self) -> Option<String> {
        match self {
            Self::Token(CSSToken::String(s) | CSSToken::Url(s)) => Some(s.clone()),
            Self::Function { name, value } if name.eq_ignore_ascii_case("url") => {
                value.iter().find_map(|cv| match cv {
                    Self::Token(CSSToken::String(s)) => Some(s.clone()),
                    _ => None,
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => match token {
                CSSToken::Ident(v) => write!(f, "{v}"),
                CSSToken::AtKeyword(v) => write!(f, "@{v}"),
                CSSToken::Hash { value, .. } => write!(f, "#{value}"),
                CSSToken::String(v) => write!(f, "\"{v}\""),
                CSSToken::Url(v) => write!(f, "url({v})"),
                CSSToken::Delim(c) => write!(f, "{c}"),
                CSSToken::Number { value, .. } => write!(f, "{value}"),
                CSSToken::Percentage { value, .. } => write!(f, "{value}%"),
                CSSToken::Dimension { value, unit, .. } => write!(f, "{value}{unit}"),
                CSSToken::Whitespace => write!(f, " "),
                CSSToken::Colon => write!(f, ":"),
                CSSToken::Semicolon => write!(f, ";"),
                CSSToken::Comma => write!(f, ","),
                other => write!(f, "{other}"),
            },
            Self::Function { name, value } => {
                write!(f, "{name}(")?;
                for cv in value {
                    write!(f, "{cv}")?;
                }
                write!(f, ")")
            }
            Self::Block { token, value } => {
                let close = match token {
                    '[' => ']',
                    '(' => ')',
                    _ => '}',
                };
                write!(f, "{token}")?;
                for cv in value {
                    write!(f, "{cv}")?;
                }
                write!(f, "{close}")
            }
        }
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// A CSS style rule: a selector list and a declaration block.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// Line the selector list starts on.
    pub line: usize,
    /// The selectors, split on top-level commas, whitespace collapsed and trimmed.
    pub selectors: Vec<String>,
    /// The declarations in this rule block.
    pub declarations: Vec<Declaration>,
}

/// A conditional group at-rule whose block holds further rules
/// (`@media`, `@supports`, `@document`, `@container`, `@layer`).
#[derive(Debug, Clone, PartialEq)]
pub struct AtRuleBlockList {
    /// Line of the at-keyword.
    pub line: usize,
    /// The at-keyword name, lower-cased, without the `@`.
    pub name: String,
    /// The prelude as compact source text (e.g. the media query).
    pub prelude: String,
    /// The nested rules.
    pub rules: Vec<Rule>,
}

/// [CSS Animations § 3](https://www.w3.org/TR/css-animations-1/#keyframes)
///
/// An `@keyframes` rule, vendor-prefixed or not.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesRule {
    /// Line of the at-keyword.
    pub line: usize,
    /// The at-keyword as written, lower-cased (e.g. `-webkit-keyframes`).
    pub keyword: String,
    /// The animation name.
    pub name: String,
    /// The keyframe blocks (`from`, `50%`, ...).
    pub frames: Vec<StyleRule>,
}

/// `@charset "...";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetRule {
    /// Line of the at-keyword.
    pub line: usize,
    /// The declared encoding.
    pub encoding: String,
}

/// [CSS Cascade § 2.1](https://www.w3.org/TR/css-cascade-4/#at-import)
///
/// `@import url(...) media;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRule {
    /// Line of the at-keyword.
    pub line: usize,
    /// The imported URL, unwrapped from its string or `url()`.
    pub url: String,
    /// Any media query or layer/supports conditions after the URL.
    pub media: String,
}

/// Any other at-rule with a block, whose block holds declarations
/// (`@font-face`, `@page`, `@viewport`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct AtRuleSet {
    /// Line of the at-keyword.
    pub line: usize,
    /// The at-keyword name, lower-cased, without the `@`.
    pub name: String,
    /// The prelude as compact source text.
    pub prelude: String,
    /// The declarations in the block.
    pub declarations: Vec<Declaration>,
}

/// Any other at-rule without a block (`@namespace`, `@layer a, b;`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtStatement {
    /// Line of the at-keyword.
    pub line: usize,
    /// The at-keyword name, lower-cased, without the `@`.
    pub name: String,
    /// The prelude as compact source text.
    pub prelude: String,
}

/// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
///
/// A CSS rule, sorted by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// A style rule (qualified rule).
    Style(StyleRule),
    /// A conditional group at-rule holding nested rules.
    BlockList(AtRuleBlockList),
    /// A keyframes at-rule.
    Keyframes(KeyframesRule),
    /// `@charset`.
    Charset(CharsetRule),
    /// `@import`.
    Import(ImportRule),
    /// Any other at-rule with a declaration block.
    RuleSet(AtRuleSet),
    /// Any other at-rule without a block.
    Statement(AtStatement),
}

impl Rule {
    /// Line the rule starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Style(r) => r.line,
            Self::BlockList(r) => r.line,
            Self::Keyframes(r) => r.line,
            Self::Charset(r) => r.line,
            Self::Import(r) => r.line,
            Self::RuleSet(r) => r.line,
            Self::Statement(r) => r.line,
        }
    }
}

/// Something the parser had to skip or repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// What went wrong.
    pub message: String,
    /// Where it went wrong.
    pub line: usize,
}

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    /// The list of top-level rules.
    pub rules: Vec<Rule>,
    /// Problems recovered from while parsing.
    pub issues: Vec<ParseIssue>,
}

impl Stylesheet {
    /// Tokenize and parse a stylesheet.
    #[must_use]
    pub fn parse(css: &str) -> Self {
        let mut tokenizer = CSSTokenizer::new(css);
        tokenizer.run();
        let (tokens, source) = tokenizer.into_parts();
        CSSParser::new(tokens, source).parse_stylesheet()
    }
}

/// CSS parser
pub struct CSSParser {
    tokens: Vec<Token>,
    source: Vec<char>,
    position: usize,
    issues: Vec<ParseIssue>,
}

impl CSSParser {
    /// Create a new parser from tokens and the preprocessed input their spans index into.
    #[must_use]
    pub const fn new(tokens: Vec<Token>, source: Vec<char>) -> Self {
        Self {
            tokens,
            source,
            position: 0,
            issues: Vec::new(),
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    #[must_use]
    pub fn parse_stylesheet(mut self) -> Stylesheet {
        // "Consume a list of rules from input, with the top-level flag set."
        let rules = self.consume_list_of_rules(false);
        Stylesheet {
            rules,
            issues: self.issues,
        }
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// With `nested` set, the list ends at the `}` closing the enclosing block,
    /// which is consumed.
    fn consume_list_of_rules(&mut self, nested: bool) -> Vec<Rule> {
        let mut rules = Vec::new();

        loop {
            match self.peek() {
                Some(CSSToken::Whitespace) => {
                    let _ = self.consume();
                }

                None | Some(CSSToken::EOF) => {
                    if nested {
                        self.issue("block is not closed before the end of the stylesheet");
                    }
                    return rules;
                }

                Some(CSSToken::RightBrace) => {
                    let _ = self.consume();
                    if nested {
                        return rules;
                    }
                    self.issue("unmatched } at the top level");
                }

                // "<CDO-token>" or "<CDC-token>": "If the top-level flag is set, do nothing."
                Some(CSSToken::CDO | CSSToken::CDC) if !nested => {
                    let _ = self.consume();
                }

                Some(CSSToken::AtKeyword(_)) => {
                    if let Some(rule) = self.consume_at_rule(nested) {
                        rules.push(rule);
                    }
                }

                Some(_) => {
                    if let Some(rule) = self.consume_qualified_rule(nested) {
                        rules.push(Rule::Style(rule));
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    fn consume_at_rule(&mut self, nested: bool) -> Option<Rule> {
        let (name, line) = match self.consume_token() {
            Some(Token {
                kind: CSSToken::AtKeyword(name),
                span,
            }) => (name.to_ascii_lowercase(), span.line),
            _ => return None,
        };

        let prelude_start = self.position;
        let mut prelude = Vec::new();

        let has_block = loop {
            match self.peek() {
                // "<semicolon-token>": "Return the at-rule."
                Some(CSSToken::Semicolon) => break false,
                // "<EOF-token>": "This is a parse error. Return the at-rule."
                None | Some(CSSToken::EOF) => break false,
                Some(CSSToken::RightBrace) if nested => break false,
                // "<{-token>": "Consume a simple block and assign it to the at-rule's block."
                Some(CSSToken::LeftBrace) => break true,
                Some(_) => {
                    if let Some(value) = self.consume_component_value() {
                        prelude.push(value);
                    }
                }
            }
        };
        let prelude_range = prelude_start..self.position;
        let prelude_text = self.text_of(prelude_range);

        if !has_block {
            if self.peek() == Some(&CSSToken::Semicolon) {
                let _ = self.consume();
            }
            return Some(match name.as_str() {
                "charset" => Rule::Charset(CharsetRule {
                    line,
                    encoding: prelude.iter().find_map(ComponentValue::string_or_url).unwrap_or_default(),
                }),
                "import" => Rule::Import(import_rule(line, &prelude)),
                _ => Rule::Statement(AtStatement {
                    line,
                    name,
                    prelude: prelude_text,
                }),
            });
        }

        let _ = self.consume(); // {

        if is_block_list(&name) {
            let rules = self.consume_list_of_rules(true);
            return Some(Rule::BlockList(AtRuleBlockList {
                line,
                name,
                prelude: prelude_text,
                rules,
            }));
        }

        if name.ends_with("keyframes") {
            let frames = self
                .consume_list_of_rules(true)
                .into_iter()
                .filter_map(|rule| match rule {
                    Rule::Style(frame) => Some(frame),
                    _ => None,
                })
                .collect();
            return Some(Rule::Keyframes(KeyframesRule {
                line,
                keyword: name,
                name: prelude_text,
                frames,
            }));
        }

        let declarations = self.consume_list_of_declarations();
        if self.peek() == Some(&CSSToken::RightBrace) {
            let _ = self.consume();
        } else {
            self.issue(&format!("@{name} block is not closed"));
        }
        Some(Rule::RuleSet(AtRuleSet {
            line,
            name,
            prelude: prelude_text,
            declarations,
        }))
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self, nested: bool) -> Option<StyleRule> {
        let prelude_start = self.position;
        let line = self.tokens.get(prelude_start).map_or(0, Token::line);

        loop {
            match self.peek() {
                // "<EOF-token>": "This is a parse error. Return nothing."
                None | Some(CSSToken::EOF) => {
                    self.issue("rule has no declaration block");
                    return None;
                }

                Some(CSSToken::RightBrace) if nested => {
                    self.issue("rule has no declaration block");
                    return None;
                }

                // "<{-token>": "Consume a simple block and assign it to the qualified
                // rule's block. Return the qualified rule."
                Some(CSSToken::LeftBrace) => {
                    let selectors = self.split_selector_list(prelude_start..self.position, line);
                    let _ = self.consume(); // {
                    let declarations = self.consume_list_of_declarations();
                    if self.peek() == Some(&CSSToken::RightBrace) {
                        let _ = self.consume();
                    }
                    return Some(StyleRule {
                        line,
                        selectors,
                        declarations,
                    });
                }

                Some(_) => {
                    let _ = self.consume_component_value();
                }
            }
        }
    }

    /// [§ 5.4.10 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    fn consume_simple_block(&mut self) -> Vec<ComponentValue> {
        let ending_token = match self.consume() {
            Some(CSSToken::LeftBrace) => CSSToken::RightBrace,
            Some(CSSToken::LeftBracket) => CSSToken::RightBracket,
            Some(CSSToken::LeftParen) => CSSToken::RightParen,
            _ => return Vec::new(),
        };

        let mut value = Vec::new();
        loop {
            match self.peek() {
                Some(token) if *token == ending_token => {
                    let _ = self.consume();
                    return value;
                }
                None | Some(CSSToken::EOF) => return value,
                Some(_) => {
                    if let Some(v) = self.consume_component_value() {
                        value.push(v);
                    }
                }
            }
        }
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    fn consume_list_of_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            match self.peek() {
                Some(CSSToken::Whitespace | CSSToken::Semicolon) => {
                    let _ = self.consume();
                }

                None | Some(CSSToken::EOF | CSSToken::RightBrace) => return declarations,

                // Nested at-rules inside a declaration block are skipped.
                Some(CSSToken::AtKeyword(_)) => {
                    let _ = self.consume_at_rule(true);
                }

                Some(CSSToken::Ident(_)) => {
                    if let Some(decl) = self.consume_declaration() {
                        declarations.push(decl);
                    }
                }

                // "This is a parse error. ... As long as the next input token is anything
                // other than a <semicolon-token> or <EOF-token>, consume a component value
                // and throw away the returned value."
                Some(other) => {
                    let message = format!("unexpected {other} in declaration list");
                    self.issue(&message);
                    let _ = self.consume_component_value();
                    while !matches!(
                        self.peek(),
                        None | Some(CSSToken::Semicolon | CSSToken::RightBrace | CSSToken::EOF)
                    ) {
                        let _ = self.consume_component_value();
                    }
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn consume_declaration(&mut self) -> Option<Declaration> {
        let (name, line) = match self.consume_token() {
            Some(Token {
                kind: CSSToken::Ident(name),
                span,
            }) => (name, span.line),
            _ => return None,
        };

        self.skip_whitespace();

        // "If the next input token is anything other than a <colon-token>, this is a
        // parse error. Return nothing."
        if self.peek() != Some(&CSSToken::Colon) {
            self.issue(&format!("expected : after property {name}"));
            while !matches!(
                self.peek(),
                None | Some(CSSToken::Semicolon | CSSToken::RightBrace | CSSToken::EOF)
            ) {
                let _ = self.consume_component_value();
            }
            return None;
        }
        let _ = self.consume();
        self.skip_whitespace();

        let value_start = self.position;
        let mut value = Vec::new();
        while !matches!(
            self.peek(),
            None | Some(CSSToken::EOF | CSSToken::Semicolon | CSSToken::RightBrace)
        ) {
            if let Some(v) = self.consume_component_value() {
                value.push(v);
            }
        }

        let important = check_important(&value);
        let value = trim_important(value);
        let mut text = self.text_of(value_start..self.position);
        if important {
            if let Some(bang) = text.rfind('!') {
                text.truncate(bang);
            }
            text = text.trim_end().to_string();
        }

        Some(Declaration {
            name,
            value,
            text,
            important,
            line,
        })
    }

    /// [§ 5.4.9 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component_value(&mut self) -> Option<ComponentValue> {
        match self.peek()? {
            CSSToken::LeftBrace | CSSToken::LeftBracket | CSSToken::LeftParen => {
                let token = match self.peek() {
                    Some(CSSToken::LeftBrace) => '{',
                    Some(CSSToken::LeftBracket) => '[',
                    _ => '(',
                };
                let value = self.consume_simple_block();
                Some(ComponentValue::Block { token, value })
            }

            CSSToken::Function(_) => {
                let Some(CSSToken::Function(name)) = self.consume().cloned() else {
                    return None;
                };
                let mut value = Vec::new();
                loop {
                    match self.peek() {
                        Some(CSSToken::RightParen) => {
                            let _ = self.consume();
                            break;
                        }
                        None | Some(CSSToken::EOF) => break,
                        Some(_) => {
                            if let Some(v) = self.consume_component_value() {
                                value.push(v);
                            }
                        }
                    }
                }
                Some(ComponentValue::Function { name, value })
            }

            CSSToken::EOF => None,

            _ => self.consume().cloned().map(ComponentValue::Token),
        }
    }

    /// [Selectors § 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
    ///
    /// "A selector list is a comma-separated list of selectors." Commas nested in
    /// functions, brackets or parentheses do not split.
    fn split_selector_list(&mut self, range: Range<usize>, line: usize) -> Vec<String> {
        let mut selectors = Vec::new();
        let mut depth = 0usize;
        let mut start = range.start;

        for index in range.clone() {
            let kind = &self.tokens[index].kind;
            if kind.opens_block() {
                depth += 1;
            } else if kind.closes_block() {
                depth = depth.saturating_sub(1);
            } else if depth == 0 && *kind == CSSToken::Comma {
                selectors.push(self.text_of(start..index));
                start = index + 1;
            }
        }
        selectors.push(self.text_of(start..range.end));

        let before = selectors.len();
        selectors.retain(|s| !s.is_empty());
        if selectors.len() != before {
            log::debug!("line {line}: empty selector dropped from selector list");
            self.issues.push(ParseIssue {
                message: "empty selector in selector list".to_string(),
                line,
            });
        }
        selectors
    }

    /// Source text for a token range with comments dropped, whitespace runs
    /// collapsed to one space (none next to a comma) and the ends trimmed.
    fn text_of(&self, range: Range<usize>) -> String {
        let mut out = String::new();
        let mut pending_space = false;

        for token in &self.tokens[range] {
            match token.kind {
                CSSToken::Whitespace => pending_space = true,
                CSSToken::EOF => {}
                _ => {
                    if pending_space
                        && !out.is_empty()
                        && !out.ends_with(',')
                        && token.kind != CSSToken::Comma
                    {
                        out.push(' ');
                    }
                    pending_space = false;
                    out.extend(&self.source[token.span.start..token.span.end]);
                }
            }
        }
        out
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(&CSSToken::Whitespace) {
            let _ = self.consume();
        }
    }

    fn issue(&mut self, message: &str) {
        let line = self
            .tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or(0, Token::line);
        log::debug!("line {line}: {message}");
        self.issues.push(ParseIssue {
            message: message.to_string(),
            line,
        });
    }

    fn consume_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position)?.clone();
        self.position += 1;
        Some(token)
    }

    fn consume(&mut self) -> Option<&CSSToken> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(&token.kind)
    }

    fn peek(&self) -> Option<&CSSToken> {
        self.tokens.get(self.position).map(|t| &t.kind)
    }
}

/// Split an `@import` prelude into its URL and trailing conditions.
fn import_rule(line: usize, prelude: &[ComponentValue]) -> ImportRule {
    let mut values = prelude
        .iter()
        .filter(|cv| !matches!(cv, ComponentValue::Token(CSSToken::Whitespace)));
    let url = values
        .next()
        .and_then(ComponentValue::string_or_url)
        .unwrap_or_default();
    let media = values
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    if url.is_empty() {
        log::debug!("line {line}: @import without a URL");
    }
    ImportRule { line, url, media }
}

/// Conditional group rules whose blocks hold rules rather than declarations.
fn is_block_list(name: &str) -> bool {
    matches!(
        name,
        "media" | "supports" | "document" | "-moz-document" | "container" | "layer"
    )
}

/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation, i.e.
/// if the last two (non-whitespace, non-comment) tokens in its value are
/// a <delim-token> with the value "!" followed by an <ident-token> with
/// a value that is an ASCII case-insensitive match for "important"."
fn check_important(value: &[ComponentValue]) -> bool {
    let mut meaningful = value
        .iter()
        .rev()
        .filter(|cv| !matches!(cv, ComponentValue::Token(CSSToken::Whitespace)));

    matches!(
        meaningful.next(),
        Some(ComponentValue::Token(CSSToken::Ident(s))) if s.eq_ignore_ascii_case("important")
    ) && matches!(
        meaningful.next(),
        Some(ComponentValue::Token(CSSToken::Delim('!')))
    )
}

/// Remove trailing whitespace and `!important` from a declaration value.
///
/// STEP 1: Remove trailing whitespace.
/// STEP 2: Remove "important" and the "!" before it, with any whitespace between.
/// STEP 3: Remove any remaining trailing whitespace.
fn trim_important(mut value: Vec<ComponentValue>) -> Vec<ComponentValue> {
    fn pop_whitespace(value: &mut Vec<ComponentValue>) {
        while matches!(
            value.last(),
            Some(ComponentValue::Token(CSSToken::Whitespace))
        ) {
            let _ = value.pop();
        }
    }

    // STEP 1
    pop_whitespace(&mut value);

    // STEP 2
    if check_important(&value) {
        let _ = value.pop();
        pop_whitespace(&mut value);
        let _ = value.pop();
    }

    // STEP 3
    pop_whitespace(&mut value);
    value
}
