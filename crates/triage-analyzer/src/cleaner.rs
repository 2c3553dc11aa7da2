//! Textual repair of selectors the selector grammar rejects.
//!
//! Each rule recognizes one kind of malformed but intentional syntax and
//! rewrites it. Rules run in a fixed order, each over the whole output of the
//! one before. Within a rule, matches never overlap and apply left to right.
//!
//! A pseudo name only matches as a whole identifier, so `:first` never matches
//! inside `:first-child`. Names written with a trailing `()` below only match
//! with a balanced parenthesized argument, and bare names never match when an
//! argument follows.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::findings::{Category, RepairKind, Replacement};

/// Pseudo-elements commonly written with one colon.
const SINGLE_COLON_PSEUDO_ELEMENTS: &[&str] = &[
    "after",
    "before",
    "placeholder",
    "selection",
    "first-letter",
    "first-line",
    "backdrop",
    "cue()",
    "cue",
    "grammar-error",
    "marker",
    "slotted()",
    "slotted",
    "spelling-error",
];

/// Pseudo-classes sometimes written with two colons.
const DOUBLE_COLON_PSEUDO_CLASSES: &[&str] = &[
    "visited",
    "hover",
    "link",
    "focus",
    "active",
    "empty",
    "checked",
    "disabled",
    "first-child",
    "first-of-type",
    "last-child",
    "last-of-type",
    "not()",
    "nth-child()",
    "required",
    "nth-last-child()",
    "nth-last-of-type()",
    "nth-of-type()",
    "only-child",
    "only-of-type",
    "valid",
    "invalid",
    "indeterminate",
    "any",
    "any-link",
    "default",
    "defined",
    "dir()",
    "enabled",
    "first",
    "fullscreen",
    "host",
    "host()",
    "host-context()",
    "in-range",
    "lang()",
    "left",
    "optional",
    "out-of-range",
    "read-only",
    "read-write",
    "right",
    "root",
    "scope",
    "target",
];

const ZERO_POSITION_PSEUDO_CLASSES: &[&str] = &["nth-child()", "nth-of-type()", "nth-last-child()"];

const POSITIONAL_PSEUDO_CLASSES: &[&str] = &[
    "nth-child",
    "nth-last-child",
    "nth-of-type",
    "nth-last-of-type",
];

const VENDOR_PREFIXES: &[&str] = &[":-ms-", ":-webkit-", ":-moz-", ":-o-"];

const EXPERIMENTAL_PSEUDO_ELEMENTS: &[&str] = &[
    "placeholder",
    "backdrop",
    "marker",
    "spelling-error",
    "grammar-error",
];

const UNSUPPORTED_PSEUDO_ELEMENTS: &[&str] = &["selection", "cue()", "cue", "slotted()", "slotted"];

const EXPERIMENTAL_PSEUDO_CLASSES: &[&str] = &[
    "any-link",
    "dir()",
    "fullscreen",
    "host()",
    "host-context()",
];

const UNSUPPORTED_PSEUDO_CLASSES: &[&str] = &[
    "required",
    "valid",
    "default",
    "defined",
    "first",
    "host",
    "in-range",
    "indeterminate",
    "invalid",
    "left",
    "optional",
    "out-of-range",
    "read-only",
    "read-write",
    "right",
    "scope",
];

/// One substitution found by a rule.
struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// A repair rule: what it is filed as (nothing for silent rules) and how it finds edits.
struct Rule {
    kind: Option<RepairKind>,
    find: fn(&str) -> Vec<Edit>,
}

const RULES: [Rule; 12] = [
    Rule {
        kind: Some(RepairKind::PseudoElementConfusion),
        find: single_colon_pseudo_elements,
    },
    Rule {
        kind: Some(RepairKind::PseudoClassConfusion),
        find: double_colon_pseudo_classes,
    },
    Rule {
        kind: Some(RepairKind::Ordinality),
        find: zero_positions,
    },
    Rule {
        kind: Some(RepairKind::BadCharacters),
        find: zero_width_characters,
    },
    Rule {
        kind: Some(RepairKind::QuoteAllTheThings),
        find: quoted_negations,
    },
    Rule {
        kind: Some(RepairKind::BadPseudoClassPosition),
        find: selector_positions,
    },
    Rule {
        kind: Some(RepairKind::UnrecognizedVendorExtension),
        find: vendor_pseudos,
    },
    Rule {
        kind: Some(RepairKind::EmptyNot),
        find: empty_negations,
    },
    Rule {
        kind: Some(RepairKind::ExperimentalPseudoElement),
        find: experimental_pseudo_elements,
    },
    Rule {
        kind: None,
        find: unsupported_pseudo_elements,
    },
    Rule {
        kind: Some(RepairKind::ExperimentalPseudoClass),
        find: experimental_pseudo_classes,
    },
    Rule {
        kind: None,
        find: unsupported_pseudo_classes,
    },
];

/// The outcome of one cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cleaned {
    /// The repaired selector, trimmed.
    pub selector: String,
    /// Number of substitutions made, silent ones included.
    pub count: usize,
    /// The recorded substitutions, by category.
    pub replacements: BTreeMap<Category, Vec<Replacement>>,
}

/// Apply every rule once, in order.
///
/// Cleaning is a single pass; calling it again on the result may find more to
/// repair.
#[must_use]
pub fn clean(selector: &str) -> Cleaned {
    let mut text = selector.to_string();
    let mut count = 0;
    let mut replacements: BTreeMap<Category, Vec<Replacement>> = BTreeMap::new();

    for rule in &RULES {
        let edits = (rule.find)(&text);
        if edits.is_empty() {
            continue;
        }
        count += edits.len();

        if let Some(kind) = rule.kind {
            let recorded = replacements.entry(kind.category()).or_default();
            for edit in &edits {
                recorded.push(Replacement {
                    before: selector.to_string(),
                    matched: text[edit.range.clone()].to_string(),
                    after: edit.replacement.clone(),
                });
            }
        }
        text = apply(&text, &edits);
    }

    Cleaned {
        selector: text.trim().to_string(),
        count,
        replacements,
    }
}

fn apply(text: &str, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for edit in edits {
        out.push_str(&text[copied..edit.range.start]);
        out.push_str(&edit.replacement);
        copied = edit.range.end;
    }
    out.push_str(&text[copied..]);
    out
}

/// Rule 1: `:after` becomes `::after`.
fn single_colon_pseudo_elements(text: &str) -> Vec<Edit> {
    pseudo_edits(text, Colons::Single, SINGLE_COLON_PSEUDO_ELEMENTS, |matched| {
        Some(format!(":{matched}"))
    })
}

/// Rule 2: `::hover` becomes `:hover`.
fn double_colon_pseudo_classes(text: &str) -> Vec<Edit> {
    pseudo_edits(text, Colons::Double, DOUBLE_COLON_PSEUDO_CLASSES, |matched| {
        Some(matched[1..].to_string())
    })
}

/// Rule 3: `:nth-child(0)` becomes `:nth-child(0n)`.
fn zero_positions(text: &str) -> Vec<Edit> {
    pseudo_edits(text, Colons::Single, ZERO_POSITION_PSEUDO_CLASSES, |matched| {
        let (name, argument) = split_argument(matched)?;
        (argument.trim() == "0").then(|| format!("{name}(0n)"))
    })
}

/// Rule 4: zero-width space, non-joiner and joiner are deleted, one edit each.
fn zero_width_characters(text: &str) -> Vec<Edit> {
    text.char_indices()
        .filter(|(_, c)| matches!(c, '\u{200B}'..='\u{200D}'))
        .map(|(i, c)| Edit {
            range: i..i + c.len_utf8(),
            replacement: String::new(),
        })
        .collect()
}

/// Rule 5: `:not('.foo')` becomes `:not(.foo)`, up to the last quote-paren.
fn quoted_negations(text: &str) -> Vec<Edit> {
    let Some((start, quote_at)) = colon_positions(text).find_map(|i| {
        let rest = &text[i + 1..];
        let quote_at = i + 1 + "not(".len();
        (starts_with_ignore_case(rest, "not(")
            && matches!(text.as_bytes().get(quote_at), Some(b'\'' | b'"')))
        .then_some((i, quote_at))
    }) else {
        return Vec::new();
    };

    let quote = char::from(text.as_bytes()[quote_at]);
    let closing = format!("{quote})");
    let inner_start = quote_at + 1;
    match text[inner_start..].rfind(&closing) {
        Some(0) | None => Vec::new(),
        Some(len) => {
            let name = &text[start..quote_at - 1];
            let inner = &text[inner_start..inner_start + len];
            vec![Edit {
                range: start..inner_start + len + closing.len(),
                replacement: format!("{name}({inner})"),
            }]
        }
    }
}

/// Rule 6: `:nth-child(.foo)` or `:nth-child(#bar)` becomes `:nth-child(0n)`,
/// up to the last closing parenthesis.
fn selector_positions(text: &str) -> Vec<Edit> {
    for i in colon_positions(text) {
        let rest = &text[i + 1..];
        let Some(name) = POSITIONAL_PSEUDO_CLASSES
            .iter()
            .find(|name| starts_with_ignore_case(rest, &format!("{name}(")))
        else {
            continue;
        };
        let argument_start = i + 1 + name.len() + 1;
        if !matches!(text.as_bytes().get(argument_start), Some(b'.' | b'#')) {
            continue;
        }
        if let Some(close) = text.rfind(')').filter(|&close| close > argument_start) {
            let written = &text[i + 1..i + 1 + name.len()];
            return vec![Edit {
                range: i..close + 1,
                replacement: format!(":{written}(0n)"),
            }];
        }
    }
    Vec::new()
}

/// Rule 7: vendor-prefixed pseudos are deleted with any argument.
fn vendor_pseudos(text: &str) -> Vec<Edit> {
    let mut edits = Vec::new();
    let mut resume = 0;
    for i in colon_positions(text) {
        if i < resume {
            continue;
        }
        let prefix_at = if text[i + 1..].starts_with(':') { i + 1 } else { i };
        let Some(prefix) = VENDOR_PREFIXES
            .iter()
            .find(|prefix| starts_with_ignore_case(&text[prefix_at..], prefix))
        else {
            continue;
        };
        let mut end = prefix_at + prefix.len();
        end += text[end..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-')
            .count();
        if let Some(close) = balanced_end(text, end) {
            end = close;
        }
        edits.push(Edit {
            range: i..end,
            replacement: String::new(),
        });
        resume = end;
    }
    edits
}

/// Rule 8: `:not()` is deleted.
fn empty_negations(text: &str) -> Vec<Edit> {
    pseudo_edits(text, Colons::Single, &["not()"], |matched| {
        let (_, argument) = split_argument(matched)?;
        argument.trim().is_empty().then(String::new)
    })
}

/// Rule 9.
fn experimental_pseudo_elements(text: &str) -> Vec<Edit> {
    pseudo_edits(text, Colons::Double, EXPERIMENTAL_PSEUDO_ELEMENTS, |_| Some(String::new()))
}

/// Rule 10.
fn unsupported_pseudo_elements(text: &str) -> Vec<Edit> {
    pseudo_edits(text, Colons::Double, UNSUPPORTED_PSEUDO_ELEMENTS, |_| Some(String::new()))
}

/// Rule 11.
fn experimental_pseudo_classes(text: &str) -> Vec<Edit> {
    pseudo_edits(text, Colons::Single, EXPERIMENTAL_PSEUDO_CLASSES, |_| Some(String::new()))
}

/// Rule 12.
fn unsupported_pseudo_classes(text: &str) -> Vec<Edit> {
    pseudo_edits(text, Colons::Single, UNSUPPORTED_PSEUDO_CLASSES, |_| Some(String::new()))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Colons {
    /// `:name`, where the colon is not part of a `::`.
    Single,
    /// `::name`.
    Double,
}

/// Find every `names` pseudo written with `colons`, and let `replace` decide
/// the replacement for the matched text (colons included), or skip it.
fn pseudo_edits(
    text: &str,
    colons: Colons,
    names: &[&str],
    replace: impl Fn(&str) -> Option<String>,
) -> Vec<Edit> {
    let bytes = text.as_bytes();
    let mut edits = Vec::new();
    let mut resume = 0;

    for i in colon_positions(text) {
        if i < resume {
            continue;
        }
        let name_start = match colons {
            Colons::Double if bytes.get(i + 1) == Some(&b':') => i + 2,
            Colons::Single
                if bytes.get(i + 1) != Some(&b':') && (i == 0 || bytes[i - 1] != b':') =>
            {
                i + 1
            }
            _ => continue,
        };
        let Some(len) = pseudo_at(&text[name_start..], names) else {
            continue;
        };
        let end = name_start + len;
        if let Some(replacement) = replace(&text[i..end]) {
            edits.push(Edit {
                range: i..end,
                replacement,
            });
            resume = end;
        }
    }
    edits
}

/// Length of the pseudo name (and argument) at the start of `rest`, if it is one of `names`.
fn pseudo_at(rest: &str, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| match name.strip_suffix("()") {
        Some(functional) => {
            if !starts_with_ignore_case(rest, functional) {
                return None;
            }
            balanced_end(rest, functional.len())
        }
        None => {
            if !starts_with_ignore_case(rest, name) {
                return None;
            }
            match rest.as_bytes().get(name.len()) {
                Some(b) if is_ident_byte(*b) || *b == b'(' => None,
                _ => Some(name.len()),
            }
        }
    })
}

/// If `text[open]` is `(`, the index just past its matching `)`.
fn balanced_end(text: &str, open: usize) -> Option<usize> {
    if text.as_bytes().get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    for (offset, b) in text.as_bytes()[open..].iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split `:name(argument)` into `:name` and `argument`.
fn split_argument(matched: &str) -> Option<(&str, &str)> {
    let open = matched.find('(')?;
    let inner = matched.get(open + 1..matched.len() - 1)?;
    Some((&matched[..open], inner))
}

fn colon_positions(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.bytes()
        .enumerate()
        .filter(|(_, b)| *b == b':')
        .map(|(i, _)| i)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_end() {
        assert_eq!(balanced_end("(a(b)c)d", 0), Some(7));
        assert_eq!(balanced_end("x(", 1), None);
        assert_eq!(balanced_end("abc", 0), None);
    }

    #[test]
    fn test_pseudo_at_whole_identifier() {
        assert_eq!(pseudo_at("first-child", &["first"]), None);
        assert_eq!(pseudo_at("first", &["first"]), Some(5));
        assert_eq!(pseudo_at("first.x", &["first"]), Some(5));
        assert_eq!(pseudo_at("host(x)", &["host"]), None);
        assert_eq!(pseudo_at("host(x) a", &["host()"]), Some(7));
    }

    #[test]
    fn test_split_argument() {
        assert_eq!(split_argument(":nth-child( 0 )"), Some((":nth-child", " 0 ")));
    }
}
