//! Integration tests for the selector cleaner's repair rules.

use triage_analyzer::cleaner::{Cleaned, clean};
use triage_analyzer::findings::{RepairKind, Replacement, Severity};

/// The only recorded replacement, with its kind.
fn single(cleaned: &Cleaned) -> (RepairKind, &Replacement) {
    assert_eq!(cleaned.replacements.len(), 1, "{cleaned:?}");
    let (category, replacements) = cleaned.replacements.iter().next().unwrap();
    assert_eq!(replacements.len(), 1, "{cleaned:?}");
    (category.kind, &replacements[0])
}

#[test]
fn test_single_colon_pseudo_element() {
    let cleaned = clean("a:after");
    assert_eq!(cleaned.selector, "a::after");
    assert_eq!(cleaned.count, 1);
    let (kind, replacement) = single(&cleaned);
    assert_eq!(kind, RepairKind::PseudoElementConfusion);
    assert_eq!(kind.severity(), Severity::Warning);
    assert_eq!(
        *replacement,
        Replacement {
            before: "a:after".to_string(),
            matched: ":after".to_string(),
            after: "::after".to_string(),
        }
    );
}

#[test]
fn test_double_colon_pseudo_class() {
    let cleaned = clean("a::hover");
    assert_eq!(cleaned.selector, "a:hover");
    let (kind, replacement) = single(&cleaned);
    assert_eq!(kind, RepairKind::PseudoClassConfusion);
    assert_eq!(replacement.matched, "::hover");
    assert_eq!(replacement.after, ":hover");
}

#[test]
fn test_pseudo_names_match_whole_identifiers() {
    // `:first` is an unsupported pseudo-class but must not eat `:first-child`
    assert_eq!(clean("li:first-child").count, 0);
    assert_eq!(clean("p:first-letter").selector, "p::first-letter");
    assert_eq!(clean("a:beforehand").count, 0);
}

#[test]
fn test_zero_position_becomes_zero_n() {
    let cleaned = clean("li:nth-child(0)");
    assert_eq!(cleaned.selector, "li:nth-child(0n)");
    let (kind, replacement) = single(&cleaned);
    assert_eq!(kind, RepairKind::Ordinality);
    assert_eq!(kind.severity(), Severity::Notice);
    assert_eq!(replacement.matched, ":nth-child(0)");
    assert_eq!(replacement.after, ":nth-child(0n)");

    assert_eq!(clean("td:nth-of-type( 0 )").selector, "td:nth-of-type(0n)");
    assert_eq!(clean("li:nth-child(0n+1)").count, 0);
}

#[test]
fn test_zero_width_characters_are_removed() {
    let cleaned = clean("a\u{200B}.b\u{200D}");
    assert_eq!(cleaned.selector, "a.b");
    assert_eq!(cleaned.count, 2);
    let category = RepairKind::BadCharacters.category();
    assert_eq!(cleaned.replacements[&category].len(), 2);
    assert_eq!(cleaned.replacements[&category][0].matched, "\u{200B}");
    assert_eq!(cleaned.replacements[&category][0].after, "");
}

#[test]
fn test_quoted_negation_is_unquoted() {
    let cleaned = clean(":not('.foo')");
    assert_eq!(cleaned.selector, ":not(.foo)");
    let (kind, replacement) = single(&cleaned);
    assert_eq!(kind, RepairKind::QuoteAllTheThings);
    assert_eq!(replacement.matched, ":not('.foo')");

    assert_eq!(clean("a:not(\"b\")").selector, "a:not(b)");
}

#[test]
fn test_selector_as_position() {
    let cleaned = clean("li:nth-child(.odd)");
    assert_eq!(cleaned.selector, "li:nth-child(0n)");
    let (kind, replacement) = single(&cleaned);
    assert_eq!(kind, RepairKind::BadPseudoClassPosition);
    assert_eq!(replacement.matched, ":nth-child(.odd)");

    assert_eq!(clean("tr:nth-last-of-type(#x)").selector, "tr:nth-last-of-type(0n)");
}

#[test]
fn test_vendor_pseudos_are_removed() {
    let cleaned = clean("input::-webkit-input-placeholder");
    assert_eq!(cleaned.selector, "input");
    let (kind, replacement) = single(&cleaned);
    assert_eq!(kind, RepairKind::UnrecognizedVendorExtension);
    assert_eq!(replacement.matched, "::-webkit-input-placeholder");

    assert_eq!(clean("a:-moz-any(b, c) span").selector, "a span");
    assert_eq!(clean("button:-MS-hover").selector, "button");
}

#[test]
fn test_empty_negation_is_removed() {
    let cleaned = clean("a:not()");
    assert_eq!(cleaned.selector, "a");
    let (kind, _) = single(&cleaned);
    assert_eq!(kind, RepairKind::EmptyNot);

    assert_eq!(clean("a:not(.b)").count, 0);
}

#[test]
fn test_experimental_pseudos_are_removed() {
    let cleaned = clean("input::placeholder");
    assert_eq!(cleaned.selector, "input");
    assert_eq!(single(&cleaned).0, RepairKind::ExperimentalPseudoElement);

    let cleaned = clean("a:any-link");
    assert_eq!(cleaned.selector, "a");
    assert_eq!(single(&cleaned).0, RepairKind::ExperimentalPseudoClass);

    let cleaned = clean(":host(.dark) p");
    assert_eq!(cleaned.selector, "p");
    assert_eq!(single(&cleaned).0, RepairKind::ExperimentalPseudoClass);
}

#[test]
fn test_unsupported_pseudos_are_removed_silently() {
    let cleaned = clean("p::selection");
    assert_eq!(cleaned.selector, "p");
    assert_eq!(cleaned.count, 1);
    assert!(cleaned.replacements.is_empty());

    let cleaned = clean("input:required:invalid");
    assert_eq!(cleaned.selector, "input");
    assert_eq!(cleaned.count, 2);
    assert!(cleaned.replacements.is_empty());
}

#[test]
fn test_rules_apply_in_order_with_original_before() {
    let cleaned = clean("a::hover:after");
    assert_eq!(cleaned.selector, "a:hover::after");
    assert_eq!(cleaned.count, 2);

    let kinds: Vec<RepairKind> = cleaned.replacements.keys().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        [RepairKind::PseudoElementConfusion, RepairKind::PseudoClassConfusion]
    );
    for replacements in cleaned.replacements.values() {
        assert_eq!(replacements[0].before, "a::hover:after");
    }
}

#[test]
fn test_clean_selector_is_untouched() {
    for selector in [
        "ul > li.active a:hover",
        "p::first-line",
        "input[type=\"text\"]:focus",
        "li:nth-child(2n+1)",
        "a:not(.external)",
        "h1 + p ~ span",
    ] {
        let cleaned = clean(selector);
        assert_eq!(cleaned.count, 0, "{selector}");
        assert!(cleaned.replacements.is_empty(), "{selector}");
        assert_eq!(cleaned.selector, selector);
    }
}

#[test]
fn test_category_display() {
    assert_eq!(RepairKind::Ordinality.category().to_string(), "notices/ordinality");
    assert_eq!(
        RepairKind::QuoteAllTheThings.category().to_string(),
        "warnings/quote-all-the-things"
    );
}

#[test]
fn test_repair_kinds_by_severity() {
    let notices: Vec<RepairKind> = RepairKind::with_severity(Severity::Notice).collect();
    assert_eq!(
        notices,
        [
            RepairKind::UnrecognizedVendorExtension,
            RepairKind::ExperimentalPseudoClass,
            RepairKind::ExperimentalPseudoElement,
            RepairKind::Ordinality,
        ]
    );
    assert_eq!(RepairKind::with_severity(Severity::Warning).count(), 6);
    assert_eq!(RepairKind::with_severity(Severity::Error).count(), 0);
}
