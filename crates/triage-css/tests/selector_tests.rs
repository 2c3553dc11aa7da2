//! Integration tests for the strict selector grammar.

use triage_css::selector::{
    AttributeSelector, Combinator, Nth, PseudoClass, PseudoElement, SimpleSelector,
    parse_selector_list,
};

fn simples(input: &str) -> Vec<SimpleSelector> {
    let list = parse_selector_list(input).unwrap();
    assert_eq!(list.selectors.len(), 1);
    list.selectors[0].compounds.last().unwrap().simple_selectors.clone()
}

fn rejects(input: &str) -> String {
    match parse_selector_list(input) {
        Ok(list) => panic!("{input:?} should be rejected, parsed as {list:?}"),
        Err(error) => error.message,
    }
}

#[test]
fn test_parse_compound() {
    assert_eq!(
        simples("div.card#main[hidden]"),
        vec![
            SimpleSelector::Type("div".to_string()),
            SimpleSelector::Class("card".to_string()),
            SimpleSelector::Id("main".to_string()),
            SimpleSelector::Attribute(AttributeSelector::Exists("hidden".to_string())),
        ]
    );
}

#[test]
fn test_parse_combinators_left_to_right() {
    let list = parse_selector_list("ul > li + li ~ p a || td").unwrap();
    let complex = &list.selectors[0];
    assert_eq!(complex.compounds.len(), 6);
    assert_eq!(
        complex.combinators,
        vec![
            Combinator::Child,
            Combinator::NextSibling,
            Combinator::SubsequentSibling,
            Combinator::Descendant,
            Combinator::Column,
        ]
    );
    assert_eq!(
        complex.compounds.last().unwrap().simple_selectors,
        vec![SimpleSelector::Type("td".to_string())]
    );
}

#[test]
fn test_parse_selector_list() {
    let list = parse_selector_list("h1, .h-card ,#x").unwrap();
    assert_eq!(list.selectors.len(), 3);
}

#[test]
fn test_attribute_operators() {
    let cases = [
        ("[lang|=en]", AttributeSelector::DashMatch("lang".into(), "en".into())),
        ("[href^='http']", AttributeSelector::PrefixMatch("href".into(), "http".into())),
        ("[src$=\".png\"]", AttributeSelector::SuffixMatch("src".into(), ".png".into())),
        ("[title*=foo]", AttributeSelector::SubstringMatch("title".into(), "foo".into())),
        ("[class~=vcard]", AttributeSelector::Includes("class".into(), "vcard".into())),
        ("[ type = text ]", AttributeSelector::Equals("type".into(), "text".into())),
    ];
    for (input, expected) in cases {
        assert_eq!(simples(input), vec![SimpleSelector::Attribute(expected)], "{input}");
    }
}

#[test]
fn test_pseudo_classes_are_case_insensitive() {
    assert_eq!(
        simples("a:HOVER"),
        vec![
            SimpleSelector::Type("a".to_string()),
            SimpleSelector::PseudoClass(PseudoClass::Hover),
        ]
    );
}

#[test]
fn test_pseudo_elements_need_two_colons() {
    assert_eq!(
        simples("p::first-line")[1],
        SimpleSelector::PseudoElement(PseudoElement::FirstLine)
    );
    assert!(rejects("a:after").contains("single colon"));
    assert!(rejects("a::hover").contains("two colons"));
}

#[test]
fn test_vendor_pseudos_are_unknown() {
    assert!(rejects("input::-webkit-input-placeholder").contains("unknown pseudo-element"));
    assert!(rejects("a:-moz-focusring").contains("unknown pseudo-class"));
}

#[test]
fn test_nth_positions() {
    let cases = [
        ("li:nth-child(odd)", Nth { a: 2, b: 1 }),
        ("li:nth-child(even)", Nth { a: 2, b: 0 }),
        ("li:nth-child(2n + 1)", Nth { a: 2, b: 1 }),
        ("li:nth-child(-n+3)", Nth { a: -1, b: 3 }),
        ("li:nth-child(n)", Nth { a: 1, b: 0 }),
        ("li:nth-child(0n)", Nth { a: 0, b: 0 }),
        ("li:nth-child(4)", Nth { a: 0, b: 4 }),
    ];
    for (input, expected) in cases {
        assert_eq!(
            simples(input)[1],
            SimpleSelector::PseudoClass(PseudoClass::NthChild(expected)),
            "{input}"
        );
    }
}

#[test]
fn test_nth_display() {
    assert_eq!(Nth { a: 2, b: 1 }.to_string(), "2n+1");
    assert_eq!(Nth { a: -1, b: 3 }.to_string(), "-1n+3");
    assert_eq!(Nth { a: 3, b: -2 }.to_string(), "3n-2");
    assert_eq!(Nth { a: 0, b: 5 }.to_string(), "5");
}

#[test]
fn test_nth_rejects_zero_and_garbage() {
    assert!(rejects("li:nth-of-type(0)").contains("never matches"));
    assert!(rejects("li:nth-child(first)").contains("An+B"));
    assert!(rejects("li:nth-child(2n+)").contains("An+B"));
}

#[test]
fn test_negation() {
    assert_eq!(
        simples(":not(.hidden)"),
        vec![SimpleSelector::PseudoClass(PseudoClass::Not(Box::new(
            SimpleSelector::Class("hidden".to_string())
        )))]
    );
    assert!(rejects("a:not()").contains("no argument"));
    assert!(rejects("a:not(  )").contains("no argument"));
    assert!(rejects("a:not(:not(b))").contains("nested"));
    assert!(rejects("a:not(p.x)").contains("single simple selector"));
    assert!(rejects("a:not(b c)").contains("single simple selector"));
    assert!(rejects("a:not('.x')").contains("expected a selector"));
}

#[test]
fn test_lang() {
    assert_eq!(
        simples("p:lang(en-US)")[1],
        SimpleSelector::PseudoClass(PseudoClass::Lang("en-US".to_string()))
    );
}

#[test]
fn test_zero_width_characters() {
    let message = rejects(".menu\u{200B}");
    assert!(message.contains("U+200B"), "{message}");
    assert!(rejects("\u{FEFF}a").contains("U+FEFF"));
}

#[test]
fn test_escapes() {
    assert_eq!(simples(".\\31 0")[0], SimpleSelector::Class("10".to_string()));
    assert_eq!(simples(".a\\:b")[0], SimpleSelector::Class("a:b".to_string()));
}

#[test]
fn test_nesting_selector_is_parsed() {
    let list = parse_selector_list("& > .child").unwrap();
    assert_eq!(
        list.selectors[0].compounds[0].simple_selectors,
        vec![SimpleSelector::Nesting]
    );
}

#[test]
fn test_structural_errors() {
    assert!(rejects("a >").contains("combinator"));
    assert!(rejects("> a").contains("expected a selector"));
    assert!(rejects("a,").contains("expected a selector"));
    assert!(rejects(".a*").contains("universal"));
    assert!(rejects("[a]b").contains("type selector"));
    assert!(rejects("[a=b").contains("not closed"));
    assert!(rejects("a:nth-child(2").contains("not closed"));
}

#[test]
fn test_error_position() {
    let error = parse_selector_list("a, b:bogus").unwrap_err();
    assert_eq!(error.position, 10);
    assert_eq!(error.to_string(), "unknown pseudo-class ':bogus' at position 10");
}
