//! Integration tests for the tolerant stylesheet parser and compact serializer.

use triage_css::parser::{Rule, Stylesheet};

fn style_selectors(rule: &Rule) -> &[String] {
    match rule {
        Rule::Style(style) => &style.selectors,
        other => panic!("Expected style rule, got {other:?}"),
    }
}

#[test]
fn test_selector_list_split_and_collapsed() {
    let sheet = Stylesheet::parse("ul  >\n li , a:hover,\tp { color: red }");
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(style_selectors(&sheet.rules[0]), ["ul > li", "a:hover", "p"]);
    assert!(sheet.issues.is_empty());
}

#[test]
fn test_commas_inside_functions_do_not_split() {
    let sheet = Stylesheet::parse("a:not(.b), [title=\"x,y\"] {}");
    assert_eq!(style_selectors(&sheet.rules[0]), ["a:not(.b)", "[title=\"x,y\"]"]);
}

#[test]
fn test_empty_selector_is_dropped_with_issue() {
    let sheet = Stylesheet::parse("a,,b {}");
    assert_eq!(style_selectors(&sheet.rules[0]), ["a", "b"]);
    assert_eq!(sheet.issues.len(), 1);
    assert_eq!(sheet.issues[0].line, 1);
}

#[test]
fn test_rule_lines() {
    let sheet = Stylesheet::parse("/* banner\n */\na {}\n\n.b,\n.c {}\n");
    let lines: Vec<usize> = sheet.rules.iter().map(Rule::line).collect();
    assert_eq!(lines, vec![3, 5]);
}

#[test]
fn test_media_block_list() {
    let sheet = Stylesheet::parse("@media screen and (max-width: 600px) {\n  .nav { display: none }\n}");
    let Rule::BlockList(block) = &sheet.rules[0] else {
        panic!("Expected block list");
    };
    assert_eq!(block.name, "media");
    assert_eq!(block.prelude, "screen and (max-width: 600px)");
    assert_eq!(block.rules.len(), 1);
    assert_eq!(block.rules[0].line(), 2);
    assert_eq!(style_selectors(&block.rules[0]), [".nav"]);
}

#[test]
fn test_vendor_prefixed_keyframes() {
    let sheet = Stylesheet::parse(
        "@-webkit-keyframes spin { from { opacity: 0 } to { opacity: 1 } }",
    );
    let Rule::Keyframes(keyframes) = &sheet.rules[0] else {
        panic!("Expected keyframes");
    };
    assert_eq!(keyframes.keyword, "-webkit-keyframes");
    assert_eq!(keyframes.name, "spin");
    assert_eq!(keyframes.frames.len(), 2);
    assert_eq!(keyframes.frames[1].selectors, ["to"]);
}

#[test]
fn test_import_forms() {
    let sheet = Stylesheet::parse(
        "@import url(\"a.css\") screen;\n@import 'b.css';\n@import url(c.css);",
    );
    let imports: Vec<(String, String, usize)> = sheet
        .rules
        .iter()
        .map(|rule| match rule {
            Rule::Import(import) => (import.url.clone(), import.media.clone(), import.line),
            other => panic!("Expected import, got {other:?}"),
        })
        .collect();
    assert_eq!(
        imports,
        vec![
            ("a.css".to_string(), "screen".to_string(), 1),
            ("b.css".to_string(), String::new(), 2),
            ("c.css".to_string(), String::new(), 3),
        ]
    );
}

#[test]
fn test_charset_and_statement() {
    let sheet = Stylesheet::parse("@charset \"UTF-8\";\n@namespace svg url(http://www.w3.org/2000/svg);");
    assert!(matches!(&sheet.rules[0], Rule::Charset(c) if c.encoding == "UTF-8"));
    let Rule::Statement(statement) = &sheet.rules[1] else {
        panic!("Expected statement");
    };
    assert_eq!(statement.name, "namespace");
    assert_eq!(statement.line, 2);
}

#[test]
fn test_font_face_family_list() {
    let sheet = Stylesheet::parse(
        "@font-face {\n  font-family: \"Open Sans\", Arial, sans-serif;\n  src: url(open.woff);\n}",
    );
    let Rule::RuleSet(set) = &sheet.rules[0] else {
        panic!("Expected rule set");
    };
    assert_eq!(set.name, "font-face");
    let family = set
        .declarations
        .iter()
        .find(|d| d.name == "font-family")
        .unwrap();
    assert_eq!(family.line, 2);
    assert_eq!(family.list_items(), ["Open Sans", "Arial", "sans-serif"]);
}

#[test]
fn test_important_declaration() {
    let sheet = Stylesheet::parse("a { color: red ! important; margin: 0 auto }");
    let Rule::Style(style) = &sheet.rules[0] else {
        panic!("Expected style rule");
    };
    assert!(style.declarations[0].important);
    assert_eq!(style.declarations[0].value_string(), "red");
    assert!(!style.declarations[1].important);
    assert_eq!(style.declarations[1].value_string(), "0 auto");
}

#[test]
fn test_recovers_from_garbage() {
    let sheet = Stylesheet::parse("a { color red; width: 1px }\n}\nb { top: 0 }");
    assert_eq!(sheet.rules.len(), 2);
    assert!(!sheet.issues.is_empty());
    let Rule::Style(style) = &sheet.rules[0] else {
        panic!("Expected style rule");
    };
    assert_eq!(style.declarations.len(), 1);
    assert_eq!(style.declarations[0].name, "width");
}

#[test]
fn test_unclosed_block_at_eof() {
    let sheet = Stylesheet::parse("@media print { a { color: red }");
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.issues.len(), 1);
}

#[test]
fn test_compact_string() {
    let sheet = Stylesheet::parse(
        "/* c */\n@charset \"UTF-8\";\n@import url(\"a.css\") print;\n\na ,  b {\n  color : red ;\n  margin: 0 auto !important;\n}\n\n@media screen {\n  p { top: 0 }\n}\n",
    );
    assert_eq!(
        sheet.to_compact_string(),
        "@charset \"UTF-8\";@import url(\"a.css\") print;a,b{color:red;margin:0 auto!important}@media screen{p{top:0}}"
    );
}

#[test]
fn test_compact_string_of_empty_sheet() {
    assert_eq!(Stylesheet::parse("  /* nothing */ \n").to_compact_string(), "");
}
