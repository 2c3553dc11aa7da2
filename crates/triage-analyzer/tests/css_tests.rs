//! Integration tests for file-level stylesheet analysis.

use std::fs;
use std::path::PathBuf;

use triage_analyzer::css::{ROOT_SECTION, Stats, analyze_file, analyze_source};
use triage_analyzer::error::AnalysisError;
use triage_analyzer::findings::RepairKind;
use triage_analyzer::picker::FileDescriptor;
use triage_analyzer::vocabulary::Vocabulary;

fn descriptor(path: PathBuf, filename: &str) -> FileDescriptor {
    FileDescriptor {
        path,
        filename: filename.to_string(),
        mime_type: "text/css".to_string(),
        scan_path: format!("/{filename}"),
    }
}

const SITE_CSS: &str = "@charset \"UTF-8\";
@import url(\"print.css\") print;
a:after { color: red }
@media screen and (max-width: 600px) {
  .nav, div.h-card { display: none }
}
@font-face { font-family: \"Open Sans\"; src: url(a.woff) }
@page { margin: 1cm }
@counter-style thumbs { system: cyclic }
@namespace svg url(http://www.w3.org/2000/svg);
@keyframes spin { from { top: 0 } }
";

#[test]
fn test_stats() {
    let stats = Stats::measure(200, 150);
    assert_eq!(stats.whitespace, 50);
    assert_eq!(stats.whitespace_percent, "25.00");

    assert_eq!(Stats::measure(3, 1).whitespace_percent, "66.67");
    assert_eq!(Stats::measure(0, 0).whitespace_percent, "0.00");

    // A compact form longer than the source saturates at zero
    let stats = Stats::measure(1, 5);
    assert_eq!(stats.whitespace, 0);
    assert_eq!(stats.whitespace_percent, "0.00");
}

#[test]
fn test_empty_file() {
    let vocabulary = Vocabulary::bundled().unwrap();
    let file = analyze_source(&descriptor(PathBuf::new(), "empty.css"), b"", &vocabulary).unwrap();
    assert_eq!(file.stats.size, 0);
    assert_eq!(file.stats.whitespace_percent, "0.00");
    assert_eq!(file.selector_count(), 0);
    assert!(file.syntax.is_empty());
}

#[test]
fn test_rule_tree_walk() {
    let vocabulary = Vocabulary::bundled().unwrap();
    let file = analyze_source(
        &descriptor(PathBuf::new(), "site.css"),
        SITE_CSS.as_bytes(),
        &vocabulary,
    )
    .unwrap();

    assert_eq!(file.mime_type, "text/css");
    assert_eq!(file.scan_path, "/site.css");
    assert_eq!(file.selectors_by_line[ROOT_SECTION][&3], ["a:after"]);
    assert_eq!(
        file.selectors_by_line["screen and (max-width: 600px)"][&5],
        [".nav", "div.h-card"]
    );
    assert_eq!(file.selector_count(), 3);

    assert_eq!(file.imports_by_line[&2], "print.css");
    assert_eq!(file.fonts_by_line[&7], ["Open Sans"]);
    assert_eq!(file.unsupported_at_rules[&9], ["@counter-style"]);
    assert_eq!(file.unsupported_at_rules[&10], ["@namespace"]);
    assert_eq!(file.unsupported_at_rules.len(), 2);

    assert_eq!(file.syntax.warnings[&RepairKind::PseudoElementConfusion][&3].len(), 1);
    assert_eq!(file.semantics.microformats2.well_known["h-card"], [5]);

    assert_eq!(file.stats.size, SITE_CSS.len());
    assert!(file.stats.minified_size < file.stats.size);
}

#[test]
fn test_font_face_keeps_every_family() {
    let vocabulary = Vocabulary::bundled().unwrap();
    let css = "p {}\n@font-face { font-family: \"Open Sans\", Arial; src: url(a.woff) }\n";
    let file = analyze_source(&descriptor(PathBuf::new(), "fonts.css"), css.as_bytes(), &vocabulary)
        .unwrap();
    assert_eq!(file.fonts_by_line.len(), 1);
    assert_eq!(file.fonts_by_line[&2], ["Open Sans", "Arial"]);
}

#[test]
fn test_nested_block_lists_use_their_own_section() {
    let vocabulary = Vocabulary::bundled().unwrap();
    let css = "@supports (display: grid) {\n  @media print {\n    p { color: black }\n  }\n}\n@layer {\n  em {}\n}\n";
    let file = analyze_source(&descriptor(PathBuf::new(), "nested.css"), css.as_bytes(), &vocabulary)
        .unwrap();
    assert_eq!(file.selectors_by_line["print"][&3], ["p"]);
    assert_eq!(file.selectors_by_line["@layer"][&7], ["em"]);
    assert!(!file.selectors_by_line.contains_key(ROOT_SECTION));
}

#[test]
fn test_import_inside_block_list_is_fatal() {
    let vocabulary = Vocabulary::bundled().unwrap();
    let css = "a {}\n@media print {\n  @import 'x.css';\n}\n";
    let error = analyze_source(&descriptor(PathBuf::new(), "bad.css"), css.as_bytes(), &vocabulary)
        .unwrap_err();
    assert!(matches!(
        &error,
        AnalysisError::UnmodeledBlockListItem { scan_path, line: 2, construct }
            if scan_path == "/bad.css" && construct == "@import"
    ));
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let vocabulary = Vocabulary::bundled().unwrap();
    let file = analyze_source(
        &descriptor(PathBuf::new(), "latin1.css"),
        b"/* caf\xe9 */\np { }\n",
        &vocabulary,
    )
    .unwrap();
    assert_eq!(file.selectors_by_line[ROOT_SECTION][&2], ["p"]);
    assert_eq!(file.stats.size, 17);
}

#[test]
fn test_analyze_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("site.css"), SITE_CSS).unwrap();

    let vocabulary = Vocabulary::bundled().unwrap();
    let file = analyze_file(&descriptor(dir.path().to_path_buf(), "site.css"), &vocabulary).unwrap();
    assert_eq!(file.selector_count(), 3);
    assert_eq!(file.stats.size, SITE_CSS.len());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let vocabulary = Vocabulary::bundled().unwrap();
    let error = analyze_file(&descriptor(dir.path().to_path_buf(), "gone.css"), &vocabulary).unwrap_err();
    assert!(matches!(error, AnalysisError::Io { scan_path, .. } if scan_path == "/gone.css"));
}

#[test]
fn test_results_serialize() {
    let vocabulary = Vocabulary::bundled().unwrap();
    let file = analyze_source(
        &descriptor(PathBuf::new(), "site.css"),
        SITE_CSS.as_bytes(),
        &vocabulary,
    )
    .unwrap();
    let json = serde_json::to_value(&file).unwrap();
    assert_eq!(json["selectors_by_line"]["root"]["3"][0], "a:after");
    assert_eq!(
        json["syntax"]["warnings"]["pseudo-element-confusion"]["3"][0]["match"],
        ":after"
    );
    assert_eq!(json["semantics"]["microformats2"]["well-known"]["h-card"][0], 5);
}
