//! Integration tests for source tree enumeration.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use triage_analyzer::error::PickerError;
use triage_analyzer::picker::{Picker, ScanStatus, natural_cmp};

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "a {}\n").unwrap();
}

#[test]
fn test_natural_cmp() {
    assert_eq!(natural_cmp("file2.css", "file10.css"), Ordering::Less);
    assert_eq!(natural_cmp("File10.css", "file9.css"), Ordering::Greater);
    assert_eq!(natural_cmp("ABC", "abc"), Ordering::Equal);
    assert_eq!(natural_cmp("a", "ab"), Ordering::Less);
    assert_eq!(natural_cmp("x007", "x7"), Ordering::Equal);
    assert_eq!(natural_cmp("Zebra", "apple"), Ordering::Greater);
}

#[test]
fn test_scan_directory_in_natural_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "index.html");
    touch(root, "css/file10.css");
    touch(root, "css/File2.css");
    touch(root, "css/vendor/reset.css");
    touch(root, "js/app.js");

    let mut picker = Picker::new().unwrap();
    let status = picker.scan_source(root).unwrap();
    assert_eq!(
        status,
        ScanStatus {
            directories: 4,
            files: 5,
        }
    );

    let scan_paths: Vec<String> = picker.by_ref().map(|pick| pick.scan_path).collect();
    assert_eq!(
        scan_paths,
        [
            "/index.html",
            "/css/File2.css",
            "/css/file10.css",
            "/css/vendor/reset.css",
            "/js/app.js",
        ]
    );
    assert!(picker.next_pick().is_none());
}

#[test]
fn test_descriptors() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "css/site.CSS");

    let mut picker = Picker::new().unwrap();
    let _ = picker.scan_source(dir.path()).unwrap();
    let pick = picker.next_pick().unwrap();
    assert_eq!(pick.path, dir.path().join("css"));
    assert_eq!(pick.filename, "site.CSS");
    assert_eq!(pick.mime_type, "text/css");
    assert_eq!(pick.scan_path, "/css/site.CSS");
    assert_eq!(pick.full_path(), dir.path().join("css/site.CSS"));
}

#[test]
fn test_hidden_entries_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), ".git/config");
    touch(dir.path(), ".hidden.css");
    touch(dir.path(), "shown.css");

    let mut picker = Picker::new().unwrap();
    let status = picker.scan_source(dir.path()).unwrap();
    assert_eq!(status.files, 1);
    assert_eq!(status.directories, 1);
    assert_eq!(picker.next_pick().unwrap().filename, "shown.css");
}

#[test]
fn test_single_file() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "only.css");
    let source = dir.path().join("only.css");

    let mut picker = Picker::new().unwrap();
    let status = picker.scan_source(&source).unwrap();
    assert_eq!(
        status,
        ScanStatus {
            directories: 0,
            files: 1,
        }
    );
    let pick = picker.next_pick().unwrap();
    assert_eq!(pick.path, dir.path());
    assert_eq!(pick.filename, "only.css");
    assert_eq!(pick.scan_path, source.display().to_string());
}

#[test]
fn test_mime_types() {
    let picker = Picker::new().unwrap();
    assert_eq!(picker.mime_type_of("site.css"), "text/css");
    assert_eq!(picker.mime_type_of("INDEX.HTML"), "text/html");
    assert_eq!(picker.mime_type_of("app.min.js"), "application/javascript");
    assert_eq!(picker.mime_type_of("Makefile"), "text/plain");
    assert_eq!(picker.mime_type_of("notes.unknown"), "text/plain");
}

#[test]
fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let mut picker = Picker::new().unwrap();
    let error = picker.scan_source(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(error, PickerError::NotFound(_)));
    assert!(error.to_string().starts_with("no such file or directory"));
}
