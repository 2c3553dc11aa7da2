//! Source tree enumeration.
//!
//! The picker walks a directory (or takes a single file), assigns each file a
//! MIME type by extension and hands the files out in a stable order: by
//! directory, then by file name, both in case-insensitive natural order.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::error::PickerError;

/// MIME type of files whose extension is not in the table.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// A file picked for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// The directory holding the file.
    pub path: PathBuf,
    /// The file name.
    pub filename: String,
    /// The MIME type guessed from the extension.
    pub mime_type: String,
    /// Where the file sits relative to the scanned root, e.g. `/css/site.css`.
    pub scan_path: String,
}

impl FileDescriptor {
    /// The file's full path.
    #[must_use]
    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.filename)
    }
}

/// What a scan found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStatus {
    /// Directories visited, the root included.
    pub directories: usize,
    /// Files found.
    pub files: usize,
}

/// Enumerates the files of a source tree.
#[derive(Debug)]
pub struct Picker {
    picks: VecDeque<FileDescriptor>,
    status: ScanStatus,
    mime_types: HashMap<String, String>,
}

impl Picker {
    /// Create a picker with the bundled MIME type table.
    ///
    /// # Errors
    ///
    /// Only if the bundled table is malformed.
    pub fn new() -> Result<Self, PickerError> {
        let mime_types: HashMap<String, String> =
            serde_json::from_str(include_str!("../data/mime_types_by_extension.json"))?;
        Ok(Self {
            picks: VecDeque::new(),
            status: ScanStatus::default(),
            mime_types: mime_types
                .into_iter()
                .map(|(extension, mime)| (extension.to_ascii_lowercase(), mime))
                .collect(),
        })
    }

    /// Scan `source`, a directory or a single file, replacing any earlier picks.
    ///
    /// Hidden files and directories below the root are skipped. Symlinks are
    /// not followed.
    ///
    /// # Errors
    ///
    /// If `source` does not exist or a directory cannot be read.
    pub fn scan_source(&mut self, source: &Path) -> Result<ScanStatus, PickerError> {
        if !source.exists() {
            return Err(PickerError::NotFound(source.to_path_buf()));
        }
        self.picks.clear();
        self.status = ScanStatus::default();

        if source.is_dir() {
            self.scan_directory(source)?;
        } else {
            let filename = source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let path = source
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            self.pick(path, filename, source.display().to_string());
        }

        self.picks.make_contiguous().sort_by(|a, b| {
            natural_cmp(&a.path.to_string_lossy(), &b.path.to_string_lossy())
                .then_with(|| natural_cmp(&a.filename, &b.filename))
        });
        log::debug!(
            "scanned {}: {} directories, {} files",
            source.display(),
            self.status.directories,
            self.status.files
        );
        Ok(self.status)
    }

    fn scan_directory(&mut self, root: &Path) -> Result<(), PickerError> {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|source| PickerError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_dir() {
                self.status.directories += 1;
                continue;
            }
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let scan_path = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .fold(String::new(), |mut scan_path, part| {
                    scan_path.push('/');
                    scan_path.push_str(&part);
                    scan_path
                });
            let path = entry
                .path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            let filename = entry.file_name().to_string_lossy().into_owned();
            self.pick(path, filename, scan_path);
        }
        Ok(())
    }

    fn pick(&mut self, path: PathBuf, filename: String, scan_path: String) {
        self.status.files += 1;
        let mime_type = self.mime_type_of(&filename).to_string();
        self.picks.push_back(FileDescriptor {
            path,
            filename,
            mime_type,
            scan_path,
        });
    }

    /// The MIME type for `filename`, by the text after its last `.`.
    #[must_use]
    pub fn mime_type_of(&self, filename: &str) -> &str {
        filename
            .rsplit_once('.')
            .and_then(|(_, extension)| self.mime_types.get(&extension.to_ascii_lowercase()))
            .map_or(DEFAULT_MIME_TYPE, String::as_str)
    }

    /// The counts from the last scan.
    #[must_use]
    pub const fn status(&self) -> ScanStatus {
        self.status
    }

    /// Number of picks not yet taken.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }

    /// Take the next pick.
    pub fn next_pick(&mut self) -> Option<FileDescriptor> {
        self.picks.pop_front()
    }
}

impl Iterator for Picker {
    type Item = FileDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_pick()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Case-insensitive natural order: runs of digits compare by value, so
/// `file2` sorts before `file10`.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ordering = compare_digit_runs(&digit_run(&mut left), &digit_run(&mut right));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                let ordering = l.to_lowercase().cmp(r.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                let _ = left.next();
                let _ = right.next();
            }
        }
    }
}

fn digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}
