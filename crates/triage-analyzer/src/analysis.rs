//! The results of a whole run, keyed by MIME type and scan path.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::css::{CSS_MIME_TYPE, FileAnalysis};
use crate::findings::Severity;
use crate::picker::{FileDescriptor, ScanStatus};

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FileReport {
    /// A stylesheet that was analyzed.
    Css(Box<FileAnalysis>),
    /// A stylesheet whose analysis failed.
    Failed {
        /// The file name.
        filename: String,
        /// Why it failed.
        message: String,
    },
    /// A file of a type that is not analyzed.
    Unsupported {
        /// The file name.
        filename: String,
    },
}

/// Totals over every analyzed stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CssTotals {
    /// Notice replacements.
    pub notices: usize,
    /// Warning replacements.
    pub warnings: usize,
    /// Unrecoverable selectors.
    pub errors: usize,
    /// Non-POSH element uses.
    pub posh: usize,
    /// Classic microformats class uses.
    pub microformats: usize,
    /// Microformats2 class uses, without prefix-format hits.
    pub microformats2: usize,
}

/// Aggregated results of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    status: ScanStatus,
    details: BTreeMap<String, BTreeMap<String, FileReport>>,
}

impl Analysis {
    /// An empty analysis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the picker's counts.
    pub const fn set_picker_status(&mut self, status: ScanStatus) {
        self.status = status;
    }

    /// Add an analyzed stylesheet.
    pub fn add_css_file(&mut self, file: FileAnalysis) {
        let mime_type = file.mime_type.clone();
        let scan_path = file.scan_path.clone();
        self.insert(mime_type, scan_path, FileReport::Css(Box::new(file)));
    }

    /// Add a file whose analysis failed.
    pub fn add_failed_file(&mut self, descriptor: &FileDescriptor, message: String) {
        self.insert(
            descriptor.mime_type.clone(),
            descriptor.scan_path.clone(),
            FileReport::Failed {
                filename: descriptor.filename.clone(),
                message,
            },
        );
    }

    /// Add a file that is not analyzed.
    pub fn add_unsupported_file(&mut self, descriptor: &FileDescriptor) {
        self.insert(
            descriptor.mime_type.clone(),
            descriptor.scan_path.clone(),
            FileReport::Unsupported {
                filename: descriptor.filename.clone(),
            },
        );
    }

    fn insert(&mut self, mime_type: String, scan_path: String, report: FileReport) {
        let _ = self
            .details
            .entry(mime_type)
            .or_default()
            .insert(scan_path, report);
    }

    /// Directories visited.
    #[must_use]
    pub const fn directory_scan_count(&self) -> usize {
        self.status.directories
    }

    /// Files found.
    #[must_use]
    pub const fn file_scan_count(&self) -> usize {
        self.status.files
    }

    /// Reports by MIME type, then scan path.
    #[must_use]
    pub const fn details(&self) -> &BTreeMap<String, BTreeMap<String, FileReport>> {
        &self.details
    }

    /// The analyzed stylesheets, in scan-path order.
    pub fn css_files(&self) -> impl Iterator<Item = &FileAnalysis> {
        self.details
            .get(CSS_MIME_TYPE)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter_map(|report| match report {
                FileReport::Css(file) => Some(file.as_ref()),
                FileReport::Failed { .. } | FileReport::Unsupported { .. } => None,
            })
    }

    /// Failed files as `(scan path, message)`, in MIME type then scan-path order.
    pub fn failed_files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.details.values().flat_map(|files| {
            files.iter().filter_map(|(scan_path, report)| match report {
                FileReport::Failed { message, .. } => Some((scan_path.as_str(), message.as_str())),
                FileReport::Css(_) | FileReport::Unsupported { .. } => None,
            })
        })
    }

    /// Totals over every analyzed stylesheet.
    #[must_use]
    pub fn css_totals(&self) -> CssTotals {
        self.css_files().fold(CssTotals::default(), |mut totals, file| {
            totals.notices += file.syntax.count(Severity::Notice);
            totals.warnings += file.syntax.count(Severity::Warning);
            totals.errors += file.syntax.count(Severity::Error);
            totals.posh += file.semantics.posh_count();
            totals.microformats += file.semantics.microformats_count();
            totals.microformats2 += file.semantics.microformats2_count();
            totals
        })
    }
}
