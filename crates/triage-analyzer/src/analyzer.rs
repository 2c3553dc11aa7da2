//! The run driver: pick the files, analyze the stylesheets, collect the results.

use std::path::Path;

use crate::analysis::Analysis;
use crate::css::{self, CSS_MIME_TYPE};
use crate::error::PickerError;
use crate::monitor::Monitor;
use crate::picker::Picker;
use crate::vocabulary::Vocabulary;

/// Analyzes source trees against one set of vocabulary tables.
#[derive(Debug, Clone)]
pub struct Analyzer {
    vocabulary: Vocabulary,
}

impl Analyzer {
    /// Create an analyzer using `vocabulary`.
    #[must_use]
    pub const fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary tables in use.
    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Analyze every file under `source`, a directory or a single file.
    ///
    /// A stylesheet that cannot be analyzed is recorded as failed; the run
    /// goes on with the next file.
    ///
    /// # Errors
    ///
    /// If `source` cannot be scanned.
    pub fn analyze(&self, source: &Path, monitor: &mut dyn Monitor) -> Result<Analysis, PickerError> {
        let mut picker = Picker::new()?;
        let status = picker.scan_source(source)?;

        let mut analysis = Analysis::new();
        analysis.set_picker_status(status);
        monitor.set_total(picker.remaining());

        for descriptor in picker {
            if descriptor.mime_type == CSS_MIME_TYPE {
                match css::analyze_file(&descriptor, &self.vocabulary) {
                    Ok(file) => analysis.add_css_file(file),
                    Err(error) => {
                        log::warn!("{error}");
                        analysis.add_failed_file(&descriptor, error.to_string());
                    }
                }
            } else {
                analysis.add_unsupported_file(&descriptor);
            }
            monitor.mark(&descriptor.scan_path);
        }
        Ok(analysis)
    }
}
