//! Progress reporting hooks for the analyzer driver.

/// Told how many files a run has and when each one is done.
pub trait Monitor {
    /// The number of files the run will go through.
    fn set_total(&mut self, total: usize);

    /// `scan_path` has been handled.
    fn mark(&mut self, scan_path: &str);
}

/// A monitor that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Monitor for Silent {
    fn set_total(&mut self, _total: usize) {}

    fn mark(&mut self, _scan_path: &str) {}
}
