//! Progress line for interactive runs.

use std::env;
use std::io::{self, Write};

use triage_analyzer::Monitor;

const BEGINNING: &str = " Analyzing: ";

/// Fewer columns than this left for the file name and it is not shown.
const MIN_FILE_COLUMNS: usize = 26;

/// Rewrites one status line on stderr as files are analyzed.
pub struct Progress<W: Write> {
    out: W,
    width: usize,
    total: usize,
    complete: usize,
}

impl Progress<io::Stderr> {
    /// A progress line on stderr, as wide as `COLUMNS` says (80 by default).
    pub fn new() -> Self {
        let width = env::var("COLUMNS")
            .ok()
            .and_then(|columns| columns.parse().ok())
            .unwrap_or(80);
        Self::with_writer(io::stderr(), width)
    }
}

impl Default for Progress<io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Progress<W> {
    /// A progress line `width` columns wide, written to `out`.
    pub const fn with_writer(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            total: 0,
            complete: 0,
        }
    }

    /// The writer, back.
    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&self, file: &str) -> String {
        let digits = self.total.to_string().len();
        let ending = format!(" {:>digits$} / {}", self.complete, self.total);
        let available = self
            .width
            .saturating_sub(BEGINNING.len() + ending.len());

        if available < MIN_FILE_COLUMNS {
            return format!("{BEGINNING} ... {ending}");
        }
        let file = truncate_left(file, available);
        let padding = available - file.chars().count();
        format!("{BEGINNING}{file}{}{ending}", " ".repeat(padding))
    }
}

impl<W: Write> Monitor for Progress<W> {
    fn set_total(&mut self, total: usize) {
        self.total = total;
        self.complete = 0;
    }

    fn mark(&mut self, scan_path: &str) {
        self.complete += 1;
        let line = self.line(scan_path);
        let end = if self.complete >= self.total { "\n" } else { "\r" };
        // Write errors are ignored.
        let _ = write!(self.out, "{line}{end}");
        let _ = self.out.flush();
    }
}

/// `file`, or `...` and as much of its end as fits in `width` columns.
fn truncate_left(file: &str, width: usize) -> String {
    let length = file.chars().count();
    if length <= width {
        return file.to_string();
    }
    let keep = width.saturating_sub(3);
    let tail: String = file.chars().skip(length - keep).collect();
    format!("...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(width: usize, total: usize, files: &[&str]) -> String {
        let mut progress = Progress::with_writer(Vec::new(), width);
        progress.set_total(total);
        for file in files {
            progress.mark(file);
        }
        String::from_utf8(progress.into_inner()).unwrap()
    }

    #[test]
    fn test_line_fits_the_terminal() {
        let output = render(80, 2, &["/css/site.css"]);
        assert!(output.starts_with(" Analyzing: /css/site.css "));
        assert!(output.ends_with(" 1 / 2\r"));
        assert_eq!(output.chars().count(), 81);
    }

    #[test]
    fn test_last_file_ends_the_line() {
        let output = render(80, 2, &["/a.css", "/b.css"]);
        let (first, second) = output.split_once('\r').unwrap();
        assert!(first.ends_with(" 1 / 2"));
        assert!(second.ends_with(" 2 / 2\n"));
    }

    #[test]
    fn test_long_paths_are_truncated_on_the_left() {
        let output = render(50, 9, &["/a/very/long/directory/name/for/the/site.css"]);
        assert_eq!(output, " Analyzing: ...rectory/name/for/the/site.css 1 / 9\r");
        assert_eq!(output.chars().count(), 51);
    }

    #[test]
    fn test_narrow_terminal_hides_the_file() {
        assert_eq!(render(40, 2, &["/site.css"]), " Analyzing:  ...  1 / 2\r");
    }

    #[test]
    fn test_counter_is_padded_to_the_total() {
        let output = render(80, 10, &["/a.css"]);
        assert!(output.ends_with("  1 / 10\r"));
    }
}
