//! Human-readable rendering of an [`Analysis`].

use std::collections::BTreeMap;
use std::io::{self, Write};

use owo_colors::{OwoColorize, Style};
use triage_analyzer::css::CSS_MIME_TYPE;
use triage_analyzer::{
    Analysis, CssTotals, FileAnalysis, FileReport, Microformats2, PrefixHit, RepairKind, Semantics,
    SelectorFailure, Severity, Syntax,
};

/// Inner width of the summary box.
const SUMMARY_WIDTH: usize = 27;

#[derive(Clone, Copy)]
struct Palette {
    heading: Style,
    notice: Style,
    warning: Style,
    error: Style,
    semantics: Style,
}

impl Palette {
    fn new(color: bool) -> Self {
        if !color {
            let plain = Style::new();
            return Self {
                heading: plain,
                notice: plain,
                warning: plain,
                error: plain,
                semantics: plain,
            };
        }
        Self {
            heading: Style::new().bold().cyan(),
            notice: Style::new().blue(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            semantics: Style::new().magenta(),
        }
    }

    const fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Notice => self.notice,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }
}

/// Writes the text report.
pub struct Reporter {
    show_all_files: bool,
    palette: Palette,
}

impl Reporter {
    /// A reporter that shows only stylesheets unless `show_all_files`, in color if `color`.
    pub fn new(show_all_files: bool, color: bool) -> Self {
        Self {
            show_all_files,
            palette: Palette::new(color),
        }
    }

    /// Write the report for `analysis` to `out`.
    pub fn report(&self, analysis: &Analysis, out: &mut impl Write) -> io::Result<()> {
        let directories = analysis.directory_scan_count();
        writeln!(out, "{directories} director{}", pluralize(directories, "y", "ies"))?;
        let files = analysis.file_scan_count();
        writeln!(out, "{files} file{}", pluralize(files, "", "s"))?;

        for (mime_type, files_of_type) in analysis.details() {
            if !self.show_all_files && mime_type != CSS_MIME_TYPE {
                continue;
            }
            writeln!(out)?;
            writeln!(out, "{}", format!("===== {mime_type} =====").style(self.palette.heading))?;

            if mime_type == CSS_MIME_TYPE {
                for report in files_of_type.values() {
                    if let FileReport::Css(file) = report {
                        self.css_file(file, out)?;
                    }
                }
            } else {
                for scan_path in files_of_type.keys() {
                    writeln!(out, " {scan_path}")?;
                }
            }
        }

        self.failed_files(analysis, out)?;
        self.summary(&analysis.css_totals(), out)
    }

    fn css_file(&self, file: &FileAnalysis, out: &mut impl Write) -> io::Result<()> {
        let rule = format!("+{}+", "-".repeat(file.scan_path.chars().count() + 4));
        writeln!(out, "{rule}")?;
        writeln!(out, "|  {}  |", file.scan_path.style(self.palette.heading))?;
        writeln!(out, "{rule}")?;

        writeln!(out, " - Selectors: {}", file.selector_count())?;
        writeln!(out, " - Syntax:")?;
        self.replacements(&file.syntax, Severity::Notice, out)?;
        self.replacements(&file.syntax, Severity::Warning, out)?;
        self.errors(&file.syntax, out)?;
        writeln!(out, " - Semantics:")?;
        self.semantics(&file.semantics, out)?;
        writeln!(out)
    }

    fn replacements(&self, syntax: &Syntax, severity: Severity, out: &mut impl Write) -> io::Result<()> {
        let count = syntax.count(severity);
        let label = match severity {
            Severity::Notice => "Notices",
            Severity::Warning => "Warnings",
            Severity::Error => "Errors",
        };
        count_line(label, count, self.palette.severity(severity), out)?;
        if count == 0 {
            return Ok(());
        }
        let Some(by_kind) = syntax.replacements(severity) else {
            return Ok(());
        };
        for kind in RepairKind::with_severity(severity) {
            let Some(by_line) = by_kind.get(&kind) else {
                continue;
            };
            describe(kind, out)?;
            for (line, replacements) in by_line {
                let befores = replacements.iter().map(|replacement| replacement.before.as_str());
                line_entries(*line, befores, out)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn errors(&self, syntax: &Syntax, out: &mut impl Write) -> io::Result<()> {
        let count = syntax.count(Severity::Error);
        count_line("Errors", count, self.palette.error, out)?;
        if count == 0 {
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "      Errors that can't be cleaned of unrecognized tokens are ignored.")?;
        writeln!(out)?;
        for (line, failures) in &syntax.errors {
            let prefix = format!("      - @ line {line}: ");
            for (index, SelectorFailure { before, after, exception }) in failures.iter().enumerate() {
                if index == 0 {
                    write!(out, "{prefix}")?;
                } else {
                    write!(out, "{}", " ".repeat(prefix.len()))?;
                }
                writeln!(out, "{before}\t(cleanup)=> {after}")?;
                writeln!(out, "{}", exception.style(self.palette.error))?;
            }
        }
        writeln!(out)
    }

    fn semantics(&self, semantics: &Semantics, out: &mut impl Write) -> io::Result<()> {
        let style = self.palette.semantics;

        let posh = semantics.posh_count();
        count_line("POSH", posh, style, out)?;
        if posh > 0 {
            writeln!(out)?;
            writeln!(out, "      The website should use Plain Old Simple HTML(5)")?;
            writeln!(out)?;
            usages(&semantics.posh, |element| format!("<{element}>"), out)?;
            writeln!(out)?;
        }

        let microformats = semantics.microformats_count();
        count_line("Microformats", microformats, style, out)?;
        if microformats > 0 {
            writeln!(out)?;
            writeln!(out, "      The website should not use microformats class names for styling")?;
            writeln!(out)?;
            usages(&semantics.microformats, |token| format!(".{token}"), out)?;
            writeln!(out)?;
        }

        let microformats2 = semantics.microformats2_count();
        count_line("Microformats2", microformats2, style, out)?;
        if microformats2 > 0 || semantics.prefix_format_count() > 0 {
            microformats2_details(&semantics.microformats2, out)?;
        }
        Ok(())
    }

    fn failed_files(&self, analysis: &Analysis, out: &mut impl Write) -> io::Result<()> {
        let mut failed = analysis.failed_files().peekable();
        if failed.peek().is_none() {
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "{}", "===== failed =====".style(self.palette.error))?;
        for (scan_path, message) in failed {
            writeln!(out, " {scan_path}")?;
            writeln!(out, "   {message}")?;
        }
        writeln!(out)
    }

    fn summary(&self, totals: &CssTotals, out: &mut impl Write) -> io::Result<()> {
        let rule = format!("+{}+", "-".repeat(SUMMARY_WIDTH));
        writeln!(out, "{rule}")?;
        let title = format!("{:^SUMMARY_WIDTH$}", "All CSS Files Summary");
        writeln!(out, "|{}|", title.style(self.palette.heading))?;
        writeln!(out, "{rule}")?;
        summary_heading("Syntax", out)?;
        summary_row("- notices:", totals.notices, out)?;
        summary_row("- warnings:", totals.warnings, out)?;
        summary_row("- errors:", totals.errors, out)?;
        writeln!(out, "|{}|", " ".repeat(SUMMARY_WIDTH))?;
        summary_heading("Semantics", out)?;
        summary_row("- POSH:", totals.posh, out)?;
        summary_row("- Microformats:", totals.microformats, out)?;
        summary_row("- Microformats2:", totals.microformats2, out)?;
        writeln!(out, "{rule}")
    }
}

const fn pluralize(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

fn count_line(label: &str, count: usize, style: Style, out: &mut impl Write) -> io::Result<()> {
    if count == 0 {
        writeln!(out, "   - {label}: 0")
    } else {
        writeln!(out, "   - {label}: {}", count.style(style))
    }
}

fn describe(kind: RepairKind, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "      {}", kind.description())?;
    writeln!(out)
}

/// `      - @ line N: first`, with later entries on the same line number aligned below it.
fn line_entries<'a>(
    line: usize,
    entries: impl Iterator<Item = &'a str>,
    out: &mut impl Write,
) -> io::Result<()> {
    let prefix = format!("      - @ line {line}: ");
    for (index, entry) in entries.enumerate() {
        if index == 0 {
            writeln!(out, "{prefix}{entry}")?;
        } else {
            writeln!(out, "{}{entry}", " ".repeat(prefix.len()))?;
        }
    }
    Ok(())
}

/// `      - <name> @ line N`, with later lines aligned below the first.
fn usages(
    hits: &BTreeMap<String, Vec<usize>>,
    label: impl Fn(&str) -> String,
    out: &mut impl Write,
) -> io::Result<()> {
    for (name, lines) in hits {
        let head = format!("      - {} ", label(name));
        for (index, line) in lines.iter().enumerate() {
            if index == 0 {
                writeln!(out, "{head}@ line {line}")?;
            } else {
                writeln!(out, "{}@ line {line}", " ".repeat(head.chars().count()))?;
            }
        }
    }
    Ok(())
}

fn microformats2_details(microformats2: &Microformats2, out: &mut impl Write) -> io::Result<()> {
    if !microformats2.well_known.is_empty() {
        writeln!(out)?;
        writeln!(out, "      The well-known microformats2 class names should not be used for styling")?;
        writeln!(out)?;
        usages(&microformats2.well_known, |token| format!(".{token}"), out)?;
    }
    if !microformats2.well_known_format.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "      The webapp should not use for styling, class names that intersect the microformats2 class name prefix scheme (h-*, p-*, e-*, u-*, dt-*)"
        )?;
        writeln!(out)?;
        usages(&microformats2.well_known_format, |token| format!(".{token}"), out)?;
    }
    let prefix = &microformats2.prefix_format;
    if !prefix.single_letter.is_empty() || !prefix.double_letter.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "      An active area of research for the microformats community is to gauge the usage of single and double letter prefixes"
        )?;
        writeln!(out)?;
        prefix_list("Single Letter Prefixes", &prefix.single_letter, out)?;
        prefix_list("Double Letter Prefixes", &prefix.double_letter, out)?;
    }
    writeln!(out)
}

fn prefix_list(
    title: &str,
    prefixes: &BTreeMap<String, Vec<PrefixHit>>,
    out: &mut impl Write,
) -> io::Result<()> {
    if prefixes.is_empty() {
        return Ok(());
    }
    writeln!(out, "      - {title}: ")?;
    for (letters, hits) in prefixes {
        writeln!(out, "        - {letters}-* ({} token(s))", hits.len())?;
        for hit in hits {
            writeln!(out, "          - {} @ line {}", hit.token, hit.line_number)?;
        }
    }
    Ok(())
}

fn summary_heading(title: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "|  {title:<width$}|", width = SUMMARY_WIDTH - 2)
}

fn summary_row(label: &str, value: usize, out: &mut impl Write) -> io::Result<()> {
    let width = SUMMARY_WIDTH - 6 - label.len();
    writeln!(out, "|  {label}  {value:<width$}  |")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use triage_analyzer::picker::FileDescriptor;
    use triage_analyzer::{Vocabulary, analyze_source};

    use super::*;

    fn descriptor(filename: &str, mime_type: &str) -> FileDescriptor {
        FileDescriptor {
            path: PathBuf::new(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            scan_path: format!("/{filename}"),
        }
    }

    fn sample() -> Analysis {
        let vocabulary = Vocabulary::bundled().unwrap();
        let css = "a:after { color: red }\nblink, .vcard {}\nli:nth-child(0), .h-card, .x-large {}\ntd:bogus {}\n";
        let file = analyze_source(&descriptor("site.css", "text/css"), css.as_bytes(), &vocabulary)
            .unwrap();

        let mut analysis = Analysis::new();
        analysis.add_css_file(file);
        analysis.add_failed_file(&descriptor("bad.css", "text/css"), "Unknown @rule".to_string());
        analysis.add_unsupported_file(&descriptor("index.html", "text/html"));
        analysis
    }

    fn render(analysis: &Analysis, show_all_files: bool) -> String {
        let mut out = Vec::new();
        Reporter::new(show_all_files, false)
            .report(analysis, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "y", "ies"), "y");
        assert_eq!(pluralize(0, "y", "ies"), "ies");
        assert_eq!(pluralize(2, "", "s"), "s");
    }

    #[test]
    fn test_css_file_report() {
        let report = render(&sample(), false);

        assert!(report.starts_with("0 directories\n0 files\n"));
        assert!(report.contains("\n===== text/css =====\n+-------------+\n|  /site.css  |\n+-------------+\n"));
        assert!(report.contains(" - Selectors: 7\n"));
        assert!(report.contains("   - Notices: 1\n"));
        assert!(report.contains(RepairKind::Ordinality.description()));
        assert!(report.contains("      - @ line 3: li:nth-child(0)\n"));
        assert!(report.contains("   - Warnings: 1\n"));
        assert!(report.contains("      - @ line 1: a:after\n"));
        assert!(report.contains("   - Errors: 1\n"));
        assert!(report.contains("      - @ line 4: td:bogus\t(cleanup)=> td:bogus\n"));
        assert!(report.contains("      - <blink> @ line 2\n"));
        assert!(report.contains("      - .vcard @ line 2\n"));
        assert!(report.contains("   - Microformats2: 1\n"));
        assert!(report.contains("      - .h-card @ line 3\n"));
        assert!(report.contains("        - x-* (1 token(s))\n          - x-large @ line 3\n"));
        assert!(!report.contains("text/html"));
    }

    #[test]
    fn test_failed_files_and_other_types() {
        let report = render(&sample(), true);
        assert!(report.contains("\n===== text/html =====\n /index.html\n"));
        assert!(report.contains("\n===== failed =====\n /bad.css\n   Unknown @rule\n"));
    }

    #[test]
    fn test_summary_box() {
        let report = render(&sample(), false);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines[lines.len() - 13..],
            [
                "+---------------------------+",
                "|   All CSS Files Summary   |",
                "+---------------------------+",
                "|  Syntax                   |",
                "|  - notices:  1            |",
                "|  - warnings:  1           |",
                "|  - errors:  1             |",
                "|                           |",
                "|  Semantics                |",
                "|  - POSH:  1               |",
                "|  - Microformats:  1       |",
                "|  - Microformats2:  1      |",
                "+---------------------------+",
            ]
        );
    }
}
