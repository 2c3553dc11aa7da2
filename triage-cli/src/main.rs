//! Triage CLI
//!
//! Scans a source tree, analyzes every stylesheet's selectors and reports
//! syntax trouble and semantic vocabulary usage.

mod monitor;
mod reporter;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use triage_analyzer::{Analysis, Analyzer, Silent, Vocabulary};

use monitor::Progress;
use reporter::Reporter;

/// Triage: find syntax trouble and vocabulary usage in CSS selectors
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "triage")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Report on every stylesheet under a directory
    triage ./public

    # Report on one stylesheet, with a progress line
    triage -p ./public/css/site.css

    # List every file scanned, whatever its type
    triage --show-all-files ./public

    # Machine-readable output
    triage --json ./public > analysis.json
"#)]
struct Cli {
    /// Directory or file to analyze
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Show files of every MIME type, not only stylesheets
    #[arg(short = 'a', long)]
    show_all_files: bool,

    /// Show which file is being analyzed
    #[arg(short = 'p', long)]
    show_progress: bool,

    /// Print the analysis as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Load the vocabulary tables from this directory instead of the bundled ones
    #[arg(long, value_name = "DIR")]
    vocabulary: Option<PathBuf>,

    /// Disable colors in the report
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialize logging")?;

    if !cli.source.exists() {
        eprintln!("triage: no such file or directory");
        std::process::exit(1);
    }

    let vocabulary = match &cli.vocabulary {
        Some(dir) => Vocabulary::load(dir)
            .with_context(|| format!("failed to load vocabulary from {}", dir.display()))?,
        None => Vocabulary::bundled().context("bundled vocabulary is malformed")?,
    };

    let analyzer = Analyzer::new(vocabulary);
    let analysis = if cli.show_progress {
        analyzer.analyze(&cli.source, &mut Progress::new())?
    } else {
        analyzer.analyze(&cli.source, &mut Silent)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(&cli, &analysis, &mut out)?;
    out.flush()?;

    Ok(())
}

fn write_output(cli: &Cli, analysis: &Analysis, out: &mut impl Write) -> Result<()> {
    if cli.json {
        serde_json::to_writer_pretty(&mut *out, analysis)?;
        writeln!(out)?;
    } else {
        Reporter::new(cli.show_all_files, !cli.no_color).report(analysis, out)?;
    }
    Ok(())
}
