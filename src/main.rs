//! `bib-revise`: cleans the BibTeX entries a paper actually cites.

use anyhow::Context;
use bibrevise::logging::{DEFAULT_LOG_FILE, LogConfig, init_logging};
use bibrevise::session::{NoPause, Pause, StdinPause};
use bibrevise::{ReviseConfig, Reviser, TracingReporter};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// Revise a bib file: keep cited entries, normalize fields, report problems.
#[derive(Debug, Parser)]
#[command(name = "bib-revise", version, about)]
struct Cli {
    /// The bib file to revise
    bib_file: PathBuf,

    /// The compiled .bbl file of the paper, used to keep only cited entries
    #[arg(long)]
    bbl_file: Option<PathBuf>,

    /// Where to write the revised entries (must differ from BIB_FILE)
    #[arg(long)]
    out_bib_file: Option<PathBuf>,

    /// Keep every field instead of pruning to the required ones
    #[arg(long)]
    force_all_keys: bool,

    /// Do not wait for Enter after each flagged entry
    #[arg(long)]
    skip: bool,

    /// Also show entries without findings and skipped uncited entries
    #[arg(long)]
    verbose: bool,

    /// Do not write bib_comments.log
    #[arg(long)]
    no_logs: bool,

    /// Move DOI-looking URLs into the doi field and drop redundant URLs
    #[arg(long)]
    force_doi: bool,

    /// Write titles with a single pair of braces
    #[arg(long)]
    single_brace: bool,

    /// Let pruning remove the note field
    #[arg(long)]
    drop_notes: bool,
}

impl Cli {
    fn revise_config(&self) -> ReviseConfig {
        ReviseConfig::new(&self.bib_file)
            .with_cited_path(self.bbl_file.clone())
            .with_out_path(self.out_bib_file.clone())
            .with_force(!self.force_all_keys)
            .with_skip(self.skip)
            .with_verbose(self.verbose)
            .with_force_doi(self.force_doi)
            .with_single_brace(self.single_brace)
            .with_preserve_note(!self.drop_notes)
    }

    fn log_config(&self) -> LogConfig {
        let log_file = (!self.no_logs).then(|| PathBuf::from(DEFAULT_LOG_FILE));
        LogConfig::default()
            .with_ansi(io::stderr().is_terminal())
            .with_log_file(log_file)
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    init_logging(&cli.log_config()).context("failed to initialize logging")?;

    let mut reporter = TracingReporter::new();
    let mut pause: Box<dyn Pause> = if cli.skip {
        Box::new(NoPause)
    } else {
        Box::new(StdinPause)
    };

    let summary = Reviser::new(cli.revise_config())
        .run(&mut reporter, pause.as_mut())
        .with_context(|| format!("failed to revise {}", cli.bib_file.display()))?;

    tracing::debug!(
        retained = summary.retained.len(),
        dropped = summary.dropped.len(),
        flagged = summary.warnings_by_id.len(),
        duplicates = summary.duplicates.len(),
        "run finished"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
