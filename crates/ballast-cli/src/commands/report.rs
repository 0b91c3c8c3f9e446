//! Report command implementation.
//!
//! Loads targets, reads and normalizes the positions export, runs the engine
//! and renders the result. Any fatal error aborts before output is written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ballast_config::load_targets;
use ballast_core::evaluate_portfolio;
use ballast_ext_file::{load_holdings, load_thesis, ThesisIndex};

use crate::cli::OutputFormat;
use crate::output::print_success;
use crate::render;

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Brokerage "Positions" CSV export
    #[arg(long, env = "BALLAST_CSV")]
    pub csv: PathBuf,

    /// Target allocation file (.json or .toml)
    #[arg(short, long, env = "BALLAST_CONFIG")]
    pub config: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Thesis document with one `## SYMBOL` section per holding
    #[arg(short, long, env = "BALLAST_THESIS")]
    pub thesis: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: OutputFormat,
}

/// Execute the report command.
pub fn execute(args: ReportArgs) -> Result<()> {
    let loaded = load_targets(&args.config)?;
    let holdings = load_holdings(&args.csv, &loaded.normalizer)?;
    let report = evaluate_portfolio(&holdings, &loaded.targets)?;

    let thesis = match &args.thesis {
        Some(path) => load_thesis(path)?,
        None => ThesisIndex::default(),
    };
    let coverage = thesis.coverage(&report.holdings);

    let rendered = render::render(&report, &coverage, args.format)?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Cannot write report to {}", path.display()))?;
            print_success(&format!("Wrote report to: {}", path.display()));
        }
        None => print!("{rendered}"),
    }

    tracing::info!(
        holdings = report.holdings.len(),
        actions = report.actions.len(),
        format = ?args.format,
        "report complete"
    );
    Ok(())
}
