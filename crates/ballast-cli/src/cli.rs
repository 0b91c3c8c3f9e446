//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{CheckArgs, ReportArgs};

/// Ballast - Compare a brokerage portfolio against target allocation ranges
#[derive(Parser)]
#[command(name = "ballast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a positions export and produce an allocation report
    Report(ReportArgs),

    /// Validate a target allocation file without evaluating holdings
    Check(CheckArgs),
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Markdown report
    #[default]
    Markdown,
    /// Human-readable tables
    Table,
    /// The evaluation result as JSON
    Json,
}

impl Cli {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
