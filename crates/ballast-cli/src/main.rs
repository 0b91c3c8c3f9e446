//! Ballast CLI - allocation decision support from a brokerage positions export.
//!
//! # Usage
//!
//! ```bash
//! # Write a Markdown report
//! ballast report --csv Positions_All_Accounts.csv --config targets.json --out report.md
//!
//! # Include thesis coverage
//! ballast report --csv positions.csv --config targets.toml --thesis thesis.md --out report.md
//!
//! # Print tables or JSON instead
//! ballast report --csv positions.csv --config targets.json --format table
//!
//! # Validate a target file
//! ballast check --config targets.json
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod output;
mod render;

use cli::{Cli, Commands};

fn init_logging(cli: &Cli) {
    // -v wins over RUST_LOG; otherwise RUST_LOG, then warn.
    let filter = if cli.verbose > 0 {
        EnvFilter::new(cli.log_level())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()))
    };

    // stdout carries the report
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Commands::Report(args) => commands::report::execute(args),
        Commands::Check(args) => commands::check::execute(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
