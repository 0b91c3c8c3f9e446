//! # Ballast Ext File
//!
//! File collaborators around the rules engine:
//! - Brokerage "Positions" CSV export parser
//! - Holding normalizer (aliases, cash detection, duplicate merging)
//! - Thesis document lookup and coverage
//!
//! None of this is needed to call the engine directly; it exists so the CLI
//! can go from an export file to a [`ballast_core::HoldingSet`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod export;
mod normalize;
mod thesis;

pub use error::{FileError, FileResult};
pub use export::{
    parse_number_cell, parse_positions, read_positions, PositionRow, EXPORT_COLUMNS,
    FOOTER_PREFIXES,
};
pub use normalize::{normalize_positions, row_market_value};
pub use thesis::{
    load_thesis, CoverageRow, ThesisCoverage, ThesisIndex, THESIS_EXEMPT_BUCKETS,
};

use std::path::Path;

use ballast_config::NormalizerSettings;
use ballast_core::HoldingSet;

/// Reads an export and normalizes it in one step.
pub fn load_holdings(
    csv_path: impl AsRef<Path>,
    settings: &NormalizerSettings,
) -> FileResult<HoldingSet> {
    let rows = read_positions(csv_path)?;
    normalize_positions(&rows, settings)
}
