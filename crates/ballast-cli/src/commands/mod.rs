//! CLI command implementations.

pub mod check;
pub mod report;

pub use check::CheckArgs;
pub use report::ReportArgs;
