//! # Ballast Core
//!
//! Allocation-comparison rules engine for periodic, manual portfolio
//! rebalancing.
//!
//! Given normalized holdings and a target allocation, the engine derives
//! bucket status, per-position actions and a priority-ordered action list.
//! It is advisory only and never produces trades.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: one deterministic pass, no state kept between runs
//! - **Decimal arithmetic**: weights never drift in displayed totals
//! - **Validated config**: ranges and references are checked once, at build time
//! - **Closed variants**: statuses, actions and severities are enums, not strings
//!
//! ## Pipeline
//!
//! ```text
//! HoldingSet ──► weights ──► bucketing ──► evaluate ──► rank ──► AllocationReport
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use ballast_core::prelude::*;
//!
//! let config = TargetConfig::builder()
//!     .bucket("Core", dec!(55), dec!(65))
//!     .bucket("Conviction", dec!(20), dec!(30))
//!     .position("VTI", "Core", dec!(40), dec!(45))
//!     .position("AAPL", "Conviction", dec!(7), dec!(10))
//!     .single_position_cap(dec!(12))
//!     .build()?;
//!
//! let holdings = HoldingSet::new(vec![
//!     Holding::new("VTI", dec!(42_000)),
//!     Holding::new("AAPL", dec!(11_500)),
//!     Holding::new("CASH", dec!(46_500)),
//! ])?;
//!
//! let report = evaluate_portfolio(&holdings, &config)?;
//! assert_eq!(report.holding("AAPL").unwrap().action, PositionAction::Trim);
//! # Ok::<(), EngineError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`types`] - Holdings, target configuration, statuses, output shapes
//! - [`weights`] - Total value and per-holding weights
//! - [`bucketing`] - Symbol to bucket classification
//! - [`evaluate`] - Position and bucket comparisons
//! - [`rank`] - Priority ordering of flagged items
//! - [`engine`] - The full pipeline

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod bucketing;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod rank;
pub mod types;
pub mod weights;

pub use engine::evaluate_portfolio;
pub use error::{EngineError, EngineResult, Validate, ValidationError};
pub use types::{
    ActionItem, ActionSubject, AllocationReport, AllocationStatus, BucketSummary, BucketTarget,
    EvaluatedHolding, HardCaps, Holding, HoldingSet, PctRange, PositionAction, PositionTarget,
    Severity, TargetConfig, TargetConfigBuilder, UNASSIGNED_BUCKET,
};
pub use weights::{calculate_weights, PortfolioWeights, WeightedHolding};

/// Prelude module for convenient imports.
///
/// ```rust
/// use ballast_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::engine::evaluate_portfolio;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::types::{
        format_pct, ActionItem, ActionSubject, AllocationReport, AllocationStatus,
        BucketSummary, EvaluatedHolding, Holding, HoldingSet, PctRange, PositionAction,
        Severity, TargetConfig, UNASSIGNED_BUCKET,
    };

    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
