//! Core types for allocation evaluation.

mod holding;
mod percent;
mod report;
mod status;
mod targets;

pub use holding::{Holding, HoldingSet};
pub use percent::{format_pct, is_valid_pct, round_pct, PctRange, RangePosition, DISPLAY_DP};
pub use report::{
    ActionItem, ActionSubject, AllocationReport, BucketSummary, EvaluatedHolding,
};
pub use status::{AllocationStatus, PositionAction, Severity};
pub use targets::{
    BucketTarget, HardCaps, PositionTarget, TargetConfig, TargetConfigBuilder,
    DEFAULT_SINGLE_POSITION_CAP, DEFAULT_STRATEGY_NAME, UNASSIGNED_BUCKET,
};
