//! Output shapes produced by the engine.

use super::percent::PctRange;
use super::status::{AllocationStatus, PositionAction, Severity};
use rust_decimal::Decimal;
use serde::Serialize;

/// A holding after classification, weighting and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluatedHolding {
    /// Ticker symbol.
    pub symbol: String,

    /// Market value.
    pub market_value: Decimal,

    /// Assigned bucket (`Unassigned` when not configured).
    pub bucket: String,

    /// Weight as a percentage of total portfolio value (0-100).
    pub weight_pct: Decimal,

    /// Configured soft range, if any.
    pub target: Option<PctRange>,

    /// Soft-range comparison result, before any cap override.
    pub status: AllocationStatus,

    /// Final recommended action.
    pub action: PositionAction,

    /// True if the weight exceeds the single-position cap.
    pub cap_breach: bool,
}

impl EvaluatedHolding {
    /// Returns true if the holding has a configured range.
    #[must_use]
    pub fn is_targeted(&self) -> bool {
        self.target.is_some()
    }
}

/// Bucket-level comparison result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    /// Bucket name.
    pub bucket: String,

    /// Sum of member holding weights (0-100).
    pub actual_pct: Decimal,

    /// Total market value of member holdings.
    pub market_value: Decimal,

    /// Number of holdings in this bucket.
    pub holding_count: usize,

    /// Point target, if configured.
    pub target_pct: Option<Decimal>,

    /// Soft range, if configured.
    pub target: Option<PctRange>,

    /// Hard cap, if configured.
    pub cap_pct: Option<Decimal>,

    /// True if `actual_pct` exceeds the hard cap.
    pub cap_breach: bool,

    /// Comparison result; cap breaches force `Over`.
    pub status: AllocationStatus,
}

/// What an action item is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ActionSubject {
    /// A single holding.
    Position(String),
    /// A whole bucket.
    Bucket(String),
}

impl ActionSubject {
    /// Symbol or bucket name.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Position(s) | Self::Bucket(s) => s,
        }
    }

    /// Returns true for bucket-level items.
    #[must_use]
    pub fn is_bucket(&self) -> bool {
        matches!(self, Self::Bucket(_))
    }
}

impl std::fmt::Display for ActionSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One entry of the prioritized "what to do first" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    /// Holding or bucket the item is about.
    pub subject: ActionSubject,

    /// Priority tier.
    pub severity: Severity,

    /// Distance outside the relevant bound, in percentage points.
    /// Zero for review items.
    pub magnitude: Decimal,

    /// Human-readable recommendation.
    pub description: String,
}

impl ActionItem {
    /// Symbol or bucket name of the subject.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.subject.key()
    }
}

/// Everything the engine derives for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationReport {
    /// Strategy name from the target configuration.
    pub strategy_name: String,

    /// Total portfolio market value.
    pub total_market_value: Decimal,

    /// Configured buckets in declaration order, then `Unassigned` if populated.
    pub buckets: Vec<BucketSummary>,

    /// Holdings by descending weight (ties by symbol).
    pub holdings: Vec<EvaluatedHolding>,

    /// Prioritized action list.
    pub actions: Vec<ActionItem>,
}

impl AllocationReport {
    /// Returns the summary for a bucket.
    #[must_use]
    pub fn bucket(&self, name: &str) -> Option<&BucketSummary> {
        self.buckets.iter().find(|b| b.bucket == name)
    }

    /// Returns the evaluation for a symbol.
    #[must_use]
    pub fn holding(&self, symbol: &str) -> Option<&EvaluatedHolding> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    /// Returns true if nothing needs attention.
    #[must_use]
    pub fn is_within_targets(&self) -> bool {
        self.actions.is_empty()
    }

    /// Buckets whose hard cap is breached.
    #[must_use]
    pub fn cap_alerts(&self) -> Vec<&BucketSummary> {
        self.buckets.iter().filter(|b| b.cap_breach).collect()
    }
}
