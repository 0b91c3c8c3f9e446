//! Allocation evaluation.
//!
//! Two independent comparisons run over the weighted holdings:
//!
//! - **Position level**: each holding's weight against its configured soft
//!   range gives HOLD/ADD/TRIM, and a configured holding above the
//!   single-position cap is forced to TRIM. Unconfigured holdings always get
//!   REVIEW; a cap breach on one is still flagged and ranked as a hard cap.
//! - **Bucket level**: each declared bucket's summed weight against its soft
//!   range gives OK/OVER/UNDER, and a bucket cap breach forces OVER.
//!
//! Bucket results never change a holding's action.

use crate::bucketing::{bucket_totals, classify, BucketTotals};
use crate::types::{
    AllocationStatus, BucketSummary, EvaluatedHolding, PositionAction, RangePosition,
    TargetConfig, UNASSIGNED_BUCKET,
};
use crate::weights::{PortfolioWeights, WeightedHolding};

impl From<RangePosition> for AllocationStatus {
    fn from(position: RangePosition) -> Self {
        match position {
            RangePosition::Below => Self::Under,
            RangePosition::Within => Self::Ok,
            RangePosition::Above => Self::Over,
        }
    }
}

/// Maps a soft-range status and cap check to an action.
#[must_use]
pub fn decide_action(status: AllocationStatus, cap_breach: bool) -> PositionAction {
    match (status, cap_breach) {
        (AllocationStatus::Untargeted, _) => PositionAction::Review,
        (_, true) | (AllocationStatus::Over, false) => PositionAction::Trim,
        (AllocationStatus::Ok, false) => PositionAction::Hold,
        (AllocationStatus::Under, false) => PositionAction::Add,
    }
}

/// Evaluates a single weighted holding.
#[must_use]
pub fn evaluate_position(holding: &WeightedHolding, config: &TargetConfig) -> EvaluatedHolding {
    let position = config.position(&holding.symbol);
    let target = position.map(|p| p.range);
    let status = target.map_or(AllocationStatus::Untargeted, |r| {
        r.locate(holding.weight_pct).into()
    });
    let cap_breach = holding.weight_pct > config.single_position_cap();

    EvaluatedHolding {
        symbol: holding.symbol.clone(),
        market_value: holding.market_value,
        bucket: classify(&holding.symbol, config).to_string(),
        weight_pct: holding.weight_pct,
        target,
        status,
        action: decide_action(status, cap_breach),
        cap_breach,
    }
}

/// Evaluates every holding, ordered by descending weight then symbol.
#[must_use]
pub fn evaluate_positions(weights: &PortfolioWeights, config: &TargetConfig) -> Vec<EvaluatedHolding> {
    let mut evaluated: Vec<_> = weights
        .holdings
        .iter()
        .map(|h| evaluate_position(h, config))
        .collect();

    evaluated.sort_by(|a, b| {
        b.weight_pct
            .cmp(&a.weight_pct)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    for holding in evaluated.iter().filter(|h| !h.is_targeted()) {
        tracing::warn!(
            symbol = %holding.symbol,
            weight_pct = %holding.weight_pct,
            "holding has no configured target range"
        );
    }

    evaluated
}

/// Summarizes declared buckets in declaration order, followed by
/// `Unassigned` when any holding fell into it.
#[must_use]
pub fn evaluate_buckets(holdings: &[EvaluatedHolding], config: &TargetConfig) -> Vec<BucketSummary> {
    let totals = bucket_totals(
        holdings
            .iter()
            .map(|h| (h.bucket.as_str(), h.market_value, h.weight_pct)),
    );
    let empty = BucketTotals::default();

    let mut summaries: Vec<BucketSummary> = config
        .buckets()
        .iter()
        .map(|bucket| {
            let members = totals.get(&bucket.name).unwrap_or(&empty);
            let cap_pct = config.bucket_cap(&bucket.name);
            let cap_breach = cap_pct.is_some_and(|cap| members.weight_pct > cap);
            let status = if cap_breach {
                AllocationStatus::Over
            } else {
                bucket.range.locate(members.weight_pct).into()
            };

            BucketSummary {
                bucket: bucket.name.clone(),
                actual_pct: members.weight_pct,
                market_value: members.market_value,
                holding_count: members.count,
                target_pct: Some(bucket.target_pct),
                target: Some(bucket.range),
                cap_pct,
                cap_breach,
                status,
            }
        })
        .collect();

    if let Some(members) = totals.get(UNASSIGNED_BUCKET) {
        summaries.push(BucketSummary {
            bucket: UNASSIGNED_BUCKET.to_string(),
            actual_pct: members.weight_pct,
            market_value: members.market_value,
            holding_count: members.count,
            target_pct: None,
            target: None,
            cap_pct: None,
            cap_breach: false,
            status: AllocationStatus::Untargeted,
        });
    }

    summaries
}
