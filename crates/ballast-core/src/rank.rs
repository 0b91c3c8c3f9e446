//! Priority ranking of flagged holdings and buckets.
//!
//! Ordering law: severity tier ascending (hard cap, trim, add, review), then
//! magnitude descending, then subject name, then positions before buckets.
//! The key is computed once per item by [`priority_key`].

use crate::types::{
    format_pct, ActionItem, ActionSubject, AllocationStatus, BucketSummary, EvaluatedHolding,
    Severity, TargetConfig,
};
use rust_decimal::Decimal;
use std::cmp::Reverse;

/// Composite sort key of an action item.
pub type PriorityKey = (Severity, Reverse<Decimal>, String, bool);

/// Returns the sort key of an item.
#[must_use]
pub fn priority_key(item: &ActionItem) -> PriorityKey {
    (
        item.severity,
        Reverse(item.magnitude),
        item.subject.key().to_string(),
        item.subject.is_bucket(),
    )
}

/// Sorts items by [`priority_key`]. Identical input always yields identical order.
pub fn sort_actions(items: &mut [ActionItem]) {
    items.sort_by_cached_key(priority_key);
}

/// Builds the action item for a holding, or `None` for HOLD.
#[must_use]
pub fn position_item(holding: &EvaluatedHolding, single_cap: Decimal) -> Option<ActionItem> {
    let symbol = &holding.symbol;
    let weight = format_pct(holding.weight_pct);

    let (severity, magnitude, description) = if holding.cap_breach {
        (
            Severity::HardCap,
            holding.weight_pct - single_cap,
            format!(
                "Reduce concentration: {symbol} is {weight} (cap {}).",
                format_pct(single_cap)
            ),
        )
    } else {
        let severity = holding.action.severity()?;
        match (severity, holding.target) {
            (Severity::Trim, Some(range)) => (
                severity,
                holding.weight_pct - range.high,
                format!("Consider trimming: {symbol} is {weight} vs target {range}."),
            ),
            (Severity::Add, Some(range)) => (
                severity,
                range.low - holding.weight_pct,
                format!("Candidate to add: {symbol} is {weight} vs target {range}."),
            ),
            _ => (
                Severity::Review,
                Decimal::ZERO,
                format!("Review: {symbol} is {weight} with no configured target."),
            ),
        }
    };

    Some(ActionItem {
        subject: ActionSubject::Position(symbol.clone()),
        severity,
        magnitude,
        description,
    })
}

/// Builds the action item for a bucket, or `None` when it is OK or untargeted.
#[must_use]
pub fn bucket_item(summary: &BucketSummary) -> Option<ActionItem> {
    let name = &summary.bucket;
    let actual = format_pct(summary.actual_pct);

    let (severity, magnitude, description) = match (summary.cap_pct, summary.target) {
        (Some(cap), _) if summary.cap_breach => (
            Severity::HardCap,
            summary.actual_pct - cap,
            format!("Bucket {name} is {actual} (cap {}).", format_pct(cap)),
        ),
        (_, Some(range)) if summary.status == AllocationStatus::Over => (
            Severity::Trim,
            summary.actual_pct - range.high,
            format!("Rebalance {name}: currently {actual} vs target {range}."),
        ),
        (_, Some(range)) if summary.status == AllocationStatus::Under => (
            Severity::Add,
            range.low - summary.actual_pct,
            format!("Build {name}: currently {actual} vs target {range}."),
        ),
        _ => return None,
    };

    Some(ActionItem {
        subject: ActionSubject::Bucket(name.clone()),
        severity,
        magnitude,
        description,
    })
}

/// Produces the prioritized action list for evaluated holdings and buckets.
#[must_use]
pub fn rank_actions(
    holdings: &[EvaluatedHolding],
    buckets: &[BucketSummary],
    config: &TargetConfig,
) -> Vec<ActionItem> {
    let single_cap = config.single_position_cap();

    let mut items: Vec<ActionItem> = holdings
        .iter()
        .filter_map(|h| position_item(h, single_cap))
        .chain(buckets.iter().filter_map(bucket_item))
        .collect();

    sort_actions(&mut items);
    items
}
