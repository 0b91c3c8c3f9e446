//! Bucket classification.
//!
//! Every holding lands in exactly one bucket: the bucket its symbol is
//! configured under, or [`UNASSIGNED_BUCKET`]. Matching is exact and
//! case-sensitive.

use crate::types::{TargetConfig, UNASSIGNED_BUCKET};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Returns the bucket name for a symbol.
#[must_use]
pub fn classify<'a>(symbol: &str, config: &'a TargetConfig) -> &'a str {
    config
        .position(symbol)
        .map_or(UNASSIGNED_BUCKET, |p| p.bucket.as_str())
}

/// Aggregated membership of one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketTotals {
    /// Number of holdings.
    pub count: usize,
    /// Sum of market values.
    pub market_value: Decimal,
    /// Sum of weights (0-100).
    pub weight_pct: Decimal,
}

/// Sums weights and values per bucket from `(bucket, market_value, weight_pct)` rows.
#[must_use]
pub fn bucket_totals<'a, I>(rows: I) -> HashMap<String, BucketTotals>
where
    I: IntoIterator<Item = (&'a str, Decimal, Decimal)>,
{
    let mut totals: HashMap<String, BucketTotals> = HashMap::new();
    for (bucket, market_value, weight_pct) in rows {
        let entry = totals.entry(bucket.to_string()).or_default();
        entry.count += 1;
        entry.market_value += market_value;
        entry.weight_pct += weight_pct;
    }
    totals
}
