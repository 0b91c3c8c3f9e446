//! Target allocation configuration.
//!
//! A [`TargetConfig`] is built once per run through [`TargetConfigBuilder`],
//! which validates every range and reference eagerly. Once built it is
//! read-only; the evaluator never re-checks it.

use super::percent::{is_valid_pct, PctRange};
use crate::error::{EngineResult, Validate, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Reserved bucket for holdings with no configured position.
pub const UNASSIGNED_BUCKET: &str = "Unassigned";

/// Single-position cap used when the configuration does not set one.
pub const DEFAULT_SINGLE_POSITION_CAP: Decimal = dec!(12);

/// Strategy name used when the configuration does not set one.
pub const DEFAULT_STRATEGY_NAME: &str = "Strategy";

/// Target allocation for a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketTarget {
    /// Bucket name.
    pub name: String,

    /// Point target (0-100).
    pub target_pct: Decimal,

    /// Soft range used for OK/OVER/UNDER.
    pub range: PctRange,
}

/// Target range for a single symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionTarget {
    /// Ticker symbol.
    pub symbol: String,

    /// Bucket the symbol belongs to.
    pub bucket: String,

    /// Soft range used for HOLD/ADD/TRIM.
    pub range: PctRange,
}

/// Absolute ceilings that override soft ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardCaps {
    /// No single holding may exceed this weight.
    pub max_single_position_pct: Decimal,

    /// Per-bucket ceilings.
    pub max_bucket_pct: BTreeMap<String, Decimal>,
}

impl Default for HardCaps {
    fn default() -> Self {
        Self {
            max_single_position_pct: DEFAULT_SINGLE_POSITION_CAP,
            max_bucket_pct: BTreeMap::new(),
        }
    }
}

/// Validated, read-only target allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetConfig {
    strategy_name: String,
    buckets: Vec<BucketTarget>,
    positions: HashMap<String, PositionTarget>,
    hard_caps: HardCaps,
}

impl TargetConfig {
    /// Starts building a configuration.
    #[must_use]
    pub fn builder() -> TargetConfigBuilder {
        TargetConfigBuilder::new()
    }

    /// Display name of the strategy.
    #[must_use]
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Buckets in declaration order.
    #[must_use]
    pub fn buckets(&self) -> &[BucketTarget] {
        &self.buckets
    }

    /// Looks up a declared bucket.
    #[must_use]
    pub fn bucket(&self, name: &str) -> Option<&BucketTarget> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// Looks up the configured range for a symbol (exact match).
    #[must_use]
    pub fn position(&self, symbol: &str) -> Option<&PositionTarget> {
        self.positions.get(symbol)
    }

    /// All configured positions, sorted by symbol.
    #[must_use]
    pub fn positions(&self) -> Vec<&PositionTarget> {
        let mut positions: Vec<_> = self.positions.values().collect();
        positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        positions
    }

    /// Configured positions of one bucket, sorted by symbol.
    #[must_use]
    pub fn positions_in(&self, bucket: &str) -> Vec<&PositionTarget> {
        self.positions()
            .into_iter()
            .filter(|p| p.bucket == bucket)
            .collect()
    }

    /// Hard caps.
    #[must_use]
    pub fn hard_caps(&self) -> &HardCaps {
        &self.hard_caps
    }

    /// Single-position ceiling.
    #[must_use]
    pub fn single_position_cap(&self) -> Decimal {
        self.hard_caps.max_single_position_pct
    }

    /// Ceiling for a bucket, if one is configured.
    #[must_use]
    pub fn bucket_cap(&self, bucket: &str) -> Option<Decimal> {
        self.hard_caps.max_bucket_pct.get(bucket).copied()
    }
}

/// Builder for [`TargetConfig`].
///
/// # Example
///
/// ```rust
/// use ballast_core::prelude::*;
///
/// let config = TargetConfig::builder()
///     .strategy_name("Core and Satellite")
///     .bucket("Core", dec!(55), dec!(65))
///     .position("VTI", "Core", dec!(40), dec!(45))
///     .single_position_cap(dec!(12))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.bucket("Core").unwrap().target_pct, dec!(60));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TargetConfigBuilder {
    strategy_name: Option<String>,
    buckets: Vec<BucketTarget>,
    positions: Vec<PositionTarget>,
    single_position_cap: Option<Decimal>,
    bucket_caps: Vec<(String, Decimal)>,
}

impl TargetConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strategy name.
    #[must_use]
    pub fn strategy_name(mut self, name: impl Into<String>) -> Self {
        self.strategy_name = Some(name.into());
        self
    }

    /// Declares a bucket whose point target is the range midpoint.
    #[must_use]
    pub fn bucket(self, name: impl Into<String>, low: Decimal, high: Decimal) -> Self {
        let range = PctRange::new(low, high);
        self.bucket_with_target(name, range.midpoint(), low, high)
    }

    /// Declares a bucket with an explicit point target.
    #[must_use]
    pub fn bucket_with_target(
        mut self,
        name: impl Into<String>,
        target_pct: Decimal,
        low: Decimal,
        high: Decimal,
    ) -> Self {
        self.buckets.push(BucketTarget {
            name: name.into(),
            target_pct,
            range: PctRange::new(low, high),
        });
        self
    }

    /// Configures a symbol's soft range inside a bucket.
    #[must_use]
    pub fn position(
        mut self,
        symbol: impl Into<String>,
        bucket: impl Into<String>,
        low: Decimal,
        high: Decimal,
    ) -> Self {
        self.positions.push(PositionTarget {
            symbol: symbol.into(),
            bucket: bucket.into(),
            range: PctRange::new(low, high),
        });
        self
    }

    /// Sets the single-position ceiling.
    #[must_use]
    pub fn single_position_cap(mut self, pct: Decimal) -> Self {
        self.single_position_cap = Some(pct);
        self
    }

    /// Sets a bucket ceiling.
    #[must_use]
    pub fn bucket_cap(mut self, bucket: impl Into<String>, pct: Decimal) -> Self {
        self.bucket_caps.push((bucket.into(), pct));
        self
    }

    /// Returns true if a bucket with this name has been declared.
    #[must_use]
    pub fn has_bucket(&self, name: &str) -> bool {
        self.buckets.iter().any(|b| b.name == name)
    }

    /// Returns true if a cap has been set for this bucket.
    #[must_use]
    pub fn has_bucket_cap(&self, name: &str) -> bool {
        self.bucket_caps.iter().any(|(b, _)| b == name)
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::InvalidConfig`] for a single problem or
    /// [`crate::EngineError::MultipleConfigErrors`] when several are found.
    pub fn build(self) -> EngineResult<TargetConfig> {
        self.validate_or_error()?;

        let positions = self
            .positions
            .into_iter()
            .map(|p| (p.symbol.clone(), p))
            .collect();

        Ok(TargetConfig {
            strategy_name: self
                .strategy_name
                .unwrap_or_else(|| DEFAULT_STRATEGY_NAME.to_string()),
            buckets: self.buckets,
            positions,
            hard_caps: HardCaps {
                max_single_position_pct: self
                    .single_position_cap
                    .unwrap_or(DEFAULT_SINGLE_POSITION_CAP),
                max_bucket_pct: self.bucket_caps.into_iter().collect(),
            },
        })
    }
}

fn check_range(subject: &str, range: &PctRange, errors: &mut Vec<ValidationError>) {
    if range.low > range.high {
        errors.push(ValidationError::new(
            subject,
            format!("range low {} is above high {}", range.low, range.high),
        ));
    }
    for bound in [range.low, range.high] {
        if !is_valid_pct(bound) {
            errors.push(ValidationError::new(
                subject,
                format!("range bound {bound} is outside 0-100"),
            ));
        }
    }
}

impl Validate for TargetConfigBuilder {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut declared = HashSet::new();

        for bucket in &self.buckets {
            if bucket.name.trim().is_empty() {
                errors.push(ValidationError::new("<bucket>", "bucket name is blank"));
                continue;
            }
            if bucket.name == UNASSIGNED_BUCKET {
                errors.push(ValidationError::new(
                    &bucket.name,
                    "bucket name is reserved for unconfigured holdings",
                ));
            }
            if !declared.insert(bucket.name.as_str()) {
                errors.push(ValidationError::new(&bucket.name, "bucket declared twice"));
            }
            check_range(&bucket.name, &bucket.range, &mut errors);
            if bucket.range.is_well_formed() && !bucket.range.contains(bucket.target_pct) {
                errors.push(ValidationError::new(
                    &bucket.name,
                    format!(
                        "target {} is outside its range {}-{}",
                        bucket.target_pct, bucket.range.low, bucket.range.high
                    ),
                ));
            }
        }

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for position in &self.positions {
            if position.symbol.trim().is_empty() {
                errors.push(ValidationError::new(
                    &position.bucket,
                    "position symbol is blank",
                ));
                continue;
            }
            if let Some(first) = seen.insert(&position.symbol, &position.bucket) {
                errors.push(ValidationError::new(
                    &position.symbol,
                    format!(
                        "symbol configured more than once (buckets '{first}' and '{}')",
                        position.bucket
                    ),
                ));
            }
            if !declared.contains(position.bucket.as_str()) {
                errors.push(ValidationError::new(
                    &position.symbol,
                    format!("references undeclared bucket '{}'", position.bucket),
                ));
            }
            check_range(&position.symbol, &position.range, &mut errors);
        }

        if let Some(cap) = self.single_position_cap {
            if !is_valid_pct(cap) {
                errors.push(ValidationError::new(
                    "single_position_pct",
                    format!("cap {cap} is outside 0-100"),
                ));
            }
        }

        let mut capped = HashSet::new();
        for (bucket, cap) in &self.bucket_caps {
            if !capped.insert(bucket.as_str()) {
                errors.push(ValidationError::new(bucket, "bucket cap set twice"));
            }
            if !declared.contains(bucket.as_str()) {
                errors.push(ValidationError::new(
                    bucket,
                    "bucket cap names an undeclared bucket",
                ));
            }
            if !is_valid_pct(*cap) {
                errors.push(ValidationError::new(
                    bucket,
                    format!("bucket cap {cap} is outside 0-100"),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn sample() -> TargetConfigBuilder {
        TargetConfig::builder()
            .strategy_name("Growth")
            .bucket("Core", dec!(55), dec!(65))
            .bucket_with_target("Speculation", dec!(5), dec!(0), dec!(10))
            .position("VTI", "Core", dec!(40), dec!(45))
            .position("PLTR", "Speculation", dec!(2), dec!(5))
            .single_position_cap(dec!(12))
            .bucket_cap("Speculation", dec!(10))
    }

    #[test]
    fn test_build_valid() {
        let config = sample().build().unwrap();
        assert_eq!(config.strategy_name(), "Growth");
        assert_eq!(config.buckets().len(), 2);
        assert_eq!(config.buckets()[0].name, "Core");
        assert_eq!(config.bucket("Core").unwrap().target_pct, dec!(60));
        assert_eq!(config.position("VTI").unwrap().bucket, "Core");
        assert!(config.position("vti").is_none());
        assert_eq!(config.bucket_cap("Speculation"), Some(dec!(10)));
        assert_eq!(config.bucket_cap("Core"), None);
        assert_eq!(config.single_position_cap(), dec!(12));
        assert_eq!(config.positions_in("Speculation").len(), 1);
    }

    #[test]
    fn test_defaults() {
        let config = TargetConfig::builder().build().unwrap();
        assert_eq!(config.strategy_name(), DEFAULT_STRATEGY_NAME);
        assert_eq!(config.single_position_cap(), DEFAULT_SINGLE_POSITION_CAP);
        assert!(config.buckets().is_empty());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = sample()
            .position("AAPL", "Core", dec!(10), dec!(7))
            .build()
            .unwrap_err();
        match err {
            EngineError::InvalidConfig { subject, reason } => {
                assert_eq!(subject, "AAPL");
                assert!(reason.contains("above high"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_undeclared_bucket_is_rejected() {
        let err = sample()
            .position("BTC", "Crypto", dec!(1), dec!(2))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("undeclared bucket 'Crypto'"));
    }

    #[test]
    fn test_reserved_bucket_name() {
        let builder = TargetConfig::builder().bucket(UNASSIGNED_BUCKET, dec!(0), dec!(5));
        assert!(!builder.is_valid());
    }

    #[test]
    fn test_symbol_in_two_buckets() {
        let errors = sample()
            .position("VTI", "Speculation", dec!(1), dec!(2))
            .validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("more than once"));
    }

    #[test]
    fn test_cap_checks() {
        let errors = sample()
            .single_position_cap(dec!(120))
            .bucket_cap("Nope", dec!(5))
            .validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.subject == "single_position_pct"));
        assert!(errors.iter().any(|e| e.subject == "Nope"));
    }

    #[test]
    fn test_target_outside_range() {
        let errors = TargetConfig::builder()
            .bucket_with_target("Cash", dec!(20), dec!(0), dec!(10))
            .validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("outside its range"));
    }

    #[test]
    fn test_multiple_errors_are_collected() {
        let err = TargetConfig::builder()
            .bucket("Core", dec!(70), dec!(60))
            .position("X", "Missing", dec!(1), dec!(2))
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::MultipleConfigErrors(ref v) if v.len() == 2));
    }
}
