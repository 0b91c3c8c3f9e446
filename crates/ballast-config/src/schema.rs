//! On-disk target file schema.
//!
//! ```json
//! {
//!   "strategy_name": "Core and Satellite",
//!   "buckets": {
//!     "Core": { "target_total_pct": [55, 65], "positions": { "VTI": [40, 45] } },
//!     "Speculation": { "target_pct": 8, "target_total_pct": [5, 10], "positions": {} }
//!   },
//!   "hard_caps": { "single_position_pct": 12, "bucket_pct": { "Speculation": 10 } },
//!   "alias_map": { "BRKB": "BRK.B" },
//!   "cash_symbols": ["SPAXX**", "FDRXX**"]
//! }
//! ```

use std::collections::BTreeMap;

use ballast_core::{EngineResult, TargetConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::normalizer::NormalizerSettings;
use crate::ordered::OrderedMap;

/// Bucket whose cap may be given with the legacy `speculation_bucket_pct` key.
pub const SPECULATION_BUCKET: &str = "Speculation";

/// Cap applied to the speculation bucket when none is configured.
pub const DEFAULT_SPECULATION_CAP: Decimal = dec!(10);

/// A `[low, high]` pair in percent.
pub type RangeSpec = [Decimal; 2];

/// A bucket entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BucketSpec {
    /// Point target; defaults to the range midpoint.
    #[serde(default)]
    pub target_pct: Option<Decimal>,

    /// Soft range for the whole bucket.
    pub target_total_pct: RangeSpec,

    /// Symbol ranges, in display order.
    #[serde(default)]
    pub positions: OrderedMap<RangeSpec>,
}

/// The `hard_caps` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HardCapsSpec {
    /// Single-position ceiling.
    #[serde(default)]
    pub single_position_pct: Option<Decimal>,

    /// Per-bucket ceilings.
    #[serde(default)]
    pub bucket_pct: BTreeMap<String, Decimal>,

    /// Legacy spelling of `bucket_pct.Speculation`.
    #[serde(default)]
    pub speculation_bucket_pct: Option<Decimal>,
}

/// The whole target file.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetsFile {
    /// Report title.
    #[serde(default)]
    pub strategy_name: Option<String>,

    /// Buckets in display order.
    pub buckets: OrderedMap<BucketSpec>,

    /// Hard caps.
    #[serde(default)]
    pub hard_caps: HardCapsSpec,

    /// Raw export symbol to canonical symbol.
    #[serde(default)]
    pub alias_map: BTreeMap<String, String>,

    /// Raw export symbols that represent cash.
    #[serde(default)]
    pub cash_symbols: Vec<String>,
}

impl TargetsFile {
    /// Builds and validates the engine configuration.
    ///
    /// # Errors
    ///
    /// Returns the engine's validation error for any inconsistent range or
    /// reference.
    pub fn to_target_config(&self) -> EngineResult<TargetConfig> {
        let mut builder = TargetConfig::builder();
        if let Some(name) = &self.strategy_name {
            builder = builder.strategy_name(name.clone());
        }

        for (name, bucket) in self.buckets.iter() {
            let [low, high] = bucket.target_total_pct;
            builder = match bucket.target_pct {
                Some(target) => builder.bucket_with_target(name, target, low, high),
                None => builder.bucket(name, low, high),
            };
            for (symbol, [low, high]) in bucket.positions.iter() {
                builder = builder.position(symbol, name, *low, *high);
            }
        }

        if let Some(cap) = self.hard_caps.single_position_pct {
            builder = builder.single_position_cap(cap);
        }
        for (bucket, cap) in &self.hard_caps.bucket_pct {
            builder = builder.bucket_cap(bucket.clone(), *cap);
        }

        if builder.has_bucket(SPECULATION_BUCKET) && !builder.has_bucket_cap(SPECULATION_BUCKET) {
            let cap = self
                .hard_caps
                .speculation_bucket_pct
                .unwrap_or(DEFAULT_SPECULATION_CAP);
            builder = builder.bucket_cap(SPECULATION_BUCKET, cap);
        } else if self.hard_caps.speculation_bucket_pct.is_some()
            && !builder.has_bucket(SPECULATION_BUCKET)
        {
            tracing::warn!("speculation_bucket_pct is set but no Speculation bucket is declared");
        }

        builder.build()
    }

    /// Extracts the export normalizer settings.
    #[must_use]
    pub fn normalizer_settings(&self) -> NormalizerSettings {
        NormalizerSettings::new(
            self.alias_map.clone(),
            self.cash_symbols.iter().map(|s| s.trim().to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_core::EngineError;

    fn parse(json: &str) -> TargetsFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_file() {
        let file = parse(r#"{"buckets": {"Core": {"target_total_pct": [55, 65]}}}"#);
        let config = file.to_target_config().unwrap();
        assert_eq!(config.strategy_name(), "Strategy");
        assert_eq!(config.bucket("Core").unwrap().target_pct, dec!(60));
        assert_eq!(config.single_position_cap(), dec!(12));
    }

    #[test]
    fn test_positions_and_caps() {
        let file = parse(
            r#"{
                "strategy_name": "Growth",
                "buckets": {
                    "Core": {"target_pct": 60, "target_total_pct": [55, 65], "positions": {"VTI": [40, 45]}},
                    "Speculation": {"target_total_pct": [5, 10], "positions": {"PLTR": [2, 5]}}
                },
                "hard_caps": {"single_position_pct": 15, "bucket_pct": {"Speculation": 8}}
            }"#,
        );
        let config = file.to_target_config().unwrap();
        assert_eq!(config.strategy_name(), "Growth");
        assert_eq!(config.position("PLTR").unwrap().bucket, "Speculation");
        assert_eq!(config.single_position_cap(), dec!(15));
        assert_eq!(config.bucket_cap("Speculation"), Some(dec!(8)));
    }

    #[test]
    fn test_legacy_speculation_cap() {
        let file = parse(
            r#"{
                "buckets": {"Speculation": {"target_total_pct": [0, 10]}},
                "hard_caps": {"speculation_bucket_pct": 7}
            }"#,
        );
        let config = file.to_target_config().unwrap();
        assert_eq!(config.bucket_cap("Speculation"), Some(dec!(7)));
    }

    #[test]
    fn test_default_speculation_cap() {
        let file = parse(r#"{"buckets": {"Speculation": {"target_total_pct": [0, 10]}}}"#);
        let config = file.to_target_config().unwrap();
        assert_eq!(config.bucket_cap("Speculation"), Some(DEFAULT_SPECULATION_CAP));
    }

    #[test]
    fn test_legacy_cap_without_bucket_is_ignored() {
        let file = parse(
            r#"{"buckets": {"Core": {"target_total_pct": [0, 100]}}, "hard_caps": {"speculation_bucket_pct": 7}}"#,
        );
        let config = file.to_target_config().unwrap();
        assert!(config.hard_caps().max_bucket_pct.is_empty());
    }

    #[test]
    fn test_invalid_range_is_reported() {
        let file = parse(
            r#"{"buckets": {"Conviction": {"target_total_pct": [20, 30], "positions": {"AAPL": [10, 7]}}}}"#,
        );
        let err = file.to_target_config().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { ref subject, .. } if subject == "AAPL"));
    }

    #[test]
    fn test_normalizer_settings() {
        let file = parse(
            r#"{
                "buckets": {},
                "alias_map": {"BRKB": "BRK.B"},
                "cash_symbols": [" SPAXX** "]
            }"#,
        );
        let settings = file.normalizer_settings();
        assert_eq!(settings.alias("BRKB"), Some("BRK.B"));
        assert!(settings.is_cash_symbol("SPAXX**"));
    }
}
