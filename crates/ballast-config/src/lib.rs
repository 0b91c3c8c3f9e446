//! Ballast Configuration Layer
//!
//! Loads the target allocation file and turns it into a validated
//! [`ballast_core::TargetConfig`]. The same file carries the rules the export
//! normalizer uses to canonicalize symbols.
//!
//! # Formats
//!
//! - `.json` via `serde_json`
//! - `.toml` via `toml`
//!
//! Bucket order in the file is kept as display order.
//!
//! # Example
//!
//! ```rust
//! use ballast_config::LoadedTargets;
//!
//! let loaded = LoadedTargets::from_json_str(r#"{
//!     "strategy_name": "Core and Satellite",
//!     "buckets": {
//!         "Core": { "target_total_pct": [55, 65], "positions": { "VTI": [40, 45] } }
//!     },
//!     "hard_caps": { "single_position_pct": 12 }
//! }"#).unwrap();
//!
//! assert_eq!(loaded.targets.position("VTI").unwrap().bucket, "Core");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod loader;
mod normalizer;
mod ordered;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_targets, ConfigFormat, LoadedTargets};
pub use normalizer::{NormalizerSettings, CASH_SYMBOL};
pub use ordered::OrderedMap;
pub use schema::{
    BucketSpec, HardCapsSpec, RangeSpec, TargetsFile, DEFAULT_SPECULATION_CAP, SPECULATION_BUCKET,
};
