//! Target file loading.

use std::path::Path;

use ballast_core::TargetConfig;

use crate::error::{ConfigError, ConfigResult};
use crate::normalizer::NormalizerSettings;
use crate::schema::TargetsFile;

/// Supported target file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Detects the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A validated target configuration plus the normalizer rules from the same file.
#[derive(Debug, Clone)]
pub struct LoadedTargets {
    /// Engine configuration.
    pub targets: TargetConfig,

    /// Export normalizer rules.
    pub normalizer: NormalizerSettings,
}

impl LoadedTargets {
    /// Parses and validates a document in the given format.
    pub fn parse(source: &str, format: ConfigFormat) -> ConfigResult<Self> {
        let file: TargetsFile = match format {
            ConfigFormat::Json => serde_json::from_str(source)?,
            ConfigFormat::Toml => toml::from_str(source)?,
        };

        Ok(Self {
            targets: file.to_target_config()?,
            normalizer: file.normalizer_settings(),
        })
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        Self::parse(source, ConfigFormat::Json)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Self::parse(source, ConfigFormat::Toml)
    }
}

/// Loads a target file, choosing the parser by extension.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedFormat`] for unknown extensions,
/// [`ConfigError::Io`] if the file cannot be read, and parse or validation
/// errors otherwise.
pub fn load_targets(path: impl AsRef<Path>) -> ConfigResult<LoadedTargets> {
    let path = path.as_ref();
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.into()))?;

    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;

    let loaded = LoadedTargets::parse(&source, format)?;
    tracing::info!(
        path = %path.display(),
        buckets = loaded.targets.buckets().len(),
        positions = loaded.targets.positions().len(),
        "loaded target configuration"
    );
    Ok(loaded)
}
