//! Configuration error types.

use std::path::PathBuf;

use ballast_core::EngineError;
use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The target file could not be read.
    #[error("Cannot read target file {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported target file format: {} (expected .json or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The document does not match the target file schema.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The document parsed but describes an invalid allocation.
    #[error(transparent)]
    Invalid(#[from] EngineError),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::UnsupportedFormat(PathBuf::from("targets.yaml"));
        assert!(err.to_string().contains("targets.yaml"));

        let err: ConfigError = EngineError::invalid_config("AAPL", "bad range").into();
        assert!(matches!(err, ConfigError::Invalid(EngineError::InvalidConfig { .. })));
        assert!(err.to_string().contains("AAPL"));
    }
}
