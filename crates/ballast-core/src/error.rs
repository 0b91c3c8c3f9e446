//! Error types for the allocation engine.
//!
//! Only two conditions are fatal for a run: a portfolio with no value to
//! weigh, and a target configuration that is internally inconsistent.
//! Everything else (unconfigured symbols, empty buckets) is encoded in the
//! evaluation output instead of being raised.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can abort an evaluation run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The holding set is empty or its total market value is zero.
    #[error("Portfolio has no holdings with market value; no report can be produced")]
    EmptyPortfolio,

    /// A single configuration problem.
    #[error("Invalid target configuration for '{subject}': {reason}")]
    InvalidConfig {
        /// The offending symbol, bucket or cap.
        subject: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Several configuration problems found in one validation pass.
    #[error("Invalid target configuration: {}", join_errors(.0))]
    MultipleConfigErrors(Vec<ValidationError>),

    /// A holding that cannot be weighed.
    #[error("Invalid holding '{symbol}': {reason}")]
    InvalidHolding {
        /// The holding symbol.
        symbol: String,
        /// The reason the holding is invalid.
        reason: String,
    },
}

impl EngineError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Symbol, bucket or cap the finding is about.
    pub subject: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns every validation error found, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> EngineResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(EngineError::InvalidConfig {
                    subject: err.subject,
                    reason: err.message,
                })
            }
            _ => Err(EngineError::MultipleConfigErrors(errors)),
        }
    }
}
