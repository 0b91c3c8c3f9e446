//! Error types for file collaborators.

use std::path::PathBuf;

use ballast_core::EngineError;
use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading exports or thesis documents.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// No line starting with `Symbol,` was found.
    #[error("Could not find header row starting with 'Symbol,' in the positions export")]
    HeaderNotFound,

    /// A data line could not be parsed as CSV.
    #[error("Malformed positions row {line}: {source}")]
    Csv {
        /// 1-based line number in the export.
        line: usize,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Normalized holdings violate an engine invariant.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl FileError {
    /// Creates an IO error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
