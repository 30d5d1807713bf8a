//! Error types for the tagging pipeline.
//!
//! Per-document alignment problems (empty input, missing separators, low
//! recall) are not errors: they are reported as a [`Verdict`](crate::outcome::Verdict).
//! This enum only covers the I/O-facing layers around the core.

use std::path::PathBuf;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading inputs or writing training data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed textline XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file could not be read, with the offending path attached
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Corpus directory does not exist or is not a directory
    #[error("Corpus directory not found: {0}")]
    MissingDirectory(PathBuf),
}

impl Error {
    /// Attach the path of the file being read to an error.
    pub fn reading(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::Read {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
