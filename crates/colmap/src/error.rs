//! Error types for the colmap library.
//!
//! The mapping engine itself never fails: scoring, auto-apply, validation and
//! substitution all return data. These errors only cover the edges that touch
//! the outside world (reading files, decoding CSV or JSON).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for colmap I/O operations.
#[derive(Debug, Error)]
pub enum MapperError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to sample.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for colmap operations.
pub type Result<T> = std::result::Result<T, MapperError>;
