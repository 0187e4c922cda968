//! Error types for the data-loader crate.
//!
//! Every variant here is a data-integrity fault: the dataset on disk is
//! unreadable or structurally incomplete. Callers treat them as fatal
//! configuration errors rather than per-request failures.

use thiserror::Error;

/// Errors that can occur while loading and validating the song dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A file wasn't valid JSON or didn't have the expected shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A required feature is absent from a catalog record or from the
    /// normalization parameters
    #[error("Missing feature '{feature}' in {location}")]
    MissingFeature { location: String, feature: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
