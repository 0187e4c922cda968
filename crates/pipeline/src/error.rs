//! Error types for the recommendation pipeline.

use data_loader::DataLoadError;
use thiserror::Error;

/// Why a recommendation request could not be served
#[derive(Error, Debug)]
pub enum RecommendError {
    /// A raw preference value is missing or not a finite number.
    /// The caller sent bad input; nothing is wrong with the dataset.
    #[error("Invalid input for '{feature}': {reason}")]
    InvalidInput { feature: String, reason: String },

    /// The catalog or normalization parameters are unusable.
    /// No request can be served until the data is corrected.
    #[error("Configuration error: {0}")]
    Configuration(#[from] DataLoadError),
}

impl RecommendError {
    /// True for errors the client caused and can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, RecommendError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
