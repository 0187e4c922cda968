//! Maps raw user preferences into the catalog's standardized feature space.
//!
//! Users describe what they want in natural units (tempo in BPM, everything
//! else as a 0-100 percentage) under user-facing names like `danceability`.
//! The catalog stores `(x - mean) / scale` under canonical names like
//! `danceability_%`. The normalizer bridges the two.

use crate::error::{RecommendError, Result};
use data_loader::{Feature, FeatureVector, NormalizationParams};
use std::collections::HashMap;
use std::sync::Arc;

/// Raw preference payload: user-facing feature name -> value in natural units
pub type RawPreferences = HashMap<String, f64>;

/// Standardizes raw preference vectors.
///
/// Holds the normalization parameters the catalog was built with; cloning is
/// cheap and shares them.
#[derive(Debug, Clone)]
pub struct FeatureNormalizer {
    params: Arc<NormalizationParams>,
}

impl FeatureNormalizer {
    pub fn new(params: Arc<NormalizationParams>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &NormalizationParams {
        &self.params
    }

    /// Standardize a raw preference vector.
    ///
    /// Every one of the 8 features must be present under its alias and be a
    /// finite number. Missing or non-finite values are rejected with
    /// `InvalidInput`; no default is ever substituted. Keys that don't name a
    /// feature are ignored.
    pub fn normalize(&self, raw: &RawPreferences) -> Result<FeatureVector> {
        let mut standardized = FeatureVector::default();
        for feature in Feature::ALL {
            let value = raw_value(raw, feature)?;
            standardized.set(feature, self.params.standardize(feature, value));
        }
        Ok(standardized)
    }
}

fn raw_value(raw: &RawPreferences, feature: Feature) -> Result<f64> {
    let alias = feature.alias();
    match raw.get(alias) {
        None => Err(RecommendError::InvalidInput {
            feature: alias.to_string(),
            reason: "value is missing".to_string(),
        }),
        Some(value) if !value.is_finite() => Err(RecommendError::InvalidInput {
            feature: alias.to_string(),
            reason: format!("{} is not a finite number", value),
        }),
        Some(value) => Ok(*value),
    }
}
