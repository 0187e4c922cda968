//! Core domain types for the song catalog.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `Feature`: the fixed set of 8 audio features used for scoring
//! - `FeatureVector`: one value per feature, indexed by `Feature`
//! - `CatalogEntry` / `Catalog`: the immutable song collection
//! - `NormalizationParams`: the mean/scale pair the catalog was standardized with

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

// =============================================================================
// Features
// =============================================================================

/// The audio features a song is scored on.
///
/// Each feature has a canonical name (the key used in the dataset files) and
/// a user-facing alias (the key used in preference payloads). The mapping is
/// fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Bpm,
    Danceability,
    Valence,
    Energy,
    Acousticness,
    Instrumentalness,
    Liveness,
    Speechiness,
}

impl Feature {
    /// Number of features in a vector
    pub const COUNT: usize = 8;

    /// All features, in the column order the catalog was standardized in
    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Bpm,
        Feature::Danceability,
        Feature::Valence,
        Feature::Energy,
        Feature::Acousticness,
        Feature::Instrumentalness,
        Feature::Liveness,
        Feature::Speechiness,
    ];

    /// Position of this feature inside a `FeatureVector`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key used for this feature in `spotify_data.json` and `scaler_params.json`
    pub fn canonical_name(self) -> &'static str {
        match self {
            Feature::Bpm => "bpm",
            Feature::Danceability => "danceability_%",
            Feature::Valence => "valence_%",
            Feature::Energy => "energy_%",
            Feature::Acousticness => "acousticness_%",
            Feature::Instrumentalness => "instrumentalness_%",
            Feature::Liveness => "liveness_%",
            Feature::Speechiness => "speechiness_%",
        }
    }

    /// Key used for this feature in user preference payloads
    pub fn alias(self) -> &'static str {
        match self {
            Feature::Bpm => "bpm",
            Feature::Danceability => "danceability",
            Feature::Valence => "valence",
            Feature::Energy => "energy",
            Feature::Acousticness => "acousticness",
            Feature::Instrumentalness => "instrumentalness",
            Feature::Liveness => "liveness",
            Feature::Speechiness => "speechiness",
        }
    }

    /// Human-readable label, as shown next to the input sliders
    pub fn label(self) -> &'static str {
        match self {
            Feature::Bpm => "Tempo",
            Feature::Danceability => "Danceability",
            Feature::Valence => "Mood",
            Feature::Energy => "Energy",
            Feature::Acousticness => "Acousticness",
            Feature::Instrumentalness => "Instrumentalness",
            Feature::Liveness => "Liveness",
            Feature::Speechiness => "Speechiness",
        }
    }

    /// Natural range of raw user input for this feature (BPM or percentage)
    pub fn raw_range(self) -> (f64, f64) {
        match self {
            Feature::Bpm => (60.0, 200.0),
            _ => (0.0, 100.0),
        }
    }

    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.alias() == alias)
    }

    pub fn from_canonical_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.canonical_name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// One value per `Feature`, stored in `Feature::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector([f64; Feature::COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; Feature::COUNT]) -> Self {
        Self(values)
    }

    /// Vector with every feature set to `value`
    pub fn splat(value: f64) -> Self {
        Self([value; Feature::COUNT])
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.0[feature.index()] = value;
    }

    pub fn values(&self) -> &[f64; Feature::COUNT] {
        &self.0
    }

    /// Iterate `(feature, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// First feature whose value is NaN or infinite, if any
    pub fn first_non_finite(&self) -> Option<Feature> {
        self.iter().find(|(_, v)| !v.is_finite()).map(|(f, _)| f)
    }

    /// Euclidean distance to another vector
    pub fn euclidean_distance(&self, other: &FeatureVector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl Index<Feature> for FeatureVector {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.0[feature.index()]
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A single song with its standardized feature values.
///
/// Entries are built once when the dataset is loaded and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub artist: String,
    pub year: u16,
    /// Total stream count, when the export carried it
    pub streams: Option<u64>,
    /// Standardized (zero-mean, unit-scale) features
    pub features: FeatureVector,
}

/// The ordered collection of songs available for recommendation.
///
/// Order matters: ranking ties are broken by position in the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries, validating every feature value is finite
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest and largest standardized value of every feature.
    ///
    /// Returns `None` for an empty catalog.
    pub fn feature_ranges(&self) -> Option<Vec<FeatureRange>> {
        if self.entries.is_empty() {
            return None;
        }
        let ranges = Feature::ALL
            .into_iter()
            .map(|feature| {
                let (min, max) = self.entries.iter().map(|e| e.features[feature]).fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(min, max), v| (min.min(v), max.max(v)),
                );
                FeatureRange { feature, min, max }
            })
            .collect();
        Some(ranges)
    }
}

/// Observed range of a standardized feature across the catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRange {
    pub feature: Feature,
    pub min: f64,
    pub max: f64,
}

// =============================================================================
// Normalization Parameters
// =============================================================================

/// Mean and scale used when the catalog's features were standardized.
///
/// Construction validates that every feature has a finite mean and a finite,
/// nonzero scale, so a value of this type is always safe to divide by.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationParams {
    mean: FeatureVector,
    scale: FeatureVector,
}

impl NormalizationParams {
    pub fn new(mean: FeatureVector, scale: FeatureVector) -> Result<Self> {
        for (feature, value) in mean.iter() {
            if !value.is_finite() {
                return Err(DataLoadError::InvalidValue {
                    field: format!("mean.{}", feature),
                    value: value.to_string(),
                });
            }
        }
        for (feature, value) in scale.iter() {
            if !value.is_finite() || value == 0.0 {
                return Err(DataLoadError::InvalidValue {
                    field: format!("scale.{}", feature),
                    value: value.to_string(),
                });
            }
        }
        Ok(Self { mean, scale })
    }

    /// Parameters that leave values unchanged (mean 0, scale 1)
    pub fn identity() -> Self {
        Self {
            mean: FeatureVector::splat(0.0),
            scale: FeatureVector::splat(1.0),
        }
    }

    /// Build from name-keyed maps, as stored in `scaler_params.json`.
    ///
    /// Keys are canonical feature names. Extra keys are ignored; a missing key
    /// is a `MissingFeature` error.
    pub fn from_maps(mean: &HashMap<String, f64>, scale: &HashMap<String, f64>) -> Result<Self> {
        let lookup = |map: &HashMap<String, f64>, which: &str| -> Result<FeatureVector> {
            let mut vector = FeatureVector::default();
            for feature in Feature::ALL {
                let value = map.get(feature.canonical_name()).ok_or_else(|| {
                    DataLoadError::MissingFeature {
                        location: format!("normalization parameters ({})", which),
                        feature: feature.canonical_name().to_string(),
                    }
                })?;
                vector.set(feature, *value);
            }
            Ok(vector)
        };

        Self::new(lookup(mean, "mean")?, lookup(scale, "scale")?)
    }

    pub fn mean(&self) -> &FeatureVector {
        &self.mean
    }

    pub fn scale(&self) -> &FeatureVector {
        &self.scale
    }

    /// `(raw - mean) / scale` for one feature
    pub fn standardize(&self, feature: Feature, raw: f64) -> f64 {
        (raw - self.mean[feature]) / self.scale[feature]
    }

    /// Inverse of `standardize`: recover the natural-unit value
    pub fn destandardize(&self, feature: Feature, standardized: f64) -> f64 {
        standardized * self.scale[feature] + self.mean[feature]
    }
}

// =============================================================================
// Dataset - catalog and parameters loaded together
// =============================================================================

/// Everything the recommender needs, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: Catalog,
    pub params: NormalizationParams,
}

impl Dataset {
    pub fn new(catalog: Catalog, params: NormalizationParams) -> Self {
        Self { catalog, params }
    }
}
