//! Parser for the exported dataset files.
//!
//! This module handles the two JSON documents produced by the export step:
//! - spotify_data.json: array of song records with standardized features
//! - scaler_params.json: `{"mean": {...}, "scale": {...}}` keyed by feature name
//!
//! Song records look like:
//! `{"track_name": "...", "artist(s)_name": "...", "released_year": 2023,
//!   "streams": 123, "bpm": 0.41, "danceability_%": -1.2, ...}`

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

/// Song record exactly as it appears in the export.
///
/// Feature columns are collected through `flatten` so a missing or malformed
/// one can be reported by name instead of as a generic serde error.
#[derive(Debug, Deserialize)]
struct RawSong {
    track_name: String,
    #[serde(rename = "artist(s)_name")]
    artist_name: String,
    released_year: u16,
    #[serde(flatten)]
    columns: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawScalerParams {
    mean: HashMap<String, f64>,
    scale: HashMap<String, f64>,
}

/// Read a whole file, mapping "not found" to a dedicated error
fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the song catalog file
pub fn parse_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content = read_file(path)?;
    parse_catalog_str(&content, &file_label(path))
}

/// Parse a song catalog document already held in memory
///
/// `file` is only used to label errors.
pub fn parse_catalog_str(content: &str, file: &str) -> Result<Vec<CatalogEntry>> {
    let records: Vec<RawSong> =
        serde_json::from_str(content).map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| convert_song(record, idx))
        .collect()
}

fn convert_song(mut record: RawSong, idx: usize) -> Result<CatalogEntry> {
    let location = format!("song #{} ('{}')", idx, record.track_name);

    let mut features = FeatureVector::default();
    for feature in Feature::ALL {
        let value = record.columns.get(feature.canonical_name()).ok_or_else(|| {
            DataLoadError::MissingFeature {
                location: location.clone(),
                feature: feature.canonical_name().to_string(),
            }
        })?;
        let value = value.as_f64().ok_or_else(|| DataLoadError::InvalidValue {
            field: format!("{}.{}", location, feature.canonical_name()),
            value: value.to_string(),
        })?;
        features.set(feature, value);
    }

    let streams = match record.columns.remove("streams") {
        None | Some(Value::Null) => None,
        Some(value) => Some(parse_streams(&value).ok_or_else(|| {
            DataLoadError::InvalidValue {
                field: format!("{}.streams", location),
                value: value.to_string(),
            }
        })?),
    };

    Ok(CatalogEntry {
        title: record.track_name,
        artist: record.artist_name,
        year: record.released_year,
        streams,
        features,
    })
}

/// Stream counts are integers, but some exports write them as floats
fn parse_streams(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}

/// Parse the normalization parameters file
pub fn parse_scaler_params(path: &Path) -> Result<NormalizationParams> {
    let content = read_file(path)?;
    parse_scaler_params_str(&content, &file_label(path))
}

/// Parse a normalization parameters document already held in memory
pub fn parse_scaler_params_str(content: &str, file: &str) -> Result<NormalizationParams> {
    let raw: RawScalerParams =
        serde_json::from_str(content).map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;
    NormalizationParams::from_maps(&raw.mean, &raw.scale)
}
