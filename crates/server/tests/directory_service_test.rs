//! End-to-end tests: dataset files on disk -> service -> JSON records.

use data_loader::{CATALOG_FILE, Feature, SCALER_FILE};
use pipeline::{RawPreferences, RecommendError};
use serde_json::{Value, json};
use server::{DirectoryLoader, RecommendationService};
use std::fs;
use std::path::Path;

/// Write a dataset whose scaler has mean 50 / scale 25 for every feature
/// (BPM gets mean 120 / scale 30)
fn write_dataset(dir: &Path, songs: &[(&str, &str, f64)]) {
    let mut mean = serde_json::Map::new();
    let mut scale = serde_json::Map::new();
    for feature in Feature::ALL {
        let (m, s) = match feature {
            Feature::Bpm => (120.0, 30.0),
            _ => (50.0, 25.0),
        };
        mean.insert(feature.canonical_name().to_string(), json!(m));
        scale.insert(feature.canonical_name().to_string(), json!(s));
    }
    fs::write(
        dir.join(SCALER_FILE),
        json!({ "mean": mean, "scale": scale }).to_string(),
    )
    .unwrap();

    let records: Vec<Value> = songs
        .iter()
        .map(|(title, artist, z)| {
            let mut record = json!({
                "track_name": title,
                "artist(s)_name": artist,
                "released_year": 2023,
                "streams": 500000000u64,
            });
            for feature in Feature::ALL {
                record[feature.canonical_name()] = json!(z);
            }
            record
        })
        .collect();
    fs::write(dir.join(CATALOG_FILE), Value::Array(records).to_string()).unwrap();
}

fn preferences_at(z: f64) -> RawPreferences {
    Feature::ALL
        .into_iter()
        .map(|f| {
            let raw = match f {
                Feature::Bpm => 120.0 + 30.0 * z,
                _ => 50.0 + 25.0 * z,
            };
            (f.alias().to_string(), raw)
        })
        .collect()
}

#[test]
fn test_recommend_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        dir.path(),
        &[
            ("Far Away", "Band A", 2.0),
            ("Right Here", "Band B", 0.0),
            ("Close By", "Band C", 0.1),
        ],
    );

    let service = RecommendationService::new(DirectoryLoader::new(dir.path()));
    let recs = service.recommend(&preferences_at(0.0)).unwrap();

    let body = json!({ "recommendations": recs });
    let first = &body["recommendations"][0];
    assert_eq!(first["track_name"], "Right Here");
    assert_eq!(first["artist_name"], "Band B");
    assert_eq!(first["year"], 2023);
    assert_eq!(first["match_score"], "100%");
    assert_eq!(
        first["spotify_link"],
        "https://open.spotify.com/search/Right%20Here%20Band%20B"
    );

    // sqrt(8 * 0.1^2) = 0.283 -> 100 - 3
    assert_eq!(body["recommendations"][1]["match_score"], "97%");
    // sqrt(8 * 2^2) = 5.657 -> 100 - 57
    assert_eq!(body["recommendations"][2]["match_score"], "43%");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
}

#[test]
fn test_missing_directory_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = RecommendationService::new(DirectoryLoader::new(dir.path().join("nope")));

    let err = service.warm_up().unwrap_err();
    assert!(matches!(err, RecommendError::Configuration(_)));
}

#[test]
fn test_incomplete_scaler_fails_at_warm_up() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), &[("Song", "Artist", 0.0)]);
    fs::write(
        dir.path().join(SCALER_FILE),
        json!({ "mean": { "bpm": 120.0 }, "scale": { "bpm": 30.0 } }).to_string(),
    )
    .unwrap();

    let service = RecommendationService::new(DirectoryLoader::new(dir.path()));
    let err = service.warm_up().unwrap_err();
    assert!(err.to_string().contains("danceability_%"));
}
