//! Integration tests for the pipeline.
//!
//! These tests verify that normalization and ranking work together
//! on a realistic dataset.

use data_loader::{Catalog, CatalogEntry, Dataset, Feature, FeatureVector, NormalizationParams};
use pipeline::{RawPreferences, RecommendError, Recommender, TOP_K};

/// Means and scales close to the real chart export
fn chart_params() -> NormalizationParams {
    let mean = FeatureVector::new([122.5, 67.0, 51.0, 64.0, 27.0, 1.6, 18.0, 10.0]);
    let scale = FeatureVector::new([28.0, 14.6, 23.5, 16.5, 26.0, 8.4, 13.7, 9.9]);
    NormalizationParams::new(mean, scale).unwrap()
}

/// Build a catalog entry from natural-unit values, standardizing them the
/// way the export step does
fn song(params: &NormalizationParams, title: &str, raw: [f64; 8]) -> CatalogEntry {
    let mut features = FeatureVector::default();
    for feature in Feature::ALL {
        features.set(feature, params.standardize(feature, raw[feature.index()]));
    }
    CatalogEntry {
        title: title.to_string(),
        artist: format!("{title} Artist"),
        year: 2023,
        streams: Some(1_000_000),
        features,
    }
}

fn create_test_setup() -> Recommender {
    let params = chart_params();
    let entries = vec![
        song(&params, "Club Banger", [128.0, 85.0, 70.0, 88.0, 5.0, 0.0, 12.0, 6.0]),
        song(&params, "Slow Ballad", [72.0, 40.0, 20.0, 30.0, 80.0, 0.0, 10.0, 3.0]),
        song(&params, "Lofi Beat", [85.0, 65.0, 40.0, 35.0, 60.0, 70.0, 9.0, 4.0]),
        song(&params, "Live Rock", [140.0, 45.0, 50.0, 90.0, 2.0, 1.0, 85.0, 8.0]),
        song(&params, "Rap Verse", [95.0, 80.0, 55.0, 65.0, 10.0, 0.0, 12.0, 35.0]),
        song(&params, "Pop Anthem", [120.0, 72.0, 52.0, 70.0, 12.0, 0.0, 10.0, 5.0]),
        song(&params, "Pop Anthem Remix", [124.0, 74.0, 55.0, 72.0, 10.0, 0.0, 11.0, 5.0]),
    ];
    let catalog = Catalog::from_entries(entries).unwrap();
    Recommender::new(Dataset::new(catalog, params))
}

fn preferences(values: [f64; 8]) -> RawPreferences {
    Feature::ALL
        .into_iter()
        .map(|f| (f.alias().to_string(), values[f.index()]))
        .collect()
}

fn score_value(score: &str) -> u32 {
    score.trim_end_matches('%').parse().unwrap()
}

#[test]
fn test_pop_preferences_rank_pop_songs_first() {
    let recommender = create_test_setup();
    let raw = preferences([120.0, 70.0, 50.0, 70.0, 10.0, 0.0, 10.0, 5.0]);

    let recs = recommender.recommend(&raw).unwrap();

    assert_eq!(recs.len(), TOP_K);
    assert_eq!(recs[0].track_name, "Pop Anthem");
    assert_eq!(recs[1].track_name, "Pop Anthem Remix");
    assert!(
        recs.windows(2).all(|w| w[0].distance <= w[1].distance),
        "Results should be sorted by non-decreasing distance"
    );
}

#[test]
fn test_scores_are_bounded_percentages() {
    let recommender = create_test_setup();
    // Deliberately far from everything
    let raw = preferences([200.0, 0.0, 100.0, 0.0, 100.0, 100.0, 100.0, 100.0]);

    let recs = recommender.recommend(&raw).unwrap();
    for rec in &recs {
        assert!(rec.match_score.ends_with('%'));
        assert!(score_value(&rec.match_score) <= 100);
    }
    assert!(recs.iter().any(|r| r.match_score == "0%"));
}

#[test]
fn test_scores_decrease_down_the_list() {
    let recommender = create_test_setup();
    let raw = preferences([90.0, 60.0, 40.0, 40.0, 55.0, 50.0, 10.0, 4.0]);

    let recs = recommender.recommend(&raw).unwrap();
    assert_eq!(recs[0].track_name, "Lofi Beat");
    let scores: Vec<u32> = recs.iter().map(|r| score_value(&r.match_score)).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_recommend_is_idempotent() {
    let recommender = create_test_setup();
    let raw = preferences([130.0, 60.0, 45.0, 80.0, 5.0, 0.0, 60.0, 7.0]);

    let first = recommender.recommend(&raw).unwrap();
    let second = recommender.recommend(&raw).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_feature_never_defaults() {
    let recommender = create_test_setup();
    let mut raw = preferences([120.0, 70.0, 50.0, 70.0, 10.0, 0.0, 10.0, 5.0]);
    raw.remove("instrumentalness");

    match recommender.recommend(&raw) {
        Err(RecommendError::InvalidInput { feature, .. }) => {
            assert_eq!(feature, "instrumentalness")
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_identity_dataset_ranks_raw_values_directly() {
    let entries = vec![
        CatalogEntry {
            title: "A".to_string(),
            artist: "X".to_string(),
            year: 2020,
            streams: None,
            features: FeatureVector::splat(0.0),
        },
        CatalogEntry {
            title: "B".to_string(),
            artist: "Y".to_string(),
            year: 2021,
            streams: None,
            features: {
                let mut v = FeatureVector::splat(0.0);
                v.set(Feature::Bpm, 1.0);
                v
            },
        },
    ];
    let dataset = Dataset::new(
        Catalog::from_entries(entries).unwrap(),
        NormalizationParams::identity(),
    );
    let recommender = Recommender::new(dataset);

    let recs = recommender.recommend(&preferences([0.0; 8])).unwrap();
    let summary: Vec<_> = recs
        .iter()
        .map(|r| (r.track_name.as_str(), r.match_score.as_str()))
        .collect();
    assert_eq!(summary, vec![("A", "100%"), ("B", "90%")]);
}
