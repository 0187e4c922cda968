//! Ranking Engine - nearest songs in standardized feature space
//!
//! ## Algorithm
//! 1. Compute the Euclidean distance from the query to every catalog entry
//! 2. Sort ascending by distance; ties keep catalog order (stable sort)
//! 3. Keep the first `TOP_K`
//! 4. Turn each survivor into a `Recommendation` with a match score and link
//!
//! The catalog is small (low thousands of songs), so a full linear scan per
//! request is fine. The scan runs on the calling thread.

use crate::link::search_link;
use data_loader::{Catalog, CatalogEntry, FeatureVector};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of recommendations returned per request
pub const TOP_K: usize = 5;

// =============================================================================
// Match Score
// =============================================================================

/// Display heuristic derived from distance: `max(0, 100 - round(distance * 10))`.
///
/// Not a probability. Always in `[0, 100]`, and 0 for anything at distance
/// 10 or beyond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchScore(u8);

impl MatchScore {
    pub fn from_distance(distance: f64) -> Self {
        let penalty = (distance * 10.0).round();
        Self((100.0 - penalty).clamp(0.0, 100.0) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Scored entries and output records
// =============================================================================

/// A catalog entry paired with its distance to the query
#[derive(Debug, Clone, Copy)]
pub struct ScoredEntry<'a> {
    /// Position of the entry in the catalog
    pub position: usize,
    pub entry: &'a CatalogEntry,
    pub distance: f64,
}

impl ScoredEntry<'_> {
    pub fn match_score(&self) -> MatchScore {
        MatchScore::from_distance(self.distance)
    }

    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            track_name: self.entry.title.clone(),
            artist_name: self.entry.artist.clone(),
            year: self.entry.year,
            spotify_link: search_link(&self.entry.title, &self.entry.artist),
            match_score: self.match_score().to_string(),
            distance: self.distance,
        }
    }
}

/// Final recommendation returned to the caller.
///
/// Serializes to the record shape clients consume:
/// `{"track_name", "artist_name", "year", "spotify_link", "match_score"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub track_name: String,
    pub artist_name: String,
    pub year: u16,
    pub spotify_link: String,
    /// Integer percentage, e.g. `"87%"`
    pub match_score: String,
    /// Raw distance the score was derived from
    #[serde(skip)]
    pub distance: f64,
}

// =============================================================================
// Ranking Engine
// =============================================================================

/// Ranks the catalog against a standardized query vector.
///
/// Holds a shared, read-only catalog; it never mutates it.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    catalog: Arc<Catalog>,
}

impl RankingEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Distance from the query to every entry, in catalog order
    pub fn score_all(&self, query: &FeatureVector) -> Vec<ScoredEntry<'_>> {
        self.catalog
            .entries()
            .iter()
            .enumerate()
            .map(|(position, entry)| ScoredEntry {
                position,
                entry,
                distance: entry.features.euclidean_distance(query),
            })
            .collect()
    }

    /// The `TOP_K` closest entries, closest first.
    ///
    /// Equidistant entries keep their relative catalog order. An empty
    /// catalog yields an empty result.
    #[instrument(skip(self, query), fields(catalog_size = self.catalog.len()))]
    pub fn rank(&self, query: &FeatureVector) -> Vec<ScoredEntry<'_>> {
        let mut scored = self.score_all(query);

        // `sort_by` is stable, which is what breaks ties by catalog order
        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(TOP_K);

        debug!(
            "Ranked {} songs, closest distance {:?}",
            self.catalog.len(),
            scored.first().map(|s| s.distance)
        );
        scored
    }

    /// Rank and convert to output records
    pub fn recommend(&self, query: &FeatureVector) -> Vec<Recommendation> {
        self.rank(query)
            .iter()
            .map(ScoredEntry::to_recommendation)
            .collect()
    }
}
