//! Pipeline that turns raw song preferences into ranked recommendations.
//!
//! This crate provides:
//! - FeatureNormalizer for mapping raw preferences into standardized space
//! - RankingEngine for scoring and ordering the catalog
//! - Recommender, the combined `recommend` operation
//!
//! ## Architecture
//! A request flows through two stages:
//! 1. The normalizer validates the raw payload and standardizes it
//! 2. The ranking engine scans the catalog and keeps the closest songs
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::Dataset;
//! use pipeline::Recommender;
//!
//! let recommender = Recommender::new(Dataset::load_from_files(data_dir)?);
//! let recommendations = recommender.recommend(&raw_preferences)?;
//! for rec in &recommendations {
//!     println!("{} - {} ({})", rec.track_name, rec.artist_name, rec.match_score);
//! }
//! ```

pub mod error;
pub mod link;
pub mod normalizer;
pub mod ranking;
pub mod recommender;

// Re-export main types
pub use error::{RecommendError, Result};
pub use link::search_link;
pub use normalizer::{FeatureNormalizer, RawPreferences};
pub use ranking::{MatchScore, RankingEngine, Recommendation, ScoredEntry, TOP_K};
pub use recommender::Recommender;
