//! # Data Loader Crate
//!
//! This crate loads and validates the song dataset the recommender ranks.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Feature, FeatureVector, CatalogEntry, Catalog,
//!   NormalizationParams, Dataset)
//! - **parser**: Parse the exported JSON files into Rust structs
//! - **index**: Load a whole dataset directory and validate it
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Dataset, Feature};
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(Path::new("data"))?;
//!
//! let first = dataset.catalog.get(0).unwrap();
//! println!("{} by {} has tempo {}", first.title, first.artist,
//!     dataset.params.destandardize(Feature::Bpm, first.features[Feature::Bpm]));
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{CATALOG_FILE, SCALER_FILE};
pub use types::{
    Catalog,
    CatalogEntry,
    Dataset,
    Feature,
    FeatureRange,
    FeatureVector,
    NormalizationParams,
};
