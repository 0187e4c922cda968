//! Dataset loading and validation.
//!
//! This module builds a `Dataset` from the exported files:
//! - Parse the catalog and the normalization parameters (in parallel)
//! - Validate every catalog entry carries finite feature values
//! - Report data oddities that don't prevent serving

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// File name of the song catalog inside the data directory
pub const CATALOG_FILE: &str = "spotify_data.json";

/// File name of the normalization parameters inside the data directory
pub const SCALER_FILE: &str = "scaler_params.json";

impl Dataset {
    /// Load the catalog and normalization parameters from a directory
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Build the catalog
    /// 3. Validate data integrity
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading song dataset from {:?}", data_dir);
        let start = Instant::now();

        let catalog_path = data_dir.join(CATALOG_FILE);
        let scaler_path = data_dir.join(SCALER_FILE);

        // The two files are independent, so read them side by side
        let (entries, params) = rayon::join(
            || parser::parse_catalog(&catalog_path),
            || parser::parse_scaler_params(&scaler_path),
        );
        let entries = entries?;
        let params = params?;

        let catalog = Catalog::from_entries(entries)?;
        catalog.report_duplicates();
        catalog.report_untitled();

        info!(
            "Loaded {} songs and {} normalization parameters in {:?}",
            catalog.len(),
            Feature::COUNT,
            start.elapsed()
        );
        Ok(Dataset::new(catalog, params))
    }

    /// Get counts for debugging/validation: (songs, features)
    pub fn counts(&self) -> (usize, usize) {
        (self.catalog.len(), Feature::COUNT)
    }
}

impl Catalog {
    /// Validate data integrity
    ///
    /// Every entry must carry a finite value for every feature; a NaN here
    /// would make distances unordered.
    pub fn validate(&self) -> Result<()> {
        for (position, entry) in self.entries.iter().enumerate() {
            if let Some(feature) = entry.features.first_non_finite() {
                return Err(DataLoadError::InvalidValue {
                    field: format!("song #{} ('{}').{}", position, entry.title, feature),
                    value: entry.features[feature].to_string(),
                });
            }
        }
        Ok(())
    }

    /// Songs that repeat an earlier title and artist, in catalog order
    pub fn duplicates(&self) -> Vec<&CatalogEntry> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|entry| !seen.insert((entry.title.as_str(), entry.artist.as_str())))
            .collect()
    }

    /// Log songs that appear more than once under the same title and artist.
    ///
    /// Duplicates are legitimate in the source charts (re-entries), so they
    /// are kept; this only surfaces them.
    pub fn report_duplicates(&self) -> usize {
        let duplicates = self.duplicates();
        for entry in &duplicates {
            warn!("Duplicate catalog entry: '{}' by {}", entry.title, entry.artist);
        }
        duplicates.len()
    }

    /// Log songs whose title is empty or blank. They still rank normally.
    pub fn report_untitled(&self) -> usize {
        let mut count = 0;
        for (position, entry) in self.entries.iter().enumerate() {
            if entry.title.trim().is_empty() {
                warn!("Song #{} by {} has an empty title", position, entry.artist);
                count += 1;
            }
        }
        count
    }
}
