//! # Recommendation Service
//!
//! Front door for the request-handling layer. It owns the read-only dataset
//! snapshot and exposes the single `recommend` operation.
//!
//! The snapshot is either injected up front (`from_dataset`) or loaded on
//! first use through a `DatasetLoader`. Lazy loading sits behind a
//! `OnceCell`: when several requests race on a cold service exactly one of
//! them runs the loader and the rest wait for and share its result.
//!
//! A failed load leaves the cell empty, so every following request reports
//! the configuration error (and retries the load) until the data is fixed.

use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::OnceCell;
use tracing::{error, info};

use data_loader::{DataLoadError, Dataset};
use pipeline::{RawPreferences, RecommendError, Recommendation, Recommender, Result};

use crate::loader::DatasetLoader;

/// Serves recommendations from a lazily loaded, immutable snapshot
pub struct RecommendationService {
    loader: Option<Box<dyn DatasetLoader>>,
    snapshot: OnceCell<Arc<Recommender>>,
}

impl RecommendationService {
    /// Create a service that loads its dataset on first use
    pub fn new(loader: impl DatasetLoader + 'static) -> Self {
        Self {
            loader: Some(Box::new(loader)),
            snapshot: OnceCell::new(),
        }
    }

    /// Create a service around an already loaded dataset
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            loader: None,
            snapshot: OnceCell::with_value(Arc::new(Recommender::new(dataset))),
        }
    }

    /// Whether the snapshot has been loaded yet
    pub fn is_loaded(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// Load the dataset now instead of on the first request.
    ///
    /// Lets a process fail at startup on bad data. Returns the catalog size.
    pub fn warm_up(&self) -> Result<usize> {
        Ok(self.snapshot()?.catalog().len())
    }

    /// The shared snapshot, loading it if this is the first call
    pub fn snapshot(&self) -> Result<Arc<Recommender>> {
        self.snapshot
            .get_or_try_init(|| self.load_snapshot())
            .map(Arc::clone)
    }

    fn load_snapshot(&self) -> Result<Arc<Recommender>> {
        let loader = self.loader.as_ref().ok_or_else(|| {
            DataLoadError::ValidationError("no dataset loader configured".to_string())
        })?;

        let start = Instant::now();
        info!("Loading recommendation dataset from {}", loader.describe());
        let dataset = loader.load().map_err(|e| {
            error!("Dataset load failed: {}", e);
            RecommendError::Configuration(e)
        })?;

        info!(
            "Dataset ready: {} songs in {:.2?}",
            dataset.catalog.len(),
            start.elapsed()
        );
        Ok(Arc::new(Recommender::new(dataset)))
    }

    /// Main entry point: recommend songs for a raw preference payload
    ///
    /// # Errors
    /// - `InvalidInput` when a feature is missing or not a finite number
    /// - `Configuration` when the dataset can't be loaded
    pub fn recommend(&self, raw: &RawPreferences) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();

        let recommender = self.snapshot()?;
        let recommendations = recommender.recommend(raw)?;

        info!(
            "Served {} recommendations in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );
        Ok(recommendations)
    }
}
