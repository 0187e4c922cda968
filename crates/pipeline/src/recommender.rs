//! The recommend operation: normalize, then rank.

use crate::error::Result;
use crate::normalizer::{FeatureNormalizer, RawPreferences};
use crate::ranking::{RankingEngine, Recommendation};
use data_loader::{Catalog, Dataset};
use std::sync::Arc;
use tracing::debug;

/// Immutable snapshot of everything needed to serve requests.
///
/// Built once from a loaded `Dataset`; every call to `recommend` is an
/// independent, side-effect-free computation over it, so a single instance
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct Recommender {
    normalizer: FeatureNormalizer,
    engine: RankingEngine,
}

impl Recommender {
    pub fn new(dataset: Dataset) -> Self {
        let Dataset { catalog, params } = dataset;
        Self {
            normalizer: FeatureNormalizer::new(Arc::new(params)),
            engine: RankingEngine::new(Arc::new(catalog)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.engine.catalog()
    }

    pub fn normalizer(&self) -> &FeatureNormalizer {
        &self.normalizer
    }

    /// Top recommendations for a raw preference payload.
    ///
    /// # Errors
    /// `InvalidInput` if any of the 8 features is missing or not finite.
    pub fn recommend(&self, raw: &RawPreferences) -> Result<Vec<Recommendation>> {
        let query = self.normalizer.normalize(raw)?;
        debug!("Standardized query: {:?}", query.values());
        Ok(self.engine.recommend(&query))
    }
}
