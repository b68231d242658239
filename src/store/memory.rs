//! In-memory feature store

use crate::feature::{Feature, FeatureType};
use crate::filter::Predicate;

use super::errors::StoreResult;
use super::evaluator::PredicateEvaluator;
use super::source::{FeatureSource, Query};

/// A feature collection held in memory
///
/// Features keep insertion order; queries page in that order. Inserts
/// validate against the schema, so everything a query sees conforms.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    feature_type: FeatureType,
    features: Vec<Feature>,
}

impl MemoryStore {
    /// Create an empty store for the given feature type
    pub fn new(feature_type: FeatureType) -> Self {
        Self {
            feature_type,
            features: Vec::new(),
        }
    }

    /// Validate and append a feature
    pub fn insert(&mut self, feature: Feature) -> StoreResult<()> {
        self.feature_type.validate(&feature)?;
        self.features.push(feature);
        Ok(())
    }

    /// Validate and append many features
    pub fn insert_all(&mut self, features: impl IntoIterator<Item = Feature>) -> StoreResult<()> {
        for feature in features {
            self.insert(feature)?;
        }
        Ok(())
    }

    /// Total number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// All features in stored order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl FeatureSource for MemoryStore {
    fn schema(&self) -> &FeatureType {
        &self.feature_type
    }

    fn query(&self, query: &Query) -> StoreResult<Vec<Feature>> {
        let matches = self
            .features
            .iter()
            .filter(|f| PredicateEvaluator::matches(f, &query.predicate))
            .skip(query.start_index)
            .take(query.max_features.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(matches)
    }

    fn count(&self, predicate: &Predicate) -> StoreResult<usize> {
        Ok(self
            .features
            .iter()
            .filter(|f| PredicateEvaluator::matches(f, predicate))
            .count())
    }
}
