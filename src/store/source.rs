//! Feature source abstraction and paged queries

use crate::feature::{Feature, FeatureType};
use crate::filter::Predicate;

use super::errors::StoreResult;

/// A paged, filtered retrieval
///
/// A query without an explicit filter matches everything, the behavior
/// the original harness gets from an empty filter expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Filter applied to every feature
    pub predicate: Predicate,
    /// Number of matching features skipped before the first returned one
    pub start_index: usize,
    /// Maximum number of features returned (unbounded when absent)
    pub max_features: Option<usize>,
}

impl Query {
    /// Query with a filter, no paging
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            start_index: 0,
            max_features: None,
        }
    }

    /// Query matching every feature
    pub fn all() -> Self {
        Self::new(Predicate::MatchAll)
    }

    /// Sets the start index
    pub fn with_offset(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// Sets the page size
    pub fn with_limit(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }
}

/// Supplies features and evaluates predicates against them
pub trait FeatureSource {
    /// Schema introspection
    fn schema(&self) -> &FeatureType;

    /// Features matching the query, in stored order, paged
    fn query(&self, query: &Query) -> StoreResult<Vec<Feature>>;

    /// Number of features matching the predicate
    fn count(&self, predicate: &Predicate) -> StoreResult<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = Query::all().with_offset(10).with_limit(5);
        assert_eq!(query.predicate, Predicate::MatchAll);
        assert_eq!(query.start_index, 10);
        assert_eq!(query.max_features, Some(5));
    }

    #[test]
    fn test_query_defaults() {
        let query = Query::new(Predicate::MatchNone);
        assert_eq!(query.start_index, 0);
        assert_eq!(query.max_features, None);
    }
}
