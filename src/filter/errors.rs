//! # Filter Errors

use thiserror::Error;

/// Result type for predicate construction
pub type FilterResult<T> = Result<T, FilterError>;

/// Predicate construction errors
///
/// All construction failures are invalid arguments: they are raised
/// synchronously, are never retryable, and leave nothing half-built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FilterError {
    /// Shorthand used by the builder surface
    pub fn invalid(msg: impl Into<String>) -> Self {
        FilterError::InvalidArgument(msg.into())
    }
}
