//! # Geometry Errors

use thiserror::Error;

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Geometry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Malformed well-known text
    #[error("WKT parse failure: {0}")]
    Parse(String),
}
