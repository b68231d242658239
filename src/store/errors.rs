//! # Store Errors

use thiserror::Error;

use crate::feature::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Feature store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Unsupported geometry: {0}")]
    Geometry(String),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Schema(_) => 400,
            StoreError::InvalidDataset(_) => 400,
            StoreError::Geometry(_) => 400,
            StoreError::DatasetNotFound(_) => 404,
            StoreError::Io(_) => 500,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidDataset(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StoreError::DatasetNotFound("poi".into()).status_code(), 404);
        assert_eq!(StoreError::Io("disk".into()).status_code(), 500);
        assert_eq!(StoreError::InvalidDataset("bad".into()).status_code(), 400);
    }
}
