//! # Schema Errors

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema definition and validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Feature type name must not be empty")]
    EmptyTypeName,

    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Multiple geometry fields: {0} and {1}")]
    MultipleGeometryFields(String, String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Type mismatch for field {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: String,
    },

    #[error("Value too long for field {field}: {length} > {max_length}")]
    TooLong {
        field: String,
        length: usize,
        max_length: u32,
    },
}
