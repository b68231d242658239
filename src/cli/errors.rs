//! CLI-specific error types
//!
//! Every CLI failure is fatal: main prints the error and exits non-zero.

use thiserror::Error;

use crate::filter::FilterError;
use crate::store::StoreError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset error: {0}")]
    Store(#[from] StoreError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
