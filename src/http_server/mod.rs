//! # HTTP Server
//!
//! Demo HTTP surface: dataset query/schema endpoints and the pair of
//! file-download endpoints contrasting blocking and streaming byte
//! copies.

pub mod config;
mod dataset_routes;
mod download_routes;
mod server;

pub use config::ServerConfig;
pub use dataset_routes::{dataset_routes, DatasetState};
pub use download_routes::{download_routes, FilesState};
pub use server::HttpServer;

use serde::Serialize;

/// Error payload shared by every route module
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}
