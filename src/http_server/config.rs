//! HTTP Server Configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Server configuration
///
/// Every field has a serde default, so a partial (or missing) config
/// file works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8750)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (empty means permissive)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory scanned for *.geojson datasets
    #[serde(default = "default_datasets_dir")]
    pub datasets_dir: PathBuf,

    /// Directory served by the download endpoints
    #[serde(default = "default_files_dir")]
    pub files_dir: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8750
}

fn default_datasets_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_files_dir() -> PathBuf {
    PathBuf::from("./files")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            datasets_dir: default_datasets_dir(),
            files_dir: default_files_dir(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
