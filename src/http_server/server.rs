//! HTTP server assembly
//!
//! Combines the route modules into one router and runs it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use log::info;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use super::config::ServerConfig;
use super::dataset_routes::{dataset_routes, DatasetState};
use super::download_routes::{download_routes, FilesState};

/// The demo HTTP server
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Assemble the server from config and loaded datasets
    pub fn new(config: ServerConfig, datasets: DatasetState) -> Self {
        let files = FilesState::new(config.files_dir.clone());
        let router = Self::build_router(&config, Arc::new(datasets), Arc::new(files));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(
        config: &ServerConfig,
        datasets: Arc<DatasetState>,
        files: Arc<FilesState>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .nest("/datasets", dataset_routes(datasets))
            .nest("/files", download_routes(files))
            .layer(cors)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until shutdown
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        info!("listening on {addr}");
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
