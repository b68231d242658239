//! File Download HTTP Routes
//!
//! Two endpoints serving the same files two ways:
//!
//! - `/blocking/{name}` runs the blocking copy loop on a blocking worker
//!   thread, buffers the whole file, and answers once the copy is done.
//! - `/streaming/{name}` reads chunk-by-chunk and hands each chunk to
//!   the response body stream, so the handler's task yields between
//!   chunks and the calling thread is never held for the transfer.
//!
//! Both deliver bytes in file order. An I/O failure is terminal: 404 for
//! a missing file, 500 otherwise, with no partial-completion recovery.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use futures_util::stream;
use log::debug;
use tokio::io::AsyncReadExt;

use crate::transfer::{self, CHUNK_SIZE};

use super::ErrorResponse;

// ==================
// Shared State
// ==================

/// Root directory served by the download endpoints
pub struct FilesState {
    root: PathBuf,
}

impl FilesState {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, (StatusCode, Json<ErrorResponse>)> {
        // single path segment only
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("invalid file name: {name}"),
            ));
        }
        Ok(self.root.join(name))
    }
}

// ==================
// Routes
// ==================

/// Create download routes
pub fn download_routes(state: Arc<FilesState>) -> Router {
    Router::new()
        .route("/blocking/{name}", get(blocking_download_handler))
        .route("/streaming/{name}", get(streaming_download_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn error_response(status: StatusCode, msg: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse::new(msg, status.as_u16())))
}

fn io_error(e: std::io::Error, name: &str) -> (StatusCode, Json<ErrorResponse>) {
    if e.kind() == ErrorKind::NotFound {
        error_response(StatusCode::NOT_FOUND, format!("file not found: {name}"))
    } else {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

fn download_headers(name: &str, length: u64, modified: Option<SystemTime>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    if let Ok(value) = HeaderValue::from_str(&length.to_string()) {
        headers.insert(header::CONTENT_LENGTH, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{name}\"")) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    if let Some(modified) = modified {
        let stamp = DateTime::<Utc>::from(modified)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string();
        if let Ok(value) = HeaderValue::from_str(&stamp) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }
    headers
}

// ==================
// Handlers
// ==================

async fn blocking_download_handler(
    State(state): State<Arc<FilesState>>,
    Path(name): Path<String>,
) -> Result<(HeaderMap, Bytes), (StatusCode, Json<ErrorResponse>)> {
    let path = state.resolve(&name)?;

    let result = tokio::task::spawn_blocking(move || -> std::io::Result<_> {
        let mut file = std::fs::File::open(&path)?;
        let metadata = file.metadata()?;
        let mut buffer = Vec::with_capacity(metadata.len() as usize);
        let copied = transfer::copy_blocking(&mut file, &mut buffer)?;
        Ok((buffer, copied, metadata.modified().ok()))
    })
    .await
    .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let (buffer, copied, modified) = result.map_err(|e| io_error(e, &name))?;
    debug!("blocking download of {name}: {copied} bytes");

    Ok((
        download_headers(&name, copied, modified),
        Bytes::from(buffer),
    ))
}

async fn streaming_download_handler(
    State(state): State<Arc<FilesState>>,
    Path(name): Path<String>,
) -> Result<(HeaderMap, Body), (StatusCode, Json<ErrorResponse>)> {
    let path = state.resolve(&name)?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| io_error(e, &name))?;
    let metadata = file.metadata().await.map_err(|e| io_error(e, &name))?;
    debug!("streaming download of {name}: {} bytes", metadata.len());

    let body = Body::from_stream(stream::try_unfold(file, |mut file| async move {
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            Ok::<_, std::io::Error>(None)
        } else {
            buffer.truncate(n);
            Ok(Some((Bytes::from(buffer), file)))
        }
    }));

    Ok((
        download_headers(&name, metadata.len(), metadata.modified().ok()),
        body,
    ))
}
