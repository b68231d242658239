//! Dataset HTTP Routes
//!
//! Endpoints for schema introspection and filtered, paged feature
//! queries. The request body carries the predicate in its serde form;
//! there is no textual filter language on this surface.

use std::collections::HashMap;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::feature::Feature;
use crate::filter::Predicate;
use crate::store::{geojson, FeatureSource, MemoryStore, Query, StoreError};

use super::ErrorResponse;

// ==================
// Shared State
// ==================

/// Loaded datasets, keyed by name
pub struct DatasetState {
    datasets: HashMap<String, MemoryStore>,
}

impl DatasetState {
    pub fn new() -> Self {
        Self {
            datasets: HashMap::new(),
        }
    }

    /// Load every `*.geojson` file in a directory
    ///
    /// A missing directory yields an empty state; a malformed dataset is
    /// an error, not a skip.
    pub fn load_dir(dir: &FsPath) -> Result<Self, StoreError> {
        let mut state = Self::new();
        if !dir.is_dir() {
            return Ok(state);
        }
        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .map_err(StoreError::from)?
            .collect::<Result<_, _>>()
            .map_err(StoreError::from)?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("geojson") {
                continue;
            }
            let store = geojson::read_file(&path)?;
            let name = store.schema().name().to_string();
            info!("loaded dataset {} ({} features)", name, store.len());
            state.datasets.insert(name, store);
        }
        Ok(state)
    }

    /// Register a dataset under its schema name
    pub fn insert(&mut self, store: MemoryStore) {
        self.datasets
            .insert(store.schema().name().to_string(), store);
    }

    fn get(&self, name: &str) -> Result<&MemoryStore, StoreError> {
        self.datasets
            .get(name)
            .ok_or_else(|| StoreError::DatasetNotFound(name.to_string()))
    }
}

impl Default for DatasetState {
    fn default() -> Self {
        Self::new()
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct DatasetsListResponse {
    pub datasets: Vec<DatasetSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub feature_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub name: String,
    pub fields: Vec<SchemaFieldResponse>,
}

#[derive(Debug, Serialize)]
pub struct SchemaFieldResponse {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Serde-form predicate; absent means match-all
    pub predicate: Option<Predicate>,
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub dataset: String,
    /// Features matching the predicate before paging
    pub total: usize,
    /// Features in this page
    pub returned: usize,
    pub features: Vec<FeatureResponse>,
}

#[derive(Debug, Serialize)]
pub struct FeatureResponse {
    pub id: String,
    pub attributes: Map<String, Value>,
    /// Geometry rendered as WKT
    pub geometry: Option<String>,
}

impl From<&Feature> for FeatureResponse {
    fn from(feature: &Feature) -> Self {
        Self {
            id: feature.id.clone(),
            attributes: feature.attributes.clone(),
            geometry: feature.geometry.as_ref().map(|g| g.to_string()),
        }
    }
}

// ==================
// Routes
// ==================

/// Create dataset routes
pub fn dataset_routes(state: Arc<DatasetState>) -> Router {
    Router::new()
        .route("/", get(list_datasets_handler))
        .route("/{name}/schema", get(get_schema_handler))
        .route("/{name}/query", post(query_dataset_handler))
        .with_state(state)
}

fn store_error(e: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let code = e.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse::new(e.to_string(), code)),
    )
}

// ==================
// Handlers
// ==================

async fn list_datasets_handler(State(state): State<Arc<DatasetState>>) -> Json<DatasetsListResponse> {
    let mut datasets: Vec<DatasetSummary> = state
        .datasets
        .iter()
        .map(|(name, store)| DatasetSummary {
            name: name.clone(),
            feature_count: store.len(),
        })
        .collect();
    datasets.sort_by(|a, b| a.name.cmp(&b.name));

    Json(DatasetsListResponse {
        total: datasets.len(),
        datasets,
    })
}

async fn get_schema_handler(
    State(state): State<Arc<DatasetState>>,
    Path(name): Path<String>,
) -> Result<Json<SchemaResponse>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.get(&name).map_err(store_error)?;
    let schema = store.schema();

    Ok(Json(SchemaResponse {
        name: schema.name().to_string(),
        fields: schema
            .fields()
            .iter()
            .map(|f| SchemaFieldResponse {
                name: f.name.clone(),
                field_type: f.field_type.type_name().to_string(),
                required: f.required,
            })
            .collect(),
    }))
}

async fn query_dataset_handler(
    State(state): State<Arc<DatasetState>>,
    Path(name): Path<String>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.get(&name).map_err(store_error)?;

    let predicate = request.predicate.unwrap_or(Predicate::MatchAll);
    info!("query on {}: {}", name, predicate);

    let total = store.count(&predicate).map_err(store_error)?;

    let mut query = Query::new(predicate).with_offset(request.offset);
    if let Some(limit) = request.limit {
        query = query.with_limit(limit);
    }
    let features = store.query(&query).map_err(store_error)?;

    Ok(Json(QueryResponse {
        dataset: name,
        total,
        returned: features.len(),
        features: features.iter().map(FeatureResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureBuilder, FeatureType, FieldType};
    use crate::geometry::Geometry;

    fn sample_state() -> DatasetState {
        let schema = FeatureType::builder("poi")
            .field("NAME", FieldType::String)
            .field("KIND", FieldType::Int)
            .geometry_field("the_geom", "EPSG:4326")
            .build()
            .unwrap();
        let mut store = MemoryStore::new(schema);
        store
            .insert(
                FeatureBuilder::new()
                    .id("fid-1")
                    .attribute("NAME", "学校")
                    .attribute("KIND", 160100)
                    .geometry(Geometry::point(108.0, 35.5))
                    .build(),
            )
            .unwrap();

        let mut state = DatasetState::new();
        state.insert(store);
        state
    }

    #[test]
    fn test_get_unknown_dataset() {
        let state = sample_state();
        assert!(matches!(
            state.get("nope"),
            Err(StoreError::DatasetNotFound(_))
        ));
    }

    #[test]
    fn test_feature_response_renders_wkt() {
        let state = sample_state();
        let store = state.get("poi").unwrap();
        let response = FeatureResponse::from(&store.features()[0]);
        assert_eq!(response.geometry.as_deref(), Some("POINT (108 35.5)"));
        assert_eq!(response.id, "fid-1");
    }
}
