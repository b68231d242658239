//! GeoJSON dataset I/O
//!
//! Reads a FeatureCollection file into a [`MemoryStore`] and writes one
//! back out. GeoJSON is the dataset interchange format here; the schema
//! is inferred from the first feature (attribute names in lexicographic
//! order, all fields optional) since GeoJSON carries no type metadata.
//! The legacy `crs` member names the spatial reference when present;
//! otherwise EPSG:4326, the GeoJSON default.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::feature::{Feature, FeatureType, FieldType};
use crate::geometry::{Coord, Geometry};

use super::errors::{StoreError, StoreResult};
use super::memory::MemoryStore;

const DEFAULT_SRS: &str = "EPSG:4326";

/// Read a GeoJSON FeatureCollection file into a store
pub fn read_file(path: &Path) -> StoreResult<MemoryStore> {
    let bytes = std::fs::read(path)?;
    let root: Value = serde_json::from_slice(&bytes)?;
    read_collection(&root, dataset_name(path))
}

/// Read a parsed GeoJSON FeatureCollection value into a store
pub fn read_collection(root: &Value, name: String) -> StoreResult<MemoryStore> {
    if root["type"] != json!("FeatureCollection") {
        return Err(StoreError::InvalidDataset(
            "root object is not a FeatureCollection".to_string(),
        ));
    }
    let features = root["features"]
        .as_array()
        .ok_or_else(|| StoreError::InvalidDataset("missing features array".to_string()))?;

    let srs = legacy_crs_name(root).unwrap_or_else(|| DEFAULT_SRS.to_string());

    let parsed: Vec<Feature> = features
        .iter()
        .map(parse_feature)
        .collect::<StoreResult<_>>()?;

    let schema = infer_schema(&name, parsed.first(), &srs)?;
    let mut store = MemoryStore::new(schema);
    store.insert_all(parsed)?;
    Ok(store)
}

/// Write a store to a GeoJSON FeatureCollection file
pub fn write_file(store: &MemoryStore, path: &Path) -> StoreResult<()> {
    let features: Vec<Value> = store.features().iter().map(feature_to_value).collect();
    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    let bytes = serde_json::to_vec_pretty(&collection)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

/// Legacy GeoJSON `crs.properties.name`
fn legacy_crs_name(root: &Value) -> Option<String> {
    root.get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

fn parse_feature(value: &Value) -> StoreResult<Feature> {
    if value["type"] != json!("Feature") {
        return Err(StoreError::InvalidDataset(
            "collection entry is not a Feature".to_string(),
        ));
    }

    let attributes = match value.get("properties") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(StoreError::InvalidDataset(
                "feature properties must be an object".to_string(),
            ))
        }
    };

    let geometry = match value.get("geometry") {
        None | Some(Value::Null) => None,
        Some(g) => Some(geometry_from_value(g)?),
    };

    Ok(match value.get("id").and_then(Value::as_str) {
        Some(id) => Feature::with_id(id, attributes, geometry),
        None => Feature::new(attributes, geometry),
    })
}

/// Schema inference from the first feature
///
/// All inferred fields are optional; required-ness is authoring intent
/// GeoJSON cannot express.
fn infer_schema(name: &str, first: Option<&Feature>, srs: &str) -> StoreResult<FeatureType> {
    let mut builder = FeatureType::builder(name);

    if let Some(feature) = first {
        for (key, value) in &feature.attributes {
            let field_type = match value {
                Value::String(_) => FieldType::String,
                Value::Number(n) if n.is_i64() || n.is_u64() => FieldType::Int,
                Value::Number(_) => FieldType::Float,
                Value::Bool(_) => FieldType::Bool,
                Value::Null => FieldType::String,
                other => {
                    return Err(StoreError::InvalidDataset(format!(
                        "unsupported attribute type for field {key}: {}",
                        type_word(other)
                    )))
                }
            };
            builder = builder.field(key.clone(), field_type);
        }
        if feature.geometry.is_some() {
            builder = builder.geometry_field("geometry", srs);
        }
    }

    builder.build().map_err(StoreError::from)
}

fn type_word(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        _ => "scalar",
    }
}

/// GeoJSON geometry object → geometry value
pub fn geometry_from_value(value: &Value) -> StoreResult<Geometry> {
    let kind = value["type"]
        .as_str()
        .ok_or_else(|| StoreError::Geometry("geometry without a type".to_string()))?;
    let coords = &value["coordinates"];

    match kind {
        "Point" => Ok(Geometry::Point(position(coords)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(position_list(coords)?)),
        "LineString" => Ok(Geometry::LineString(position_list(coords)?)),
        "Polygon" => {
            let rings = coords
                .as_array()
                .ok_or_else(|| StoreError::Geometry("polygon without rings".to_string()))?;
            let mut parsed: Vec<Vec<Coord>> = rings
                .iter()
                .map(position_list)
                .collect::<StoreResult<_>>()?;
            if parsed.is_empty() {
                return Err(StoreError::Geometry("polygon without rings".to_string()));
            }
            let exterior = parsed.remove(0);
            Ok(Geometry::Polygon {
                exterior,
                holes: parsed,
            })
        }
        other => Err(StoreError::Geometry(format!(
            "unsupported geometry type: {other}"
        ))),
    }
}

/// Geometry value → GeoJSON geometry object
///
/// Envelopes render as their polygon outline; GeoJSON has no envelope
/// type.
pub fn geometry_to_value(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Point(c) => json!({"type": "Point", "coordinates": [c.x, c.y]}),
        Geometry::MultiPoint(cs) => {
            json!({"type": "MultiPoint", "coordinates": positions(cs)})
        }
        Geometry::LineString(cs) => {
            json!({"type": "LineString", "coordinates": positions(cs)})
        }
        Geometry::Polygon { exterior, holes } => {
            let mut rings = vec![positions(exterior)];
            rings.extend(holes.iter().map(|h| positions(h)));
            json!({"type": "Polygon", "coordinates": rings})
        }
        Geometry::Envelope(b) => {
            json!({"type": "Polygon", "coordinates": [positions(&b.ring())]})
        }
    }
}

fn feature_to_value(feature: &Feature) -> Value {
    json!({
        "type": "Feature",
        "id": feature.id,
        "properties": feature.attributes,
        "geometry": feature.geometry.as_ref().map(geometry_to_value),
    })
}

fn position(value: &Value) -> StoreResult<Coord> {
    let arr = value
        .as_array()
        .filter(|a| a.len() >= 2)
        .ok_or_else(|| StoreError::Geometry("position must be [x, y]".to_string()))?;
    let x = arr[0]
        .as_f64()
        .ok_or_else(|| StoreError::Geometry("position x must be a number".to_string()))?;
    let y = arr[1]
        .as_f64()
        .ok_or_else(|| StoreError::Geometry("position y must be a number".to_string()))?;
    Ok(Coord::new(x, y))
}

fn position_list(value: &Value) -> StoreResult<Vec<Coord>> {
    value
        .as_array()
        .ok_or_else(|| StoreError::Geometry("expected a position list".to_string()))?
        .iter()
        .map(position)
        .collect()
}

fn positions(coords: &[Coord]) -> Vec<Value> {
    coords.iter().map(|c| json!([c.x, c.y])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi_collection() -> Value {
        json!({
            "type": "FeatureCollection",
            "crs": {"type": "name", "properties": {"name": "EPSG:4326"}},
            "features": [
                {
                    "type": "Feature",
                    "id": "fid-1",
                    "properties": {"NAME": "学校", "KIND": 160100},
                    "geometry": {"type": "Point", "coordinates": [108.0, 35.5]}
                },
                {
                    "type": "Feature",
                    "properties": {"NAME": "医院", "KIND": 110304},
                    "geometry": {"type": "Point", "coordinates": [116.4, 39.9]}
                }
            ]
        })
    }

    #[test]
    fn test_read_collection_infers_schema() {
        let store = read_collection(&poi_collection(), "poi".to_string()).unwrap();
        assert_eq!(store.len(), 2);

        let schema = crate::store::FeatureSource::schema(&store);
        assert_eq!(schema.name(), "poi");
        // lexicographic inference order
        assert_eq!(
            schema.attribute_types(),
            vec![("KIND", "int"), ("NAME", "string"), ("geometry", "geometry")]
        );
        let geom_field = schema.geometry_field().unwrap();
        assert_eq!(
            geom_field.field_type,
            FieldType::Geometry {
                srs: "EPSG:4326".to_string()
            }
        );
    }

    #[test]
    fn test_read_preserves_ids_and_generates_missing() {
        let store = read_collection(&poi_collection(), "poi".to_string()).unwrap();
        assert_eq!(store.features()[0].id, "fid-1");
        assert!(!store.features()[1].id.is_empty());
    }

    #[test]
    fn test_rejects_non_collection() {
        let result = read_collection(&json!({"type": "Feature"}), "x".to_string());
        assert!(matches!(result, Err(StoreError::InvalidDataset(_))));
    }

    #[test]
    fn test_rejects_unsupported_geometry() {
        let value = json!({"type": "GeometryCollection", "geometries": []});
        assert!(matches!(
            geometry_from_value(&value),
            Err(StoreError::Geometry(_))
        ));
    }

    #[test]
    fn test_geometry_value_roundtrip() {
        let geoms = [
            Geometry::point(108.0, 35.5),
            Geometry::LineString(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)]),
            Geometry::Polygon {
                exterior: vec![
                    Coord::new(0.0, 0.0),
                    Coord::new(1.0, 0.0),
                    Coord::new(1.0, 1.0),
                    Coord::new(0.0, 0.0),
                ],
                holes: Vec::new(),
            },
        ];
        for geom in geoms {
            let value = geometry_to_value(&geom);
            assert_eq!(geometry_from_value(&value).unwrap(), geom);
        }
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poi.geojson");

        let store = read_collection(&poi_collection(), "poi".to_string()).unwrap();
        write_file(&store, &path).unwrap();

        let reread = read_file(&path).unwrap();
        assert_eq!(reread.len(), store.len());
        assert_eq!(reread.features()[0].id, "fid-1");
        assert_eq!(
            reread.features()[0].attribute("KIND"),
            Some(&json!(160100))
        );
        assert_eq!(reread.features()[0].geometry, store.features()[0].geometry);
    }
}
