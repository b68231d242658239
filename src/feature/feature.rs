//! Feature records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::geometry::Geometry;

/// A record combining attributes and an optional geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature identifier
    pub id: String,
    /// Attribute values keyed by field name
    pub attributes: Map<String, Value>,
    /// Geometry value, if the feature carries one
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// Create a feature with a generated identifier
    pub fn new(attributes: Map<String, Value>, geometry: Option<Geometry>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), attributes, geometry)
    }

    /// Create a feature with an explicit identifier
    pub fn with_id(
        id: impl Into<String>,
        attributes: Map<String, Value>,
        geometry: Option<Geometry>,
    ) -> Self {
        Self {
            id: id.into(),
            attributes,
            geometry,
        }
    }

    /// Look up an attribute value
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// Builds the attribute map literal-by-literal, the way test fixtures
/// and the GeoJSON loader assemble features.
#[derive(Debug, Default)]
pub struct FeatureBuilder {
    attributes: Map<String, Value>,
    geometry: Option<Geometry>,
    id: Option<String>,
}

impl FeatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn build(self) -> Feature {
        match self.id {
            Some(id) => Feature::with_id(id, self.attributes, self.geometry),
            None => Feature::new(self.attributes, self.geometry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let feature = FeatureBuilder::new()
            .id("fid-1")
            .attribute("name", "高速路")
            .attribute("code", "100116")
            .geometry(Geometry::point(108.0, 34.0))
            .build();

        assert_eq!(feature.id, "fid-1");
        assert_eq!(feature.attribute("name"), Some(&json!("高速路")));
        assert!(feature.geometry.is_some());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = FeatureBuilder::new().build();
        let b = FeatureBuilder::new().build();
        assert_ne!(a.id, b.id);
    }
}
