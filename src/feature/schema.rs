//! Feature type definitions
//!
//! Supported field types:
//! - string: UTF-8 string, optional max length
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - geometry: geometry column carrying a spatial reference identifier

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::feature::Feature;

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Geometry column; the spatial reference identifier is carried
    /// verbatim and never interpreted
    Geometry { srs: String },
}

impl FieldType {
    /// Returns the type name used by introspection and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Geometry { .. } => "geometry",
        }
    }

    /// True if a JSON value is acceptable for this type
    ///
    /// No coercion: an int field rejects `"42"` and a string field
    /// rejects `42`. Float accepts any number.
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Int => value.is_i64() || value.is_u64(),
            FieldType::Float => value.is_number(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Geometry { .. } => false,
        }
    }
}

/// A named field with its constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether the field must be present and non-null
    pub required: bool,
    /// Maximum string length (string fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// An ordered, named collection of field definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureType {
    name: String,
    fields: Vec<FieldDef>,
}

impl FeatureType {
    /// Start building a feature type
    pub fn builder(name: impl Into<String>) -> FeatureTypeBuilder {
        FeatureTypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The geometry field, if declared
    pub fn geometry_field(&self) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|f| matches!(f.field_type, FieldType::Geometry { .. }))
    }

    /// Attribute name → type name, in declaration order
    pub fn attribute_types(&self) -> Vec<(&str, &'static str)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type.type_name()))
            .collect()
    }

    /// Validate a feature against this type
    ///
    /// Checks required presence, value types and string lengths. Extra
    /// attributes not named by the schema are allowed through; strict
    /// column sets are a storage-engine concern this model does not
    /// take on.
    pub fn validate(&self, feature: &Feature) -> SchemaResult<()> {
        for field in &self.fields {
            if let FieldType::Geometry { .. } = field.field_type {
                if field.required && feature.geometry.is_none() {
                    return Err(SchemaError::MissingField(field.name.clone()));
                }
                continue;
            }

            let value = feature.attribute(&field.name);
            match value {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(SchemaError::MissingField(field.name.clone()));
                    }
                }
                Some(value) => {
                    if !field.field_type.accepts(value) {
                        return Err(SchemaError::TypeMismatch {
                            field: field.name.clone(),
                            expected: field.field_type.type_name(),
                            actual: json_type_name(value).to_string(),
                        });
                    }
                    if let (Some(max), Some(s)) = (field.max_length, value.as_str()) {
                        let length = s.chars().count();
                        if length > max as usize {
                            return Err(SchemaError::TooLong {
                                field: field.name.clone(),
                                length,
                                max_length: max,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fluent feature type construction
///
/// Field order is declaration order. Duplicate names and second
/// geometry fields are rejected at `build`.
#[derive(Debug)]
pub struct FeatureTypeBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl FeatureTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add an optional field
    pub fn field(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.push(name, field_type, false, None)
    }

    /// Add a required field
    pub fn required_field(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.push(name, field_type, true, None)
    }

    /// Add an optional string field with a maximum length
    pub fn string_field(self, name: impl Into<String>, max_length: u32) -> Self {
        self.push(name, FieldType::String, false, Some(max_length))
    }

    /// Add the geometry field
    pub fn geometry_field(self, name: impl Into<String>, srs: impl Into<String>) -> Self {
        self.push(name, FieldType::Geometry { srs: srs.into() }, false, None)
    }

    fn push(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        required: bool,
        max_length: Option<u32>,
    ) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            field_type,
            required,
            max_length,
        });
        self
    }

    pub fn build(self) -> SchemaResult<FeatureType> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyTypeName);
        }

        let mut geometry_field: Option<&str> = None;
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if let FieldType::Geometry { .. } = field.field_type {
                if let Some(first) = geometry_field {
                    return Err(SchemaError::MultipleGeometryFields(
                        first.to_string(),
                        field.name.clone(),
                    ));
                }
                geometry_field = Some(&field.name);
            }
        }

        Ok(FeatureType {
            name: self.name,
            fields: self.fields,
        })
    }
}
