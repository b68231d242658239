//! # Feature
//!
//! Attribute/geometry records and their schemas.
//!
//! A feature is a JSON attribute map plus an optional geometry; a
//! feature type names the fields, their types and their constraints in
//! declaration order and is what schema introspection hands back.

mod errors;
mod feature;
mod schema;

pub use errors::{SchemaError, SchemaResult};
pub use feature::{Feature, FeatureBuilder};
pub use schema::{FeatureType, FeatureTypeBuilder, FieldDef, FieldType};
