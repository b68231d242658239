//! # Geometry
//!
//! Planar geometry values used by spatial predicates.
//!
//! Geometries are plain coordinate data: points, multipoints, line
//! strings, polygons with holes, and axis-aligned envelopes. All
//! relations (`contains`, `intersects`, `distance`) are computed in the
//! coordinate plane; spatial reference identifiers are carried as opaque
//! strings and never interpreted.

mod errors;
mod geom;
mod relations;
mod units;
pub mod wkt;

pub use errors::{GeometryError, GeometryResult};
pub use geom::{BoundingBox, Coord, Geometry};
pub use units::DistanceUnit;
