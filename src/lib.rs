//! geofilter - spatial and attribute filtering for feature collections
//!
//! A predicate model over feature attributes and geometry, a feature
//! store that evaluates it, GeoJSON dataset I/O, and a demo HTTP server
//! with blocking/streaming download endpoints.

pub mod cli;
pub mod feature;
pub mod filter;
pub mod geometry;
pub mod http_server;
pub mod store;
pub mod transfer;
