//! CLI module for geofilter
//!
//! Provides the command-line interface:
//! - serve: load datasets and run the HTTP server
//! - query: one-shot filtered query against a GeoJSON dataset
//! - schema: print a dataset's inferred schema

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
