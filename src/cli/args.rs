//! CLI argument definitions using clap
//!
//! Commands:
//! - geofilter serve --config <path>
//! - geofilter query --dataset <path> [--filter <json> | --filter-file <path>]
//! - geofilter schema --dataset <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// geofilter - spatial and attribute filtering for feature collections
#[derive(Parser, Debug)]
#[command(name = "geofilter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./geofilter.json")]
        config: PathBuf,
    },

    /// Run a single query against a GeoJSON dataset and exit
    Query {
        /// Path to the GeoJSON dataset
        #[arg(long)]
        dataset: PathBuf,

        /// Predicate as inline JSON (serde form)
        #[arg(long, conflicts_with = "filter_file")]
        filter: Option<String>,

        /// Path to a JSON file holding the predicate
        #[arg(long)]
        filter_file: Option<PathBuf>,

        /// Matching features skipped before the first printed one
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of features printed
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print a dataset's schema and exit
    Schema {
        /// Path to the GeoJSON dataset
        #[arg(long)]
        dataset: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
