//! CLI command implementations
//!
//! `run` owns everything main.rs does not: logging setup, argument
//! parsing, config loading, dataset loading and dispatch. The serve
//! command builds the tokio runtime itself so the binary entry point
//! stays synchronous.

use std::path::Path;

use log::{info, warn};
use serde_json::json;

use crate::filter::Predicate;
use crate::http_server::{DatasetState, HttpServer, ServerConfig};
use crate::store::{geojson, FeatureSource, MemoryStore, Query};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse_args().command {
        Command::Serve { config } => serve(&config),
        Command::Query {
            dataset,
            filter,
            filter_file,
            offset,
            limit,
        } => query(&dataset, filter.as_deref(), filter_file.as_deref(), offset, limit),
        Command::Schema { dataset } => schema(&dataset),
    }
}

fn serve(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let datasets = DatasetState::load_dir(&config.datasets_dir)?;

    if !config.files_dir.is_dir() {
        warn!("files directory {} does not exist; downloads will 404", config.files_dir.display());
    }

    let server = HttpServer::new(config, datasets);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}

fn query(
    dataset: &Path,
    filter: Option<&str>,
    filter_file: Option<&Path>,
    offset: usize,
    limit: Option<usize>,
) -> CliResult<()> {
    let store = geojson::read_file(dataset)?;
    let predicate = load_predicate(filter, filter_file)?;
    info!("query on {}: {}", store.schema().name(), predicate);

    let total = store.count(&predicate)?;
    let mut q = Query::new(predicate).with_offset(offset);
    if let Some(limit) = limit {
        q = q.with_limit(limit);
    }
    let features = store.query(&q)?;

    let output = json!({
        "dataset": store.schema().name(),
        "total": total,
        "returned": features.len(),
        "features": features.iter().map(|f| json!({
            "id": f.id,
            "attributes": f.attributes,
            "geometry": f.geometry.as_ref().map(|g| g.to_string()),
        })).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn schema(dataset: &Path) -> CliResult<()> {
    let store = geojson::read_file(dataset)?;
    print_schema(&store);
    Ok(())
}

fn print_schema(store: &MemoryStore) {
    let schema = store.schema();
    let output = json!({
        "name": schema.name(),
        "feature_count": store.len(),
        "fields": schema.fields().iter().map(|f| json!({
            "name": f.name,
            "type": f.field_type.type_name(),
            "required": f.required,
        })).collect::<Vec<_>>(),
    });
    // schema output is the command's result, not a log line
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}

fn load_config(path: &Path) -> CliResult<ServerConfig> {
    if !path.exists() {
        info!("config {} not found, using defaults", path.display());
        return Ok(ServerConfig::default());
    }
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
}

fn load_predicate(filter: Option<&str>, filter_file: Option<&Path>) -> CliResult<Predicate> {
    let text: Option<String> = match (filter, filter_file) {
        (Some(inline), None) => Some(inline.to_string()),
        (None, Some(path)) => Some(std::fs::read_to_string(path)?),
        (None, None) => None,
        (Some(_), Some(_)) => {
            return Err(CliError::Usage(
                "--filter and --filter-file are mutually exclusive".to_string(),
            ))
        }
    };

    match text {
        Some(text) => Ok(serde_json::from_str(&text)?),
        None => Ok(Predicate::MatchAll),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_predicate_defaults_to_match_all() {
        let pred = load_predicate(None, None).unwrap();
        assert_eq!(pred, Predicate::MatchAll);
    }

    #[test]
    fn test_load_predicate_inline() {
        let pred = load_predicate(
            Some(r#"{"kind": "like", "attr": "NAME", "pattern": "%学校"}"#),
            None,
        )
        .unwrap();
        assert_eq!(pred.to_string(), "NAME LIKE '%学校'");
    }

    #[test]
    fn test_load_config_missing_file() {
        let config = load_config(Path::new("/nonexistent/geofilter.json")).unwrap();
        assert_eq!(config.port, ServerConfig::default().port);
    }
}
