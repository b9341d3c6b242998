//! Core data types shared by the harvesting pipelines.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

/// A JSON object as scraped or fetched, with field order preserved.
pub type Record = Map<String, Value>;

/// Local association between a DOI and organizational tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingEntry {
    /// Entries without a DOI never match.
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub obis_nodes: Option<Value>,
    #[serde(default)]
    pub institutions: Option<Value>,
}

/// What happened to a single harvested identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutcome {
    /// A record was written (new or changed).
    Saved(PathBuf),
    /// The existing file already held an equivalent record.
    Unchanged(PathBuf),
    /// The landing page carried no eligible JSON-LD block.
    NoStructuredData,
}

/// Counters for one harvester run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub total: usize,
    pub saved: usize,
    pub unchanged: usize,
    pub no_data: usize,
    pub failed: usize,
}

impl HarvestSummary {
    pub fn record(&mut self, outcome: &HarvestOutcome) {
        match outcome {
            HarvestOutcome::Saved(_) => self.saved += 1,
            HarvestOutcome::Unchanged(_) => self.unchanged += 1,
            HarvestOutcome::NoStructuredData => self.no_data += 1,
        }
    }
}

/// Counters for one institute enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub total: usize,
    pub enriched: usize,
    pub output: PathBuf,
}

/// Python-style truthiness for JSON values: null, false, zero and empty
/// strings/arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Errors that can occur while fetching, parsing or persisting catalog data.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),
}

/// Convenience result type.
pub type CatalogResult<T> = Result<T, CatalogError>;
