//! Subcommand implementations for the obis-catalog binary.

pub mod fetch_cmd;
pub mod harvest_cmd;
pub mod inspect_cmd;
pub mod institutes_cmd;

use anyhow::Result;
use obis_catalog::{CatalogConfig, HttpClient};

/// Build the shared HTTP client for a run.
pub fn client(config: &CatalogConfig) -> Result<HttpClient> {
    Ok(HttpClient::new(config.timeout)?)
}
