//! OBIS registry listings (nodes and institutes), fetched and stored verbatim.

use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::config::CatalogConfig;
use crate::http::HttpClient;
use crate::store::write_json;
use crate::types::CatalogResult;

/// Which registry listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Nodes,
    Institutes,
}

impl Listing {
    pub fn label(self) -> &'static str {
        match self {
            Listing::Nodes => "nodes",
            Listing::Institutes => "institutes",
        }
    }

    pub fn url(self, config: &CatalogConfig) -> String {
        match self {
            Listing::Nodes => config.nodes_url(),
            Listing::Institutes => config.institutes_url(),
        }
    }

    pub fn path(self, config: &CatalogConfig) -> PathBuf {
        match self {
            Listing::Nodes => config.nodes_path(),
            Listing::Institutes => config.institutes_path(),
        }
    }
}

/// Fetch a listing and return the payload unmodified.
pub async fn fetch_listing(
    client: &HttpClient,
    config: &CatalogConfig,
    listing: Listing,
) -> CatalogResult<Value> {
    let url = listing.url(config);
    info!("Fetching OBIS {} from {url}", listing.label());
    client.get_json(&url).await
}

/// Number of records in a listing payload: the `results` array of an
/// object, or the payload itself when it is an array.
pub fn record_count(payload: &Value) -> usize {
    match payload {
        Value::Object(obj) => obj
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}

/// Fetch a listing and write it to its fixed path, overwriting prior content.
/// Returns the path and the record count.
pub async fn fetch_and_save(
    client: &HttpClient,
    config: &CatalogConfig,
    listing: Listing,
) -> CatalogResult<(PathBuf, usize)> {
    let payload = fetch_listing(client, config, listing).await?;
    let path = listing.path(config);
    write_json(&path, &payload)?;
    let count = record_count(&payload);
    info!("Saved {count} {} to {}", listing.label(), path.display());
    Ok((path, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_count() {
        assert_eq!(record_count(&json!({"total": 2, "results": [{}, {}]})), 2);
        assert_eq!(record_count(&json!([{}, {}, {}])), 3);
        assert_eq!(record_count(&json!({"total": 0})), 0);
        assert_eq!(record_count(&json!("unexpected")), 0);
    }

    #[test]
    fn test_listing_paths() {
        let config = CatalogConfig::default();
        assert!(Listing::Nodes
            .path(&config)
            .ends_with("obis-nodes.json"));
        assert_eq!(Listing::Institutes.url(&config), config.institutes_url());
    }
}
