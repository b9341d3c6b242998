//! Configuration loading and resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str = "https://api.obis.org";
pub const DEFAULT_DETAIL_URL: &str = "https://oceanexpert.org/api/v1";
pub const DEFAULT_RESOLVER_URL: &str = "https://doi.org";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoints, output locations and pacing for every pipeline.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the OBIS registry API.
    pub registry_url: String,
    /// Base URL of the OceanExpert API.
    pub detail_url: String,
    /// Base URL of the DOI resolver.
    pub resolver_url: String,
    /// Directory all output (and default inputs) live under.
    pub data_dir: PathBuf,
    /// Fixed pause after each per-item request.
    pub request_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            detail_url: DEFAULT_DETAIL_URL.to_string(),
            resolver_url: DEFAULT_RESOLVER_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by any environment variables that are set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            registry_url: resolve_setting(None, "OBIS_API_URL", &defaults.registry_url),
            detail_url: resolve_setting(None, "OCEANEXPERT_API_URL", &defaults.detail_url),
            resolver_url: resolve_setting(None, "DOI_RESOLVER_URL", &defaults.resolver_url),
            data_dir: resolve_data_dir(None),
            request_delay: resolve_delay(None),
            timeout: defaults.timeout,
        }
    }

    pub fn nodes_url(&self) -> String {
        format!("{}/node", self.registry_url.trim_end_matches('/'))
    }

    pub fn institutes_url(&self) -> String {
        format!("{}/institute", self.registry_url.trim_end_matches('/'))
    }

    pub fn institute_detail_url(&self, id: &str) -> String {
        format!(
            "{}/institute/{id}.json",
            self.detail_url.trim_end_matches('/')
        )
    }

    pub fn resolve_doi_url(&self, doi: &str) -> String {
        format!("{}/{doi}", self.resolver_url.trim_end_matches('/'))
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.data_dir.join("obis-nodes.json")
    }

    pub fn institutes_path(&self) -> PathBuf {
        self.data_dir.join("obis-institutes.json")
    }

    pub fn whitelist_path(&self) -> PathBuf {
        self.data_dir.join("whitelist.txt")
    }

    pub fn mappings_path(&self) -> PathBuf {
        self.data_dir.join("mappings.yaml")
    }

    pub fn products_dir(&self) -> PathBuf {
        self.data_dir.join("products")
    }
}

/// Resolve a string setting: explicit value, then environment, then default.
pub fn resolve_setting(explicit: Option<&str>, env_key: &str, default: &str) -> String {
    if let Some(value) = explicit {
        return value.to_string();
    }

    match std::env::var(env_key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Resolve the data directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(env_path) = std::env::var("OBIS_CATALOG_DATA_DIR") {
        if !env_path.trim().is_empty() {
            return PathBuf::from(env_path);
        }
    }

    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Resolve the inter-request delay. Unparsable environment values fall back
/// to the default.
pub fn resolve_delay(explicit_ms: Option<u64>) -> Duration {
    let ms = explicit_ms
        .or_else(|| {
            std::env::var("OBIS_CATALOG_DELAY_MS")
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
        })
        .unwrap_or(DEFAULT_DELAY_MS);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = CatalogConfig::default();
        assert_eq!(config.nodes_url(), "https://api.obis.org/node");
        assert_eq!(config.institutes_url(), "https://api.obis.org/institute");
        assert_eq!(
            config.institute_detail_url("17"),
            "https://oceanexpert.org/api/v1/institute/17.json"
        );
        assert_eq!(
            config.resolve_doi_url("10.5281/zenodo.1234"),
            "https://doi.org/10.5281/zenodo.1234"
        );
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let config = CatalogConfig {
            registry_url: "http://localhost:8080/".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(config.nodes_url(), "http://localhost:8080/node");
    }

    #[test]
    fn test_data_paths() {
        let config = CatalogConfig {
            data_dir: PathBuf::from("/tmp/catalog"),
            ..CatalogConfig::default()
        };
        assert_eq!(
            config.products_dir(),
            PathBuf::from("/tmp/catalog/products")
        );
        assert_eq!(
            config.institutes_path(),
            PathBuf::from("/tmp/catalog/obis-institutes.json")
        );
    }

    #[test]
    fn test_explicit_values_win() {
        assert_eq!(
            resolve_setting(Some("http://mock"), "OBIS_CATALOG_TEST_UNSET_KEY", "x"),
            "http://mock"
        );
        assert_eq!(
            resolve_data_dir(Some(Path::new("out"))),
            PathBuf::from("out")
        );
        assert_eq!(resolve_delay(Some(0)), Duration::ZERO);
    }

    #[test]
    fn test_unset_env_falls_back_to_default() {
        assert_eq!(
            resolve_setting(None, "OBIS_CATALOG_TEST_UNSET_KEY", "fallback"),
            "fallback"
        );
    }
}
