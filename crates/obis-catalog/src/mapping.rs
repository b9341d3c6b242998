//! Local YAML mappings from DOIs to OBIS nodes and institutions.
//!
//! ```yaml
//! products:
//!   - doi: 10.5281/zenodo.1234
//!     obis_nodes: [obis-usa]
//!     institutions: [12345]
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::types::{is_truthy, CatalogResult, MappingEntry, Record};

#[derive(Debug, Default, Deserialize)]
struct MappingFile {
    #[serde(default)]
    products: Option<Vec<MappingEntry>>,
}

/// All mapping entries of a run. Lookups return the first entry for a DOI.
#[derive(Debug, Clone, Default)]
pub struct Mappings {
    entries: Vec<MappingEntry>,
}

impl Mappings {
    pub fn new(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    /// Parse mapping YAML. An empty document yields no mappings.
    pub fn parse(text: &str) -> CatalogResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: Option<MappingFile> = serde_yaml::from_str(text)?;
        let entries = file.and_then(|f| f.products).unwrap_or_default();
        Ok(Self { entries })
    }

    /// Load the mapping file, tolerating its absence.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        if !path.exists() {
            warn!(
                "{} not found, continuing without mappings",
                path.display()
            );
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, doi: &str) -> Option<&MappingEntry> {
        self.entries
            .iter()
            .find(|m| m.doi.as_deref() == Some(doi))
    }

    /// Copy the DOI's organizational tags onto a record. A DOI without a
    /// mapping leaves the record untouched.
    pub fn annotate(&self, doi: &str, record: &mut Record) {
        let Some(mapping) = self.find(doi) else {
            return;
        };
        if let Some(nodes) = mapping.obis_nodes.as_ref().filter(|v| is_truthy(v)) {
            record.insert("obis_nodes".to_string(), nodes.clone());
        }
        if let Some(institutions) = mapping.institutions.as_ref().filter(|v| is_truthy(v)) {
            record.insert("institutions".to_string(), institutions.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"
products:
  - doi: 10.5281/zenodo.1234
    obis_nodes:
      - obis-usa
      - eurobis
    institutions: [12345]
  - doi: 10.5281/zenodo.9999
    obis_nodes: []
"#;

    #[test]
    fn test_parse_products() {
        let mappings = Mappings::parse(SAMPLE).unwrap();
        assert_eq!(mappings.len(), 2);
        let entry = mappings.find("10.5281/zenodo.1234").unwrap();
        assert_eq!(entry.obis_nodes, Some(json!(["obis-usa", "eurobis"])));
        assert_eq!(entry.institutions, Some(json!([12345])));
    }

    #[test]
    fn test_annotate_attaches_tags() {
        let mappings = Mappings::parse(SAMPLE).unwrap();
        let mut record = Record::new();
        mappings.annotate("10.5281/zenodo.1234", &mut record);
        assert_eq!(record["obis_nodes"], json!(["obis-usa", "eurobis"]));
        assert_eq!(record["institutions"], json!([12345]));
    }

    #[test]
    fn test_annotate_skips_empty_tags() {
        let mappings = Mappings::parse(SAMPLE).unwrap();
        let mut record = Record::new();
        mappings.annotate("10.5281/zenodo.9999", &mut record);
        assert!(record.is_empty());
    }

    #[test]
    fn test_entry_without_doi_is_ignored() {
        let mappings = Mappings::parse(
            "products:\n  - obis_nodes: [draft]\n  - doi: 10.5281/zenodo.1234\n    obis_nodes: [obis-usa]\n",
        )
        .unwrap();
        assert_eq!(mappings.len(), 2);
        let mut record = Record::new();
        mappings.annotate("10.5281/zenodo.1234", &mut record);
        assert_eq!(record["obis_nodes"], json!(["obis-usa"]));
        assert!(mappings.find("").is_none());
    }

    #[test]
    fn test_unmapped_doi() {
        let mappings = Mappings::parse(SAMPLE).unwrap();
        let mut record = Record::new();
        mappings.annotate("10.1/unknown", &mut record);
        assert!(record.is_empty());
    }

    #[test]
    fn test_empty_and_keyless_documents() {
        assert!(Mappings::parse("").unwrap().is_empty());
        assert!(Mappings::parse("other: 1\n").unwrap().is_empty());
        assert!(Mappings::parse("products:\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let mappings = Mappings::load(&dir.path().join("mappings.yaml")).unwrap();
        assert!(mappings.is_empty());
    }
}
