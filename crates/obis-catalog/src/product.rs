//! Turning a scraped JSON-LD block into a catalog product record.

use serde_json::Value;

use crate::mapping::Mappings;
use crate::types::{is_truthy, Record};

/// Field holding the filesystem-safe identifier.
pub const SAFE_ID_FIELD: &str = "zenodo_id";
/// Field holding the copied publication date.
pub const PUBLICATION_DATE_FIELD: &str = "publication_date";
/// Fields regenerated on every harvest and ignored when comparing records.
pub const VOLATILE_FIELDS: &[&str] = &[SAFE_ID_FIELD, PUBLICATION_DATE_FIELD];

const FALLBACK_CATEGORY: &str = "Other";

/// Filesystem-safe form of a DOI: path and dot separators become underscores.
pub fn safe_id(doi: &str) -> String {
    doi.replace(['/', '.'], "_")
}

/// Category as a non-empty list. Falls back to `@type`, then to "Other".
pub fn normalize_category(record: &Record) -> Value {
    let candidate = record
        .get("category")
        .filter(|v| is_truthy(v))
        .or_else(|| record.get("@type").filter(|v| is_truthy(v)));

    match candidate {
        Some(Value::Array(items)) => Value::Array(items.clone()),
        Some(Value::String(s)) => Value::Array(vec![Value::String(s.clone())]),
        Some(other) => Value::Array(vec![Value::String(other.to_string())]),
        None => Value::Array(vec![Value::String(FALLBACK_CATEGORY.to_string())]),
    }
}

/// Attach mapping tags and the site helper fields to a selected block.
pub fn build_product(mut record: Record, doi: &str, mappings: &Mappings) -> Record {
    mappings.annotate(doi, &mut record);

    let publication_date = record
        .get("datePublished")
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()));
    record.insert(SAFE_ID_FIELD.to_string(), Value::String(safe_id(doi)));
    record.insert(PUBLICATION_DATE_FIELD.to_string(), publication_date);

    let category = normalize_category(&record);
    record.insert("category".to_string(), category);

    record
}

/// Copy of a record without its volatile fields.
pub fn stable_view(record: &Record) -> Record {
    record
        .iter()
        .filter(|(k, _)| !VOLATILE_FIELDS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_safe_id() {
        assert_eq!(safe_id("10.5281/zenodo.1234"), "10_5281_zenodo_1234");
        assert_eq!(
            safe_id("10.6084/m9.figshare.14102825"),
            "10_6084_m9_figshare_14102825"
        );
    }

    #[test]
    fn test_category_string_is_wrapped() {
        let r = record(json!({"category": "Dataset"}));
        assert_eq!(normalize_category(&r), json!(["Dataset"]));
    }

    #[test]
    fn test_category_list_is_kept() {
        let r = record(json!({"category": ["A", "B"]}));
        assert_eq!(normalize_category(&r), json!(["A", "B"]));
    }

    #[test]
    fn test_category_falls_back_to_type() {
        let r = record(json!({"@type": "SoftwareSourceCode"}));
        assert_eq!(normalize_category(&r), json!(["SoftwareSourceCode"]));

        let r = record(json!({"category": "", "@type": ["Dataset", "CreativeWork"]}));
        assert_eq!(normalize_category(&r), json!(["Dataset", "CreativeWork"]));
    }

    #[test]
    fn test_category_defaults_to_other() {
        let r = record(json!({"name": "Untyped"}));
        assert_eq!(normalize_category(&r), json!(["Other"]));
    }

    #[test]
    fn test_build_product_fields() {
        let block = record(json!({
            "@context": "https://schema.org",
            "@type": "Dataset",
            "name": "Fish counts",
            "datePublished": "2023-05-01"
        }));
        let product = build_product(block, "10.5281/zenodo.1234", &Mappings::default());
        assert_eq!(product["zenodo_id"], json!("10_5281_zenodo_1234"));
        assert_eq!(product["publication_date"], json!("2023-05-01"));
        assert_eq!(product["category"], json!(["Dataset"]));
        assert!(!product.contains_key("obis_nodes"));
    }

    #[test]
    fn test_missing_date_becomes_empty_string() {
        let block = record(json!({"@type": "Dataset"}));
        let product = build_product(block, "10.1/x", &Mappings::default());
        assert_eq!(product["publication_date"], json!(""));
    }

    #[test]
    fn test_stable_view_drops_volatile_fields() {
        let r = record(json!({"name": "x", "zenodo_id": "a", "publication_date": "b"}));
        let stable = stable_view(&r);
        assert_eq!(stable.len(), 1);
        assert!(stable.contains_key("name"));
    }
}
