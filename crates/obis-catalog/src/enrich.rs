//! Institute enrichment: OBIS institutes merged with OceanExpert details.
//!
//! Lookups run one at a time in listing order with a fixed pause after each.
//! A failed lookup keeps the plain registry record, so the output always has
//! one entry per retained institute.

use serde_json::Value;
use tracing::{info, warn};

use crate::config::CatalogConfig;
use crate::http::HttpClient;
use crate::registry::{fetch_listing, Listing};
use crate::store::write_json;
use crate::types::{is_truthy, CatalogError, CatalogResult, EnrichSummary, Record};

/// Key the OceanExpert record is nested under.
pub const DETAIL_KEY: &str = "oceanexpert";

/// Institutes from a registry listing that carry a usable `id`.
pub fn institutes_with_ids(listing: &Value) -> Vec<Record> {
    listing
        .get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(Value::as_object)
                .filter(|inst| inst.get("id").is_some_and(is_truthy))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Institute id as used in the detail URL.
pub fn institute_id(inst: &Record) -> String {
    match inst.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Registry fields plus the detail record under [`DETAIL_KEY`].
pub fn merge_detail(mut inst: Record, detail: Option<Value>) -> Record {
    if let Some(detail) = detail {
        inst.insert(DETAIL_KEY.to_string(), detail);
    }
    inst
}

/// Look up one institute's OceanExpert record. Anything other than a
/// non-empty JSON object counts as a failed lookup.
pub async fn fetch_detail(
    client: &HttpClient,
    config: &CatalogConfig,
    id: &str,
) -> CatalogResult<Value> {
    let url = config.institute_detail_url(id);
    let detail = client.get_json(&url).await?;
    match &detail {
        Value::Object(obj) if !obj.is_empty() => Ok(detail),
        _ => Err(CatalogError::UnexpectedPayload(format!(
            "no institute record in response from {url}"
        ))),
    }
}

/// Enrich institutes in order. Never fails: lookup errors fall back to the
/// registry record.
pub async fn enrich_institutes(
    client: &HttpClient,
    config: &CatalogConfig,
    institutes: Vec<Record>,
) -> Vec<Record> {
    let total = institutes.len();
    let mut enriched = Vec::with_capacity(total);

    for (i, inst) in institutes.into_iter().enumerate() {
        let id = institute_id(&inst);
        let name = inst.get("name").and_then(Value::as_str).unwrap_or("?");
        info!("[{}/{total}] {name} (ID: {id})", i + 1);

        let detail = match fetch_detail(client, config, &id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!("Could not fetch OceanExpert details for {id}: {e}");
                None
            }
        };
        enriched.push(merge_detail(inst, detail));

        tokio::time::sleep(config.request_delay).await;
    }

    enriched
}

/// Fetch the institute listing, enrich it, and write the aggregate file.
/// A failed listing fetch is returned as an error and nothing is written.
pub async fn run(client: &HttpClient, config: &CatalogConfig) -> CatalogResult<EnrichSummary> {
    let listing = fetch_listing(client, config, Listing::Institutes).await?;
    let institutes = institutes_with_ids(&listing);
    info!("Found {} institutes with IDs", institutes.len());

    let enriched = enrich_institutes(client, config, institutes).await;
    let output = config.institutes_path();
    write_json(&output, &enriched)?;

    let summary = EnrichSummary {
        total: enriched.len(),
        enriched: enriched
            .iter()
            .filter(|inst| inst.contains_key(DETAIL_KEY))
            .count(),
        output,
    };
    info!(
        "Saved {} institutes ({} enriched) to {}",
        summary.total,
        summary.enriched,
        summary.output.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_institutes_without_id_are_dropped() {
        let listing = json!({"results": [
            {"id": 1, "name": "A"},
            {"name": "no id"},
            {"id": null, "name": "null id"},
            {"id": 0, "name": "zero id"},
            {"id": "", "name": "empty id"},
            {"id": "42", "name": "B"}
        ]});
        let kept = institutes_with_ids(&listing);
        let names: Vec<_> = kept.iter().map(|i| i["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_empty_listing() {
        assert!(institutes_with_ids(&json!({"results": []})).is_empty());
        assert!(institutes_with_ids(&json!({})).is_empty());
    }

    #[test]
    fn test_institute_id_formatting() {
        let numeric: Record = serde_json::from_value(json!({"id": 1234})).unwrap();
        let text: Record = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(institute_id(&numeric), "1234");
        assert_eq!(institute_id(&text), "abc");
    }

    #[test]
    fn test_merge_detail() {
        let inst: Record =
            serde_json::from_value(json!({"id": 1, "name": "A", "country": "BE"})).unwrap();
        let merged = merge_detail(inst.clone(), Some(json!({"instName": "A full"})));
        assert_eq!(merged["country"], json!("BE"));
        assert_eq!(merged[DETAIL_KEY], json!({"instName": "A full"}));

        let plain = merge_detail(inst, None);
        assert!(!plain.contains_key(DETAIL_KEY));
    }
}
