//! JSON output files for the static site.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::product::stable_view;
use crate::types::{CatalogResult, HarvestOutcome, Record};

/// Write a value as pretty-printed UTF-8 JSON, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CatalogResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Path of the product file for a safe id.
pub fn product_path(dir: &Path, safe_id: &str) -> PathBuf {
    dir.join(format!("{safe_id}.json"))
}

/// Read an existing product record, if the file holds a JSON object.
fn read_existing(path: &Path) -> Option<Record> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!("could not read {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(obj)) => Some(obj),
        Ok(_) => None,
        Err(e) => {
            debug!("existing {} is not valid JSON: {e}", path.display());
            None
        }
    }
}

/// Persist a product record. Unless `force` is set, an existing file whose
/// record matches (ignoring volatile fields) is left untouched.
pub fn save_product(
    record: &Record,
    safe_id: &str,
    dir: &Path,
    force: bool,
) -> CatalogResult<HarvestOutcome> {
    let path = product_path(dir, safe_id);

    if !force && path.exists() {
        if let Some(existing) = read_existing(&path) {
            if stable_view(&existing) == stable_view(record) {
                return Ok(HarvestOutcome::Unchanged(path));
            }
        }
    }

    write_json(&path, record)?;
    Ok(HarvestOutcome::Saved(path))
}
