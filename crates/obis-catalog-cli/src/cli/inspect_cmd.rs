//! Show what JSON-LD a DOI's landing page carries.

use std::path::Path;

use anyhow::{Context, Result};
use obis_catalog::jsonld::describe_blocks;
use obis_catalog::CatalogConfig;

pub async fn run(config: &CatalogConfig, doi: &str, save_html: Option<&Path>) -> Result<()> {
    let client = super::client(config)?;
    let url = config.resolve_doi_url(doi);
    let page = client
        .get_html(&url)
        .await
        .with_context(|| format!("could not fetch {url}"))?;

    println!(
        "Fetched {} bytes from {} (HTTP {})",
        page.body.len(),
        page.final_url,
        page.status
    );

    if let Some(path) = save_html {
        std::fs::write(path, &page.body)
            .with_context(|| format!("could not write {}", path.display()))?;
        println!("Saved to {}", path.display());
    }

    let reports = describe_blocks(&page.body);
    println!("Found {} JSON-LD blocks", reports.len());

    for report in &reports {
        println!("\n--- Block {} ---", report.index);
        if report.not_object {
            println!("Skipped (not an object)");
            continue;
        }
        if let Some(error) = &report.error {
            println!("JSON parse error: {error}");
            continue;
        }
        println!("@type: {}", report.ld_type);
        println!("@context: {}", report.context);
        println!("name: {}...", report.name);
        if report.selected {
            println!("-> selected for harvesting");
        } else if !report.eligible {
            println!("-> skipped");
        }
    }
    Ok(())
}
