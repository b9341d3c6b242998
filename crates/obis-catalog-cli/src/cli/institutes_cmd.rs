//! Institute listing enriched with OceanExpert details.

use anyhow::{Context, Result};
use obis_catalog::{enrich, CatalogConfig};

pub async fn run(config: &CatalogConfig) -> Result<()> {
    println!("OBIS Institutes Fetcher");
    println!("{}", "=".repeat(50));

    let client = super::client(config)?;
    let summary = enrich::run(&client, config)
        .await
        .context("could not fetch the OBIS institute listing")?;

    println!(
        "\nSaved {} institutes ({} with OceanExpert details) to {}",
        summary.total,
        summary.enriched,
        summary.output.display()
    );
    Ok(())
}
