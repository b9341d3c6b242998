//! Fetch registry listings and store them verbatim.

use anyhow::Result;
use obis_catalog::registry::fetch_and_save;
use obis_catalog::{CatalogConfig, HttpClient, Listing};
use tracing::warn;

/// Fetch one listing. A failure is reported and nothing is written.
async fn fetch_one(client: &HttpClient, config: &CatalogConfig, listing: Listing) -> bool {
    match fetch_and_save(client, config, listing).await {
        Ok((path, count)) => {
            println!("Saved {count} {} to {}", listing.label(), path.display());
            true
        }
        Err(e) => {
            warn!("Error fetching {}: {e}", listing.label());
            println!("Warning: Could not fetch {} data", listing.label());
            false
        }
    }
}

/// Fetch the node listing.
pub async fn run_nodes(config: &CatalogConfig) -> Result<()> {
    let client = super::client(config)?;
    if fetch_one(&client, config, Listing::Nodes).await {
        println!("\nDone! The site build can now use this data.");
    }
    Ok(())
}

/// Fetch the node and institute listings, each independently.
pub async fn run_registry(config: &CatalogConfig) -> Result<()> {
    println!("OBIS Data Fetcher");
    println!("{}", "=".repeat(50));

    let client = super::client(config)?;
    fetch_one(&client, config, Listing::Nodes).await;
    fetch_one(&client, config, Listing::Institutes).await;

    println!("\nDone! You can now build the site.");
    Ok(())
}
