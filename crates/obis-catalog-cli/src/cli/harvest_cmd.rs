//! Harvest schema.org metadata for whitelisted DOIs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use obis_catalog::{load_whitelist, CatalogConfig, HarvestOptions, Harvester, Mappings};

/// Per-run overrides from the command line.
#[derive(Debug, Default)]
pub struct HarvestArgs {
    pub force: bool,
    pub whitelist: Option<PathBuf>,
    pub mappings: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub async fn run(config: &CatalogConfig, args: HarvestArgs) -> Result<()> {
    println!("OBIS Products Catalog - Metadata Harvester");
    println!("{}", "=".repeat(50));
    if args.force {
        println!("FORCE MODE: Re-harvesting all products");
    }

    let whitelist_path = args.whitelist.unwrap_or_else(|| config.whitelist_path());
    let mappings_path = args.mappings.unwrap_or_else(|| config.mappings_path());

    let dois = load_whitelist(&whitelist_path)
        .with_context(|| format!("could not load whitelist {}", whitelist_path.display()))?;
    let mappings = Mappings::load(&mappings_path)
        .with_context(|| format!("could not load mappings {}", mappings_path.display()))?;

    println!("Loaded {} DOIs from whitelist", dois.len());
    println!("Loaded {} mappings\n", mappings.len());

    let mut options = HarvestOptions::from_config(config);
    options.force = args.force;
    if let Some(output) = args.output {
        options.output_dir = output;
    }

    let client = super::client(config)?;
    let harvester = Harvester::new(&client, config, mappings, options);
    let summary = harvester.run(&dois).await;

    println!("\nHarvest complete!");
    println!(
        "  {} saved, {} unchanged, {} without schema.org, {} failed (of {})",
        summary.saved, summary.unchanged, summary.no_data, summary.failed, summary.total
    );
    Ok(())
}
