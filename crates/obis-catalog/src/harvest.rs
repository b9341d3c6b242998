//! Product metadata harvester.
//!
//! For every whitelisted DOI: resolve the landing page, select its product
//! JSON-LD block, attach local tags and helper fields, and store one file
//! per DOI. Failures are confined to the DOI that caused them.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::CatalogConfig;
use crate::http::HttpClient;
use crate::jsonld::select_product;
use crate::mapping::Mappings;
use crate::product::{build_product, safe_id};
use crate::store::save_product;
use crate::types::{CatalogResult, HarvestOutcome, HarvestSummary, Record};

/// Per-run harvester options.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Rewrite every record even if unchanged.
    pub force: bool,
    /// Directory product files are written to.
    pub output_dir: PathBuf,
}

impl HarvestOptions {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            force: false,
            output_dir: config.products_dir(),
        }
    }
}

/// Harvester state for one run.
pub struct Harvester<'a> {
    client: &'a HttpClient,
    config: &'a CatalogConfig,
    mappings: Mappings,
    options: HarvestOptions,
}

impl<'a> Harvester<'a> {
    pub fn new(
        client: &'a HttpClient,
        config: &'a CatalogConfig,
        mappings: Mappings,
        options: HarvestOptions,
    ) -> Self {
        Self {
            client,
            config,
            mappings,
            options,
        }
    }

    /// Resolve a DOI and return its normalized product block, if any.
    pub async fn fetch_product(&self, doi: &str) -> CatalogResult<Option<Record>> {
        let url = self.config.resolve_doi_url(doi);
        let page = self.client.get_html(&url).await?;
        if page.final_url != page.url {
            info!("  Resolved to {}", page.final_url);
        }
        Ok(select_product(&page.body))
    }

    /// Harvest a single DOI.
    pub async fn harvest_one(&self, doi: &str) -> CatalogResult<HarvestOutcome> {
        let Some(block) = self.fetch_product(doi).await? else {
            return Ok(HarvestOutcome::NoStructuredData);
        };

        let id = safe_id(doi);
        let product = build_product(block, doi, &self.mappings);
        save_product(&product, &id, &self.options.output_dir, self.options.force)
    }

    /// Harvest every DOI exactly once, in order, pausing after each.
    pub async fn run(&self, dois: &[String]) -> HarvestSummary {
        let mut summary = HarvestSummary {
            total: dois.len(),
            ..HarvestSummary::default()
        };

        for (i, doi) in dois.iter().enumerate() {
            info!("[{}/{}] Processing {doi}", i + 1, dois.len());

            match self.harvest_one(doi).await {
                Ok(outcome) => {
                    match &outcome {
                        HarvestOutcome::Saved(path) => info!("  Saved: {}", path.display()),
                        HarvestOutcome::Unchanged(path) => {
                            info!("  Skipped (unchanged): {}", path.display())
                        }
                        HarvestOutcome::NoStructuredData => {
                            warn!("  No schema.org found for {doi}")
                        }
                    }
                    summary.record(&outcome);
                }
                Err(e) => {
                    warn!("  Error harvesting {doi}: {e}");
                    summary.failed += 1;
                }
            }

            tokio::time::sleep(self.config.request_delay).await;
        }

        summary
    }
}
