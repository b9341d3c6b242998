//! OBIS products catalog harvesters — entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use obis_catalog::config::{self, CatalogConfig};

mod cli;

#[derive(Parser)]
#[command(
    name = "obis-catalog",
    about = "Fetch OBIS registry data and harvest product metadata for the OBIS products catalog",
    version
)]
struct Cli {
    /// Data directory for inputs and outputs (default: ./data).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Pause after each per-item request, in milliseconds.
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// OBIS registry API base URL.
    #[arg(long, global = true)]
    registry_url: Option<String>,

    /// OceanExpert API base URL.
    #[arg(long, global = true)]
    detail_url: Option<String>,

    /// DOI resolver base URL.
    #[arg(long, global = true)]
    resolver_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the OBIS node listing into obis-nodes.json.
    Nodes,

    /// Fetch the raw OBIS node and institute listings.
    Registry,

    /// Fetch OBIS institutes and enrich them with OceanExpert details.
    Institutes,

    /// Harvest schema.org metadata for every whitelisted DOI.
    Harvest {
        /// Re-write every product even if unchanged.
        #[arg(long)]
        force: bool,

        /// Whitelist file (default: <data-dir>/whitelist.txt).
        #[arg(long)]
        whitelist: Option<PathBuf>,

        /// Mapping file (default: <data-dir>/mappings.yaml).
        #[arg(long)]
        mappings: Option<PathBuf>,

        /// Output directory (default: <data-dir>/products).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the JSON-LD blocks found on a DOI's landing page.
    Inspect {
        /// DOI to resolve, e.g. 10.6084/m9.figshare.14102825
        doi: String,

        /// Also save the fetched HTML to this file.
        #[arg(long)]
        save_html: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

impl Cli {
    fn catalog_config(&self) -> CatalogConfig {
        let defaults = CatalogConfig::default();
        CatalogConfig {
            registry_url: config::resolve_setting(
                self.registry_url.as_deref(),
                "OBIS_API_URL",
                &defaults.registry_url,
            ),
            detail_url: config::resolve_setting(
                self.detail_url.as_deref(),
                "OCEANEXPERT_API_URL",
                &defaults.detail_url,
            ),
            resolver_url: config::resolve_setting(
                self.resolver_url.as_deref(),
                "DOI_RESOLVER_URL",
                &defaults.resolver_url,
            ),
            data_dir: config::resolve_data_dir(self.data_dir.as_deref()),
            request_delay: config::resolve_delay(self.delay_ms),
            timeout: defaults.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.catalog_config();

    let result = match cli.command {
        Commands::Nodes => cli::fetch_cmd::run_nodes(&config).await,
        Commands::Registry => cli::fetch_cmd::run_registry(&config).await,
        Commands::Institutes => cli::institutes_cmd::run(&config).await,
        Commands::Harvest {
            force,
            whitelist,
            mappings,
            output,
        } => {
            let args = cli::harvest_cmd::HarvestArgs {
                force,
                whitelist,
                mappings,
                output,
            };
            cli::harvest_cmd::run(&config, args).await
        }
        Commands::Inspect { doi, save_html } => {
            cli::inspect_cmd::run(&config, &doi, save_html.as_deref()).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "obis-catalog", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
