//! OBIS products catalog — harvest registry listings and schema.org product
//! metadata into JSON files for the catalog's static site.

pub mod config;
pub mod enrich;
pub mod harvest;
pub mod http;
pub mod jsonld;
pub mod mapping;
pub mod product;
pub mod registry;
pub mod store;
pub mod types;
pub mod whitelist;

pub use config::CatalogConfig;
pub use harvest::{HarvestOptions, Harvester};
pub use http::HttpClient;
pub use mapping::Mappings;
pub use registry::Listing;
pub use types::*;
pub use whitelist::load_whitelist;
