//! Configuration
//!
//! Every setting can come from a flag, the environment, or a `.env` file.

use clap::Args;

use crate::config::{
    backend::BackendConfig, catalog::CatalogConfig, labels::LabelsConfig, pricing::PricingConfig,
};

pub mod backend;
pub mod catalog;
pub mod labels;
pub mod logging;
pub mod pricing;

pub use logging::{LogFormat, LoggingConfig};

/// Settings for commands that talk to the row and object stores.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Row and object store settings.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Price derivation rates.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Label assets and print surface.
    #[command(flatten)]
    pub labels: LabelsConfig,

    /// Catalog workflow settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,
}

/// Load `.env` into the process environment, if one is present.
pub fn load_dotenv() {
    _ = dotenvy::dotenv();
}
