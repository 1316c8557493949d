//! Catalog Config

use clap::Args;

/// Catalog workflow settings.
#[derive(Debug, Clone, Args)]
pub struct CatalogConfig {
    /// Random draws before HSN generation gives up
    #[arg(long, env = "MAX_HSN_ATTEMPTS", default_value_t = 32)]
    pub max_hsn_attempts: u32,

    /// Bucket holding product photos
    #[arg(long, env = "PHOTO_BUCKET", default_value = "product-images")]
    pub photo_bucket: String,
}
