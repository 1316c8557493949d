//! App Context

use std::sync::Arc;

use karat::pricing::PricingRates;
use thiserror::Error;

use crate::{
    backend::{BackendError, SupabaseClient},
    camera::{Camera, CaptureFlow},
    catalog::{Catalog, CatalogSettings},
    config::AppConfig,
    domain::{
        image_codes::{ImageCodesService, RestImageCodesService},
        products::{ProductsService, RestProductsService},
        storage::{RestStorageService, StorageService},
    },
    labels::{LabelAssets, LabelPrinter},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build backend client")]
    Backend(#[source] BackendError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub image_codes: Arc<dyn ImageCodesService>,
    pub storage: Arc<dyn StorageService>,
    pub catalog: Catalog,
    pub labels: LabelPrinter,
    pub rates: PricingRates,
    pub photo_bucket: String,
    pub print_command: Option<String>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let client = SupabaseClient::new(&config.backend).map_err(AppInitError::Backend)?;

        let products: Arc<dyn ProductsService> = Arc::new(RestProductsService::new(client.clone()));
        let image_codes: Arc<dyn ImageCodesService> =
            Arc::new(RestImageCodesService::new(client.clone()));
        let storage: Arc<dyn StorageService> = Arc::new(RestStorageService::new(client));

        let catalog = Catalog::new(
            Arc::clone(&products),
            Arc::clone(&image_codes),
            Arc::clone(&storage),
            CatalogSettings::from(&config.catalog),
        );

        let labels = LabelPrinter::new(Arc::clone(&storage), LabelAssets::from(&config.labels));

        Ok(Self {
            products,
            image_codes,
            storage,
            catalog,
            labels,
            rates: config.pricing.rates(),
            photo_bucket: config.catalog.photo_bucket.clone(),
            print_command: config
                .labels
                .print_command
                .clone()
                .filter(|command| !command.trim().is_empty()),
        })
    }

    /// Capture flow storing stills from `camera`.
    #[must_use]
    pub fn capture_flow(&self, camera: Arc<dyn Camera>) -> CaptureFlow {
        CaptureFlow::new(
            camera,
            Arc::clone(&self.storage),
            Arc::clone(&self.image_codes),
            self.photo_bucket.clone(),
        )
    }
}
