//! Label Printing
//!
//! Fetches the label assets from the object store, renders, and sends the
//! result to a print surface.

use std::sync::Arc;

use karat::labels::{LabelError, LabelFields, render_label};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::labels::LabelsConfig,
    domain::storage::{StorageService, StorageServiceError},
    print::{PrintError, PrintSurface},
};

#[derive(Debug, Error)]
pub enum LabelPrintError {
    #[error(transparent)]
    Label(#[from] LabelError),

    #[error("failed to fetch label assets: {0}")]
    Assets(#[from] StorageServiceError),

    #[error(transparent)]
    Print(#[from] PrintError),
}

/// Where the label template and font live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAssets {
    pub bucket: String,
    pub template: String,
    pub font: Option<String>,
}

impl Default for LabelAssets {
    fn default() -> Self {
        Self {
            bucket: "labelpdf".to_string(),
            template: "labelfinal.pdf".to_string(),
            font: Some("cpb.ttf".to_string()),
        }
    }
}

impl From<&LabelsConfig> for LabelAssets {
    fn from(config: &LabelsConfig) -> Self {
        Self {
            bucket: config.label_bucket.clone(),
            template: config.label_template.clone(),
            font: config.font_object().map(str::to_string),
        }
    }
}

#[derive(Clone)]
pub struct LabelPrinter {
    storage: Arc<dyn StorageService>,
    assets: LabelAssets,
}

impl LabelPrinter {
    #[must_use]
    pub fn new(storage: Arc<dyn StorageService>, assets: LabelAssets) -> Self {
        Self { storage, assets }
    }

    /// Render a label PDF from the stored template.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::MissingFields`] before anything is downloaded if
    /// a required field is blank, or an asset or rendering error.
    pub async fn render(&self, fields: &LabelFields) -> Result<Vec<u8>, LabelPrintError> {
        fields.validate()?;

        let template = self
            .storage
            .download(&self.assets.bucket, &self.assets.template)
            .await?;

        let font = match &self.assets.font {
            Some(font) => Some(self.storage.download(&self.assets.bucket, font).await?),
            None => None,
        };

        debug!(
            template_len = template.len(),
            embedded_font = font.is_some(),
            "label assets fetched"
        );

        Ok(render_label(&template, font, fields)?)
    }

    /// Render a label and hand it to `surface`.
    ///
    /// # Errors
    ///
    /// See [`LabelPrinter::render`]; printing errors are passed through.
    pub async fn print(
        &self,
        fields: &LabelFields,
        surface: &dyn PrintSurface,
    ) -> Result<(), LabelPrintError> {
        let pdf = self.render(fields).await?;

        surface.print(pdf).await?;

        info!(hsn = %fields.hsn.trim(), "label printed");

        Ok(())
    }
}
