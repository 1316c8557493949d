//! Image codes service.

use async_trait::async_trait;
use karat::photos::PhotoCode;
use mockall::automock;

use crate::{
    backend::{Query, SupabaseClient},
    domain::image_codes::{
        errors::ImageCodesServiceError,
        records::{IMAGE_CODES_TABLE, ImageCodeRecord},
    },
};

#[derive(Debug, Clone)]
pub struct RestImageCodesService {
    client: SupabaseClient,
}

impl RestImageCodesService {
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageCodesService for RestImageCodesService {
    async fn find_image(&self, code: &PhotoCode) -> Result<Option<String>, ImageCodesServiceError> {
        let records: Vec<ImageCodeRecord> = self
            .client
            .select(
                IMAGE_CODES_TABLE,
                &Query::new()
                    .select("image_name,code")
                    .eq("code", code)
                    .limit(1),
            )
            .await?;

        Ok(records.into_iter().next().map(|record| record.image_name))
    }

    async fn register(
        &self,
        image_name: &str,
        code: &PhotoCode,
    ) -> Result<(), ImageCodesServiceError> {
        let record = ImageCodeRecord {
            image_name: image_name.to_string(),
            code: code.clone(),
        };

        let _stored: ImageCodeRecord = self.client.insert(IMAGE_CODES_TABLE, &record).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ImageCodesService: Send + Sync {
    /// Object name registered under `code`, if any.
    async fn find_image(&self, code: &PhotoCode) -> Result<Option<String>, ImageCodesServiceError>;

    /// Register `image_name` under `code`.
    async fn register(&self, image_name: &str, code: &PhotoCode)
    -> Result<(), ImageCodesServiceError>;
}
