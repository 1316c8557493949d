//! Object storage service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    backend::{SupabaseClient, UploadOptions},
    domain::storage::errors::StorageServiceError,
};

#[derive(Debug, Clone)]
pub struct RestStorageService {
    client: SupabaseClient,
}

impl RestStorageService {
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageService for RestStorageService {
    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageServiceError> {
        Ok(self
            .client
            .upload(bucket, name, content_type, bytes, UploadOptions::default())
            .await?)
    }

    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageServiceError> {
        Ok(self.client.download(bucket, path).await?)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.client.public_url(bucket, path)
    }
}

#[automock]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Upload an object without replacing an existing one; returns its path.
    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageServiceError>;

    /// Download an object.
    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageServiceError>;

    /// Public URL of an object.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
