//! Supabase REST and Storage client.

use reqwest::{Client, RequestBuilder, Response, StatusCode, header::CONTENT_RANGE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    backend::{
        errors::BackendError,
        query::{Query, parse_content_range},
    },
    config::backend::BackendConfig,
};

/// Options for an object upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    /// `Cache-Control` max age, in seconds.
    pub cache_control_seconds: u32,

    /// Replace an existing object with the same name.
    pub upsert: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            cache_control_seconds: 3600,
            upsert: false,
        }
    }
}

/// HTTP client for the Supabase row and object stores.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    key: String,
    http: Client,
}

impl SupabaseClient {
    /// Create a client from the backend configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self::with_http(
            &config.supabase_url,
            config.supabase_key.clone(),
            http,
        ))
    }

    /// Create a client around an existing HTTP client.
    #[must_use]
    pub fn with_http(base_url: &str, key: String, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
            http,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Public URL of a stored object.
    #[must_use]
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }

    /// Select rows from `table`.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        debug!(table, query = ?query.pairs(), "select");

        let response = self
            .authorized(self.http.get(self.table_url(table)))
            .query(&query.pairs())
            .send()
            .await?;

        Ok(check(response, "select").await?.json().await?)
    }

    /// Select rows from `table` along with the exact number of matching rows.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, an unexpected response body, or a
    /// missing `Content-Range` header.
    pub async fn select_counted<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<(Vec<T>, u64), BackendError> {
        debug!(table, query = ?query.pairs(), "select with count");

        let response = self
            .authorized(self.http.get(self.table_url(table)))
            .header("Prefer", "count=exact")
            .query(&query.pairs())
            .send()
            .await?;

        let response = check(response, "select").await?;

        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| {
                BackendError::UnexpectedResponse("missing or invalid Content-Range".to_string())
            })?;

        Ok((response.json().await?, total))
    }

    /// Insert a row and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table, "insert");

        let response = self
            .authorized(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        let rows: Vec<T> = check(response, "insert").await?.json().await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::UnexpectedResponse("insert returned no rows".to_string()))
    }

    /// Update the rows matching `query` and return them.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn update<B, T>(
        &self,
        table: &str,
        query: &Query,
        changes: &B,
    ) -> Result<Vec<T>, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table, filters = ?query.filter_pairs(), "update");

        let response = self
            .authorized(self.http.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&query.filter_pairs())
            .json(changes)
            .send()
            .await?;

        Ok(check(response, "update").await?.json().await?)
    }

    /// Delete the rows matching `query` and return them.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        debug!(table, filters = ?query.filter_pairs(), "delete");

        let response = self
            .authorized(self.http.delete(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&query.filter_pairs())
            .send()
            .await?;

        Ok(check(response, "delete").await?.json().await?)
    }

    /// Upload an object and return its path within the bucket.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or when the store rejects the upload.
    pub async fn upload(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        options: UploadOptions,
    ) -> Result<String, BackendError> {
        debug!(bucket, name, len = bytes.len(), "upload");

        let response = self
            .authorized(self.http.post(self.object_url(bucket, name)))
            .header(
                "cache-control",
                format!("max-age={}", options.cache_control_seconds),
            )
            .header("x-upsert", options.upsert.to_string())
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await?;

        check(response, "upload").await?;

        Ok(name.to_string())
    }

    /// Download an object.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] if the object does not exist, or an
    /// error on HTTP failure.
    pub async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, BackendError> {
        debug!(bucket, path, "download");

        let response = self
            .authorized(self.http.get(self.object_url(bucket, path)))
            .send()
            .await?;

        Ok(check(response, "download").await?.bytes().await?.to_vec())
    }
}

async fn check(response: Response, action: &str) -> Result<Response, BackendError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(BackendError::NotFound);
    }

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();

        return Err(BackendError::UnexpectedResponse(format!(
            "{action} request failed with status {status}: {text}"
        )));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde::Deserialize;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::backend::Direction;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    fn client(server: &MockServer) -> SupabaseClient {
        SupabaseClient::with_http(&server.base_url(), "anon-key".to_string(), Client::new())
    }

    #[tokio::test]
    async fn select_sends_auth_headers_and_filters() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/products")
                    .header("apikey", "anon-key")
                    .header("authorization", "Bearer anon-key")
                    .query_param("select", "*")
                    .query_param("hsn", "eq.12345678")
                    .query_param("order", "name.asc");
                then.status(200)
                    .json_body(json!([{ "id": 1, "name": "gold ring" }]));
            })
            .await;

        let rows: Vec<Row> = client(&server)
            .select(
                "products",
                &Query::new()
                    .eq("hsn", "12345678")
                    .order("name", Direction::Asc),
            )
            .await?;

        mock.assert_async().await;
        assert_eq!(
            rows,
            vec![Row {
                id: 1,
                name: "gold ring".to_string()
            }]
        );

        Ok(())
    }

    #[tokio::test]
    async fn select_counted_reads_content_range() -> TestResult {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/products")
                    .header("prefer", "count=exact")
                    .query_param("offset", "10")
                    .query_param("limit", "10");
                then.status(206)
                    .header("content-range", "10-10/11")
                    .json_body(json!([{ "id": 11, "name": "anklet" }]));
            })
            .await;

        let (rows, total): (Vec<Row>, u64) = client(&server)
            .select_counted("products", &Query::new().range(10, 10))
            .await?;

        assert_eq!(total, 11);
        assert_eq!(rows.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn error_statuses_carry_the_body() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/products");
                then.status(409).body("duplicate key");
            })
            .await;

        let result: Result<Row, _> = client(&server)
            .insert("products", &json!({ "name": "x" }))
            .await;

        assert!(
            matches!(&result, Err(BackendError::UnexpectedResponse(text)) if text.contains("duplicate key")),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn upload_sets_cache_and_upsert_headers() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/storage/v1/object/product-images/1700000000000.jpg")
                    .header("cache-control", "max-age=3600")
                    .header("x-upsert", "false")
                    .header("content-type", "image/jpeg")
                    .body("jpeg");
                then.status(200)
                    .json_body(json!({ "Key": "product-images/1700000000000.jpg" }));
            })
            .await;

        let path = client(&server)
            .upload(
                "product-images",
                "1700000000000.jpg",
                "image/jpeg",
                b"jpeg".to_vec(),
                UploadOptions::default(),
            )
            .await?;

        mock.assert_async().await;
        assert_eq!(path, "1700000000000.jpg");

        Ok(())
    }

    #[tokio::test]
    async fn missing_objects_are_not_found() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/storage/v1/object/labelpdf/missing.pdf");
                then.status(404);
            })
            .await;

        let result = client(&server).download("labelpdf", "missing.pdf").await;

        assert!(matches!(result, Err(BackendError::NotFound)), "got {result:?}");
    }

    #[test]
    fn public_urls_skip_trailing_slashes() {
        let client = SupabaseClient::with_http("https://shop.supabase.co/", "k".into(), Client::new());

        assert_eq!(
            client.public_url("product-images", "a.jpg"),
            "https://shop.supabase.co/storage/v1/object/public/product-images/a.jpg"
        );
    }
}
