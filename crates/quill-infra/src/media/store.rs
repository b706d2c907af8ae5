//! S3-backed object store returning CDN public URLs.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use quill_core::ports::{ObjectStore, StorageError};

/// S3 object store configuration.
#[derive(Debug, Clone)]
pub struct S3StoreConfig {
    pub bucket: String,
    /// Base URL of the CDN fronting the bucket; keys are appended to it.
    pub cdn_base_url: String,
}

/// Object store uploading to S3 and exposing objects through a CDN.
pub struct S3ObjectStore {
    client: Client,
    config: S3StoreConfig,
}

impl S3ObjectStore {
    pub fn new(client: Client, config: S3StoreConfig) -> Self {
        Self { client, config }
    }

    /// Build a client from the ambient AWS environment configuration.
    pub async fn from_env(config: S3StoreConfig) -> Self {
        let aws_config = aws_config::load_from_env().await;
        Self::new(Client::new(&aws_config), config)
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.cdn_base_url.trim_end_matches('/'),
            key
        )
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_file(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        let url = self.public_url(key);
        tracing::info!(key, url, "object stored");
        Ok(url)
    }
}
