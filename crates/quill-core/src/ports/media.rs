//! Remote object storage port.

use std::path::Path;

use async_trait::async_trait;

/// Remote object store backing the CDN. Implementations upload a local
/// artifact under a logical key and return the durable public URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `local_path` under `key`, returning its
    /// public URL.
    async fn put_file(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read local artifact: {0}")]
    Read(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}
