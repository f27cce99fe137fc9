use std::path::Path;

use async_trait::async_trait;

use crate::error::StoreError;

/// The three object-store operations publishing needs.
///
/// Every upload is public-read. Implementations never retry; a failed call
/// is reported as-is so the caller can abort the run.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// All keys under `prefix`, following pagination to the end.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    async fn upload_data_public(&self, remote: &str, data: Vec<u8>) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    async fn upload_file_public(&self, remote: &str, local: &Path) -> Result<(), StoreError> {
        let data = tokio::fs::read(local)
            .await
            .map_err(|e| StoreError::io(local, &e))?;
        self.upload_data_public(remote, data).await
    }
}
