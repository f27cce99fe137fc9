use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Region, SharedCredentialsProvider};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use crate::config::StoreConfig;
use crate::content_type::content_type_for;
use crate::error::{StoreError, StoreOperation};
use crate::traits::ObjectStore;

/// Any S3-compatible bucket (`DigitalOcean` Spaces, AWS, `MinIO`).
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let credentials = aws_sdk_s3::config::Credentials::new(
            config.credentials.storage_key.clone(),
            config.credentials.storage_secret.clone(),
            None,
            None,
            "relpub",
        );
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint_url())
            .force_path_style(config.path_style())
            .credentials_provider(SharedCredentialsProvider::new(credentials))
            .build();

        Self {
            client: Client::from_conf(conf),
            bucket: config.bucket.clone(),
        }
    }

    async fn put_public(&self, remote: &str, body: ByteStream) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(remote)
            .acl(ObjectCannedAcl::PublicRead)
            .content_type(content_type_for(remote))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                StoreError::request_from(StoreOperation::Upload, remote, DisplayErrorContext(&e))
            })?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                StoreError::request_from(StoreOperation::List, prefix, DisplayErrorContext(&e))
            })?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );
        }
        log::debug!("Listed {} keys under '{prefix}' in '{}'", keys.len(), self.bucket);
        Ok(keys)
    }

    async fn upload_data_public(&self, remote: &str, data: Vec<u8>) -> Result<(), StoreError> {
        self.put_public(remote, ByteStream::from(data)).await
    }

    async fn upload_file_public(&self, remote: &str, local: &Path) -> Result<(), StoreError> {
        tokio::fs::metadata(local)
            .await
            .map_err(|e| StoreError::io(local, &e))?;
        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| StoreError::Io {
                path: local.to_path_buf(),
                kind: std::io::ErrorKind::Other,
                message: e.to_string(),
            })?;
        self.put_public(remote, body).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                StoreError::request_from(StoreOperation::Delete, key, DisplayErrorContext(&e))
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;

    fn local_store() -> S3Store {
        S3Store::new(&StoreConfig {
            credentials: Credentials {
                storage_key: "key".to_string(),
                storage_secret: "secret".to_string(),
            },
            bucket: "kjkpubsf".to_string(),
            endpoint: "http://127.0.0.1:9".to_string(),
            region: "us-east-1".to_string(),
        })
    }

    #[tokio::test]
    async fn missing_local_file_is_not_found_before_any_request() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let local = temp_dir.path().join("SumatraPDF.exe");

        let result = local_store()
            .upload_file_public("software/sumatrapdf/prerel/SumatraPDF-prerelease-1.exe", &local)
            .await;

        assert!(
            matches!(result, Err(StoreError::Io { kind: std::io::ErrorKind::NotFound, ref path, .. }) if path == &local),
            "expected NotFound io error, got {result:?}"
        );
    }
}
