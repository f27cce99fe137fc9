use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::content_type::content_type_for;
use crate::error::{StoreError, StoreOperation};
use crate::traits::ObjectStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: &'static str,
}

/// In-process bucket. Failures can be injected per key and operation.
/// Clones share the same bucket.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    objects: BTreeMap<String, StoredObject>,
    failing: HashSet<(StoreOperation, String)>,
    fail_listing: bool,
    listed: Vec<String>,
    deleted: Vec<String>,
    uploaded: Vec<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with empty objects under `keys`.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for key in keys {
                let key = key.into();
                let content_type = content_type_for(&key);
                inner.objects.insert(
                    key,
                    StoredObject {
                        data: Vec::new(),
                        content_type,
                    },
                );
            }
        }
        store
    }

    pub fn fail_on(&self, operation: StoreOperation, key: &str) {
        if operation == StoreOperation::List {
            self.lock().fail_listing = true;
        } else {
            self.lock().failing.insert((operation, key.to_string()));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.lock().objects.get(key).cloned()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.lock().objects.keys().cloned().collect()
    }

    /// Prefixes passed to `list_keys`, in call order.
    #[must_use]
    pub fn listed(&self) -> Vec<String> {
        self.lock().listed.clone()
    }

    /// Successful deletes, in call order.
    #[must_use]
    pub fn deleted(&self) -> Vec<String> {
        self.lock().deleted.clone()
    }

    /// Successful uploads, in call order.
    #[must_use]
    pub fn uploaded(&self) -> Vec<String> {
        self.lock().uploaded.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut inner = self.lock();
        inner.listed.push(prefix.to_string());
        if inner.fail_listing {
            return Err(StoreError::request(StoreOperation::List, prefix, "injected failure"));
        }
        Ok(inner
            .objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn upload_data_public(&self, remote: &str, data: Vec<u8>) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner
            .failing
            .contains(&(StoreOperation::Upload, remote.to_string()))
        {
            return Err(StoreError::request(StoreOperation::Upload, remote, "injected failure"));
        }
        inner.objects.insert(
            remote.to_string(),
            StoredObject {
                data,
                content_type: content_type_for(remote),
            },
        );
        inner.uploaded.push(remote.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.failing.contains(&(StoreOperation::Delete, key.to_string())) {
            return Err(StoreError::request(StoreOperation::Delete, key, "injected failure"));
        }
        // S3 treats deleting a missing key as success.
        inner.objects.remove(key);
        inner.deleted.push(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_filters_by_prefix_in_key_order() {
        let store = MemoryStore::with_keys([
            "software/sumatrapdf/prerel/b.exe",
            "software/sumatrapdf/daily/a.exe",
            "software/sumatrapdf/prerel/a.exe",
        ]);

        let keys = store
            .list_keys("software/sumatrapdf/prerel/")
            .await
            .expect("listing succeeds");

        assert_eq!(
            keys,
            vec!["software/sumatrapdf/prerel/a.exe", "software/sumatrapdf/prerel/b.exe"]
        );
    }

    #[tokio::test]
    async fn clones_share_one_bucket() {
        let store = MemoryStore::with_keys(["software/sumatrapdf/daily/a.exe"]);
        let handle = store.clone();

        handle
            .delete("software/sumatrapdf/daily/a.exe")
            .await
            .expect("delete succeeds");
        handle.list_keys("software/").await.expect("listing succeeds");

        assert!(store.keys().is_empty());
        assert_eq!(store.deleted(), vec!["software/sumatrapdf/daily/a.exe"]);
        assert_eq!(store.listed(), vec!["software/"]);
    }

    #[tokio::test]
    async fn upload_records_body_and_content_type() {
        let store = MemoryStore::new();

        store
            .upload_data_public("software/sumatrapdf/sumadaily.js", b"var x;".to_vec())
            .await
            .expect("upload succeeds");

        let object = store.get("software/sumatrapdf/sumadaily.js").expect("stored");
        assert_eq!(object.data, b"var x;");
        assert_eq!(object.content_type, "application/javascript");
        assert_eq!(store.uploaded(), vec!["software/sumatrapdf/sumadaily.js"]);
    }

    #[tokio::test]
    async fn injected_failures_leave_store_untouched() {
        let store = MemoryStore::with_keys(["k1"]);
        store.fail_on(StoreOperation::Delete, "k1");
        store.fail_on(StoreOperation::Upload, "k2");

        let delete = store.delete("k1").await;
        let upload = store.upload_data_public("k2", Vec::new()).await;

        assert!(matches!(
            delete,
            Err(StoreError::Request { operation: StoreOperation::Delete, .. })
        ));
        assert!(matches!(
            upload,
            Err(StoreError::Request { operation: StoreOperation::Upload, .. })
        ));
        assert_eq!(store.keys(), vec!["k1"]);
        assert!(store.deleted().is_empty());
    }

    #[tokio::test]
    async fn injected_list_failure_is_reported() {
        let store = MemoryStore::with_keys(["k1"]);
        store.fail_on(StoreOperation::List, "");

        let result = store.list_keys("").await;

        assert!(matches!(
            result,
            Err(StoreError::Request { operation: StoreOperation::List, .. })
        ));
    }
}
