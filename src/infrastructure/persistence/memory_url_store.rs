//! In-memory implementation of the URL store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::repositories::{StoreError, StoreResult, UrlStore};

/// Ordered in-memory URL store.
///
/// Used by tests and by deployments that do not need persistence
/// (`STORAGE_BACKEND=memory`). Contents are lost when the process exits.
/// After [`UrlStore::close`] every operation fails with a backend error.
#[derive(Debug, Default)]
pub struct InMemoryUrlStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    closed: AtomicBool,
}

impl InMemoryUrlStore {
    pub fn new() -> Self {
        debug!("Using in-memory URL store (no persistence)");
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Backend("store is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn get(&self, key: &[u8]) -> StoreResult<Vec<u8>> {
        self.ensure_open()?;
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.ensure_open()?;
        self.entries
            .write()
            .await
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    async fn has(&self, key: &[u8]) -> StoreResult<bool> {
        self.ensure_open()?;
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn delete(&self, key: &[u8]) -> StoreResult<()> {
        self.ensure_open()?;
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = InMemoryUrlStore::new();

        assert!(store.get(b"key").await.unwrap_err().is_not_found());

        store.put(b"key", b"https://example.com").await.unwrap();
        assert_eq!(store.get(b"key").await.unwrap(), b"https://example.com");
        assert!(store.has(b"key").await.unwrap());

        store.delete(b"key").await.unwrap();
        assert!(!store.has(b"key").await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let store = InMemoryUrlStore::new();
        store.put(b"key", b"https://example.com").await.unwrap();

        store.close().await.unwrap();

        let err = store.get(b"key").await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(store.put(b"other", b"x").await.is_err());
    }
}
