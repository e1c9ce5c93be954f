//! sled implementation of the URL store.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, StoreResult, UrlStore};

impl From<sled::Error> for StoreError {
    fn from(e: sled::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// URL store backed by an embedded sled database.
///
/// sled makes single-key reads and writes safe from any number of threads,
/// so one handle is shared by every request. Keys and values are stored as
/// the raw key and URL bytes.
pub struct SledUrlStore {
    db: sled::Db,
    path: Option<PathBuf>,
}

impl SledUrlStore {
    /// Opens (or creates) the database directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the directory cannot be opened, for
    /// example when another process holds its lock.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let db = sled::open(path)?;

        info!(
            "Opened URL database at {} ({} entries{})",
            path.display(),
            db.len(),
            if db.was_recovered() { ", recovered" } else { "" }
        );

        Ok(Self {
            db,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a throwaway database that is removed when dropped.
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db, path: None })
    }

    /// Location of the database directory, `None` for temporary databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Returns up to `limit` entries in key order.
    pub fn entries(&self, limit: usize) -> StoreResult<Vec<UrlRecord>> {
        self.db
            .iter()
            .take(limit)
            .map(|item| -> StoreResult<UrlRecord> {
                let (key, value) = item?;
                Ok(UrlRecord::from_bytes(&key, &value))
            })
            .collect()
    }

    /// Bytes used on disk.
    pub fn size_on_disk(&self) -> StoreResult<u64> {
        Ok(self.db.size_on_disk()?)
    }
}

#[async_trait]
impl UrlStore for SledUrlStore {
    async fn get(&self, key: &[u8]) -> StoreResult<Vec<u8>> {
        self.db
            .get(key)?
            .map(|value| value.to_vec())
            .ok_or(StoreError::NotFound)
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.db.insert(key, value)?;
        Ok(())
    }

    async fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.db.contains_key(key)?)
    }

    async fn delete(&self, key: &[u8]) -> StoreResult<()> {
        self.db.remove(key)?;
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        let flushed = self.db.flush()?;
        debug!("Flushed {} bytes to URL database", flushed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_is_not_found() {
        let store = SledUrlStore::temporary().unwrap();

        let err = store.get(b"missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.has(b"missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = SledUrlStore::temporary().unwrap();

        store.put(b"custom", b"https://example.com").await.unwrap();

        assert_eq!(store.get(b"custom").await.unwrap(), b"https://example.com");
        assert!(store.has(b"custom").await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = SledUrlStore::temporary().unwrap();

        store.put(b"custom", b"https://example.com").await.unwrap();
        store.delete(b"custom").await.unwrap();
        store.delete(b"custom").await.unwrap();

        assert!(store.get(b"custom").await.unwrap_err().is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_entries_are_ordered_and_limited() {
        let store = SledUrlStore::temporary().unwrap();

        store.put(b"b", b"https://b.example").await.unwrap();
        store.put(b"a", b"https://a.example").await.unwrap();
        store.put(b"c", b"https://c.example").await.unwrap();

        let entries = store.entries(2).unwrap();
        let keys: Vec<_> = entries.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(entries[0].target, "https://a.example");
    }

    #[tokio::test]
    async fn test_path_of_opened_and_temporary_databases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("url_database");

        let store = SledUrlStore::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        store.close().await.unwrap();

        assert!(SledUrlStore::temporary().unwrap().path().is_none());
    }
}
