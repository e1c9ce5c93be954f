//! Storage contract for key → URL mappings.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a [`UrlStore`].
///
/// A missing key is a distinct variant so callers can branch on it without
/// inspecting messages: the binder treats it as the signal to write, the
/// resolver turns it into a 404.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("key not found")]
    NotFound,
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns `true` for the missing-key signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Ordered byte-key/byte-value store holding the short link mappings.
///
/// Keys and values are stored verbatim with no envelope. Implementations must
/// make concurrent single-key operations safe; callers add no locking of their
/// own.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SledUrlStore`] - embedded on-disk engine
/// - [`crate::infrastructure::persistence::InMemoryUrlStore`] - ordered map, used by tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Fetches the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the key is absent and
    /// [`StoreError::Backend`] on engine failures.
    async fn get(&self, key: &[u8]) -> StoreResult<Vec<u8>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Checks whether `key` is present.
    ///
    /// Derived from [`UrlStore::get`] unless the engine has a cheaper probe.
    async fn has(&self, key: &[u8]) -> StoreResult<bool> {
        match self.get(key).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &[u8]) -> StoreResult<()>;

    /// Flushes pending writes and releases the store.
    ///
    /// Called once at process shutdown.
    async fn close(&self) -> StoreResult<()>;
}
