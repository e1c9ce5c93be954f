#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bajo::domain::repositories::{StoreError, StoreResult, UrlStore};
use bajo::infrastructure::persistence::InMemoryUrlStore;
use bajo::routes::app_router;
use bajo::state::AppState;

pub const URL_PREFIX: &str = "https://bajo";

/// Which operation of [`FailingUrlStore`] breaks.
#[derive(Debug, Clone, Copy)]
pub enum FailOn {
    /// Every lookup fails with a backend error.
    Get,
    /// Lookups report a missing key, writes fail.
    Put,
}

/// Store whose engine is broken in a controlled way.
pub struct FailingUrlStore {
    fail_on: FailOn,
    pub puts: AtomicUsize,
}

impl FailingUrlStore {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            fail_on,
            puts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl UrlStore for FailingUrlStore {
    async fn get(&self, _key: &[u8]) -> StoreResult<Vec<u8>> {
        match self.fail_on {
            FailOn::Get => Err(StoreError::Backend("failed to query database".to_string())),
            FailOn::Put => Err(StoreError::NotFound),
        }
    }

    async fn put(&self, _key: &[u8], _value: &[u8]) -> StoreResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Backend("failed to insert URL key".to_string()))
    }

    async fn delete(&self, _key: &[u8]) -> StoreResult<()> {
        Err(StoreError::Backend("read-only".to_string()))
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// In-memory store that counts every call reaching it.
#[derive(Default)]
pub struct CountingUrlStore {
    inner: InMemoryUrlStore,
    pub calls: AtomicUsize,
}

impl CountingUrlStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlStore for CountingUrlStore {
    async fn get(&self, key: &[u8]) -> StoreResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &[u8]) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }

    async fn close(&self) -> StoreResult<()> {
        self.inner.close().await
    }
}

/// Builds a test server over the full router backed by `store`.
pub fn create_test_server(store: Arc<dyn UrlStore>) -> TestServer {
    let state = AppState::new(store, URL_PREFIX);
    TestServer::new(app_router(state)).unwrap()
}

/// Test server backed by a fresh in-memory store, returned for inspection.
pub fn create_memory_server() -> (TestServer, Arc<InMemoryUrlStore>) {
    let store = Arc::new(InMemoryUrlStore::new());
    (create_test_server(store.clone()), store)
}
