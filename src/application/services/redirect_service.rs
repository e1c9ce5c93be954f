//! Key resolution service behind `GET /{key}`.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::repositories::{StoreError, UrlStore};

/// Outcome of resolving a short key.
///
/// This, not the raw storage error, is what the HTTP layer consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The key is bound to this target URL.
    Found(String),
    /// The key was never bound.
    NotFound,
    /// The lookup failed, or the stored value is unusable.
    InternalFailure,
}

/// Read-only service mapping keys back to their target URLs.
pub struct RedirectService {
    store: Arc<dyn UrlStore>,
}

impl RedirectService {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self { store }
    }

    /// Resolves `key` to its target URL. Never writes.
    ///
    /// A stored value that is not valid UTF-8 cannot be used as a redirect
    /// target and is reported as [`Resolution::InternalFailure`].
    pub async fn resolve(&self, key: &str) -> Resolution {
        match self.store.get(key.as_bytes()).await {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(target) => {
                    debug!("Resolved key {} to {}", key, target);
                    Resolution::Found(target)
                }
                Err(e) => {
                    error!("Stored target for key {} is not valid UTF-8: {}", key, e);
                    Resolution::InternalFailure
                }
            },
            Err(StoreError::NotFound) => {
                debug!("Key {} not found", key);
                Resolution::NotFound
            }
            Err(e) => {
                error!("Failed to resolve key {}: {}", key, e);
                Resolution::InternalFailure
            }
        }
    }
}
