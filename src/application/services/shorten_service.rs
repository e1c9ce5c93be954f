//! Key binding service behind `POST /shorten`.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{StoreError, UrlStore};
use crate::error::AppError;
use crate::utils::key_generator::resolve_key;

/// Service that turns a long URL into a bound short key.
///
/// This is the only write path into the URL store. A key, once bound, keeps
/// its first target: binding an existing key succeeds without rewriting it.
pub struct ShortenService {
    store: Arc<dyn UrlStore>,
    url_prefix: String,
}

impl ShortenService {
    /// Creates a new shorten service.
    ///
    /// `url_prefix` is prepended to keys to build the public short URL.
    pub fn new(store: Arc<dyn UrlStore>, url_prefix: impl Into<String>) -> Self {
        Self {
            store,
            url_prefix: url_prefix.into(),
        }
    }

    /// Shortens `long_url`, optionally under a caller-chosen key.
    ///
    /// Without a custom key the key is derived from the URL, so repeated calls
    /// with the same URL return the same short link and leave one entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the custom key is too long; the
    /// store is not touched in that case.
    ///
    /// Returns [`AppError::Internal`] if the store fails. See [`Self::bind`].
    pub async fn shorten(
        &self,
        long_url: &str,
        custom_key: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        let key = resolve_key(long_url, custom_key).inspect_err(|e| {
            warn!("Rejected custom key: {}", e);
        })?;

        self.bind(&key, long_url).await?;

        Ok(ShortLink::new(&self.url_prefix, key))
    }

    /// Ensures `key` is bound, storing `long_url` if the key is free.
    ///
    /// # Binding rules
    ///
    /// - Key absent: `long_url` is written.
    /// - Key present: nothing is written and the existing target is kept,
    ///   even if it differs from `long_url`.
    /// - Lookup fails for any other reason: nothing is written.
    ///
    /// The lookup and the write are not atomic. Two concurrent binds of the
    /// same new key may both write, and the store decides which value wins.
    /// For derived keys both writers carry the same URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the lookup fails with anything other
    /// than a missing key, or if the write fails. Nothing is retried.
    pub async fn bind(&self, key: &str, long_url: &str) -> Result<(), AppError> {
        match self.store.get(key.as_bytes()).await {
            Ok(_) => {
                debug!("Key {} already bound, keeping existing target", key);
                Ok(())
            }
            Err(StoreError::NotFound) => {
                self.store
                    .put(key.as_bytes(), long_url.as_bytes())
                    .await
                    .map_err(|e| {
                        error!("Failed to store key {}: {}", key, e);
                        AppError::internal(
                            "Failed to store short link",
                            json!({ "key": key, "reason": e.to_string() }),
                        )
                    })?;

                info!("Bound key {} to {}", key, long_url);
                Ok(())
            }
            Err(e) => {
                error!("Failed to look up key {}: {}", key, e);
                Err(AppError::internal(
                    "Failed to look up short link",
                    json!({ "key": key, "reason": e.to_string() }),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlStore;

    const EXAMPLE_URL: &str = "https://en.wikipedia.org/wiki/URL_shortening";
    const DERIVED_KEY: &str = "oROh-p8o";

    fn service(store: MockUrlStore) -> ShortenService {
        ShortenService::new(Arc::new(store), "https://bajo")
    }

    #[tokio::test]
    async fn test_shorten_derived_key_not_present() {
        let mut store = MockUrlStore::new();

        store
            .expect_get()
            .withf(|key| key == DERIVED_KEY.as_bytes())
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        store
            .expect_put()
            .withf(|key, value| key == DERIVED_KEY.as_bytes() && value == EXAMPLE_URL.as_bytes())
            .times(1)
            .returning(|_, _| Ok(()));

        let link = service(store).shorten(EXAMPLE_URL, None).await.unwrap();

        assert_eq!(link.key, DERIVED_KEY);
        assert_eq!(link.short_url, "https://bajo/oROh-p8o");
    }

    #[tokio::test]
    async fn test_shorten_derived_key_already_present() {
        let mut store = MockUrlStore::new();

        store
            .expect_get()
            .times(1)
            .returning(|_| Ok(EXAMPLE_URL.as_bytes().to_vec()));

        store.expect_put().times(0);

        let link = service(store).shorten(EXAMPLE_URL, None).await.unwrap();

        assert_eq!(link.short_url, "https://bajo/oROh-p8o");
    }

    #[tokio::test]
    async fn test_shorten_custom_key_not_present() {
        let mut store = MockUrlStore::new();

        store
            .expect_get()
            .withf(|key| key == b"custom")
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        store
            .expect_put()
            .withf(|key, value| key == b"custom" && value == b"https://example.com")
            .times(1)
            .returning(|_, _| Ok(()));

        let link = service(store)
            .shorten("https://example.com", Some("custom"))
            .await
            .unwrap();

        assert_eq!(link.short_url, "https://bajo/custom");
    }

    #[tokio::test]
    async fn test_shorten_custom_key_bound_to_other_url_keeps_old_mapping() {
        let mut store = MockUrlStore::new();

        store
            .expect_get()
            .withf(|key| key == b"custom")
            .times(1)
            .returning(|_| Ok(b"https://first.example".to_vec()));

        // The existing target is not compared with the requested one.
        store.expect_put().times(0);

        let link = service(store)
            .shorten("https://second.example", Some("custom"))
            .await
            .unwrap();

        assert_eq!(link.short_url, "https://bajo/custom");
    }

    #[tokio::test]
    async fn test_shorten_oversized_custom_key_never_touches_store() {
        let mut store = MockUrlStore::new();
        store.expect_get().times(0);
        store.expect_put().times(0);

        let key = "k".repeat(33);
        let result = service(store).shorten("https://example.com", Some(key.as_str())).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_custom_key_of_max_length_is_accepted() {
        let mut store = MockUrlStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));
        store.expect_put().times(1).returning(|_, _| Ok(()));

        let key = "k".repeat(32);
        let link = service(store)
            .shorten("https://example.com", Some(key.as_str()))
            .await
            .unwrap();

        assert_eq!(link.key, key);
    }

    #[tokio::test]
    async fn test_shorten_lookup_failure_skips_write() {
        let mut store = MockUrlStore::new();

        store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Backend("failed to query database".to_string())));

        store.expect_put().times(0);

        let result = service(store).shorten(EXAMPLE_URL, None).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_shorten_write_failure() {
        let mut store = MockUrlStore::new();

        store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        store
            .expect_put()
            .times(1)
            .returning(|_, _| Err(StoreError::Backend("failed to insert URL key".to_string())));

        let result = service(store).shorten(EXAMPLE_URL, Some("custom")).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
