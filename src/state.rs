//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenService};
use crate::domain::repositories::UrlStore;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub redirect_service: Arc<RedirectService>,
}

impl AppState {
    /// Wires both services to the same store handle.
    pub fn new(store: Arc<dyn UrlStore>, url_prefix: impl Into<String>) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(store.clone(), url_prefix)),
            redirect_service: Arc::new(RedirectService::new(store)),
        }
    }
}
