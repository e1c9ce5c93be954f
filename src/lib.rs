//! # bajo
//!
//! A small URL shortener built with Axum and sled.
//!
//! Keys are derived from the SHA-256 of the URL, so shortening the same URL
//! twice yields the same short link. Callers may pick their own key instead;
//! once a key is bound it keeps its first target.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and the [`domain::repositories::UrlStore`] contract
//! - **Application Layer** ([`application`]) - Key binding and resolution services
//! - **Infrastructure Layer** ([`infrastructure`]) - sled and in-memory stores
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_PATH="url_database"   # Optional
//! export URL_PREFIX="https://bajo"      # Optional
//!
//! cargo run
//!
//! curl -X POST localhost:8080/shorten -d '{"url":"https://example.com"}' \
//!      -H 'content-type: application/json'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RedirectService, Resolution, ShortenService};
    pub use crate::domain::entities::{ShortLink, UrlRecord};
    pub use crate::domain::repositories::{StoreError, StoreResult, UrlStore};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{InMemoryUrlStore, SledUrlStore};
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
