//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten` - Create a short URL
//! - `GET  /{key}`   - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling, applied by
//!   [`crate::server::run`] around the whole router

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::shortener_routes())
        .with_state(state)
        .layer(tracing::layer())
}
