//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public shortener routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Shorten a URL, optionally under a custom key
/// - `GET  /{key}`   - Redirect to the URL bound to `key`
///
/// The static `/shorten` segment takes precedence over `/{key}`, so a key
/// named `shorten` can be bound but not resolved over HTTP.
pub fn shortener_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/{key}", get(redirect_handler))
}
