//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::debug;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "key": "custom"   // optional, at most 32 bytes
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "shortened_url": "https://bajo/custom" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is missing or unparsable, `url` is
/// missing or empty, or the custom key is too long.
/// Returns 500 Internal Server Error if the URL store fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.inspect_err(|e| debug!("Rejected request body: {}", e))?;
    payload
        .validate()
        .inspect_err(|e| debug!("Invalid shorten request: {}", e))?;

    let link = state
        .shorten_service
        .shorten(&payload.url, payload.key.as_deref())
        .await?;

    Ok(Json(ShortenResponse {
        shortened_url: link.short_url,
    }))
}
