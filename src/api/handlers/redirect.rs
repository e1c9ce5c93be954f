//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its target URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Response Codes
///
/// - **302 Found**: `Location` carries the stored target URL
/// - **404 Not Found**: the key was never bound
/// - **500 Internal Server Error**: the store failed, or the stored target
///   cannot be sent as a header
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    match state.redirect_service.resolve(&key).await {
        Resolution::Found(target) => {
            let location = HeaderValue::try_from(target).map_err(|e| {
                error!("Stored target for key {} is not a valid header: {}", key, e);
                AppError::internal(
                    "Stored target is not a valid Location header",
                    json!({ "key": key, "reason": e.to_string() }),
                )
            })?;

            Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
        }
        Resolution::NotFound => Err(AppError::not_found(
            "Short link not found",
            json!({ "key": key }),
        )),
        Resolution::InternalFailure => Err(AppError::internal(
            "Failed to resolve short link",
            json!({ "key": key }),
        )),
    }
}
