//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. Required and non-empty; otherwise opaque.
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,

    /// Optional custom key. Empty means "derive one from the URL".
    ///
    /// The length limit is enforced by
    /// [`crate::utils::key_generator::validate_custom_key`].
    #[serde(default)]
    pub key: Option<String>,
}

/// Response carrying the shortened URL (`<prefix>/<key>`).
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shortened_url: String,
}
