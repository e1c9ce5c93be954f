//! Short key derivation and custom key validation.
//!
//! Derived keys are content addressed: the same URL always yields the same
//! key, so shortening is idempotent without any lookup by URL.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Number of characters in a derived key.
///
/// Keys are URL-safe base64, so there are 64^8 possible derived keys.
pub const DERIVED_KEY_LENGTH: usize = 8;

/// Maximum length of a caller-supplied key, in bytes of its UTF-8 encoding.
pub const CUSTOM_KEY_MAX_LENGTH: usize = 32;

/// Derives the key for `url` from its SHA-256 digest.
///
/// The digest is encoded as URL-safe base64 without padding and truncated to
/// [`DERIVED_KEY_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use bajo::utils::key_generator::derive_key;
///
/// assert_eq!(derive_key("https://en.wikipedia.org/wiki/URL_shortening"), "oROh-p8o");
/// ```
pub fn derive_key(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(DERIVED_KEY_LENGTH);
    encoded
}

/// Validates a caller-supplied key.
///
/// Only the length is checked; any string the transport accepts is a legal
/// key.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the key is longer than
/// [`CUSTOM_KEY_MAX_LENGTH`] bytes, so a multi-byte character counts for each
/// of its bytes.
pub fn validate_custom_key(key: &str) -> Result<(), AppError> {
    let length = key.len();

    if length > CUSTOM_KEY_MAX_LENGTH {
        return Err(AppError::bad_request(
            format!("Custom key must be at most {CUSTOM_KEY_MAX_LENGTH} bytes"),
            json!({ "provided_length": length }),
        ));
    }

    Ok(())
}

/// Picks the key for a shorten request.
///
/// A non-empty `custom_key` is validated and used verbatim; otherwise the key
/// is derived from `url`. An empty custom key counts as absent.
///
/// # Errors
///
/// See [`validate_custom_key`].
pub fn resolve_key(url: &str, custom_key: Option<&str>) -> Result<String, AppError> {
    match custom_key.filter(|k| !k.is_empty()) {
        Some(custom) => {
            validate_custom_key(custom)?;
            Ok(custom.to_string())
        }
        None => Ok(derive_key(url)),
    }
}
