//! A stored key → URL pair.

/// One entry of the URL database, as seen by administrative listings.
///
/// Both halves are decoded lossily: the store holds raw bytes and listings
/// must not fail on a single malformed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub key: String,
    pub target: String,
}

impl UrlRecord {
    pub fn from_bytes(key: &[u8], target: &[u8]) -> Self {
        Self {
            key: String::from_utf8_lossy(key).into_owned(),
            target: String::from_utf8_lossy(target).into_owned(),
        }
    }
}

