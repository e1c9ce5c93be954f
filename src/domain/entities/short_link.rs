//! Result of a successful shorten operation.

/// A key that is guaranteed to be bound, together with its public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub key: String,
    pub short_url: String,
}

impl ShortLink {
    /// Builds the short link for `key` under `prefix` (`<prefix>/<key>`).
    pub fn new(prefix: &str, key: String) -> Self {
        let short_url = format!("{}/{}", prefix.trim_end_matches('/'), key);
        Self { key, short_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_format() {
        let link = ShortLink::new("https://bajo", "oROh-p8o".to_string());
        assert_eq!(link.short_url, "https://bajo/oROh-p8o");
        assert_eq!(link.key, "oROh-p8o");
    }

    #[test]
    fn test_trailing_slash_in_prefix_is_ignored() {
        let link = ShortLink::new("https://bajo/", "custom".to_string());
        assert_eq!(link.short_url, "https://bajo/custom");
    }
}
