//! Content-addressed cache key generation.

use sha2::{Digest, Sha256};

/// Compute the cache key for a URL: SHA-256 of the URL bytes as lowercase hex.
///
/// The key doubles as the on-disk filename for the cached page, so it must be
/// stable across runs and safe for any filesystem.
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_stability() {
        let key1 = cache_key("https://example.com/article");
        let key2 = cache_key("https://example.com/article");
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_key_differs_per_url() {
        let key1 = cache_key("https://example.com/a");
        let key2 = cache_key("https://example.com/b");
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_key_format() {
        let key = cache_key("https://example.com");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_known_digest() {
        // sha256("") -- sanity-pins the algorithm choice
        assert_eq!(
            cache_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
