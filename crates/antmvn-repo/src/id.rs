//! Synthetic ids for repositories configured without one
//!
//! The id is the MD5 digest of the URL, so it is stable across runs and two
//! unnamed repositories with the same URL end up with the same id.

use md5::{Digest, Md5};
use thiserror::Error;

/// Id used when no digest can be computed
pub const FALLBACK_ID: &str = "default";

#[derive(Debug, Error)]
#[error("Digest algorithm {algorithm} is not available: {reason}")]
pub struct DigestUnavailable {
    pub algorithm: String,
    pub reason: String,
}

/// Derives a repository id from its URL
pub trait IdGenerator {
    fn generate(&self, url: &str) -> Result<String, DigestUnavailable>;
}

/// MD5 over the UTF-8 bytes of the URL, lowercase hex
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5IdGenerator;

impl IdGenerator for Md5IdGenerator {
    fn generate(&self, url: &str) -> Result<String, DigestUnavailable> {
        Ok(generate(url))
    }
}

/// Default id for a repository URL
pub fn generate(url: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate an id, falling back to [`FALLBACK_ID`] with a warning
pub fn generate_or_fallback(generator: &dyn IdGenerator, url: &str) -> String {
    match generator.generate(url) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Unable to generate unique repository id: {}", e);
            FALLBACK_ID.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl IdGenerator for Unavailable {
        fn generate(&self, _url: &str) -> Result<String, DigestUnavailable> {
            Err(DigestUnavailable {
                algorithm: "MD5".to_string(),
                reason: "disabled in this runtime".to_string(),
            })
        }
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(generate(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            generate("The quick brown fox jumps over the lazy dog"),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn test_deterministic() {
        let url = "https://repo.example.org/maven2";
        assert_eq!(generate(url), generate(url));
        assert_eq!(generate(url).len(), 32);
    }

    #[test]
    fn test_distinct_urls_distinct_ids() {
        assert_ne!(
            generate("https://repo.example.org/maven2"),
            generate("https://repo.example.org/maven2/")
        );
    }

    #[test]
    fn test_fallback_when_unavailable() {
        assert_eq!(generate_or_fallback(&Unavailable, "http://x"), FALLBACK_ID);
        assert_eq!(
            generate_or_fallback(&Md5IdGenerator, "http://x"),
            generate("http://x")
        );
    }
}
