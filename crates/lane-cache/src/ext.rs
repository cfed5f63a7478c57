//! Typed accessors layered over the byte-oriented [`CacheBucket`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// String and JSON views of any [`CacheBucket`].
///
/// The base trait stays byte-oriented and object-safe; a blanket impl adds
/// these typed methods on top, so bucket implementations never touch serde.
///
/// # Example
///
/// ```
/// use lane_cache::{Cache, CacheBucketExt, NullCache};
///
/// let bucket = NullCache.bucket("pages");
/// bucket.set_string("home", "<h1>hi</h1>");
/// assert_eq!(bucket.get_string("home"), None); // NullCache always misses
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Cached value as a UTF-8 string; `None` on miss, expiry, or bytes
    /// that are not UTF-8.
    fn get_string(&self, key: &str) -> Option<String> {
        String::from_utf8(self.get(key)?).ok()
    }

    /// Store a string.
    fn set_string(&self, key: &str, value: &str) {
        self.set(key, value.as_bytes());
    }

    /// Cached value deserialized from JSON; `None` on miss, expiry, or a
    /// payload that does not parse as `T`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        serde_json::from_slice(&self.get(key)?).ok()
    }

    /// Serialize `value` as JSON and store it. A value that fails to
    /// serialize is dropped without storing anything.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(raw) = serde_json::to_vec(value) {
            self.set(key, &raw);
        }
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::{Cache, MemoryCache};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        title: String,
        count: u32,
    }

    #[test]
    fn test_json_round_trip() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        let bucket = cache.bucket("pages");

        let doc = Doc {
            title: "Home".to_owned(),
            count: 3,
        };
        bucket.set_json("home", &doc);

        assert_eq!(bucket.get_json::<Doc>("home"), Some(doc));
    }

    #[test]
    fn test_get_json_invalid_payload() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        let bucket = cache.bucket("pages");

        bucket.set("home", b"not json at all");
        assert_eq!(bucket.get_json::<Doc>("home"), None);
    }

    #[test]
    fn test_string_round_trip() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        let bucket = cache.bucket("pages");

        bucket.set_string("home", "<h1>hi</h1>");
        assert_eq!(bucket.get_string("home"), Some("<h1>hi</h1>".to_owned()));
    }

    #[test]
    fn test_get_string_invalid_utf8() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        let bucket = cache.bucket("pages");

        bucket.set("home", &[0xFF, 0xFE]);
        assert_eq!(bucket.get_string("home"), None);
    }
}
