//! Pluggable caching for fetched content.
//!
//! Consumers talk to two traits and never to a concrete store:
//!
//! - [`Cache`] hands out named buckets and owns the whole-cache purge
//! - [`CacheBucket`] is a byte-oriented key-value store with time-based expiry
//!
//! [`MemoryCache`] is the in-process implementation; [`NullCache`] satisfies
//! the same API while storing nothing and stands in when caching is disabled.
//!
//! # Example
//!
//! ```
//! use lane_cache::{Cache, NullCache};
//!
//! let bucket = NullCache.bucket("pages");
//! bucket.set("home", b"{\"title\":\"Home\"}");
//! assert_eq!(bucket.get("home"), None); // NullCache always misses
//! ```

mod memory;
pub use memory::MemoryCache;

mod ext;
pub use ext::CacheBucketExt;

/// One named partition of a [`Cache`].
///
/// Values expire after the cache's freshness window. A hit happens only while
/// the entry is still fresh; an expired entry behaves exactly like a missing
/// one.
pub trait CacheBucket: Send + Sync {
    /// Look up `key`, returning `None` on miss or expiry.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, overwriting any existing entry and
    /// restarting its freshness window.
    fn set(&self, key: &str, value: &[u8]);
}

/// Factory for [`CacheBucket`]s.
///
/// Buckets are isolated: the same key in two buckets names two independent
/// entries. Purge lives on the factory rather than the bucket so one call
/// empties every bucket at once.
pub trait Cache: Send + Sync {
    /// Open or create the bucket called `name`.
    ///
    /// Repeated calls with the same name may return independent handles
    /// backed by the same storage.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;

    /// Drop every entry in every bucket.
    ///
    /// Afterwards any `get` misses until the key is set again; callers never
    /// observe a half-purged state.
    fn purge(&self);
}

/// Bucket that stores nothing. Every `get` misses and every `set` is
/// discarded.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8]) {}
}

/// [`Cache`] used when caching is disabled; hands out [`NullCacheBucket`]s.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }

    fn purge(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache_never_hits() {
        let cache = NullCache;
        let bucket = cache.bucket("pages");

        assert_eq!(bucket.get("key"), None);

        bucket.set("key", b"hello");
        assert_eq!(bucket.get("key"), None);
    }

    #[test]
    fn test_disabled_cache_misses_in_every_bucket() {
        let cache = NullCache;

        for name in &["pages", "articles", "categories", "global"] {
            let bucket = cache.bucket(name);
            bucket.set("k", b"data");
            assert_eq!(bucket.get("k"), None, "bucket {name} should miss");
        }
    }

    #[test]
    fn test_purge_on_disabled_cache_is_harmless() {
        let cache = NullCache;
        cache.purge();
        assert_eq!(cache.bucket("pages").get("k"), None);
    }
}
