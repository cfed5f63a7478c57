//! In-process cache implementation.
//!
//! [`MemoryCache`] stores cache entries in a single map shared by every
//! bucket handle, guarded by one mutex. Sharing one store is what makes
//! [`Cache::purge`] atomic: the map is cleared under the lock, so no reader
//! can observe a half-cleared cache.
//!
//! Every entry records when it was stored. An entry older than the cache's
//! freshness window is treated as missing and evicted lazily on the next
//! lookup; there is no background sweeper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::{Cache, CacheBucket};

/// A stored value and the moment it was written.
struct Entry {
    stored_at: Instant,
    value: Vec<u8>,
}

/// Bucket name -> key -> entry.
type Store = Mutex<HashMap<String, HashMap<String, Entry>>>;

/// In-process [`Cache`] with a fixed freshness window.
///
/// Entries are fresh for `ttl` after the most recent `set` of their key;
/// after that they miss. Cloning bucket handles is cheap — they all point at
/// the same store.
pub struct MemoryCache {
    store: Arc<Store>,
    ttl: Duration,
}

impl MemoryCache {
    /// Create an empty cache whose entries stay fresh for `ttl`.
    ///
    /// A zero `ttl` produces a cache that accepts writes but never hits,
    /// which is occasionally useful in tests; prefer [`crate::NullCache`]
    /// when caching is disabled on purpose.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Number of stored entries across all buckets, counting entries that
    /// have expired but have not been evicted yet.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.lock().unwrap().values().map(HashMap::len).sum()
    }

    /// True when no entries are stored.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            store: Arc::clone(&self.store),
            name: name.to_owned(),
            ttl: self.ttl,
        })
    }

    fn purge(&self) {
        let mut store = self.store.lock().unwrap();
        let count: usize = store.values().map(HashMap::len).sum();
        store.clear();
        tracing::debug!("purged {count} cache entries");
    }
}

/// A bucket handle over the shared store.
struct MemoryCacheBucket {
    store: Arc<Store>,
    name: String,
    ttl: Duration,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut store = self.store.lock().unwrap();
        let bucket = store.get_mut(&self.name)?;

        let entry = bucket.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            // Expired — evict so the map does not grow without bound
            bucket.remove(key);
            tracing::debug!("cache entry expired: {}/{key}", self.name);
            return None;
        }

        Some(entry.value.clone())
    }

    fn set(&self, key: &str, value: &[u8]) {
        let entry = Entry {
            stored_at: Instant::now(),
            value: value.to_vec(),
        };
        self.store
            .lock()
            .unwrap()
            .entry(self.name.clone())
            .or_default()
            .insert(key.to_owned(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_cache() -> MemoryCache {
        MemoryCache::new(Duration::from_secs(60))
    }

    #[test]
    fn test_memory_bucket_set_and_get() {
        let cache = fresh_cache();
        let bucket = cache.bucket("pages");

        bucket.set("home", b"<h1>hello</h1>");
        assert_eq!(bucket.get("home"), Some(b"<h1>hello</h1>".to_vec()));
    }

    #[test]
    fn test_memory_bucket_get_nonexistent_key() {
        let cache = fresh_cache();
        let bucket = cache.bucket("pages");

        assert_eq!(bucket.get("nonexistent"), None);
    }

    #[test]
    fn test_memory_bucket_overwrite() {
        let cache = fresh_cache();
        let bucket = cache.bucket("pages");

        bucket.set("key", b"first");
        bucket.set("key", b"second");

        assert_eq!(bucket.get("key"), Some(b"second".to_vec()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_memory_buckets_are_isolated() {
        let cache = fresh_cache();
        let bucket_a = cache.bucket("alpha");
        let bucket_b = cache.bucket("beta");

        bucket_a.set("key", b"alpha-data");
        bucket_b.set("key", b"beta-data");

        assert_eq!(bucket_a.get("key"), Some(b"alpha-data".to_vec()));
        assert_eq!(bucket_b.get("key"), Some(b"beta-data".to_vec()));
    }

    #[test]
    fn test_memory_handles_share_storage() {
        let cache = fresh_cache();
        let writer = cache.bucket("pages");
        let reader = cache.bucket("pages");

        writer.set("key", b"shared");
        assert_eq!(reader.get("key"), Some(b"shared".to_vec()));
    }

    #[test]
    fn test_zero_ttl_always_misses() {
        let cache = MemoryCache::new(Duration::ZERO);
        let bucket = cache.bucket("pages");

        bucket.set("key", b"data");
        assert_eq!(bucket.get("key"), None);
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = MemoryCache::new(Duration::ZERO);
        let bucket = cache.bucket("pages");

        bucket.set("key", b"data");
        assert_eq!(cache.len(), 1);

        // The miss evicts the expired entry
        assert_eq!(bucket.get("key"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_entry_expires_after_window() {
        let cache = MemoryCache::new(Duration::from_millis(20));
        let bucket = cache.bucket("pages");

        bucket.set("key", b"data");
        assert_eq!(bucket.get("key"), Some(b"data".to_vec()));

        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(bucket.get("key"), None);
    }

    #[test]
    fn test_purge_clears_every_bucket() {
        let cache = fresh_cache();
        let pages = cache.bucket("pages");
        let articles = cache.bucket("articles");

        pages.set("home", b"page-data");
        articles.set("list", b"article-data");
        assert_eq!(cache.len(), 2);

        cache.purge();

        assert!(cache.is_empty());
        assert_eq!(pages.get("home"), None);
        assert_eq!(articles.get("list"), None);
    }

    #[test]
    fn test_bucket_usable_after_purge() {
        let cache = fresh_cache();
        let bucket = cache.bucket("pages");

        bucket.set("key", b"before");
        cache.purge();

        bucket.set("key", b"after");
        assert_eq!(bucket.get("key"), Some(b"after".to_vec()));
    }
}
