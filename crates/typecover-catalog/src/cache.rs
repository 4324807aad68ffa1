//! Response cache
//!
//! Session-scoped memoization of completed lookups, keyed by request
//! identity. Entries are never evicted. Concurrent requests for the same key
//! share one fetch; failed fetches leave the slot empty so a later request
//! tries again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OnceCell;
use tracing::debug;

/// Hit and miss counters for a cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered without fetching
    pub hits: u64,
    /// Lookups that performed a fetch
    pub misses: u64,
    /// Populated entries
    pub entries: usize,
}

/// Append-only key/value cache with fetch coalescing
pub struct ResponseCache<V> {
    slots: Mutex<HashMap<String, Arc<OnceCell<V>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> ResponseCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Arc<OnceCell<V>>>> {
        // The map is only touched between awaits, so a poisoned lock still
        // holds consistent data
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn slot(&self, key: &str) -> Arc<OnceCell<V>> {
        self.slots()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Read a value if present
    pub fn get(&self, key: &str) -> Option<V> {
        let value = self.slots().get(key).and_then(|cell| cell.get().cloned());
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    /// Store a value unless the key is already populated
    ///
    /// Returns `false` if an earlier value was kept.
    pub fn insert(&self, key: &str, value: V) -> bool {
        self.slot(key).set(value).is_ok()
    }

    /// Return the cached value for `key`, fetching it on first use
    ///
    /// If another caller is already fetching the same key, this waits for
    /// that fetch instead of starting a second one. Errors are returned to
    /// the caller that ran the fetch and are not cached.
    pub async fn get_or_try_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.slot(key);
        if let Some(value) = cell.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "cache hit");
            return Ok(value.clone());
        }

        let fetched = AtomicBool::new(false);
        let value = cell
            .get_or_try_init(|| {
                fetched.store(true, Ordering::Relaxed);
                fetch()
            })
            .await?;

        if fetched.load(Ordering::Relaxed) {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key, "cache miss, stored response");
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "cache hit after waiting on in-flight fetch");
        }
        Ok(value.clone())
    }

    /// Number of populated entries
    pub fn len(&self) -> usize {
        self.slots()
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    /// True if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current hit/miss counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fetch_once_then_hit() {
        let cache: ResponseCache<String> = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_try_fetch("type/fire", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>("fire".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "fire");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: ResponseCache<u32> = ResponseCache::new();

        let first = cache
            .get_or_try_fetch("pokemon/missingno", || async { Err::<u32, _>("boom") })
            .await;
        assert!(first.is_err());
        assert!(cache.is_empty());

        let second = cache
            .get_or_try_fetch("pokemon/missingno", || async { Ok::<_, &str>(7) })
            .await;
        assert_eq!(second, Ok(7));
    }

    #[tokio::test]
    async fn test_concurrent_requests_coalesce() {
        let cache: ResponseCache<u32> = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, String>(42)
        };

        let (a, b) = tokio::join!(
            cache.get_or_try_fetch("type/water", fetch),
            cache.get_or_try_fetch("type/water", fetch),
        );

        assert_eq!(a.unwrap(), 42);
        assert_eq!(b.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_insert_and_get() {
        let cache: ResponseCache<&str> = ResponseCache::new();
        assert_eq!(cache.get("k"), None);
        assert!(cache.insert("k", "first"));
        assert!(!cache.insert("k", "second"));
        assert_eq!(cache.get("k"), Some("first"));
    }
}
