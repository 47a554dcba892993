//! Bounded response cache with TTL and LRU eviction.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use rates_types::CacheKey;

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Lifetime of an entry, counted from insertion.
    pub ttl: Duration,
    /// Maximum number of entries.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_entries: 100,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    last_access: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            inserted_at: now,
            last_access: now,
        }
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.inserted_at) >= ttl
    }
}

/// Hit/miss counters and current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Thread-safe cache keyed by [`CacheKey`].
///
/// Failed computations are never stored. Concurrent misses on the same key
/// may each run the supplier.
pub struct ResponseCache<V> {
    entries: DashMap<CacheKey, CacheEntry<V>>,
    /// Serializes inserts so the capacity check and the insert are one step.
    /// Reads and removals only ever shrink the map and skip it.
    write_lock: Mutex<()>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            write_lock: Mutex::new(()),
            config: CacheConfig {
                max_entries: config.max_entries.max(1),
                ..config
            },
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the cached value, or runs `supplier` once and caches its
    /// success.
    pub async fn get_or_compute<F, Fut, E>(&self, key: CacheKey, supplier: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Cache miss");

        let value = supplier().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Live value for `key`, refreshing its recency.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let now = Instant::now();

        let expired = match self.entries.get_mut(key) {
            Some(mut entry) if !entry.is_expired(now, self.config.ttl) => {
                entry.last_access = now;
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!(key = %key, "Cache entry expired");
            self.entries
                .remove_if(key, |_, entry| entry.is_expired(now, self.config.ttl));
        }
        None
    }

    pub fn insert(&self, key: CacheKey, value: V) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.max_entries {
            self.make_room();
        }
        self.entries.insert(key, CacheEntry::new(value, Instant::now()));
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included until they are purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    /// Drops expired entries, then least recently used ones, until one more
    /// entry fits.
    fn make_room(&self) {
        let now = Instant::now();
        self.entries
            .retain(|_, entry| !entry.is_expired(now, self.config.ttl));

        while self.entries.len() >= self.config.max_entries {
            let lru = self
                .entries
                .iter()
                .min_by_key(|entry| entry.last_access)
                .map(|entry| entry.key().clone());

            let Some(key) = lru else { break };
            debug!(key = %key, "Evicting least recently used entry");
            self.entries.remove(&key);
        }
    }
}
