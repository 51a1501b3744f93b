//! Bounded LRU cache.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use super::CacheOptions;

/// Stored value plus the instant it was written.
struct Slot<V> {
    value: V,
    stored_at: Instant,
}

/// A fixed-capacity cache that evicts the least-recently-used entry on overflow.
///
/// This cache is:
/// - Thread-safe (one mutex per cache)
/// - Strict LRU, with an optional TTL
/// - Clone-friendly (cloning is cheap, shares the same underlying entries)
///
/// Capacity is fixed at construction and never changes, including across
/// [`reset`](Self::reset).
pub struct BoundedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    entries: Arc<Mutex<LruCache<K, Slot<V>>>>,
    name: Arc<str>,
    ttl: Option<Duration>,
}

// Manual Clone implementation that doesn't require K: Clone, V: Clone
impl<K, V> Clone for BoundedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            name: Arc::clone(&self.name),
            ttl: self.ttl,
        }
    }
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new cache with the given name and options.
    pub fn new(name: impl Into<Arc<str>>, options: &CacheOptions) -> Self {
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(options.max_non_zero()))),
            name: name.into(),
            ttl: options.ttl_duration(),
        }
    }

    /// Get the name of this cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum number of entries this cache holds.
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// Configured time-to-live, if any.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn is_expired(&self, slot: &Slot<V>) -> bool {
        self.ttl
            .is_some_and(|ttl| slot.stored_at.elapsed() >= ttl)
    }

    /// Insert or update an entry.
    ///
    /// Inserting a new key into a full cache evicts the least-recently-used
    /// entry first; the evicted pair is returned. Updating an existing key
    /// never evicts and returns `None`.
    pub fn set(&self, key: K, value: V) -> Option<(K, V)> {
        let mut entries = self.entries.lock();
        let existed = entries.contains(&key);
        let slot = Slot {
            value,
            stored_at: Instant::now(),
        };

        let evicted = entries.push(key, slot);
        if existed {
            return None;
        }

        evicted.map(|(key, slot)| {
            debug!("Evicted least-recently-used entry from cache: {}", self.name);
            (key, slot.value)
        })
    }

    /// Get a value from the cache, marking it as most recently used.
    ///
    /// Returns `None` if the key is absent or its entry has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(slot) if !self.is_expired(slot) => return Some(slot.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
        }
        None
    }

    /// Get a value without touching its recency.
    pub fn peek(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock();
        entries
            .peek(key)
            .filter(|slot| !self.is_expired(slot))
            .map(|slot| slot.value.clone())
    }

    /// Check if a live entry exists. Does not touch recency.
    pub fn has(&self, key: &K) -> bool {
        let entries = self.entries.lock();
        entries
            .peek(key)
            .is_some_and(|slot| !self.is_expired(slot))
    }

    /// Remove an entry, returning its value if it was live.
    pub fn delete(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock();
        entries
            .pop(key)
            .filter(|slot| !self.is_expired(slot))
            .map(|slot| slot.value)
    }

    /// Drop every entry. Capacity and TTL are kept.
    pub fn reset(&self) {
        self.entries.lock().clear();
    }

    /// Same as [`reset`](Self::reset).
    pub fn clear(&self) {
        self.reset();
    }

    /// Number of stored entries, including expired ones not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<K, V> BoundedCache<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Live keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        let entries = self.entries.lock();
        entries
            .iter()
            .filter(|(_, slot)| !self.is_expired(slot))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Remove expired entries. Returns the number removed.
    pub fn prune(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }

        let mut entries = self.entries.lock();
        let stale: Vec<K> = entries
            .iter()
            .filter(|(_, slot)| self.is_expired(slot))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            entries.pop(key);
        }
        stale.len()
    }
}

impl<K, V> std::fmt::Debug for BoundedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("BoundedCache")
            .field("name", &self.name)
            .field("capacity", &entries.cap())
            .field("len", &entries.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
