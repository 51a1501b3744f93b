//! Cache registry - Central management for all named caches.

use std::any::{Any, TypeId};
use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::{debug, info};

use super::{BoundedCache, CacheOptions};
use crate::error::{Error, Result};

static GLOBAL: Lazy<CacheRegistry> = Lazy::new(CacheRegistry::new);

/// Central registry of named bounded caches.
///
/// Caches are created lazily on first request and live as long as the
/// registry. The first request for a key decides the cache's options; later
/// requests get the same instance back no matter what options they pass.
///
/// ## Example
///
/// ```rust
/// use fluro::{CacheOptions, CacheRegistry};
///
/// let registry = CacheRegistry::new();
///
/// let users = registry.get::<String, String>("users", Some(CacheOptions::with_capacity(50)));
/// users.set("5cb3d8b3a2219970e6f86927".to_string(), "Jane".to_string());
///
/// // Same cache, options ignored
/// let again = registry.get::<String, String>("users", None);
/// assert_eq!(again.capacity(), 50);
///
/// // Logging out: drop every cached response
/// registry.reset();
/// assert!(again.is_empty());
/// ```
#[derive(Clone)]
pub struct CacheRegistry {
    caches: Arc<DashMap<String, CacheEntry>>,
}

/// Operations the registry needs without knowing a cache's key/value types.
trait ErasedCache: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn reset(&self);
    fn len(&self) -> usize;
}

impl<K, V> ErasedCache for BoundedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn reset(&self) {
        BoundedCache::reset(self);
    }

    fn len(&self) -> usize {
        BoundedCache::len(self)
    }
}

/// Internal cache entry storing a type-erased cache.
struct CacheEntry {
    cache: Box<dyn ErasedCache>,
    type_id: TypeId,
    type_name: &'static str,
}

impl CacheEntry {
    fn downcast<K, V>(&self, name: &str) -> Result<BoundedCache<K, V>>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        self.cache
            .as_any()
            .downcast_ref::<BoundedCache<K, V>>()
            .cloned()
            .ok_or_else(|| Error::CacheTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<BoundedCache<K, V>>(),
                found: self.type_name,
            })
    }
}

impl CacheRegistry {
    /// Create a new empty cache registry.
    pub fn new() -> Self {
        info!("Cache registry initialized");
        Self {
            caches: Arc::new(DashMap::new()),
        }
    }

    /// The process-wide registry. Empty on first access, never torn down.
    pub fn global() -> &'static CacheRegistry {
        &GLOBAL
    }

    /// Get the cache registered under `key`, creating it if needed.
    ///
    /// `options` only matter on creation; `None` means capacity 5, no TTL.
    ///
    /// # Panics
    /// Panics if a cache with the same key but different types already exists.
    /// Use [`try_get`](Self::try_get) to handle that case.
    pub fn get<K, V>(&self, key: &str, options: Option<CacheOptions>) -> BoundedCache<K, V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        match self.try_get(key, options) {
            Ok(cache) => cache,
            Err(e) => panic!("{e}"),
        }
    }

    /// Get the cache registered under `key`, creating it if needed.
    ///
    /// Returns [`Error::CacheTypeMismatch`] if the existing cache was created
    /// with different key/value types.
    pub fn try_get<K, V>(&self, key: &str, options: Option<CacheOptions>) -> Result<BoundedCache<K, V>>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        if let Some(existing) = self.caches.get(key) {
            return existing.downcast(key);
        }

        // Another caller may have created it between the lookup and here
        let entry = self.caches.entry(key.to_string()).or_insert_with(|| {
            let options = options.unwrap_or_default();
            debug!(
                "Creating cache: {} (max={}, ttl={:?})",
                key,
                options.max_non_zero(),
                options.ttl_duration()
            );

            CacheEntry {
                cache: Box::new(BoundedCache::<K, V>::new(key, &options)),
                type_id: TypeId::of::<BoundedCache<K, V>>(),
                type_name: std::any::type_name::<BoundedCache<K, V>>(),
            }
        });

        entry.downcast(key)
    }

    /// Clear every registered cache.
    ///
    /// Caches stay registered with their original options; only entries are
    /// dropped. Call this when the signed-in account changes.
    pub fn reset(&self) {
        let mut cleared = 0usize;
        for entry in self.caches.iter() {
            debug!("Reset {} cache ({} entries)", entry.key(), entry.cache.len());
            entry.cache.reset();
            cleared += 1;
        }
        info!("Reset {} caches", cleared);
    }

    /// Clear a single cache. Returns `true` if the cache exists.
    pub fn reset_cache(&self, key: &str) -> bool {
        match self.caches.get(key) {
            Some(entry) => {
                entry.cache.reset();
                debug!("Reset {} cache", key);
                true
            }
            None => false,
        }
    }

    /// Check if a cache with the given key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.caches.contains_key(key)
    }

    /// Check if the cache under `key` was created with types `K`/`V`.
    pub fn is_type<K, V>(&self, key: &str) -> bool
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        self.caches
            .get(key)
            .is_some_and(|entry| entry.type_id == TypeId::of::<BoundedCache<K, V>>())
    }

    /// Get the number of registered caches.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Get a list of all registered cache keys.
    pub fn cache_names(&self) -> Vec<String> {
        self.caches.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("cache_count", &self.caches.len())
            .field("cache_names", &self.cache_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_get_returns_same_instance() {
        let registry = CacheRegistry::new();
        let first = registry.get::<String, u32>("users", Some(CacheOptions::with_capacity(10)));
        let second = registry.get::<String, u32>("users", Some(CacheOptions::with_capacity(2)));

        assert_eq!(second.capacity(), 10);

        first.set("a".to_string(), 1);
        assert_eq!(second.get(&"a".to_string()), Some(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_default_capacity() {
        let registry = CacheRegistry::new();
        let cache = registry.get::<String, Value>("assets", None);
        assert_eq!(cache.capacity(), 5);
        assert!(cache.ttl().is_none());
    }

    #[test]
    fn test_zero_max_falls_back_to_default() {
        let registry = CacheRegistry::new();
        let cache = registry.get::<String, Value>("assets", Some(CacheOptions::with_capacity(0)));
        assert_eq!(cache.capacity(), 5);
    }

    #[test]
    fn test_eviction_through_registry() {
        let registry = CacheRegistry::new();
        let cache = registry.get::<String, Value>("contacts", Some(CacheOptions::with_capacity(3)));

        for i in 0..4 {
            cache.set(format!("fp-{i}"), json!({ "index": i }));
        }

        assert!(!cache.has(&"fp-0".to_string()));
        for i in 1..4 {
            assert!(cache.has(&format!("fp-{i}")));
        }
    }

    #[test]
    fn test_reset_clears_all_caches_and_keeps_capacity() {
        let registry = CacheRegistry::new();
        let users = registry.get::<String, Value>("users", Some(CacheOptions::with_capacity(2)));
        let assets = registry.get::<String, Value>("assets", None);

        users.set("u1".to_string(), json!({"name": "Jane"}));
        users.set("u2".to_string(), json!({"name": "John"}));
        assets.set("a1".to_string(), json!("file.png"));

        registry.reset();

        assert!(!users.has(&"u1".to_string()));
        assert!(!users.has(&"u2".to_string()));
        assert!(!assets.has(&"a1".to_string()));
        assert_eq!(registry.len(), 2);

        // Capacity unchanged: filling up to max evicts nothing
        assert!(users.set("u3".to_string(), json!(3)).is_none());
        assert!(users.set("u4".to_string(), json!(4)).is_none());
        assert_eq!(users.len(), 2);
        assert_eq!(registry.get::<String, Value>("users", None).capacity(), 2);
    }

    #[test]
    fn test_reset_empty_registry() {
        let registry = CacheRegistry::new();
        registry.reset();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reset_single_cache() {
        let registry = CacheRegistry::new();
        let users = registry.get::<String, u32>("users", None);
        let assets = registry.get::<String, u32>("assets", None);
        users.set("a".to_string(), 1);
        assets.set("b".to_string(), 2);

        assert!(registry.reset_cache("users"));
        assert!(!registry.reset_cache("missing"));

        assert!(users.is_empty());
        assert_eq!(assets.get(&"b".to_string()), Some(2));
    }

    #[test]
    fn test_type_mismatch() {
        let registry = CacheRegistry::new();
        let _ = registry.get::<String, u32>("users", None);

        assert!(registry.is_type::<String, u32>("users"));
        assert!(!registry.is_type::<String, String>("users"));

        let result = registry.try_get::<String, String>("users", None);
        assert!(matches!(result, Err(Error::CacheTypeMismatch { ref name, .. }) if name == "users"));
    }

    #[test]
    #[should_panic(expected = "users")]
    fn test_get_panics_on_type_mismatch() {
        let registry = CacheRegistry::new();
        let _ = registry.get::<String, u32>("users", None);
        let _ = registry.get::<u64, u32>("users", None);
    }

    #[test]
    fn test_cache_names() {
        let registry = CacheRegistry::new();
        let _ = registry.get::<String, u32>("users", None);
        let _ = registry.get::<String, u32>("assets", None);

        let mut names = registry.cache_names();
        names.sort();
        assert_eq!(names, vec!["assets", "users"]);
        assert!(registry.contains("users"));
        assert!(!registry.contains("teams"));
    }

    #[test]
    fn test_global_is_shared() {
        let cache = CacheRegistry::global().get::<String, u32>("registry-tests-global", None);
        cache.set("a".to_string(), 1);

        let again = CacheRegistry::global().get::<String, u32>("registry-tests-global", None);
        assert_eq!(again.get(&"a".to_string()), Some(1));
    }
}
