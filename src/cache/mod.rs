//! Cache module - Named registry of bounded LRU caches.
//!
//! Used by the request layer to memoize responses per resource type
//! ("users", "assets", ...) keyed by a request fingerprint.
//!
//! ## Architecture
//!
//! The cache system follows a registry pattern:
//! - `CacheRegistry` - Registry holding all named caches, plus a process-wide instance
//! - `BoundedCache` - Fixed-capacity LRU cache with an optional TTL
//! - `CacheOptions` - Capacity/TTL used when a cache is first created
//!
//! ## Usage
//!
//! ```rust
//! use fluro::{CacheRegistry, ResponseCache};
//! use serde_json::json;
//!
//! let users: ResponseCache = CacheRegistry::global().get("users", None);
//! users.set("/content/user?limit=10".to_string(), json!([{"_id": "abc"}]));
//! assert!(users.get(&"/content/user?limit=10".to_string()).is_some());
//! ```

mod bounded;
mod config;
mod registry;

pub use bounded::BoundedCache;
pub use config::{CacheOptions, DEFAULT_MAX};
pub use registry::CacheRegistry;

/// Cache of API response bodies keyed by request fingerprint.
pub type ResponseCache = BoundedCache<String, serde_json::Value>;
