//! Fluro - Client SDK core for the Fluro content API.
//!
//! Caching and eventing primitives the higher-level services build on.
//!
//! ## Architecture
//!
//! - `cache` - Named registry of bounded LRU caches for request memoization
//! - `events` - Publish/subscribe dispatcher services expose to observers
//! - `utils` - Query string, ID and error message helpers
//! - `error` - Crate error type
//!
//! ## Usage
//!
//! ```rust
//! use fluro::events::listener;
//! use fluro::{CacheRegistry, EventDispatcher, ResponseCache};
//! use serde_json::json;
//!
//! let responses: ResponseCache = CacheRegistry::global().get("lib-docs", None);
//! responses.set("/content/article".to_string(), json!([]));
//!
//! // Clear cached responses whenever the signed-in user changes
//! let auth: EventDispatcher = EventDispatcher::new();
//! auth.add_event_listener("change", listener(|_| {
//!     CacheRegistry::global().reset();
//!     Ok(())
//! }));
//! auth.dispatch("change", None);
//!
//! assert!(responses.is_empty());
//! ```
//!
//! ## Errors
//!
//! Missing caches, listeners and events never fail; they degrade to
//! creation or no-ops. The one programming error is asking the registry for
//! an existing key with different key/value types: [`CacheRegistry::try_get`]
//! reports it as [`Error::CacheTypeMismatch`], while [`CacheRegistry::get`]
//! panics. Use `try_get` where a panic is not acceptable.
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod cache;
pub mod error;
pub mod events;
pub mod utils;

pub use cache::{BoundedCache, CacheOptions, CacheRegistry, ResponseCache};
pub use error::{Error, Result};
pub use events::{Bootstrap, EventDispatcher, EventTarget, Listener, create_dispatcher};

/// SDK version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
