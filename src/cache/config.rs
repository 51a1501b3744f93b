//! Cache configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

/// Capacity used when no options are supplied or `max` is zero.
pub const DEFAULT_MAX: usize = 5;

const DEFAULT_MAX_NON_ZERO: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX) {
    Some(max) => max,
    None => NonZeroUsize::MIN,
};

/// Configuration for a bounded cache instance.
///
/// Only consulted the first time a cache is requested from the registry;
/// later requests for the same key get the existing cache unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Maximum number of entries in the cache.
    pub max: usize,

    /// Time-to-live for cache entries, in milliseconds.
    /// Expired entries read as absent.
    pub ttl_ms: Option<u64>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX,
            ttl_ms: None,
        }
    }
}

impl CacheOptions {
    /// Create options with the given max capacity.
    pub fn with_capacity(max: usize) -> Self {
        Self {
            max,
            ..Default::default()
        }
    }

    /// Set max capacity (builder pattern).
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Set time-to-live for cache entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl_ms = Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Disable TTL (entries only leave through eviction or reset).
    #[must_use]
    pub fn no_ttl(mut self) -> Self {
        self.ttl_ms = None;
        self
    }

    /// Capacity as `NonZeroUsize`, falling back to [`DEFAULT_MAX`] if zero.
    pub fn max_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max).unwrap_or(DEFAULT_MAX_NON_ZERO)
    }

    /// TTL as a `Duration`. A TTL of zero is treated as no TTL.
    pub fn ttl_duration(&self) -> Option<Duration> {
        self.ttl_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
