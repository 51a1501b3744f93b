//! Crate error type.

use thiserror::Error;

/// Errors raised by the Fluro core.
///
/// The registry and dispatcher degrade to no-ops for missing keys and
/// listeners, so the only failure is a programming error.
#[derive(Debug, Error)]
pub enum Error {
    /// A cache was requested with key/value types other than the ones it was created with.
    #[error("cache '{name}' already exists with different types: expected {expected}, found {found}")]
    CacheTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Result alias for fallible Fluro operations.
pub type Result<T> = std::result::Result<T, Error>;
