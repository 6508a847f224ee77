//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for all cache operations.
///
/// Every fallible public API in this crate returns this type. Errors are
/// raised at the boundary of the operation that detects them; the cache
/// never returns sentinel values for failure.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Key exists but its TTL has elapsed
    #[error("Key expired: {0}")]
    KeyExpired(String),

    /// Key already holds a valid entry
    #[error("Key already exists: {0}")]
    KeyAlreadyExists(String),

    /// TTL value outside the accepted range
    #[error("Invalid TTL value: {0}")]
    InvalidTtl(u64),

    /// Key failed validation
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Value or document could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Disk persistence failed
    #[error("Persistence error at '{path}': {message}")]
    Persistence {
        /// Path involved in the failed operation
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Registry lookup or registration failed
    #[error("Registry error: {0}")]
    Registry(String),

    /// Configuration rejected during validation
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Cache is full and the eviction policy produced no victim
    #[error("Cache full: {0}")]
    CacheFull(String),
}

impl CacheError {
    /// Builds a persistence error for `path` from any displayable cause.
    pub(crate) fn persistence(path: impl Into<PathBuf>, cause: impl ToString) -> Self {
        CacheError::Persistence {
            path: path.into(),
            message: cause.to_string(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_key() {
        assert_eq!(
            CacheError::KeyNotFound("user:1".to_string()).to_string(),
            "Key not found: user:1"
        );
        assert_eq!(
            CacheError::KeyExpired("session".to_string()).to_string(),
            "Key expired: session"
        );
        assert_eq!(CacheError::InvalidTtl(0).to_string(), "Invalid TTL value: 0");
    }

    #[test]
    fn test_persistence_error_carries_path() {
        let err = CacheError::persistence("/tmp/cache.json", "disk full");
        let rendered = err.to_string();
        assert!(rendered.contains("/tmp/cache.json"));
        assert!(rendered.contains("disk full"));
    }
}
