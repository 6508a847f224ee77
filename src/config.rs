//! Configuration Module
//!
//! Handles cache configuration with sensible defaults and optional loading
//! from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// Construct with struct-update syntax to override only the fields of
/// interest:
///
/// ```
/// use quickcache::CacheConfig;
///
/// let config = CacheConfig {
///     max_size: 128,
///     eviction_policy: "lfu".to_string(),
///     ..CacheConfig::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold (must be positive)
    pub max_size: usize,
    /// Default TTL in seconds applied when an operation omits one.
    /// 0 means entries without an explicit TTL never expire.
    pub default_ttl: u64,
    /// Background cleanup sweep interval in seconds
    pub cleanup_interval: u64,
    /// Registered name of the eviction policy
    pub eviction_policy: String,
    /// Registered name of the cache serializer
    pub serializer: String,
    /// Directory for cache snapshot files
    pub storage_dir: PathBuf,
    /// Base filename for cache snapshots (extension comes from the serializer)
    pub filename: String,
    /// Append a timestamp suffix to cache snapshot filenames
    pub cache_timestamps: bool,
    /// Whether metric counters are recorded at all
    pub enable_metrics: bool,
    /// Registered name of the metrics serializer
    pub metrics_serializer: String,
    /// Directory for metrics snapshot files
    pub metrics_storage_dir: PathBuf,
    /// Base filename for metrics snapshots
    pub metrics_filename: String,
    /// Append a timestamp suffix to metrics snapshot filenames
    pub cache_metrics_timestamps: bool,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `QUICKCACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `QUICKCACHE_DEFAULT_TTL` - Default TTL in seconds, 0 = never (default: 0)
    /// - `QUICKCACHE_CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 10)
    /// - `QUICKCACHE_EVICTION_POLICY` - Eviction policy name (default: "lru")
    /// - `QUICKCACHE_SERIALIZER` - Serializer name (default: "json")
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(value) = env::var("QUICKCACHE_MAX_SIZE").ok().and_then(|v| v.parse().ok()) {
            config.max_size = value;
        }
        if let Some(value) = env::var("QUICKCACHE_DEFAULT_TTL").ok().and_then(|v| v.parse().ok()) {
            config.default_ttl = value;
        }
        if let Some(value) = env::var("QUICKCACHE_CLEANUP_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.cleanup_interval = value;
        }
        if let Ok(value) = env::var("QUICKCACHE_EVICTION_POLICY") {
            config.eviction_policy = value;
        }
        if let Ok(value) = env::var("QUICKCACHE_SERIALIZER") {
            config.serializer = value;
        }
        config
    }

    /// Validates numeric bounds before the cache is constructed.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::Configuration(
                "max_size must be a positive integer".to_string(),
            ));
        }
        if self.cleanup_interval == 0 {
            return Err(CacheError::Configuration(
                "cleanup_interval must be a positive number of seconds".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            default_ttl: 0,
            cleanup_interval: 10,
            eviction_policy: "lru".to_string(),
            serializer: "json".to_string(),
            storage_dir: PathBuf::from("."),
            filename: "cache".to_string(),
            cache_timestamps: false,
            enable_metrics: true,
            metrics_serializer: "json".to_string(),
            metrics_storage_dir: PathBuf::from("."),
            metrics_filename: "metrics".to_string(),
            cache_metrics_timestamps: false,
        }
    }
}
