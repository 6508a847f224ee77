//! QuickCache - a thread-safe in-memory cache
//!
//! Provides bounded key-value caching with TTL expiration, pluggable
//! eviction policies and serializers, optional metrics collection and
//! whole-cache disk persistence.
//!
//! ```no_run
//! use quickcache::{CacheConfig, QuickCache, Ttl};
//!
//! # fn main() -> quickcache::Result<()> {
//! let cache: QuickCache<String> = QuickCache::new(CacheConfig {
//!     max_size: 1000,
//!     default_ttl: 300,
//!     ..CacheConfig::default()
//! })?;
//!
//! cache.set("user:42", "alice".to_string(), Ttl::Default)?;
//! assert_eq!(cache.get("user:42")?, "alice");
//!
//! cache.stop();
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod policy;
pub mod registry;
pub mod serializer;
pub mod storage;

mod tasks;

pub use cache::{
    CacheEntry, CacheSnapshot, MetricsSnapshot, QuickCache, SnapshotEntry, Ttl, MAX_KEY_LENGTH,
};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use policy::{CacheView, EvictionPolicy, FifoPolicy, LfuPolicy, LruPolicy, NoOpPolicy};
pub use registry::{register_eviction_policy, register_serializer};
pub use serializer::{BincodeSerializer, CacheValue, JsonSerializer, Payload, Serializer};
pub use storage::FileManager;
