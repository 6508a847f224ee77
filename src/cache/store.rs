//! Cache Store Module
//!
//! Main cache engine combining the insertion-ordered store with pluggable
//! eviction, TTL expiration, metrics and disk persistence.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::cache::entry::{CacheEntry, Ttl};
use crate::cache::metrics::{MetricsRecorder, MetricsSnapshot};
use crate::cache::snapshot::{CacheSnapshot, SNAPSHOT_VERSION};
use crate::cache::MAX_KEY_LENGTH;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::policy::{CacheView, EvictionPolicy};
use crate::registry::{create_eviction_policy, create_serializer};
use crate::serializer::{CacheValue, Serializer};
use crate::storage::FileManager;
use crate::tasks::{spawn_cleanup_worker, WorkerHandle};

// == Key Status ==
/// Classification of a key during lookup. Inspecting an expired key removes
/// it and fires the policy's delete hook; metric attribution stays with the
/// caller, since a stale entry found by a write path is dropped silently
/// while a read reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyStatus {
    /// Key does not exist
    Missing,
    /// Key existed but its TTL had elapsed; the entry was just removed
    Expired,
    /// Key exists and is not expired
    Valid,
}

// == Entries View ==
/// Read-only adapter handed to eviction policy callbacks.
struct EntriesView<'a, V>(&'a IndexMap<String, CacheEntry<V>>);

impl<V> CacheView for EntriesView<'_, V> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn iter_keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.0.keys().map(String::as_str))
    }
}

// == Cache Inner ==
/// State guarded by the cache mutex: the entry map, the eviction policy's
/// bookkeeping and the metric counters all change together under one lock.
pub(crate) struct CacheInner<V> {
    /// Key-value storage in insertion order
    entries: IndexMap<String, CacheEntry<V>>,
    /// Pluggable eviction strategy
    policy: Box<dyn EvictionPolicy>,
    /// Operation counters
    metrics: MetricsRecorder,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Default TTL in seconds, 0 = entries never expire by default
    default_ttl: u64,
}

impl<V: CacheValue> CacheInner<V> {
    fn new(policy: Box<dyn EvictionPolicy>, config: &CacheConfig) -> Self {
        Self {
            entries: IndexMap::new(),
            policy,
            metrics: MetricsRecorder::new(config.enable_metrics),
            max_size: config.max_size,
            default_ttl: config.default_ttl,
        }
    }

    // == Policy Notification ==
    fn notify_add(&mut self, key: &str) {
        self.policy.on_add(&EntriesView(&self.entries), key);
    }

    fn notify_update(&mut self, key: &str) {
        self.policy.on_update(&EntriesView(&self.entries), key);
    }

    fn notify_access(&mut self, key: &str) {
        self.policy.on_access(&EntriesView(&self.entries), key);
    }

    fn notify_delete(&mut self, key: &str) {
        self.policy.on_delete(&EntriesView(&self.entries), key);
    }

    // == Key Inspection ==
    /// Classifies a key, removing it if it turns out to be expired.
    ///
    /// Must be called at most once per key per operation: the Expired
    /// answer is only produced the first time.
    fn inspect_key(&mut self, key: &str) -> KeyStatus {
        let now = Utc::now();
        let expired = match self.entries.get(key) {
            None => return KeyStatus::Missing,
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            self.entries.shift_remove(key);
            self.notify_delete(key);
            KeyStatus::Expired
        } else {
            KeyStatus::Valid
        }
    }

    // == Get ==
    fn get(&mut self, key: &str) -> Result<V> {
        match self.inspect_key(key) {
            KeyStatus::Missing => {
                self.metrics.record_miss();
                Err(CacheError::KeyNotFound(key.to_string()))
            }
            KeyStatus::Expired => {
                self.metrics.record_expired_hit();
                Err(CacheError::KeyExpired(key.to_string()))
            }
            KeyStatus::Valid => {
                let now = Utc::now();
                let Some(entry) = self.entries.get_mut(key) else {
                    self.metrics.record_miss();
                    return Err(CacheError::KeyNotFound(key.to_string()));
                };
                entry.touch(now);
                let value = entry.value.clone();
                self.notify_access(key);
                self.metrics.record_hit();
                Ok(value)
            }
        }
    }

    // == Insert ==
    /// Inserts a brand-new entry, evicting first if the cache is full.
    fn insert_new(&mut self, key: &str, value: V, ttl_secs: Option<u64>) -> Result<()> {
        self.ensure_capacity()?;
        let entry = CacheEntry::new(value, ttl_secs, Utc::now());
        self.entries.insert(key.to_string(), entry);
        self.notify_add(key);
        Ok(())
    }

    /// Replaces the value of a known-valid key in place.
    fn overwrite_existing(&mut self, key: &str, value: V, ttl_secs: Option<u64>) -> Result<()> {
        let now = Utc::now();
        let Some(entry) = self.entries.get_mut(key) else {
            return Err(CacheError::KeyNotFound(key.to_string()));
        };
        entry.overwrite(value, ttl_secs, now);
        self.notify_update(key);
        Ok(())
    }

    // == Set ==
    fn set(&mut self, key: &str, value: V, ttl_secs: Option<u64>) -> Result<()> {
        match self.inspect_key(key) {
            KeyStatus::Valid => {
                self.overwrite_existing(key, value, ttl_secs)?;
                self.metrics.record_update();
            }
            // A stale entry was already dropped silently, so both cases
            // take the insertion path.
            KeyStatus::Missing | KeyStatus::Expired => {
                self.insert_new(key, value, ttl_secs)?;
                self.metrics.record_set();
            }
        }
        debug!(key, "key set");
        Ok(())
    }

    // == Add ==
    fn add(&mut self, key: &str, value: V, ttl_secs: Option<u64>) -> Result<()> {
        if self.inspect_key(key) == KeyStatus::Valid {
            return Err(CacheError::KeyAlreadyExists(key.to_string()));
        }
        self.insert_new(key, value, ttl_secs)?;
        self.metrics.record_add();
        debug!(key, "key added");
        Ok(())
    }

    // == Update ==
    fn update(&mut self, key: &str, value: V, ttl_secs: Option<u64>) -> Result<()> {
        match self.inspect_key(key) {
            // An expired entry reads as absent; the stale entry is gone
            // either way.
            KeyStatus::Missing | KeyStatus::Expired => {
                Err(CacheError::KeyNotFound(key.to_string()))
            }
            KeyStatus::Valid => {
                self.overwrite_existing(key, value, ttl_secs)?;
                self.metrics.record_update();
                debug!(key, "key updated");
                Ok(())
            }
        }
    }

    // == Delete ==
    fn delete(&mut self, key: &str) -> Result<()> {
        match self.inspect_key(key) {
            KeyStatus::Missing | KeyStatus::Expired => {
                Err(CacheError::KeyNotFound(key.to_string()))
            }
            KeyStatus::Valid => {
                self.entries.shift_remove(key);
                self.notify_delete(key);
                self.metrics.record_delete();
                debug!(key, "key deleted");
                Ok(())
            }
        }
    }

    // == TTL Inspection ==
    /// Reports the remaining TTL of a valid key without counting as a read.
    fn ttl(&mut self, key: &str) -> Result<Option<u64>> {
        match self.inspect_key(key) {
            KeyStatus::Missing => Err(CacheError::KeyNotFound(key.to_string())),
            KeyStatus::Expired => Err(CacheError::KeyExpired(key.to_string())),
            KeyStatus::Valid => {
                let now = Utc::now();
                match self.entries.get(key) {
                    Some(entry) => Ok(entry.ttl_remaining(now)),
                    None => Err(CacheError::KeyNotFound(key.to_string())),
                }
            }
        }
    }

    // == Expire ==
    /// Reschedules an existing valid key's expiry.
    fn expire(&mut self, key: &str, ttl_secs: Option<u64>) -> Result<()> {
        match self.inspect_key(key) {
            KeyStatus::Missing | KeyStatus::Expired => {
                Err(CacheError::KeyNotFound(key.to_string()))
            }
            KeyStatus::Valid => {
                let now = Utc::now();
                let Some(entry) = self.entries.get_mut(key) else {
                    return Err(CacheError::KeyNotFound(key.to_string()));
                };
                entry.reschedule(ttl_secs, now);
                self.notify_update(key);
                debug!(key, "expiry rescheduled");
                Ok(())
            }
        }
    }

    // == Capacity ==
    /// Makes room for one new entry when the cache is full.
    ///
    /// Expired entries are swept first; only if the cache is still full is
    /// a victim chosen by the policy. The victim comes from the keys
    /// present before the new insert, so a just-inserted key can never be
    /// its own eviction candidate.
    fn ensure_capacity(&mut self) -> Result<()> {
        if self.entries.len() < self.max_size {
            return Ok(());
        }

        warn!(capacity = self.max_size, "cache capacity reached");
        self.sweep_expired();

        while self.entries.len() >= self.max_size {
            let victim = self
                .policy
                .select_eviction_key(&EntriesView(&self.entries))
                .ok_or_else(|| {
                    CacheError::CacheFull("eviction policy selected no victim".to_string())
                })?;
            if self.entries.shift_remove(&victim).is_none() {
                return Err(CacheError::CacheFull(format!(
                    "eviction policy selected unknown key '{victim}'"
                )));
            }
            self.notify_delete(&victim);
            self.metrics.record_eviction();
            debug!(key = %victim, "evicted entry");
        }
        Ok(())
    }

    // == Cleanup ==
    /// Removes every expired entry without touching cleanup metrics.
    fn sweep_expired(&mut self) -> usize {
        let now = Utc::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.shift_remove(key);
            self.notify_delete(key);
        }
        expired.len()
    }

    /// Full cleanup pass: sweeps expired entries and records the run.
    pub(crate) fn cleanup(&mut self) -> usize {
        let removed = self.sweep_expired();
        self.metrics.record_cleanup(removed as u64);
        removed
    }

    // == Introspection ==
    fn size(&self) -> usize {
        self.entries.len()
    }

    fn valid_size(&self) -> usize {
        let now = Utc::now();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn valid_keys(&self) -> Vec<String> {
        let now = Utc::now();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Clear ==
    fn clear(&mut self) {
        let cleared = self.entries.len();
        self.entries.clear();
        self.policy.reset();
        info!(cleared, "cache cleared");
    }

    // == Snapshot ==
    fn to_snapshot(&self) -> CacheSnapshot<V> {
        let mut snapshot = CacheSnapshot::new(self.default_ttl);
        for (key, entry) in &self.entries {
            snapshot.push_entry(key.clone(), entry.clone());
        }
        snapshot
    }

    /// Replaces the in-memory state with a snapshot's surviving entries.
    ///
    /// Validates everything before mutating, so a rejected document leaves
    /// the cache untouched.
    fn load_snapshot(&mut self, snapshot: CacheSnapshot<V>, path: &Path) -> Result<()> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CacheError::persistence(
                path,
                format!(
                    "unsupported snapshot version {} (expected {})",
                    snapshot.version, SNAPSHOT_VERSION
                ),
            ));
        }

        let now = Utc::now();
        let total = snapshot.entries.len();
        let live: Vec<(String, CacheEntry<V>)> = snapshot
            .entries
            .into_iter()
            .map(|entry| entry.into_parts())
            .filter(|(_, entry)| !entry.is_expired(now))
            .collect();

        if live.len() > self.max_size {
            return Err(CacheError::persistence(
                path,
                format!(
                    "snapshot holds {} live entries but capacity is {}",
                    live.len(),
                    self.max_size
                ),
            ));
        }

        self.entries.clear();
        self.policy.reset();
        self.metrics.reset();

        for (key, entry) in live {
            self.entries.insert(key.clone(), entry);
            self.notify_add(&key);
        }

        info!(
            loaded = self.entries.len(),
            dropped = total - self.entries.len(),
            "cache loaded from disk"
        );
        Ok(())
    }
}

// == Key Validation ==
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key must not be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {MAX_KEY_LENGTH} bytes"
        )));
    }
    Ok(())
}

// == Quick Cache ==
/// Thread-safe in-memory cache with TTL expiration, pluggable eviction,
/// optional metrics and whole-cache disk persistence.
///
/// All methods take `&self`; share a cache across threads behind an `Arc`
/// or borrow it from scoped threads. Every public operation acquires the
/// cache's single mutex, so operations from different threads are
/// linearizable. Persistence holds the lock through its file I/O, trading
/// read latency during saves for a consistent snapshot.
///
/// A background worker sweeps expired entries every
/// `config.cleanup_interval` seconds until [`QuickCache::stop`] is called
/// or the cache is dropped.
pub struct QuickCache<V: CacheValue> {
    inner: Arc<Mutex<CacheInner<V>>>,
    worker: WorkerHandle,
    serializer: Box<dyn Serializer<V>>,
    metrics_serializer: Box<dyn Serializer<V>>,
    cache_files: FileManager,
    metrics_files: FileManager,
    config: CacheConfig,
}

impl<V: CacheValue> QuickCache<V> {
    // == Constructor ==
    /// Creates a cache from the given configuration and starts its cleanup
    /// worker.
    ///
    /// # Errors
    /// `ConfigurationError` for invalid numeric options, `RegistryError`
    /// when the configured policy or serializer name is unknown.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let policy = create_eviction_policy(&config.eviction_policy)?;
        let serializer = create_serializer::<V>(&config.serializer)?;
        let metrics_serializer = create_serializer::<V>(&config.metrics_serializer)?;

        let inner = Arc::new(Mutex::new(CacheInner::new(policy, &config)));
        let worker = spawn_cleanup_worker(
            Arc::downgrade(&inner),
            Duration::from_secs(config.cleanup_interval),
        );

        info!(
            max_size = config.max_size,
            policy = %config.eviction_policy,
            serializer = %config.serializer,
            "cache initialized"
        );

        Ok(Self {
            cache_files: FileManager::new(config.storage_dir.clone(), config.filename.clone()),
            metrics_files: FileManager::new(
                config.metrics_storage_dir.clone(),
                config.metrics_filename.clone(),
            ),
            inner,
            worker,
            serializer,
            metrics_serializer,
            config,
        })
    }

    /// Creates a cache with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(CacheConfig::default())
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// # Errors
    /// `KeyNotFound` if the key is absent; `KeyExpired` if the key existed
    /// but its TTL elapsed, in which case the stale entry is removed.
    pub fn get(&self, key: &str) -> Result<V> {
        self.inner.lock().get(key)
    }

    // == Set ==
    /// Inserts or replaces the value under `key`.
    ///
    /// Replacing refreshes the entry's creation time and expiry. Inserting
    /// into a full cache first sweeps expired entries, then evicts one
    /// victim chosen by the policy; the new key is never a candidate.
    ///
    /// # Errors
    /// `InvalidKey` or `InvalidTtl` when validation fails.
    pub fn set(&self, key: &str, value: V, ttl: Ttl) -> Result<()> {
        validate_key(key)?;
        let ttl_secs = ttl.resolve(self.config.default_ttl)?;
        self.inner.lock().set(key, value, ttl_secs)
    }

    // == Add ==
    /// Inserts `key` only if it does not already hold a valid entry.
    /// A leftover expired entry is treated as absent.
    ///
    /// # Errors
    /// `KeyAlreadyExists` if a valid entry is present; `InvalidKey` /
    /// `InvalidTtl` on validation failure.
    pub fn add(&self, key: &str, value: V, ttl: Ttl) -> Result<()> {
        validate_key(key)?;
        let ttl_secs = ttl.resolve(self.config.default_ttl)?;
        self.inner.lock().add(key, value, ttl_secs)
    }

    // == Update ==
    /// Replaces the value of an existing valid key.
    ///
    /// # Errors
    /// `KeyNotFound` if the key is absent or expired (the stale entry is
    /// dropped); `InvalidKey` / `InvalidTtl` on validation failure.
    pub fn update(&self, key: &str, value: V, ttl: Ttl) -> Result<()> {
        validate_key(key)?;
        let ttl_secs = ttl.resolve(self.config.default_ttl)?;
        self.inner.lock().update(key, value, ttl_secs)
    }

    // == Delete ==
    /// Removes `key` from the cache.
    ///
    /// # Errors
    /// `KeyNotFound` if the key is absent or expired.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.inner.lock().delete(key)
    }

    // == TTL ==
    /// Reports the remaining TTL of `key` in seconds, or `None` for an
    /// entry that never expires. Does not count as a read: no metric moves
    /// and the eviction policy is not notified.
    ///
    /// # Errors
    /// `KeyNotFound` if the key is absent; `KeyExpired` if it lapsed, in
    /// which case the stale entry is removed.
    pub fn ttl(&self, key: &str) -> Result<Option<u64>> {
        self.inner.lock().ttl(key)
    }

    /// Reschedules the expiry of an existing valid key, leaving its value
    /// untouched. `Ttl::Never` pins the entry; `Ttl::Default` re-applies the
    /// configured default.
    ///
    /// # Errors
    /// `KeyNotFound` if the key is absent or expired; `InvalidTtl` when an
    /// explicit zero TTL is requested.
    pub fn expire(&self, key: &str, ttl: Ttl) -> Result<()> {
        let ttl_secs = ttl.resolve(self.config.default_ttl)?;
        self.inner.lock().expire(key, ttl_secs)
    }

    // == Bulk Operations ==
    /// Inserts or replaces many keys under one lock acquisition.
    ///
    /// The first validation failure aborts the batch; entries already
    /// written stay in place, there is no rollback.
    pub fn set_many<I>(&self, entries: I, ttl: Ttl) -> Result<()>
    where
        I: IntoIterator<Item = (String, V)>,
    {
        let ttl_secs = ttl.resolve(self.config.default_ttl)?;
        let mut inner = self.inner.lock();
        for (key, value) in entries {
            validate_key(&key)?;
            inner.set(&key, value, ttl_secs)?;
        }
        Ok(())
    }

    /// Retrieves many keys under one lock acquisition.
    ///
    /// Missing and expired keys are silently omitted; the result maps each
    /// found key to its value in request order. Each requested key is
    /// metered exactly like a single `get`.
    pub fn get_many(&self, keys: &[&str]) -> IndexMap<String, V> {
        let mut inner = self.inner.lock();
        let mut results = IndexMap::new();
        for key in keys {
            if let Ok(value) = inner.get(key) {
                results.insert(key.to_string(), value);
            }
        }
        results
    }

    /// Deletes many keys under one lock acquisition, skipping keys that are
    /// absent or expired.
    pub fn delete_many(&self, keys: &[&str]) {
        let mut inner = self.inner.lock();
        let mut skipped = 0usize;
        for key in keys {
            if inner.delete(key).is_err() {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!(skipped, "bulk delete skipped missing or expired keys");
        }
    }

    // == Introspection ==
    /// Number of entries currently stored, including expired entries that
    /// have not been swept yet.
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    /// Number of entries that have not expired.
    pub fn valid_size(&self) -> usize {
        self.inner.lock().valid_size()
    }

    /// All keys in insertion order, unswept expired ones included.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    /// Keys of entries that have not expired, in insertion order.
    pub fn valid_keys(&self) -> Vec<String> {
        self.inner.lock().valid_keys()
    }

    // == Clear ==
    /// Removes all entries and resets the eviction policy. Metric counters
    /// are preserved.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // == Cleanup ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup(&self) -> usize {
        self.inner.lock().cleanup()
    }

    // == Stop ==
    /// Stops the background cleanup worker and waits for it to exit.
    /// Safe to call multiple times; also invoked when the cache is dropped.
    pub fn stop(&self) {
        self.worker.stop();
    }

    // == Persistence ==
    /// Persists the cache to disk and returns the written path.
    ///
    /// Runs a cleanup pass first, then writes the snapshot through the
    /// configured serializer, replacing any existing file atomically. The
    /// cache lock is held for the duration, so concurrent operations wait.
    ///
    /// `filepath` overrides the configured directory and filename;
    /// `use_timestamp` defaults to `config.cache_timestamps`.
    pub fn save_to_disk(
        &self,
        filepath: Option<&Path>,
        use_timestamp: Option<bool>,
    ) -> Result<PathBuf> {
        let use_timestamp = use_timestamp.unwrap_or(self.config.cache_timestamps);

        let mut inner = self.inner.lock();
        inner.cleanup();
        let snapshot = inner.to_snapshot();

        let path =
            self.cache_files
                .resolve_path(filepath, self.serializer.extension(), use_timestamp)?;
        let payload = self.serializer.serialize_snapshot(&snapshot)?;
        self.cache_files.write(&path, &payload)?;

        info!(path = %path.display(), entries = snapshot.entries.len(), "cache saved to disk");
        Ok(path)
    }

    /// Replaces the in-memory cache with a snapshot from disk.
    ///
    /// Entries already expired at load time are dropped. The eviction
    /// policy is rebuilt by announcing each surviving entry in its original
    /// insertion order; metrics restart from zero.
    ///
    /// # Errors
    /// `PersistenceError` if the file cannot be read, has an unsupported
    /// version, or holds more live entries than the cache's capacity. A
    /// failed load leaves the current contents untouched.
    pub fn load_from_disk(&self, filepath: Option<&Path>) -> Result<()> {
        let mut inner = self.inner.lock();

        let path = self
            .cache_files
            .resolve_path(filepath, self.serializer.extension(), false)?;
        let payload = self.cache_files.read(&path, self.serializer.is_binary())?;
        let snapshot = self.serializer.deserialize_snapshot(&payload)?;

        inner.load_snapshot(snapshot, &path)
    }

    // == Metrics ==
    /// Captures the current metric counters and derived ratios.
    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().metrics.snapshot()
    }

    /// Zeroes all metric counters.
    pub fn reset_metrics(&self) {
        self.inner.lock().metrics.reset();
    }

    /// Persists the current metrics snapshot and returns the written path.
    ///
    /// `use_timestamp` defaults to `config.cache_metrics_timestamps`.
    pub fn save_metrics_to_disk(
        &self,
        filepath: Option<&Path>,
        use_timestamp: Option<bool>,
    ) -> Result<PathBuf> {
        let use_timestamp = use_timestamp.unwrap_or(self.config.cache_metrics_timestamps);

        let inner = self.inner.lock();
        let snapshot = inner.metrics.snapshot();

        let path = self.metrics_files.resolve_path(
            filepath,
            self.metrics_serializer.extension(),
            use_timestamp,
        )?;
        let payload = self.metrics_serializer.serialize_metrics(&snapshot)?;
        self.metrics_files.write(&path, &payload)?;

        info!(path = %path.display(), "metrics saved to disk");
        Ok(path)
    }
}

impl<V: CacheValue> Drop for QuickCache<V> {
    fn drop(&mut self) {
        self.worker.stop();
    }
}
