//! Cache Snapshot Module
//!
//! Serde document written by `save_to_disk` and read back by
//! `load_from_disk`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::entry::CacheEntry;

/// Current snapshot document version. Bumped on incompatible layout changes;
/// loads reject documents from another version.
pub const SNAPSHOT_VERSION: u32 = 1;

// == Snapshot Entry ==
/// One persisted entry: the key plus the full entry metadata, so a reload
/// restores the exact expiry and access history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry<V> {
    /// The cache key
    pub key: String,
    /// The stored value
    pub value: V,
    /// Original creation timestamp
    pub created_at: DateTime<Utc>,
    /// Absolute expiry, None = never
    pub expires_at: Option<DateTime<Utc>>,
    /// Access count at save time
    pub access_count: u64,
    /// Last access timestamp at save time
    pub last_access: DateTime<Utc>,
}

impl<V> SnapshotEntry<V> {
    /// Captures an in-memory entry under its key.
    pub fn from_entry(key: String, entry: CacheEntry<V>) -> Self {
        Self {
            key,
            value: entry.value,
            created_at: entry.created_at,
            expires_at: entry.expires_at,
            access_count: entry.access_count,
            last_access: entry.last_access,
        }
    }

    /// Rebuilds the in-memory entry, preserving all persisted metadata.
    pub fn into_parts(self) -> (String, CacheEntry<V>) {
        (
            self.key,
            CacheEntry {
                value: self.value,
                created_at: self.created_at,
                expires_at: self.expires_at,
                access_count: self.access_count,
                last_access: self.last_access,
            },
        )
    }
}

// == Cache Snapshot ==
/// Whole-cache persistence document.
///
/// Entries appear in the cache's insertion order so a reload announces them
/// to the eviction policy in the same order they originally arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot<V> {
    /// Document layout version
    pub version: u32,
    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,
    /// The cache's default TTL at save time (0 = none)
    pub default_ttl: u64,
    /// Entries in insertion order
    pub entries: Vec<SnapshotEntry<V>>,
}

impl<V> CacheSnapshot<V> {
    /// Creates an empty snapshot stamped with the current time.
    pub fn new(default_ttl: u64) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            default_ttl,
            entries: Vec::new(),
        }
    }

    /// Appends an entry, keeping document order equal to insertion order.
    pub fn push_entry(&mut self, key: String, entry: CacheEntry<V>) {
        self.entries.push(SnapshotEntry::from_entry(key, entry));
    }
}
