//! Cache Metrics Module
//!
//! Tracks cache performance counters and produces immutable snapshots with
//! derived ratios.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Metrics Snapshot ==
/// Immutable view of the metric counters at a point in time.
///
/// Counters are captured under the cache lock, so a snapshot always reflects
/// a consistent state. Derived ratios are computed at capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Successful reads
    pub hits: u64,
    /// Reads of absent keys
    pub misses: u64,
    /// Reads that found an entry past its TTL
    pub expired_hits: u64,
    /// Upsert insertions via `set`/`set_many`
    pub sets: u64,
    /// Insertions via `add`
    pub adds: u64,
    /// Value replacements via `set`/`update`
    pub updates: u64,
    /// Removals via `delete`/`delete_many`
    pub deletes: u64,
    /// Removals chosen by the eviction policy
    pub evictions: u64,
    /// Completed cleanup sweeps
    pub cleanup_runs: u64,
    /// Expired entries removed by cleanup sweeps
    pub cleanup_removed: u64,
    /// When this counter set started (creation or last reset)
    pub created_at: DateTime<Utc>,
    /// hits / (hits + misses + expired_hits), 0 when no reads happened
    pub hit_rate: f64,
    /// (misses + expired_hits) / (hits + misses + expired_hits)
    pub miss_rate: f64,
    /// Total read and write operations recorded
    pub total_operations: u64,
}

// == Metrics Recorder ==
/// Mutable counter state owned by the cache and guarded by its lock.
///
/// When metrics are disabled every `record_*` call is a no-op; snapshots
/// then report all-zero counters.
#[derive(Debug)]
pub struct MetricsRecorder {
    enabled: bool,
    hits: u64,
    misses: u64,
    expired_hits: u64,
    sets: u64,
    adds: u64,
    updates: u64,
    deletes: u64,
    evictions: u64,
    cleanup_runs: u64,
    cleanup_removed: u64,
    created_at: DateTime<Utc>,
}

impl MetricsRecorder {
    // == Constructor ==
    /// Creates a recorder with all counters at zero.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            hits: 0,
            misses: 0,
            expired_hits: 0,
            sets: 0,
            adds: 0,
            updates: 0,
            deletes: 0,
            evictions: 0,
            cleanup_runs: 0,
            cleanup_removed: 0,
            created_at: Utc::now(),
        }
    }

    pub fn record_hit(&mut self) {
        if self.enabled {
            self.hits += 1;
        }
    }

    pub fn record_miss(&mut self) {
        if self.enabled {
            self.misses += 1;
        }
    }

    pub fn record_expired_hit(&mut self) {
        if self.enabled {
            self.expired_hits += 1;
        }
    }

    pub fn record_set(&mut self) {
        if self.enabled {
            self.sets += 1;
        }
    }

    pub fn record_add(&mut self) {
        if self.enabled {
            self.adds += 1;
        }
    }

    pub fn record_update(&mut self) {
        if self.enabled {
            self.updates += 1;
        }
    }

    pub fn record_delete(&mut self) {
        if self.enabled {
            self.deletes += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        if self.enabled {
            self.evictions += 1;
        }
    }

    /// Records one completed cleanup sweep and how many entries it removed.
    pub fn record_cleanup(&mut self, removed: u64) {
        if self.enabled {
            self.cleanup_runs += 1;
            self.cleanup_removed += removed;
        }
    }

    // == Reset ==
    /// Zeroes every counter and restarts the creation timestamp.
    pub fn reset(&mut self) {
        let enabled = self.enabled;
        *self = Self::new(enabled);
    }

    // == Snapshot ==
    /// Captures the current counters plus derived ratios.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let reads = self.hits + self.misses + self.expired_hits;
        let (hit_rate, miss_rate) = if reads > 0 {
            (
                self.hits as f64 / reads as f64,
                (self.misses + self.expired_hits) as f64 / reads as f64,
            )
        } else {
            (0.0, 0.0)
        };

        MetricsSnapshot {
            hits: self.hits,
            misses: self.misses,
            expired_hits: self.expired_hits,
            sets: self.sets,
            adds: self.adds,
            updates: self.updates,
            deletes: self.deletes,
            evictions: self.evictions,
            cleanup_runs: self.cleanup_runs,
            cleanup_removed: self.cleanup_removed,
            created_at: self.created_at,
            hit_rate,
            miss_rate,
            total_operations: reads + self.sets + self.adds + self.updates + self.deletes,
        }
    }
}
