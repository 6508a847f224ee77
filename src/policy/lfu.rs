//! LFU Eviction Policy
//!
//! Evicts the least frequently used key, breaking frequency ties by
//! least-recent use.

use std::collections::{BTreeMap, HashMap, VecDeque};

use super::{CacheView, EvictionPolicy};

// == LFU Policy ==
/// Least Frequently Used eviction with an LRU tie-break.
///
/// A key's frequency starts at 1 on insert and grows on every access or
/// update. Keys live in per-frequency buckets ordered by how recently they
/// reached that frequency, so the front of the lowest bucket is both the
/// coldest and the stalest key.
#[derive(Debug, Default)]
pub struct LfuPolicy {
    /// key -> current frequency
    freq: HashMap<String, u64>,
    /// frequency -> keys ordered least-recently-touched first
    buckets: BTreeMap<u64, VecDeque<String>>,
}

impl LfuPolicy {
    /// Creates a new empty LFU policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps a key's frequency, moving it to the back of the next bucket.
    fn touch(&mut self, key: &str) {
        let Some(&old_freq) = self.freq.get(key) else {
            return;
        };
        let new_freq = old_freq + 1;
        self.freq.insert(key.to_string(), new_freq);

        self.remove_from_bucket(old_freq, key);
        self.buckets
            .entry(new_freq)
            .or_default()
            .push_back(key.to_string());
    }

    fn remove_from_bucket(&mut self, freq: u64, key: &str) {
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            bucket.retain(|k| k != key);
            if bucket.is_empty() {
                self.buckets.remove(&freq);
            }
        }
    }
}

impl EvictionPolicy for LfuPolicy {
    fn on_add(&mut self, _view: &dyn CacheView, key: &str) {
        self.freq.insert(key.to_string(), 1);
        self.buckets.entry(1).or_default().push_back(key.to_string());
    }

    fn on_update(&mut self, _view: &dyn CacheView, key: &str) {
        self.touch(key);
    }

    fn on_access(&mut self, _view: &dyn CacheView, key: &str) {
        self.touch(key);
    }

    fn on_delete(&mut self, _view: &dyn CacheView, key: &str) {
        if let Some(freq) = self.freq.remove(key) {
            self.remove_from_bucket(freq, key);
        }
    }

    fn select_eviction_key(&self, _view: &dyn CacheView) -> Option<String> {
        // BTreeMap iterates frequencies in ascending order
        self.buckets
            .values()
            .next()
            .and_then(|bucket| bucket.front().cloned())
    }

    fn reset(&mut self) {
        self.freq.clear();
        self.buckets.clear();
    }
}
