//! LRU Eviction Policy
//!
//! Tracks access recency and evicts the least recently used key.

use std::collections::VecDeque;

use super::{CacheView, EvictionPolicy};

// == LRU Policy ==
/// Least Recently Used eviction.
///
/// Keys are kept in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug, Default)]
pub struct LruPolicy {
    /// Order of keys by access time
    order: VecDeque<String>,
}

impl LruPolicy {
    /// Creates a new empty LRU policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as recently used (moves to front).
    fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    /// Removes a key from the tracking order.
    fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }
}

impl EvictionPolicy for LruPolicy {
    fn on_add(&mut self, _view: &dyn CacheView, key: &str) {
        self.touch(key);
    }

    fn on_update(&mut self, _view: &dyn CacheView, key: &str) {
        self.touch(key);
    }

    fn on_access(&mut self, _view: &dyn CacheView, key: &str) {
        self.touch(key);
    }

    fn on_delete(&mut self, _view: &dyn CacheView, key: &str) {
        self.remove(key);
    }

    fn select_eviction_key(&self, _view: &dyn CacheView) -> Option<String> {
        self.order.back().cloned()
    }

    fn reset(&mut self) {
        self.order.clear();
    }
}
