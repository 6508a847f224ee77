//! FIFO Eviction Policy
//!
//! Evicts keys in insertion order, ignoring reads and updates.

use std::collections::VecDeque;

use super::{CacheView, EvictionPolicy};

// == FIFO Policy ==
/// First In First Out eviction. The oldest inserted key is evicted first;
/// accesses and updates do not change a key's position.
#[derive(Debug, Default)]
pub struct FifoPolicy {
    /// Keys in insertion order, front = oldest
    queue: VecDeque<String>,
}

impl FifoPolicy {
    /// Creates a new empty FIFO policy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvictionPolicy for FifoPolicy {
    fn on_add(&mut self, _view: &dyn CacheView, key: &str) {
        self.queue.push_back(key.to_string());
    }

    fn on_update(&mut self, _view: &dyn CacheView, _key: &str) {}

    fn on_access(&mut self, _view: &dyn CacheView, _key: &str) {}

    fn on_delete(&mut self, _view: &dyn CacheView, key: &str) {
        self.queue.retain(|k| k != key);
    }

    fn select_eviction_key(&self, _view: &dyn CacheView) -> Option<String> {
        self.queue.front().cloned()
    }

    fn reset(&mut self) {
        self.queue.clear();
    }
}
