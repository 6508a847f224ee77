//! No-Op Eviction Policy
//!
//! Keeps no bookkeeping and never selects a victim.

use super::{CacheView, EvictionPolicy};

// == No-Op Policy ==
/// Policy for caches that must never displace an entry. All callbacks do
/// nothing, and an eviction request yields no victim, so inserting past
/// capacity fails with a cache-full error instead of dropping a key.
#[derive(Debug, Default)]
pub struct NoOpPolicy;

impl NoOpPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }
}

impl EvictionPolicy for NoOpPolicy {
    fn on_add(&mut self, _view: &dyn CacheView, _key: &str) {}

    fn on_update(&mut self, _view: &dyn CacheView, _key: &str) {}

    fn on_access(&mut self, _view: &dyn CacheView, _key: &str) {}

    fn on_delete(&mut self, _view: &dyn CacheView, _key: &str) {}

    fn select_eviction_key(&self, _view: &dyn CacheView) -> Option<String> {
        None
    }

    fn reset(&mut self) {}
}
