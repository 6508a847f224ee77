//! JSON Serializer
//!
//! Text serializer restricted to JSON-representable values.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CacheValue, Payload, Serializer};
use crate::cache::{CacheSnapshot, MetricsSnapshot};
use crate::error::{CacheError, Result};

// == JSON Serializer ==
/// Human-readable text format. Values that JSON cannot represent (for
/// example maps with non-string keys) fail with a serialization error.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Creates the serializer.
    pub fn new() -> Self {
        Self
    }

    fn to_payload<T: Serialize>(&self, value: &T) -> Result<Payload> {
        serde_json::to_string_pretty(value)
            .map(Payload::Text)
            .map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn from_payload<T: DeserializeOwned>(&self, payload: &Payload) -> Result<T> {
        serde_json::from_slice(payload.as_bytes())
            .map_err(|e| CacheError::Serialization(e.to_string()))
    }
}

impl<V: CacheValue> Serializer<V> for JsonSerializer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn is_binary(&self) -> bool {
        false
    }

    fn serialize_snapshot(&self, snapshot: &CacheSnapshot<V>) -> Result<Payload> {
        self.to_payload(snapshot)
    }

    fn deserialize_snapshot(&self, payload: &Payload) -> Result<CacheSnapshot<V>> {
        self.from_payload(payload)
    }

    fn serialize_metrics(&self, metrics: &MetricsSnapshot) -> Result<Payload> {
        self.to_payload(metrics)
    }
}
