//! Bincode Serializer
//!
//! Binary serializer supporting any serde-derived value.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CacheValue, Payload, Serializer};
use crate::cache::{CacheSnapshot, MetricsSnapshot};
use crate::error::{CacheError, Result};

// == Bincode Serializer ==
/// Compact binary format. Not human readable, but round-trips values JSON
/// cannot express, making it the native-binary counterpart to the JSON
/// serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeSerializer;

impl BincodeSerializer {
    /// Creates the serializer.
    pub fn new() -> Self {
        Self
    }

    fn to_payload<T: Serialize>(&self, value: &T) -> Result<Payload> {
        bincode::serialize(value)
            .map(Payload::Binary)
            .map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn from_payload<T: DeserializeOwned>(&self, payload: &Payload) -> Result<T> {
        bincode::deserialize(payload.as_bytes())
            .map_err(|e| CacheError::Serialization(e.to_string()))
    }
}

impl<V: CacheValue> Serializer<V> for BincodeSerializer {
    fn extension(&self) -> &'static str {
        "bin"
    }

    fn is_binary(&self) -> bool {
        true
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
