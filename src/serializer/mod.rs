//! Serializer Module
//!
//! Pluggable serialization for cache snapshots and metrics.
//!
//! A serializer declares whether its payload is text or binary and which
//! file extension it writes under. Built-ins: [`JsonSerializer`] (human
//! readable text) and [`BincodeSerializer`] (compact language-native
//! binary).

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{CacheSnapshot, MetricsSnapshot};
use crate::error::Result;

mod bincode;
mod json;

pub use self::bincode::BincodeSerializer;
pub use json::JsonSerializer;

// == Cache Value ==
/// Bound every cached value type must satisfy.
///
/// Blanket-implemented, so any `Serialize + DeserializeOwned + Clone + Send`
/// type qualifies automatically.
pub trait CacheValue: Serialize + DeserializeOwned + Clone + Send + 'static {}

impl<T> CacheValue for T where T: Serialize + DeserializeOwned + Clone + Send + 'static {}

// == Payload ==
/// Serialized output: text for human-readable formats, raw bytes otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// UTF-8 document (e.g. JSON)
    Text(String),
    /// Opaque bytes (e.g. bincode)
    Binary(Vec<u8>),
}

impl Payload {
    /// The payload as raw bytes, regardless of kind.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(s) => s.as_bytes(),
            Payload::Binary(b) => b,
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// True when the payload holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

// == Serializer ==
/// Capability for turning snapshots into payloads and back.
///
/// The round-trip contract: for every snapshot the format supports,
/// `deserialize_snapshot(serialize_snapshot(s))` reproduces `s`. Formats
/// that cannot represent a given value (e.g. JSON with non-string map keys)
/// fail with `SerializationError` rather than writing a lossy document.
pub trait Serializer<V: CacheValue>: Send + Sync + fmt::Debug {
    /// Filename extension written by this format, without the dot.
    fn extension(&self) -> &'static str;

    /// Whether payloads are opaque bytes rather than UTF-8 text.
    fn is_binary(&self) -> bool;

    /// Serializes a whole-cache snapshot document.
    fn serialize_snapshot(&self, snapshot: &CacheSnapshot<V>) -> Result<Payload>;

    /// Deserializes a whole-cache snapshot document.
    fn deserialize_snapshot(&self, payload: &Payload) -> Result<CacheSnapshot<V>>;

    /// Serializes a metrics snapshot.
    fn serialize_metrics(&self, metrics: &MetricsSnapshot) -> Result<Payload>;
}
