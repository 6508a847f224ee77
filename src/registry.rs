//! Registry Module
//!
//! Process-wide name-to-constructor tables for eviction policies and
//! serializers.
//!
//! Built-in implementations are always available; custom implementations
//! register under a fresh name before the cache that wants them is
//! constructed. Names are case-insensitive. Registration is serialized
//! behind a write lock, lookups take the read lock and run concurrently.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{CacheError, Result};
use crate::policy::{EvictionPolicy, FifoPolicy, LfuPolicy, LruPolicy, NoOpPolicy};
use crate::serializer::{BincodeSerializer, CacheValue, JsonSerializer, Serializer};

// == Constructor Types ==
/// Factory producing a fresh eviction policy instance per cache.
pub type PolicyConstructor = Arc<dyn Fn() -> Box<dyn EvictionPolicy> + Send + Sync>;

/// Factory producing a fresh serializer instance for value type `V`.
pub type SerializerConstructor<V> = Arc<dyn Fn() -> Box<dyn Serializer<V>> + Send + Sync>;

// == Tables ==
static EVICTION_POLICIES: Lazy<RwLock<HashMap<String, PolicyConstructor>>> = Lazy::new(|| {
    let mut table: HashMap<String, PolicyConstructor> = HashMap::new();
    table.insert("lru".to_string(), Arc::new(|| Box::new(LruPolicy::new())));
    table.insert("lfu".to_string(), Arc::new(|| Box::new(LfuPolicy::new())));
    table.insert("fifo".to_string(), Arc::new(|| Box::new(FifoPolicy::new())));
    table.insert("no_op".to_string(), Arc::new(|| Box::new(NoOpPolicy::new())));
    RwLock::new(table)
});

/// Serializer factories are monomorphic over the cached value type, so the
/// table is keyed by name plus the value's TypeId and erased behind `Any`.
static SERIALIZERS: Lazy<RwLock<HashMap<(String, TypeId), Box<dyn Any + Send + Sync>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Built-in serializer names, resolved directly and reserved against
/// re-registration.
const BUILTIN_SERIALIZERS: [&str; 2] = ["json", "bincode"];

// == Eviction Policy Registration ==
/// Installs a custom eviction policy constructor under `name`.
///
/// # Errors
/// `RegistryError` if the name (case-insensitive) is already taken,
/// including by a built-in.
pub fn register_eviction_policy<F>(name: &str, constructor: F) -> Result<()>
where
    F: Fn() -> Box<dyn EvictionPolicy> + Send + Sync + 'static,
{
    let key = name.to_lowercase();
    let mut table = EVICTION_POLICIES.write();
    if table.contains_key(&key) {
        return Err(CacheError::Registry(format!(
            "eviction policy '{name}' already registered"
        )));
    }
    table.insert(key, Arc::new(constructor));
    Ok(())
}

/// Instantiates a registered eviction policy by name.
///
/// # Errors
/// `RegistryError` naming the available policies if `name` is unknown.
pub fn create_eviction_policy(name: &str) -> Result<Box<dyn EvictionPolicy>> {
    let table = EVICTION_POLICIES.read();
    match table.get(&name.to_lowercase()) {
        Some(constructor) => Ok(constructor()),
        None => {
            let mut available: Vec<&str> = table.keys().map(String::as_str).collect();
            available.sort_unstable();
            Err(CacheError::Registry(format!(
                "unknown eviction policy '{name}', available: {available:?}"
            )))
        }
    }
}

// == Serializer Registration ==
/// Installs a custom serializer constructor for value type `V` under `name`.
///
/// The same name may serve different value types; one `(name, V)` pair can
/// only be registered once.
///
/// # Errors
/// `RegistryError` if the name is a reserved built-in or already registered
/// for `V`.
pub fn register_serializer<V, F>(name: &str, constructor: F) -> Result<()>
where
    V: CacheValue,
    F: Fn() -> Box<dyn Serializer<V>> + Send + Sync + 'static,
{
    let key = name.to_lowercase();
    if BUILTIN_SERIALIZERS.contains(&key.as_str()) {
        return Err(CacheError::Registry(format!(
            "serializer '{name}' already registered"
        )));
    }

    let mut table = SERIALIZERS.write();
    let entry_key = (key, TypeId::of::<V>());
    if table.contains_key(&entry_key) {
        return Err(CacheError::Registry(format!(
            "serializer '{name}' already registered"
        )));
    }
    let constructor: SerializerConstructor<V> = Arc::new(constructor);
    table.insert(entry_key, Box::new(constructor));
    Ok(())
}

/// Instantiates a serializer for value type `V` by name.
///
/// # Errors
/// `RegistryError` if the name is neither a built-in nor registered for `V`.
pub fn create_serializer<V: CacheValue>(name: &str) -> Result<Box<dyn Serializer<V>>> {
    let key = name.to_lowercase();
    match key.as_str() {
        "json" => return Ok(Box::new(JsonSerializer::new())),
        "bincode" => return Ok(Box::new(BincodeSerializer::new())),
        _ => {}
    }

    let table = SERIALIZERS.read();
    let constructor = table
        .get(&(key, TypeId::of::<V>()))
        .and_then(|any| any.downcast_ref::<SerializerConstructor<V>>())
        .ok_or_else(|| {
            let mut available: Vec<String> =
                BUILTIN_SERIALIZERS.iter().map(|s| s.to_string()).collect();
            available.extend(
                table
                    .keys()
                    .filter(|(_, type_id)| *type_id == TypeId::of::<V>())
                    .map(|(name, _)| name.clone()),
            );
            available.sort_unstable();
            CacheError::Registry(format!(
                "unknown serializer '{name}' for this value type, available: {available:?}"
            ))
        })?;
    Ok(constructor())
}
