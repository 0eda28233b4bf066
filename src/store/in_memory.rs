//! InMemoryStore - HashMap-backed keyed store for testing, tooling and the demo server.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyedStore, StoreError};

/// In-memory keyed store backed by a HashMap.
///
/// Clone-friendly via Arc: clones share the same storage, so a caller can
/// hand one clone to a service and keep another for inspection.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Poisoned("len"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Whether a value exists under `key`.
    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Poisoned("contains"))?;
        Ok(storage.contains_key(key))
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Poisoned("keys"))?;
        let mut keys: Vec<String> = storage.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn validate_key(key: &str) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "key must not be an empty string",
            });
        }
        Ok(())
    }
}

impl KeyedStore for InMemoryStore {
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        Self::validate_key(key)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Poisoned("put"))?;
        storage.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Poisoned("get"))?;
        Ok(storage.get(key).cloned())
    }
}
