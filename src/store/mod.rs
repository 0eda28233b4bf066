//! Keyed state store - the put/get-by-key contract documents are written through.
//!
//! The ingestor only ever calls [`KeyedStore::put`]. [`KeyedStore::get`] exists
//! for read-back tooling such as [`crate::ingest::verify`].
//!
//! ## Example
//!
//! ```ignore
//! use doc_ingest::{InMemoryStore, KeyedStore};
//!
//! let store = InMemoryStore::new();
//! store.put("member:42", br#"{"_id":"member:42"}"#.to_vec())?;
//! let bytes = store.get("member:42")?;
//! ```

mod in_memory;

use std::sync::Arc;

/// Error type for keyed store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store refused the key.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },
    /// The underlying lock primitive was poisoned.
    #[error("store lock poisoned during {0}")]
    Poisoned(&'static str),
    /// Any backend-specific failure.
    #[error("{0}")]
    Backend(String),
}

/// Abstract keyed storage. Writes are unconditional overwrites.
pub trait KeyedStore: Send + Sync {
    /// Store `value` under `key`, replacing whatever was there.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Read the value stored under `key`. Returns `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}

impl<S: KeyedStore + ?Sized> KeyedStore for &S {
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }
}

impl<S: KeyedStore + ?Sized> KeyedStore for Arc<S> {
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }
}

pub use in_memory::InMemoryStore;
