//! Read-back verification of an ingested batch.
//!
//! Reads every key a batch should have produced and compares the stored
//! document with the one that was submitted. When a key appears more than
//! once in the batch, the last document carrying it is the expected one.
//! Documents without a usable key are counted as skipped; they were never
//! meant to be written.

use std::collections::HashMap;
use std::fmt;

use super::codec::{DocumentCodec, JsonCodec};
use crate::document::{BatchRequest, Document};
use crate::store::{KeyedStore, StoreError};

/// Result of checking one key.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCheck {
    /// Stored document equals the submitted one.
    Matched,
    /// Nothing stored under the key.
    Missing,
    /// Something else is stored under the key.
    Mismatch { stored: Document },
    /// Stored bytes do not decode as a document.
    Undecodable(String),
    /// The store failed to read the key.
    Unreadable(StoreError),
}

impl fmt::Display for KeyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCheck::Matched => write!(f, "matched"),
            KeyCheck::Missing => write!(f, "missing"),
            KeyCheck::Mismatch { .. } => write!(f, "stored document differs"),
            KeyCheck::Undecodable(msg) => write!(f, "undecodable: {}", msg),
            KeyCheck::Unreadable(e) => write!(f, "unreadable: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyReport {
    pub key: String,
    pub check: KeyCheck,
}

/// Per-key verification results, in order of each key's first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyReport {
    pub keys: Vec<KeyReport>,
    /// Documents without a usable key.
    pub skipped: usize,
}

impl VerifyReport {
    pub fn matched(&self) -> usize {
        self.keys
            .iter()
            .filter(|r| r.check == KeyCheck::Matched)
            .count()
    }

    /// Keys that did not match.
    pub fn failures(&self) -> impl Iterator<Item = &KeyReport> {
        self.keys.iter().filter(|r| r.check != KeyCheck::Matched)
    }

    /// True when every expected key matched.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Verify a batch against a store that holds compact JSON documents.
pub fn verify<S>(store: &S, request: &BatchRequest, key_field: &str) -> VerifyReport
where
    S: KeyedStore + ?Sized,
{
    verify_with(store, &JsonCodec, request, key_field)
}

/// Verify a batch, decoding stored values with `codec`.
pub fn verify_with<S, C>(
    store: &S,
    codec: &C,
    request: &BatchRequest,
    key_field: &str,
) -> VerifyReport
where
    S: KeyedStore + ?Sized,
    C: DocumentCodec + ?Sized,
{
    let mut order: Vec<&str> = Vec::new();
    let mut expected: HashMap<&str, &Document> = HashMap::new();
    let mut skipped = 0;

    for document in &request.documents {
        match document.key(key_field) {
            Some(key) => {
                if expected.insert(key, document).is_none() {
                    order.push(key);
                }
            }
            None => skipped += 1,
        }
    }

    let keys = order
        .into_iter()
        .map(|key| {
            let check = match store.get(key) {
                Ok(None) => KeyCheck::Missing,
                Ok(Some(bytes)) => match codec.decode(&bytes) {
                    Ok(stored) if &stored == expected[key] => KeyCheck::Matched,
                    Ok(stored) => KeyCheck::Mismatch { stored },
                    Err(e) => KeyCheck::Undecodable(e.to_string()),
                },
                Err(e) => KeyCheck::Unreadable(e),
            };
            KeyReport {
                key: key.to_string(),
                check,
            }
        })
        .collect();

    VerifyReport { keys, skipped }
}
