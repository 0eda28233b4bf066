//! Test stores and fixtures shared by the ingestion suites.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use doc_ingest::{InMemoryStore, KeyedStore, StoreError};
use serde_json::{json, Value};

/// Wraps an `InMemoryStore`, failing writes (or reads) of selected keys and counting puts.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    failing: HashSet<String>,
    unreadable: HashSet<String>,
    puts: AtomicUsize,
}

impl FlakyStore {
    pub fn failing_on(keys: &[&str]) -> Self {
        Self {
            failing: keys.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn unreadable(mut self, keys: &[&str]) -> Self {
        self.unreadable = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl KeyedStore for FlakyStore {
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(key) {
            return Err(StoreError::Backend(format!("write to {} refused", key)));
        }
        self.inner.put(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.unreadable.contains(key) {
            return Err(StoreError::Backend(format!("read of {} refused", key)));
        }
        self.inner.get(key)
    }
}

/// Read a key back as JSON.
pub fn stored<S: KeyedStore>(store: &S, key: &str) -> Option<Value> {
    store
        .get(key)
        .unwrap()
        .map(|bytes| serde_json::from_slice(&bytes).unwrap())
}

pub const GLOBAL_SETTING_ID: &str =
    "\u{0}GlobalSetting\u{0}DefaultPointUsagePriority10996167' or '5917'='5917\u{0}";
pub const MAX_POINTS_ID: &str = "\u{0}GlobalSetting\u{0}MaxPointsPerTransaction\u{0}";
pub const MEMBER_ID: &str = "\u{0}Member\u{0}user123\u{0}";

/// A CouchDB `_all_docs` style export with composite, NUL-separated ids.
pub fn couchdb_export() -> Value {
    json!({
        "documents": [
            {
                "_id": GLOBAL_SETTING_ID,
                "_rev": "1-61f029df0db1fe7f8256e1f5480d382c",
                "CreatedTime": "2024-09-13T09:20:31Z",
                "Description": "Default point usage priority",
                "GlobalSettingID": "b8d3360575dcbd79614bf6db92ed1e233f7523",
                "Key": "DefaultPointUsagePriority10996167' or '5917'='5917",
                "Status": "A",
                "Unit": "Merchant IDs",
                "UpdatedTime": "2024-09-13T09:20:31Z",
                "Value": "0",
                "~version": "\u{0}CgUDHaTGAA=="
            },
            {
                "_id": MAX_POINTS_ID,
                "_rev": "1-abc123def456",
                "CreatedTime": "2024-09-14T10:15:00Z",
                "Description": "Maximum points allowed per transaction",
                "Key": "MaxPointsPerTransaction",
                "Status": "A",
                "Unit": "Points",
                "Value": "10000",
                "~version": "\u{0}CgUDHbTGBB=="
            },
            {
                "_id": MEMBER_ID,
                "_rev": "2-def789ghi012",
                "MemberID": "user123",
                "Email": "user@example.com",
                "PointBalance": "5000",
                "Tags": ["gold", null, 3.5],
                "Profile": { "Locale": "th-TH", "Verified": true },
                "~version": "\u{0}CgUDHcTGCC=="
            }
        ]
    })
}

pub fn payload(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}
