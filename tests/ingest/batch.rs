//! BatchIngestor behaviour against real and failing stores.

use doc_ingest::{
    BatchIngestor, BatchRequest, FailureReason, InMemoryStore, IngestError, IngestOutcome,
    KeyedStore,
};
use serde_json::json;

use crate::support::{
    couchdb_export, payload, stored, FlakyStore, GLOBAL_SETTING_ID, MAX_POINTS_ID, MEMBER_ID,
};

#[test]
fn couchdb_export_round_trips() {
    let store = InMemoryStore::new();
    let ingestor = BatchIngestor::new(store.clone());
    let export = couchdb_export();

    let result = ingestor.process(&payload(&export)).unwrap();

    assert_eq!(result.total_docs, 3);
    assert_eq!(result.successful_docs, 3);
    assert_eq!(result.failed_docs, 0);
    assert!(result.errors.is_empty());

    let ids = [GLOBAL_SETTING_ID, MAX_POINTS_ID, MEMBER_ID];
    for (index, id) in ids.iter().enumerate() {
        assert_eq!(stored(&store, id).as_ref(), Some(&export["documents"][index]));
    }
}

#[test]
fn stored_bytes_keep_field_order() {
    let store = InMemoryStore::new();
    let raw = br#"{"documents":[{"_id":"k","zeta":1,"alpha":{"b":2,"a":1},"_rev":"1-x"}]}"#;

    BatchIngestor::new(store.clone()).process(raw).unwrap();

    let bytes = store.get("k").unwrap().unwrap();
    assert_eq!(bytes, br#"{"_id":"k","zeta":1,"alpha":{"b":2,"a":1},"_rev":"1-x"}"#.to_vec());
}

#[test]
fn last_write_wins_within_a_batch() {
    let store = InMemoryStore::new();
    let ingestor = BatchIngestor::new(store.clone());

    let result = ingestor
        .process(br#"{"documents":[{"_id":"A","v":1},{"v":2},{"_id":"A","v":3}]}"#)
        .unwrap();

    assert_eq!(result.total_docs, 3);
    assert_eq!(result.successful_docs, 2);
    assert_eq!(result.failed_docs, 1);
    assert_eq!(result.errors, vec!["Doc 1: missing _id"]);
    assert_eq!(stored(&store, "A"), Some(json!({ "_id": "A", "v": 3 })));
}

#[test]
fn k_missing_ids_out_of_n() {
    let store = InMemoryStore::new();
    let ingestor = BatchIngestor::new(store.clone());

    let documents: Vec<_> = (0..10)
        .map(|i| {
            if i % 3 == 0 {
                json!({ "n": i })
            } else {
                json!({ "_id": format!("doc-{i}"), "n": i })
            }
        })
        .collect();
    let result = ingestor
        .process(&payload(&json!({ "documents": documents })))
        .unwrap();

    // indices 0, 3, 6, 9 carry no id
    assert_eq!(result.total_docs, 10);
    assert_eq!(result.successful_docs, 6);
    assert_eq!(result.failed_docs, 4);
    assert_eq!(
        result.errors,
        vec![
            "Doc 0: missing _id",
            "Doc 3: missing _id",
            "Doc 6: missing _id",
            "Doc 9: missing _id",
        ]
    );
    assert_eq!(store.len().unwrap(), 6);
    assert!(store.get("doc-3").unwrap().is_none());
}

#[test]
fn reprocessing_is_idempotent() {
    let store = InMemoryStore::new();
    let ingestor = BatchIngestor::new(store.clone());
    let batch = payload(&couchdb_export());

    let first = ingestor.process(&batch).unwrap();
    let snapshot: Vec<_> = store
        .keys()
        .unwrap()
        .into_iter()
        .map(|k| (k.clone(), store.get(&k).unwrap()))
        .collect();

    let second = ingestor.process(&batch).unwrap();

    assert_eq!(first.successful_docs, second.successful_docs);
    assert_eq!(first.failed_docs, second.failed_docs);
    assert!(second.errors.is_empty());
    for (key, value) in snapshot {
        assert_eq!(store.get(&key).unwrap(), value);
    }
    assert_eq!(store.len().unwrap(), 3);
}

#[test]
fn storage_failure_does_not_stop_the_batch() {
    let store = FlakyStore::failing_on(&["B"]);
    let ingestor = BatchIngestor::new(&store);

    let result = ingestor
        .process(br#"{"documents":[{"_id":"A"},{"_id":"B"},{"_id":"C"}]}"#)
        .unwrap();

    assert_eq!(result.successful_docs, 2);
    assert_eq!(result.failed_docs, 1);
    assert_eq!(result.errors, vec!["Doc 1: storage error: write to B refused"]);
    assert_eq!(store.puts(), 3);
    assert!(stored(&store, "A").is_some());
    assert!(stored(&store, "B").is_none());
    assert!(stored(&store, "C").is_some());
}

#[test]
fn missing_id_never_reaches_the_store() {
    let store = FlakyStore::default();
    let ingestor = BatchIngestor::new(&store);

    let result = ingestor
        .process(br#"{"documents":[{"v":1},{"_id":3},{"_id":["x"]}]}"#)
        .unwrap();

    assert_eq!(result.failed_docs, 3);
    assert_eq!(store.puts(), 0);
    assert!(result.outcomes.iter().all(|o| matches!(
        o,
        IngestOutcome::Failed(FailureReason::MissingKey { .. })
    )));
}

#[test]
fn empty_and_malformed_batches_are_distinct() {
    let store = FlakyStore::default();
    let ingestor = BatchIngestor::new(&store);

    let empty = ingestor.process(br#"{"documents":[]}"#).unwrap_err();
    let malformed = ingestor.process(b"definitely not json").unwrap_err();

    assert!(matches!(empty, IngestError::EmptyBatch));
    assert!(matches!(malformed, IngestError::InvalidPayload(_)));
    assert_ne!(empty.to_string(), malformed.to_string());
    assert_eq!(store.puts(), 0);
}

#[test]
fn parsed_requests_ingest_the_same() {
    let store = InMemoryStore::new();
    let request = BatchRequest::from_slice(&payload(&couchdb_export())).unwrap();

    let result = BatchIngestor::new(store.clone()).ingest(&request).unwrap();

    assert!(result.is_complete());
    assert_eq!(store.keys().unwrap().len(), request.len());
}

#[test]
fn non_object_payloads_are_malformed() {
    let store = FlakyStore::default();
    let ingestor = BatchIngestor::new(&store);

    let payloads: [&[u8]; 4] = [b"[]", br#"[[{"_id":"A","v":1}]]"#, b"null", br#""documents""#];
    for raw in payloads {
        let err = ingestor.process(raw).unwrap_err();
        assert!(matches!(err, IngestError::InvalidPayload(_)));
    }
    assert_eq!(store.puts(), 0);
    assert!(stored(&store, "A").is_none());
}
