//! BatchIngestor - writes each document of a batch through a keyed store.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::codec::{DocumentCodec, JsonCodec};
use super::error::IngestError;
use super::outcome::{FailureReason, IngestOutcome};
use super::result::{BatchResult, BatchTally};
use crate::config::IngestConfig;
use crate::document::{value_kind, BatchRequest, Document};
use crate::store::KeyedStore;

/// Sequential batch ingestor.
///
/// Generic over `S`, the store, and `C`, the codec used to encode documents
/// before they are written. Documents are processed strictly in input order,
/// one `put` per document that has a usable key.
pub struct BatchIngestor<S, C = JsonCodec> {
    store: S,
    codec: C,
    key_field: String,
}

impl<S: KeyedStore> BatchIngestor<S> {
    /// Create an ingestor keyed on `_id` that stores compact JSON.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &IngestConfig::default())
    }

    pub fn with_config(store: S, config: &IngestConfig) -> Self {
        Self {
            store,
            codec: JsonCodec,
            key_field: config.key_field.clone(),
        }
    }
}

impl<S: KeyedStore, C: DocumentCodec> BatchIngestor<S, C> {
    /// Replace the codec.
    pub fn with_codec<C2: DocumentCodec>(self, codec: C2) -> BatchIngestor<S, C2> {
        BatchIngestor {
            store: self.store,
            codec,
            key_field: self.key_field,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Parse a serialized batch and ingest every document in it.
    ///
    /// Fails only if the payload does not parse or holds no documents.
    /// Per-document failures are reported in the returned [`BatchResult`].
    pub fn process(&self, payload: &[u8]) -> Result<BatchResult, IngestError> {
        let started = Instant::now();
        let request = BatchRequest::from_slice(payload).map_err(|e| {
            warn!(error = %e, "rejecting malformed batch payload");
            IngestError::InvalidPayload(e)
        })?;
        self.run(&request.documents, started)
    }

    /// Ingest an already parsed batch.
    pub fn ingest(&self, request: &BatchRequest) -> Result<BatchResult, IngestError> {
        self.run(&request.documents, Instant::now())
    }

    /// Ingest a slice of documents as one batch.
    pub fn ingest_documents(&self, documents: &[Document]) -> Result<BatchResult, IngestError> {
        self.run(documents, Instant::now())
    }

    /// Key, encode and write a single document.
    pub fn ingest_one(&self, document: &Document) -> IngestOutcome {
        let key = match document.get(&self.key_field) {
            Some(Value::String(key)) => key,
            other => {
                debug!(
                    field = %self.key_field,
                    found = value_kind(other),
                    "document has no string key"
                );
                return IngestOutcome::Failed(FailureReason::MissingKey {
                    field: self.key_field.clone(),
                });
            }
        };

        let bytes = match self.codec.encode(document) {
            Ok(bytes) => bytes,
            Err(e) => return IngestOutcome::Failed(FailureReason::Marshal(e.to_string())),
        };

        match self.store.put(key, bytes) {
            Ok(()) => IngestOutcome::Stored { key: key.clone() },
            Err(e) => IngestOutcome::Failed(FailureReason::Storage(e)),
        }
    }

    fn run(&self, documents: &[Document], started: Instant) -> Result<BatchResult, IngestError> {
        if documents.is_empty() {
            warn!("rejecting batch with no documents");
            return Err(IngestError::EmptyBatch);
        }

        let mut tally = BatchTally::new(documents.len(), started);
        for (index, document) in documents.iter().enumerate() {
            let outcome = self.ingest_one(document);
            match &outcome {
                IngestOutcome::Stored { key } => debug!(index, key = %key, "document stored"),
                IngestOutcome::Failed(reason) => warn!(index, reason = %reason, "document failed"),
            }
            tally.record(index, outcome);
        }

        let result = tally.finish();
        info!(
            total = result.total_docs,
            successful = result.successful_docs,
            failed = result.failed_docs,
            elapsed = %result.processing_time,
            "batch processed"
        );
        Ok(result)
    }
}
