//! Batch ingestion - parse a payload, key each document, write it, tally outcomes.
//!
//! Batch-level problems (malformed payload, empty batch) fail the whole call
//! before anything is written. Everything that goes wrong with a single
//! document is recorded against that document and processing moves on.
//!
//! ## Example
//!
//! ```ignore
//! use doc_ingest::{BatchIngestor, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! let ingestor = BatchIngestor::new(store.clone());
//!
//! let result = ingestor.process(br#"{"documents":[{"_id":"A","v":1},{"v":2}]}"#)?;
//! assert_eq!(result.successful_docs, 1);
//! assert_eq!(result.errors, vec!["Doc 1: missing _id"]);
//! ```

mod codec;
mod error;
mod ingestor;
mod outcome;
mod result;
pub mod verify;

pub use codec::{CodecError, DocumentCodec, JsonCodec};
pub use error::IngestError;
pub use ingestor::BatchIngestor;
pub use outcome::{FailureReason, IngestOutcome};
pub use result::BatchResult;
pub use verify::{verify, KeyCheck, KeyReport, VerifyReport};
