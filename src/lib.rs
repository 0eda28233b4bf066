//! doc_ingest - batch ingestion of document-database exports into a keyed store.
//!
//! A batch payload (`{"documents": [...]}`) is parsed, every document is keyed
//! by its `_id`, re-encoded verbatim and written with an unconditional `put`.
//! One bad document never sinks the batch: its failure is recorded in the
//! [`BatchResult`] and the next document is processed.
//!
//! ## Modules
//!
//! - [`ingest`]: the batch ingestor, per-document outcomes, the aggregated
//!   result and read-back verification.
//! - [`store`]: the keyed store contract and an in-memory implementation.
//! - [`invoke`]: named-function dispatch (`batchInsert`, `healthCheck`) and
//!   the optional HTTP transport.
//! - [`document`] and [`config`]: input types and settings.

pub mod config;
pub mod document;
pub mod ingest;
pub mod invoke;
pub mod store;

pub use config::IngestConfig;
pub use document::{BatchRequest, Document};
pub use ingest::{
    verify, BatchIngestor, BatchResult, CodecError, DocumentCodec, FailureReason, IngestError,
    IngestOutcome, JsonCodec, KeyCheck, KeyReport, VerifyReport,
};
pub use invoke::{CommandRequest, CommandResponse, HandlerError, Service};
pub use store::{InMemoryStore, KeyedStore, StoreError};
