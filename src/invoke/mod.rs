//! invoke - named-function dispatch in front of the batch ingestor.
//!
//! A `Service` holds a keyed store, the ingestion settings and a table of
//! named functions. Each call carries a list of raw arguments and gets a
//! fresh call identifier. Handlers receive a `Context<S>` with the arguments,
//! the call id, the settings and the store.
//!
//! ## Quick Start
//!
//! ```ignore
//! use doc_ingest::{invoke, IngestConfig, InMemoryStore};
//!
//! let service = invoke::Service::standard(InMemoryStore::new(), IngestConfig::default());
//!
//! let payload = br#"{"documents":[{"_id":"A","v":1}]}"#.to_vec();
//! let result = service.dispatch("batchInsert", vec![payload])?;
//! let status = service.dispatch("healthCheck", vec![])?;
//!
//! // HTTP transport (requires "http" feature)
//! // invoke::serve(Arc::new(service), "0.0.0.0:7050").await?;
//! ```
//!
//! ## Handler Convention
//!
//! Each handler module exports `FUNCTION`, the name it is registered under,
//! and `handle`, generic over the store:
//!
//! ```ignore
//! pub const FUNCTION: &str = "batchInsert";
//!
//! pub fn handle<S: KeyedStore>(ctx: &Context<'_, S>) -> Result<Vec<u8>, HandlerError> {
//!     let payload = ctx.single_arg("JSON batch data")?;
//!     // ...
//! }
//! ```

mod context;
mod error;
pub mod handlers;
mod service;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve, MAX_BODY_BYTES};
