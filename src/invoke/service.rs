//! Service - function registry and dispatch.
//!
//! `Service<S>` holds a store, the ingestion settings and a set of named
//! handlers. Each handler receives a `Context<S>` and returns the raw
//! response payload.
//!
//! ## Example
//!
//! ```ignore
//! use doc_ingest::invoke::Service;
//!
//! let service = Service::new(InMemoryStore::new(), IngestConfig::default())
//!     .function("ping", |_ctx| Ok(b"pong".to_vec()));
//!
//! let payload = service.dispatch("ping", vec![])?;
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use super::context::Context;
use super::error::HandlerError;
use super::handlers::{batch_insert, health_check};
use crate::config::IngestConfig;
use crate::store::KeyedStore;

type Handler<S> = Box<dyn Fn(&Context<'_, S>) -> Result<Vec<u8>, HandlerError> + Send + Sync>;

/// A service that routes named function calls to handlers.
pub struct Service<S> {
    store: S,
    config: IngestConfig,
    handlers: HashMap<String, Handler<S>>,
}

impl<S: KeyedStore + 'static> Service<S> {
    /// A service exposing `batchInsert` and `healthCheck`.
    pub fn standard(store: S, config: IngestConfig) -> Self {
        Self::new(store, config)
            .function(batch_insert::FUNCTION, batch_insert::handle::<S>)
            .function(health_check::FUNCTION, health_check::handle::<S>)
    }
}

impl<S: Send + Sync + 'static> Service<S> {
    /// Create a service with no functions registered.
    pub fn new(store: S, config: IngestConfig) -> Self {
        Self {
            store,
            config,
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under `name`.
    ///
    /// Uses builder pattern - returns `self` for chaining.
    pub fn function<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<'_, S>) -> Result<Vec<u8>, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
        self
    }

    /// Dispatch a call under a fresh call identifier.
    pub fn dispatch(&self, function: &str, args: Vec<Vec<u8>>) -> Result<Vec<u8>, HandlerError> {
        self.dispatch_with_id(function, args, Uuid::new_v4().to_string())
    }

    /// Dispatch a call under a caller-chosen call identifier.
    pub fn dispatch_with_id(
        &self,
        function: &str,
        args: Vec<Vec<u8>>,
        call_id: String,
    ) -> Result<Vec<u8>, HandlerError> {
        let handler = self
            .handlers
            .get(function)
            .ok_or_else(|| HandlerError::UnknownFunction(function.to_string()))?;

        info!(function, call_id = %call_id, args = args.len(), "dispatching call");
        let ctx = Context::new(function.to_string(), args, call_id, &self.config, &self.store);

        let result = handler(&ctx);
        if let Err(e) = &result {
            warn!(function, call_id = %ctx.call_id(), error = %e, "call failed");
        }
        result
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let args = request
            .args
            .iter()
            .map(|arg| arg.as_bytes().to_vec())
            .collect();
        match self.dispatch(&request.function, args) {
            Ok(payload) => CommandResponse {
                status: 200,
                message: String::new(),
                payload,
            },
            Err(e) => CommandResponse {
                status: e.status_code(),
                message: e.to_string(),
                payload: Vec::new(),
            },
        }
    }

    /// List registered function names, sorted.
    pub fn functions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

// =============================================================================
// Request / Response types
// =============================================================================

/// An inbound call with string arguments:
///
/// ```json
/// { "function": "batchInsert", "args": ["{\"documents\":[...]}"] }
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandRequest {
    pub fn new(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }
}

/// Response from dispatching a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Error message; empty on success.
    pub message: String,
    /// Handler result; empty on failure.
    pub payload: Vec<u8>,
}

impl CommandResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Decode the payload as JSON.
    pub fn payload_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}
