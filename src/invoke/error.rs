//! Error types for invocation handlers.

use std::error::Error;

use crate::ingest::IngestError;

/// Call-level failure. No handler result is produced.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// No handler registered under this function name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    /// The call carried the wrong number of arguments.
    #[error("expecting {expected} argument: {usage}")]
    ArgumentCount {
        expected: usize,
        actual: usize,
        usage: &'static str,
    },
    /// The batch was rejected before any write.
    #[error(transparent)]
    Ingest(#[from] IngestError),
    /// The handler result could not be encoded.
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
    /// Other error.
    #[error("handler error: {0}")]
    Other(Box<dyn Error + Send + Sync>),
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownFunction(_) => 404,
            HandlerError::ArgumentCount { .. } => 400,
            HandlerError::Ingest(IngestError::InvalidPayload(_)) => 400,
            HandlerError::Ingest(IngestError::EmptyBatch) => 422,
            HandlerError::Encode(_) => 500,
            HandlerError::Other(_) => 500,
        }
    }
}
