//! Document encoding for storage.

use crate::document::Document;

/// Encoding failure, carried as text into the document's outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
}

impl CodecError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::new(err.to_string())
    }
}

/// Turns documents into stored bytes and back.
pub trait DocumentCodec: Send + Sync {
    fn encode(&self, document: &Document) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError>;
}

/// Compact JSON, the same representation the export arrives in.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn encode(&self, document: &Document) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(document)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
