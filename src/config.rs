//! Ingestion settings shared by the ingestor, the service and the binary.

use serde::{Deserialize, Serialize};

/// Field that carries the document identifier in CouchDB exports.
pub const DEFAULT_KEY_FIELD: &str = "_id";

/// Name reported by the status operation.
pub const DEFAULT_COMPONENT_NAME: &str = "BatchIngestor";

/// Settings for a batch ingestion service.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngestConfig {
    /// Document field used as the storage key.
    pub key_field: String,
    /// Component name returned by `healthCheck`.
    pub component_name: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            key_field: DEFAULT_KEY_FIELD.to_string(),
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    pub fn with_component_name(mut self, component_name: impl Into<String>) -> Self {
        self.component_name = component_name.into();
        self
    }
}
