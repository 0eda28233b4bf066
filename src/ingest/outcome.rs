use crate::store::StoreError;

/// Why a single document was not stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// The key field is absent or not a string.
    #[error("missing {field}")]
    MissingKey { field: String },
    /// The document could not be encoded.
    #[error("marshal error: {0}")]
    Marshal(String),
    /// The store refused the write.
    #[error("storage error: {0}")]
    Storage(StoreError),
}

/// Per-document result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Stored { key: String },
    Failed(FailureReason),
}

impl IngestOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, IngestOutcome::Stored { .. })
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            IngestOutcome::Failed(reason) => Some(reason),
            IngestOutcome::Stored { .. } => None,
        }
    }
}
