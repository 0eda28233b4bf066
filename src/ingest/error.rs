/// Batch-level failures. None of these leave anything written.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The payload is not a valid batch.
    #[error("failed to parse batch data: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// The batch parsed but holds no documents.
    #[error("no documents provided")]
    EmptyBatch,
}
