//! Aggregated batch result and the tally that builds it.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::outcome::IngestOutcome;

/// Aggregate outcome of one batch, encoded as the call's response payload:
///
/// ```json
/// {
///   "totalDocs": 3,
///   "successfulDocs": 2,
///   "failedDocs": 1,
///   "processingTime": "41.2µs",
///   "errors": ["Doc 1: missing _id"]
/// }
/// ```
///
/// `errors` is left out of the encoding when nothing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub total_docs: usize,
    pub successful_docs: usize,
    pub failed_docs: usize,
    pub processing_time: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Per-document outcomes in input order. Not part of the encoding.
    #[serde(skip)]
    pub outcomes: Vec<IngestOutcome>,
}

impl BatchResult {
    /// True when every document was stored.
    pub fn is_complete(&self) -> bool {
        self.failed_docs == 0
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Accumulates per-document outcomes for one batch.
pub(crate) struct BatchTally {
    started: Instant,
    successful: usize,
    failed: usize,
    errors: Vec<String>,
    outcomes: Vec<IngestOutcome>,
}

impl BatchTally {
    pub(crate) fn new(total: usize, started: Instant) -> Self {
        Self {
            started,
            successful: 0,
            failed: 0,
            errors: Vec::new(),
            outcomes: Vec::with_capacity(total),
        }
    }

    pub(crate) fn record(&mut self, index: usize, outcome: IngestOutcome) {
        match &outcome {
            IngestOutcome::Stored { .. } => self.successful += 1,
            IngestOutcome::Failed(reason) => {
                self.failed += 1;
                self.errors.push(format!("Doc {}: {}", index, reason));
            }
        }
        self.outcomes.push(outcome);
    }

    pub(crate) fn finish(self) -> BatchResult {
        BatchResult {
            total_docs: self.outcomes.len(),
            successful_docs: self.successful,
            failed_docs: self.failed,
            processing_time: format_duration(self.started.elapsed()),
            errors: self.errors,
            outcomes: self.outcomes,
        }
    }
}

/// Human-readable duration, e.g. `1.234567ms`.
pub(crate) fn format_duration(elapsed: Duration) -> String {
    format!("{:?}", elapsed)
}
