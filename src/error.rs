// ============================================================
// Error Types
// ============================================================
// Every failure the dataloader can report to its caller.
//
// The iteration errors (UnknownSplit, MissingBatchSize,
// IndexOutOfRange, NotStarted) are contract violations:
// the caller asked for something that does not exist or
// called operations in the wrong order. None of them are
// transient, so none of them should be retried.
//
// Running out of batches is not an error: get_next_batch
// returns Ok(None) at the end of an epoch.

use crate::domain::split::Split;

/// Library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Dataloader errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The split name is not recognised, or the split was not loaded
    #[error("unknown split '{0}'")]
    UnknownSplit(String),

    /// restart() was called without a batch size and none was set before
    #[error("no batch size configured for split '{0}'")]
    MissingBatchSize(Split),

    /// restart() was called with a batch size of zero
    #[error("batch size for split '{0}' must be greater than zero")]
    ZeroBatchSize(Split),

    /// A record index is past the end of the split
    #[error("record index {index} out of range for split '{split}' with {len} sessions")]
    IndexOutOfRange {
        /// Split being indexed
        split: Split,
        /// Offending record index
        index: usize,
        /// Number of sessions in the split
        len: usize,
    },

    /// get_next_batch() was called before restart()
    #[error("split '{0}' has not been started, call restart() first")]
    NotStarted(Split),

    /// The vocabulary list handed over by the corpus source is malformed
    #[error("invalid vocabulary: {reason}")]
    InvalidVocabulary {
        /// What is wrong with it
        reason: String,
    },

    /// A metric received a batch without a field it needs
    #[error("metric '{metric}' requires field '{field}'")]
    MissingMetricField {
        /// Metric name
        metric: &'static str,
        /// Missing field name
        field: &'static str,
    },

    /// A metric received fields whose shapes disagree
    #[error("metric '{metric}' shape mismatch: {reason}")]
    ShapeMismatch {
        /// Metric name
        metric: &'static str,
        /// Description of the mismatch
        reason: String,
    },

    /// A metric was closed before it saw any scoreable data
    #[error("metric '{0}' closed without any data")]
    EmptyMetric(&'static str),

    /// Filesystem error while reading a corpus
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed corpus JSON
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
