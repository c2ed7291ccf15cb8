use thiserror::Error;

/// Failures raised by the persistence layer.
///
/// Loading never surfaces these (it falls back to an empty database); saving
/// does, so the caller can keep its unsaved state around.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize planner database: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage quota exceeded for '{key}': need {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
