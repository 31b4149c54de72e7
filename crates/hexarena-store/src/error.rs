//! Error types for snapshot stores.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while talking to a snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend could not be reached or refused the request
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Backend-specific storage failure
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored document is not valid JSON
    #[error("corrupt document {location}: {source}")]
    Corrupt {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "rocksdb")]
impl From<rocksdb::Error> for StoreError {
    fn from(e: rocksdb::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}
