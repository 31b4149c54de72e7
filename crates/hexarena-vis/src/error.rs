//! Error types for the visualizer.

use hexarena_store::StoreError;
use thiserror::Error;

use crate::decode::DecodeError;

/// Result type for visualizer operations.
pub type Result<T> = std::result::Result<T, VisError>;

/// Reasons the current snapshot could not be produced.
#[derive(Debug, Error)]
pub enum VisError {
    /// The store could not be reached or failed mid-request
    #[error("snapshot store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The store answered but holds no snapshot
    #[error("snapshot store is empty")]
    EmptyStore,

    /// A stored document is not an arena snapshot
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] DecodeError),

    /// Rotation mode has nothing cached to rotate through
    #[error("no snapshots cached for rotation")]
    EmptyCache,
}

impl VisError {
    /// Stable machine-readable name of the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            VisError::StoreUnavailable(_) => "store_unavailable",
            VisError::EmptyStore => "empty_store",
            VisError::Decode(_) => "decode_failure",
            VisError::EmptyCache => "empty_cache",
        }
    }

    /// Message shown to the viewer in place of the map.
    pub fn user_message(&self) -> String {
        format!("Failed to visualize map: {}", self)
    }
}
