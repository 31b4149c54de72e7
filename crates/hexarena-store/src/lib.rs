//! Hexarena Snapshot Store
//!
//! The gateway between the visualizer and wherever arena snapshots are
//! persisted. Snapshots are opaque JSON documents; the store only knows how
//! to hand back the first one or all of them in insertion order.
//!
//! # Backends
//!
//! - **Memory**: in-process list, for tests and embedding
//! - **Directory**: one JSON file per document
//! - **RocksDB**: sequence-keyed documents (feature `rocksdb`)

pub mod error;
pub mod memory;
pub mod dir;
#[cfg(feature = "rocksdb")]
pub mod rocks;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use dir::DirStore;
#[cfg(feature = "rocksdb")]
pub use rocks::RocksStore;

/// A stored snapshot document, as loosely typed as the producer wrote it.
pub type RawDocument = serde_json::Value;

/// Read access to stored snapshot documents.
///
/// Calls may block on I/O; async callers should run them on a blocking
/// thread.
pub trait SnapshotStore: Send + Sync {
    /// The first document in the store's natural order, or `None` if empty.
    fn fetch_first(&self) -> Result<Option<RawDocument>>;

    /// Every document, oldest insertion first.
    fn fetch_all_ordered(&self) -> Result<Vec<RawDocument>>;
}
