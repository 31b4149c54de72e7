//! In-process snapshot store.

use std::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::{RawDocument, SnapshotStore};

/// Keeps documents in a vector, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<RawDocument>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with documents.
    pub fn with_documents(documents: Vec<RawDocument>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Append a document.
    pub fn insert(&self, document: RawDocument) -> Result<()> {
        self.documents
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?
            .push(document);
        Ok(())
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemoryStore {
    fn fetch_first(&self) -> Result<Option<RawDocument>> {
        let docs = self
            .documents
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        Ok(docs.first().cloned())
    }

    fn fetch_all_ordered(&self) -> Result<Vec<RawDocument>> {
        let docs = self
            .documents
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        Ok(docs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_store_has_no_first() {
        let store = MemoryStore::new();
        assert!(store.fetch_first().unwrap().is_none());
        assert!(store.fetch_all_ordered().unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let store = MemoryStore::new();
        store.insert(json!({"state": {"turnNo": 1}})).unwrap();
        store.insert(json!({"state": {"turnNo": 2}})).unwrap();
        store.insert(json!({"state": {"turnNo": 3}})).unwrap();

        let first = store.fetch_first().unwrap().unwrap();
        assert_eq!(first["state"]["turnNo"], 1);

        let turns: Vec<_> = store
            .fetch_all_ordered()
            .unwrap()
            .iter()
            .map(|d| d["state"]["turnNo"].as_i64().unwrap())
            .collect();
        assert_eq!(turns, vec![1, 2, 3]);
        assert_eq!(store.len(), 3);
    }
}
