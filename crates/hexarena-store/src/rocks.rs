//! Persistent snapshot storage using RocksDB.
//!
//! Documents live under `snapshot:{seq}` keys with a zero-padded sequence
//! number, so a prefix scan yields them in insertion order.

use crate::error::{Result, StoreError};
use crate::{RawDocument, SnapshotStore};
use rocksdb::{Options, DB};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

const PREFIX: &[u8] = b"snapshot:";

/// RocksDB-backed snapshot store.
pub struct RocksStore {
    db: DB,
    next_seq: AtomicU64,
}

impl RocksStore {
    /// Open or create storage at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;

        let store = Self {
            db,
            next_seq: AtomicU64::new(0),
        };
        let next = store.last_seq()?.map_or(0, |seq| seq + 1);
        store.next_seq.store(next, Ordering::SeqCst);
        Ok(store)
    }

    /// Store a document as the newest entry, returning its sequence number.
    pub fn insert(&self, document: &RawDocument) -> Result<u64> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let value = serde_json::to_vec(document)?;
        self.db.put(Self::key(seq), value)?;
        Ok(seq)
    }

    fn key(seq: u64) -> Vec<u8> {
        format!("snapshot:{:020}", seq).into_bytes()
    }

    fn last_seq(&self) -> Result<Option<u64>> {
        let mut last = None;
        for item in self.db.prefix_iterator(PREFIX) {
            let (key, _) = item?;
            if !key.starts_with(PREFIX) {
                break;
            }
            let key_str = String::from_utf8_lossy(&key);
            if let Some(seq) = key_str
                .strip_prefix("snapshot:")
                .and_then(|s| s.parse::<u64>().ok())
            {
                last = Some(seq);
            }
        }
        Ok(last)
    }

    fn decode(key: &[u8], value: &[u8]) -> Result<RawDocument> {
        serde_json::from_slice(value).map_err(|source| StoreError::Corrupt {
            location: String::from_utf8_lossy(key).into_owned(),
            source,
        })
    }
}

impl SnapshotStore for RocksStore {
    fn fetch_first(&self) -> Result<Option<RawDocument>> {
        match self.db.prefix_iterator(PREFIX).next() {
            Some(item) => {
                let (key, value) = item?;
                if key.starts_with(PREFIX) {
                    Ok(Some(Self::decode(&key, &value)?))
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }

    fn fetch_all_ordered(&self) -> Result<Vec<RawDocument>> {
        let mut documents = Vec::new();

        for item in self.db.prefix_iterator(PREFIX) {
            let (key, value) = item?;
            if key.starts_with(PREFIX) {
                documents.push(Self::decode(&key, &value)?);
            } else {
                break;
            }
        }

        tracing::info!(count = documents.len(), "Docs read from RocksDB");
        Ok(documents)
    }
}
