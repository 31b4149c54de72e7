//! Directory-backed snapshot store.
//!
//! Each document is a `*.json` file. Files with a numeric stem come first,
//! in numeric order; any others follow in file-name order.
//! [`DirStore::insert`] names files with the next sequence number.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::{RawDocument, SnapshotStore};

/// Snapshot store over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open or create a store rooted at the given directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory the store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a document as the newest entry.
    pub fn insert(&self, document: &RawDocument) -> Result<PathBuf> {
        let next = self
            .document_paths()?
            .iter()
            .filter_map(|p| sequence_of(p))
            .max()
            .map_or(0, |seq| seq + 1);

        let path = self.root.join(format!("{:020}.json", next));
        fs::write(&path, serde_json::to_vec_pretty(document)?)?;
        tracing::debug!(path = %path.display(), "Stored snapshot document");
        Ok(path)
    }

    /// Paths of all documents in insertion order.
    fn document_paths(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::Unavailable(format!(
                "snapshot directory {} does not exist",
                self.root.display()
            )),
            _ => StoreError::Io(e),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| match (sequence_of(a), sequence_of(b)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        });
        Ok(paths)
    }

    fn read_document(path: &Path) -> Result<RawDocument> {
        let data = fs::read(path)?;
        serde_json::from_slice(&data).map_err(|source| StoreError::Corrupt {
            location: path.display().to_string(),
            source,
        })
    }
}

/// Sequence number encoded in a document's file stem, if numeric.
fn sequence_of(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.parse().ok()
}

impl SnapshotStore for DirStore {
    fn fetch_first(&self) -> Result<Option<RawDocument>> {
        match self.document_paths()?.first() {
            Some(path) => Ok(Some(Self::read_document(path)?)),
            None => Ok(None),
        }
    }

    fn fetch_all_ordered(&self) -> Result<Vec<RawDocument>> {
        let paths = self.document_paths()?;
        let documents = paths
            .iter()
            .map(|path| Self::read_document(path))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(
            count = documents.len(),
            root = %self.root.display(),
            "Loaded snapshot documents"
        );
        Ok(documents)
    }
}
