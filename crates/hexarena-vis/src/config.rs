//! Runtime configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hexarena_store::{DirStore, SnapshotStore, StoreError};
use thiserror::Error;

use crate::selector::SelectorMode;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The configured backend was not compiled in
    #[error("store backend {0} is not available in this build")]
    BackendUnavailable(&'static str),

    /// The store could not be opened
    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),
}

/// Where snapshots are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Directory of JSON documents
    Dir,
    /// RocksDB database
    RocksDb,
}

/// Configuration for the visualizer.
#[derive(Debug, Clone)]
pub struct VisConfig {
    /// HTTP listen address
    pub api_addr: SocketAddr,

    /// Snapshot store backend
    pub store_backend: StoreBackend,

    /// Snapshot store location
    pub store_path: PathBuf,

    /// Snapshot selection strategy
    pub mode: SelectorMode,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store_backend: StoreBackend::Dir,
            store_path: PathBuf::from("./arena-snapshots"),
            mode: SelectorMode::Direct,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_addr = match lookup("HEXARENA_API_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "HEXARENA_API_ADDR",
                value,
                reason: "expected host:port",
            })?,
            None => defaults.api_addr,
        };

        let store_backend = match lookup("HEXARENA_STORE_BACKEND").as_deref() {
            None | Some("dir") => StoreBackend::Dir,
            Some("rocksdb") => StoreBackend::RocksDb,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "HEXARENA_STORE_BACKEND",
                    value: other.to_string(),
                    reason: "expected dir or rocksdb",
                })
            }
        };

        let store_path = lookup("HEXARENA_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);

        let period = match lookup("HEXARENA_ROTATION_SECS") {
            Some(value) => {
                let parsed = value.trim().parse::<u64>();
                match parsed {
                    Ok(secs) if secs > 0 => Duration::from_secs(secs),
                    _ => {
                        return Err(ConfigError::Invalid {
                            var: "HEXARENA_ROTATION_SECS",
                            value,
                            reason: "expected a positive number of seconds",
                        })
                    }
                }
            }
            None => SelectorMode::DEFAULT_ROTATION_PERIOD,
        };

        let mode = match lookup("HEXARENA_MODE").as_deref() {
            None | Some("direct") => SelectorMode::Direct,
            Some("rotation") => SelectorMode::Rotation { period },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "HEXARENA_MODE",
                    value: other.to_string(),
                    reason: "expected direct or rotation",
                })
            }
        };

        Ok(Self {
            api_addr,
            store_backend,
            store_path,
            mode,
        })
    }

    /// Open the configured snapshot store.
    pub fn open_store(&self) -> Result<Arc<dyn SnapshotStore>, ConfigError> {
        match self.store_backend {
            StoreBackend::Dir => Ok(Arc::new(DirStore::open(&self.store_path)?)),
            #[cfg(feature = "rocksdb")]
            StoreBackend::RocksDb => Ok(Arc::new(hexarena_store::RocksStore::open(&self.store_path)?)),
            #[cfg(not(feature = "rocksdb"))]
            StoreBackend::RocksDb => Err(ConfigError::BackendUnavailable("rocksdb")),
        }
    }
}
