//! Choosing which stored snapshot is "current".
//!
//! Two strategies sit behind one interface:
//!
//! - **Direct**: every request fetches the first document from the store.
//! - **Rotation**: all documents are fetched once at startup and a timer
//!   steps through them, wrapping at the end.
//!
//! Callers only ever ask for the current snapshot, its index and the
//! number of known snapshots.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use hexarena_store::{RawDocument, SnapshotStore};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::decode::decode_document;
use crate::error::{Result, VisError};
use crate::model::ArenaSnapshot;
use crate::render::RenderData;

/// How the current snapshot is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorMode {
    /// Fetch the first stored document on every request
    #[default]
    Direct,
    /// Cycle through all documents cached at startup
    Rotation { period: Duration },
}

impl SelectorMode {
    /// Rotation period used when none is configured.
    pub const DEFAULT_ROTATION_PERIOD: Duration = Duration::from_secs(2);

    /// Rotation with the default period.
    pub const fn rotation() -> Self {
        SelectorMode::Rotation {
            period: Self::DEFAULT_ROTATION_PERIOD,
        }
    }

    /// Mode name as reported by the status endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            SelectorMode::Direct => "direct",
            SelectorMode::Rotation { .. } => "rotation",
        }
    }
}

/// Documents cached for rotation and the cursor into them.
///
/// The cache is immutable after construction; only the cursor moves.
#[derive(Debug)]
pub struct Rotation {
    cache: Vec<RawDocument>,
    index: AtomicUsize,
    period: Duration,
}

impl Rotation {
    /// Rotation over `cache`, starting at index 0.
    pub fn new(cache: Vec<RawDocument>, period: Duration) -> Self {
        Self {
            cache,
            index: AtomicUsize::new(0),
            period,
        }
    }

    /// Time between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache holds no documents.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Cursor position in the cache.
    pub fn current_index(&self) -> usize {
        self.index.load(Ordering::Acquire)
    }

    /// Advance the cursor by one, wrapping. Returns the new index.
    ///
    /// With an empty cache this is a no-op that logs a warning.
    pub fn tick(&self) -> Option<usize> {
        let len = self.cache.len();
        if len == 0 {
            tracing::warn!("No documents cached for rotation; tick skipped");
            return None;
        }

        let previous = self
            .index
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| Some((i + 1) % len))
            .unwrap_or_else(|i| i);
        Some((previous + 1) % len)
    }

    /// The document under the cursor, with the index it was read at.
    fn current(&self) -> Option<(usize, &RawDocument)> {
        let index = self.current_index();
        self.cache.get(index).map(|doc| (index, doc))
    }
}

enum Strategy {
    Direct,
    Rotation(Rotation),
}

/// Serves the current snapshot out of a store.
pub struct SnapshotSelector {
    store: Arc<dyn SnapshotStore>,
    strategy: Strategy,
}

impl SnapshotSelector {
    /// Build a selector for the given mode.
    ///
    /// Rotation mode fetches every document from the store up front.
    pub fn new(store: Arc<dyn SnapshotStore>, mode: SelectorMode) -> Result<Self> {
        match mode {
            SelectorMode::Direct => Ok(Self::direct(store)),
            SelectorMode::Rotation { period } => Self::rotation(store, period),
        }
    }

    /// Selector that always serves the first stored document.
    pub fn direct(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            strategy: Strategy::Direct,
        }
    }

    /// Selector that rotates through every stored document.
    pub fn rotation(store: Arc<dyn SnapshotStore>, period: Duration) -> Result<Self> {
        let cache = store.fetch_all_ordered()?;
        if cache.is_empty() {
            tracing::warn!("Snapshot store is empty; rotation has nothing to show");
        } else {
            tracing::info!(count = cache.len(), ?period, "Cached snapshots for rotation");
        }
        Ok(Self {
            store,
            strategy: Strategy::Rotation(Rotation::new(cache, period)),
        })
    }

    pub fn mode(&self) -> SelectorMode {
        match &self.strategy {
            Strategy::Direct => SelectorMode::Direct,
            Strategy::Rotation(rotation) => SelectorMode::Rotation {
                period: rotation.period,
            },
        }
    }

    /// Index of the current snapshot. Always 0 in direct mode.
    pub fn current_index(&self) -> usize {
        match &self.strategy {
            Strategy::Direct => 0,
            Strategy::Rotation(rotation) => rotation.current_index(),
        }
    }

    /// Number of cached snapshots. Always 0 in direct mode.
    pub fn total_documents(&self) -> usize {
        match &self.strategy {
            Strategy::Direct => 0,
            Strategy::Rotation(rotation) => rotation.len(),
        }
    }

    /// Decode the current snapshot.
    pub fn current(&self) -> Result<ArenaSnapshot> {
        self.current_at().map(|(_, snapshot)| snapshot)
    }

    /// Current snapshot assembled for the viewer.
    pub fn render_data(&self) -> Result<RenderData> {
        let (index, snapshot) = self.current_at()?;
        Ok(RenderData::assemble(snapshot, index, self.total_documents()))
    }

    /// Step rotation forward once. No-op in direct mode.
    pub fn tick(&self) -> Option<usize> {
        match &self.strategy {
            Strategy::Direct => None,
            Strategy::Rotation(rotation) => rotation.tick(),
        }
    }

    /// Start the rotation timer. Returns `None` in direct mode.
    ///
    /// The first tick fires one period after the call. The task ends once
    /// the selector is dropped.
    pub fn spawn_rotation(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let period = match &self.strategy {
            Strategy::Direct => return None,
            Strategy::Rotation(rotation) => rotation.period,
        };

        let selector: Weak<Self> = Arc::downgrade(self);
        Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(selector) = selector.upgrade() else {
                    tracing::debug!("Selector dropped; rotation timer stopping");
                    break;
                };
                if let Some(index) = selector.tick() {
                    tracing::debug!(index, "Rotated to next snapshot");
                }
            }
        }))
    }

    fn current_at(&self) -> Result<(usize, ArenaSnapshot)> {
        match &self.strategy {
            Strategy::Direct => {
                let document = self.store.fetch_first()?.ok_or(VisError::EmptyStore)?;
                tracing::debug!(%document, "Fetched first snapshot document");
                Ok((0, decode_document(&document)?))
            }
            Strategy::Rotation(rotation) => {
                let (index, document) = rotation.current().ok_or(VisError::EmptyCache)?;
                Ok((index, decode_document(document)?))
            }
        }
    }
}
