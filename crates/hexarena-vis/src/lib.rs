//! Hexarena Visualization
//!
//! Renders snapshots of an ant colony arena stored by the game runner.
//!
//! # Architecture
//!
//! - **Decode**: turns loosely typed stored documents into [`ArenaSnapshot`]s
//! - **Selector**: picks the current snapshot, directly or by rotation
//! - **Render**: lays out every cell and assembles the viewer's data
//! - **Server**: HTTP API and the static viewer page
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use hexarena_store::DirStore;
//! use hexarena_vis::{SelectorMode, SnapshotSelector, VisServer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(DirStore::open("./arena-snapshots")?);
//! let selector = Arc::new(SnapshotSelector::new(store, SelectorMode::rotation())?);
//! selector.spawn_rotation();
//!
//! VisServer::new(selector).serve(([0, 0, 0, 0], 8080).into()).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod decode;
mod error;
mod model;
mod render;
mod selector;
mod server;

pub use config::{ConfigError, StoreBackend, VisConfig};
pub use decode::{decode_document, decode_state, DecodeError};
pub use error::{Result, VisError};
pub use model::{Ant, ArenaSnapshot, Food, Home, TileKind};
pub use render::{cell_key, CellStyleMap, RenderData};
pub use selector::{Rotation, SelectorMode, SnapshotSelector};
pub use server::VisServer;
