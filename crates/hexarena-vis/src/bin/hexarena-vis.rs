//! Hexarena Visualization Server
//!
//! Serve arena snapshots from a snapshot store to the browser viewer.
//! Configuration comes from `HEXARENA_*` environment variables.

use std::sync::Arc;

use hexarena_vis::{SelectorMode, SnapshotSelector, VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexarena_vis=info,hexarena_store=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?;

    tracing::info!("Starting Hexarena visualizer");
    tracing::info!("  API: http://{}", config.api_addr);
    tracing::info!("  Store: {:?} at {:?}", config.store_backend, config.store_path);
    match config.mode {
        SelectorMode::Direct => tracing::info!("  Mode: direct"),
        SelectorMode::Rotation { period } => tracing::info!("  Mode: rotation every {:?}", period),
    }

    let store = config.open_store()?;

    // Rotation mode reads the whole store here
    let mode = config.mode;
    let selector = tokio::task::spawn_blocking(move || SnapshotSelector::new(store, mode)).await??;
    let selector = Arc::new(selector);

    let _rotation = selector.spawn_rotation();

    VisServer::new(selector).serve(config.api_addr).await?;

    Ok(())
}
