mod config;
mod content;
mod editing;
mod errors;
mod insights;
mod policy;
mod routes;
mod state;
mod storage;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting recovery admin v{}", env!("CARGO_PKG_VERSION"));

    // Local store; the app keeps working in memory if the directory is unusable
    let storage: Arc<dyn KeyValueStore> =
        match FileStore::open(config.storage_dir.clone(), config.storage_quota_bytes) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Local store unavailable, changes will not survive a restart: {e}");
                Arc::new(MemoryStore::default())
            }
        };

    let state = AppState::new(config.clone(), storage);

    // Log every committed change to the user records
    let mut changes = state.users.subscribe();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let snapshot = changes.borrow_and_update().clone();
            info!(
                "User records changed: version {}, {} users",
                snapshot.version,
                snapshot.users.len()
            );
        }
    });

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
