// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::controller::Controller;
use crate::application::key_value_store::KeyValueStore;
use crate::application::workout_storage::WorkoutStorage;
use crate::infrastructure::command_buffer::{CommandMap, CommandSurface};
use crate::infrastructure::config::load_tracker_config;
use crate::infrastructure::file_store::FileStore;
use crate::infrastructure::memory_store::MemoryStore;
use crate::presentation::app_state::AppState;
use crate::presentation::router::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_tracker_config()?;

    // Create key-value store (infrastructure layer)
    let store: Arc<dyn KeyValueStore> = match &config.storage.path {
        Some(path) => {
            let file_store = FileStore::new(path);
            tracing::info!("Storing workouts in {}", file_store.path().display());
            Arc::new(file_store)
        }
        None => {
            tracing::info!("No storage path configured, workouts last for this process only");
            Arc::new(MemoryStore::new())
        }
    };

    // Create controller (application layer)
    let storage = WorkoutStorage::new(store, config.storage.key.clone());
    let mut controller = Controller::new(
        CommandMap::new(),
        CommandSurface::new(),
        storage,
        config.map.clone(),
    )
    .with_utc_offset(config.display.utc_offset()?);
    controller.hydrate();

    // Build router (presentation layer)
    let state = Arc::new(AppState::new(controller));
    let router = create_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting workout-tracker service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
