//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use wipeguard_core::Config;
use wipeguard_storage::{create_storage, Storage};

/// Build the configured blob storage backend.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;
    tracing::info!(
        backend = ?storage.backend_type(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
