//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded [`Config`] to a running router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use wipeguard_core::{ClassifierConfig, Config};
use wipeguard_db::PostgresUploadedFileRepository;
use wipeguard_services::SessionService;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let classifier =
        ClassifierConfig::with_custom_keywords(config.classifier_extra_keywords().iter());
    let sessions = SessionService::new(
        Arc::new(PostgresUploadedFileRepository::new(pool)),
        storage,
        classifier,
        config.max_file_size_bytes(),
    );
    let state = Arc::new(AppState::new(config.clone(), sessions));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
