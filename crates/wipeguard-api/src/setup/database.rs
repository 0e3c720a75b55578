//! Postgres pool for file records.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::time::Duration;
use wipeguard_core::Config;

/// Connect to `DATABASE_URL` and bring `uploaded_files` up to the latest migration.
///
/// Startup fails when either step fails; the server never runs against an unmigrated schema.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    tracing::info!("Connecting to file record database");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(config.database_url())
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "File record database connected"
    );

    // migrations/ at the workspace root
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("File record migrations applied");

    Ok(pool)
}
