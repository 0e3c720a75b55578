//! Health check handlers and response types.

use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);
const HEALTHY: &str = "healthy";

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => HEALTHY.to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub database: String,
    pub storage: String,
}

async fn check_database(state: &AppState) -> String {
    let repository = state.sessions.repository().clone();
    run_check(
        TIMEOUT,
        async move { repository.health_check().await },
        "unhealthy",
    )
    .await
}

/// Liveness: the process is running.
pub async fn liveness_check(_state: Arc<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness: the metadata database answers.
pub async fn readiness_check(state: Arc<AppState>) -> impl IntoResponse {
    let database = check_database(&state).await;
    let ready = database == HEALTHY;
    if !ready {
        tracing::error!(database = %database, "Database readiness check failed");
    }

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = serde_json::json!({
        "status": if ready { "ready" } else { "not_ready" },
        "database": database,
    });

    (status_code, Json(body))
}

/// Full health check (database and blob storage).
///
/// A storage failure degrades the service but keeps a 200; a database failure is a 503.
pub async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    let database = check_database(&state).await;

    let storage = state.sessions.storage().clone();
    let storage = run_check(
        TIMEOUT,
        async move {
            storage
                .exists("health-check-non-existent-key")
                .await
                .map(drop)
        },
        "degraded",
    )
    .await;

    let (status_code, status) = if database != HEALTHY {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    } else if storage != HEALTHY {
        (StatusCode::OK, "degraded")
    } else {
        (StatusCode::OK, HEALTHY)
    };

    (
        status_code,
        Json(HealthCheckResponse {
            status: status.to_string(),
            database,
            storage,
        }),
    )
}
