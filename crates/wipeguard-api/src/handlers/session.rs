//! Session status, progress and purge.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use wipeguard_core::models::{
    validate_session_id, ProgressSnapshot, PurgeResponse, SessionStatusResponse,
};
use wipeguard_core::AppError;

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}",
    tag = "sessions",
    params(
        ("sessionId" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Every file record of the session", body = SessionStatusResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "session_status"))]
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = state.sessions.status(&session_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/progress",
    tag = "sessions",
    params(
        ("sessionId" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Latest progress snapshot", body = ProgressSnapshot),
        (status = 404, description = "No progress recorded for this session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "session_progress"))]
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_session_id(&session_id)?;

    let snapshot = state.sessions.progress().get(&session_id).ok_or_else(|| {
        AppError::NotFound(format!("No progress recorded for session {}", session_id))
    })?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{sessionId}",
    tag = "sessions",
    params(
        ("sessionId" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Metadata of wiped files removed", body = PurgeResponse),
        (status = 400, description = "Invalid session ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "session_purge"))]
pub async fn purge_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = state.sessions.purge(&session_id).await?;
    Ok(Json(response))
}
