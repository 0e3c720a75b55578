use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;
use wipeguard_core::models::{ScanRequest, ScanResponse};

#[utoipa::path(
    post,
    path = "/api/v1/files/scan",
    tag = "files",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Risk level of every file in the session", body = ScanResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(session_id = %request.session_id, operation = "scan")
)]
pub async fn scan_files(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ScanRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate()?;

    let response = state
        .sessions
        .scan(&request.session_id, &request.custom_keywords)
        .await?;
    Ok(Json(response))
}
