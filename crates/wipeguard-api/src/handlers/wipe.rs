use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;
use wipeguard_core::models::{WipeRequest, WipeResponse};

/// Wipe every scanned file of the session. Per-file failures are reported in `results`, so this
/// returns 200 even when some files could not be wiped.
#[utoipa::path(
    post,
    path = "/api/v1/files/wipe",
    tag = "files",
    request_body = WipeRequest,
    responses(
        (status = 200, description = "Per-file wipe results", body = WipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(session_id = %request.session_id, wipe_type = %request.wipe_type, operation = "wipe")
)]
pub async fn wipe_files(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<WipeRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate()?;

    let response = state
        .sessions
        .wipe(&request.session_id, request.wipe_type)
        .await?;
    Ok(Json(response))
}
