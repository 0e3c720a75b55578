use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_session_files;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use wipeguard_core::models::UploadResponse;

#[utoipa::path(
    post,
    path = "/api/v1/files/upload",
    tag = "files",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Repeated `files` parts plus a `sessionId` text field"
    ),
    responses(
        (status = 200, description = "Files stored and recorded", body = UploadResponse),
        (status = 400, description = "No files provided or invalid session ID", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(session_id = tracing::field::Empty, operation = "upload")
)]
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (session_id, files) = extract_session_files(multipart).await?;
    tracing::Span::current().record("session_id", session_id.as_str());

    let response = state.sessions.upload(&session_id, files).await?;
    Ok(Json(response))
}
