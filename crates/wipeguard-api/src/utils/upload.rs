//! Multipart parsing for the session upload endpoint

use axum::extract::Multipart;
use wipeguard_core::AppError;
use wipeguard_services::UploadInput;

const FILES_FIELD: &str = "files";
const SESSION_ID_FIELD: &str = "sessionId";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const UNKNOWN_FILE_NAME: &str = "unknown";

/// Collect every `files` part and the `sessionId` text field of an upload form.
///
/// Unknown fields are skipped. File names are passed through as the client sent them; the
/// storage layer derives its own key-safe form.
pub async fn extract_session_files(
    mut multipart: Multipart,
) -> Result<(String, Vec<UploadInput>), AppError> {
    let mut session_id: Option<String> = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            FILES_FIELD => {
                let file_name = client_file_name(field.file_name());
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                files.push(UploadInput {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            SESSION_ID_FIELD => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read sessionId: {}", e))
                })?;
                session_id = Some(value.trim().to_string());
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let session_id =
        session_id.ok_or_else(|| AppError::InvalidInput("sessionId is required".to_string()))?;

    Ok((session_id, files))
}

/// The name the client gave the part, or `unknown` when it sent none.
fn client_file_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_FILE_NAME.to_string(),
    }
}
