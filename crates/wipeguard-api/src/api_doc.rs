//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use wipeguard_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WipeGuard API",
        version = "0.1.0",
        description = "Upload files into a session, classify their privacy risk, and wipe them from storage."
    ),
    paths(
        // Files
        handlers::upload::upload_files,
        handlers::scan::scan_files,
        handlers::wipe::wipe_files,
        // Sessions
        handlers::session::get_session,
        handlers::session::get_progress,
        handlers::session::purge_session,
    ),
    components(
        schemas(
            models::RiskLevel,
            models::WipeType,
            models::WipeStatus,
            models::EntryKind,
            models::UploadedFile,
            models::UploadedFileEntry,
            models::UploadResponse,
            models::ScanRequest,
            models::ScannedFile,
            models::RiskSummary,
            models::ScanResponse,
            models::WipeRequest,
            models::WipeResult,
            models::WipeSummary,
            models::WipeResponse,
            models::SessionStatusResponse,
            models::PurgeResponse,
            models::ProgressOperation,
            models::ProgressSnapshot,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "Upload, scan and wipe the files of a session"),
        (name = "sessions", description = "Session status, progress and metadata purge")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::API_PREFIX;

    #[test]
    fn every_path_is_versioned() {
        let spec = get_openapi_spec();
        assert_eq!(spec.paths.paths.len(), 5);
        assert!(spec.paths.paths.keys().all(|p| p.starts_with(API_PREFIX)));
        assert!(spec
            .paths
            .paths
            .contains_key("/api/v1/sessions/{sessionId}/progress"));
    }
}
