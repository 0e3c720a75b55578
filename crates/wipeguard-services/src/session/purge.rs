use wipeguard_core::models::{validate_session_id, PurgeResponse, SessionStatusResponse};
use wipeguard_core::AppError;

use super::SessionService;

impl SessionService {
    /// Every file record of the session with its scan and wipe fields.
    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    pub async fn status(&self, session_id: &str) -> Result<SessionStatusResponse, AppError> {
        validate_session_id(session_id)?;

        let files = self.repository.list_by_session(session_id).await?;
        if files.is_empty() {
            return Err(AppError::NotFound(format!(
                "Session {} not found",
                session_id
            )));
        }

        Ok(SessionStatusResponse {
            success: true,
            session_id: session_id.to_string(),
            files,
        })
    }

    /// Remove metadata of successfully wiped files. Failed and pending rows are kept.
    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    pub async fn purge(&self, session_id: &str) -> Result<PurgeResponse, AppError> {
        validate_session_id(session_id)?;

        let purged = self.repository.purge_wiped(session_id).await?;
        if self.repository.list_by_session(session_id).await?.is_empty() {
            self.progress.clear(session_id);
        }

        tracing::info!(session_id = %session_id, purged, "Session metadata purged");

        Ok(PurgeResponse {
            success: true,
            session_id: session_id.to_string(),
            purged,
        })
    }
}
