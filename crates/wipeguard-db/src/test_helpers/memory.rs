use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;
use wipeguard_core::models::{
    NewUploadedFile, RiskLevel, UploadedFile, WipeOutcome, WipeStatus,
};
use wipeguard_core::AppError;

use crate::db::UploadedFileRepositoryTrait;

/// In-memory repository mirroring the Postgres semantics (insertion order, immutable risk
/// label, retryable failed wipes).
#[derive(Clone, Default)]
pub struct InMemoryUploadedFileRepository {
    files: Arc<Mutex<Vec<UploadedFile>>>,
}

impl InMemoryUploadedFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> MutexGuard<'_, Vec<UploadedFile>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of every stored row, across sessions.
    pub fn all(&self) -> Vec<UploadedFile> {
        self.files().clone()
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound(format!("Uploaded file {} not found", id))
    }
}

#[async_trait]
impl UploadedFileRepositoryTrait for InMemoryUploadedFileRepository {
    async fn insert(&self, file: NewUploadedFile) -> Result<UploadedFile, AppError> {
        let record = UploadedFile {
            id: Uuid::new_v4(),
            session_id: file.session_id,
            file_name: file.file_name,
            file_path: file.file_path,
            file_size: file.file_size,
            content_type: file.content_type,
            upload_timestamp: Utc::now(),
            risk_level: None,
            scan_timestamp: None,
            scan_completed: false,
            wipe_completed: false,
            wipe_timestamp: None,
            wipe_type: None,
            wipe_status: None,
            wipe_error: None,
        };
        self.files().push(record.clone());
        Ok(record)
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<UploadedFile>, AppError> {
        Ok(self
            .files()
            .iter()
            .filter(|f| f.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn record_scan(
        &self,
        id: Uuid,
        risk_level: RiskLevel,
    ) -> Result<UploadedFile, AppError> {
        let mut files = self.files();
        let file = files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        file.risk_level = Some(file.risk_level.unwrap_or(risk_level));
        file.scan_timestamp = Some(file.scan_timestamp.unwrap_or_else(Utc::now));
        file.scan_completed = true;
        Ok(file.clone())
    }

    async fn list_wipe_candidates(
        &self,
        session_id: &str,
    ) -> Result<Vec<UploadedFile>, AppError> {
        Ok(self
            .files()
            .iter()
            .filter(|f| f.session_id == session_id && f.is_wipe_pending())
            .cloned()
            .collect())
    }

    async fn record_wipe(&self, id: Uuid, outcome: &WipeOutcome) -> Result<(), AppError> {
        let mut files = self.files();
        let file = files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        file.wipe_completed = true;
        file.wipe_timestamp = Some(Utc::now());
        file.wipe_type = Some(outcome.wipe_type);
        file.wipe_status = Some(outcome.status);
        file.wipe_error = outcome.error.clone();
        Ok(())
    }

    async fn purge_wiped(&self, session_id: &str) -> Result<u64, AppError> {
        let mut files = self.files();
        let before = files.len();
        files.retain(|f| {
            !(f.session_id == session_id && f.wipe_status == Some(WipeStatus::Success))
        });
        Ok((before - files.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
