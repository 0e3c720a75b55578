use anyhow::Result;
use async_trait::async_trait;
use wipeguard_core::models::{
    ProgressSnapshot, ScanResponse, UploadResponse, WipeResponse, WipeType,
};

use crate::{ApiClient, UploadFile};

/// Remote operations the wizard drives. [`ApiClient`] is the production implementation.
#[async_trait]
pub trait LifecycleBackend: Send + Sync {
    async fn upload(&self, session_id: &str, files: &[UploadFile]) -> Result<UploadResponse>;

    async fn scan(&self, session_id: &str, custom_keywords: &[String]) -> Result<ScanResponse>;

    async fn wipe(&self, session_id: &str, wipe_type: WipeType) -> Result<WipeResponse>;

    /// Latest server-side progress of the session, if any was recorded.
    async fn progress(&self, session_id: &str) -> Result<Option<ProgressSnapshot>>;
}

#[async_trait]
impl LifecycleBackend for ApiClient {
    async fn upload(&self, session_id: &str, files: &[UploadFile]) -> Result<UploadResponse> {
        self.upload_files(session_id, files).await
    }

    async fn scan(&self, session_id: &str, custom_keywords: &[String]) -> Result<ScanResponse> {
        self.scan_session(session_id, custom_keywords).await
    }

    async fn wipe(&self, session_id: &str, wipe_type: WipeType) -> Result<WipeResponse> {
        self.wipe_session(session_id, wipe_type).await
    }

    async fn progress(&self, session_id: &str) -> Result<Option<ProgressSnapshot>> {
        self.session_progress(session_id).await
    }
}
