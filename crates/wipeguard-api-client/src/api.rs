//! Domain methods for the WipeGuard API client.
//!
//! Request and response bodies are the `wipeguard_core::models` types the server uses.

use crate::{ApiClient, API_PREFIX};
use anyhow::{Context, Result};
use std::path::Path;
use wipeguard_core::models::{
    ProgressSnapshot, PurgeResponse, ScanRequest, ScanResponse, SessionStatusResponse,
    UploadResponse, WipeRequest, WipeResponse, WipeType,
};

/// A local file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: "application/octet-stream".to_string(),
            data,
        }
    }

    /// Read a file from disk. Paths containing `..` are rejected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(anyhow::anyhow!("Invalid input: {}", path.display()));
        }

        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        Ok(Self::new(name, data))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl ApiClient {
    /// Upload files into a session. The server assigns each file its storage key.
    pub async fn upload_files(
        &self,
        session_id: &str,
        files: &[UploadFile],
    ) -> Result<UploadResponse> {
        let mut form = reqwest::multipart::Form::new().text("sessionId", session_id.to_string());
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.data.clone())
                .file_name(file.name.clone())
                .mime_str(&file.content_type)
                .context("Invalid content type")?;
            form = form.part("files", part);
        }

        self.post_multipart(&format!("{}/files/upload", API_PREFIX), form)
            .await
    }

    /// Classify every file of a session.
    pub async fn scan_session(
        &self,
        session_id: &str,
        custom_keywords: &[String],
    ) -> Result<ScanResponse> {
        let request = ScanRequest {
            session_id: session_id.to_string(),
            custom_keywords: custom_keywords.to_vec(),
        };
        self.post_json(&format!("{}/files/scan", API_PREFIX), &request)
            .await
    }

    /// Wipe every scanned file of a session.
    pub async fn wipe_session(&self, session_id: &str, wipe_type: WipeType) -> Result<WipeResponse> {
        let request = WipeRequest {
            session_id: session_id.to_string(),
            wipe_type,
        };
        self.post_json(&format!("{}/files/wipe", API_PREFIX), &request)
            .await
    }

    pub async fn session_status(&self, session_id: &str) -> Result<SessionStatusResponse> {
        self.get(&format!("{}/sessions/{}", API_PREFIX, session_id))
            .await
    }

    /// Latest progress snapshot, or `None` when the server has none for this session.
    pub async fn session_progress(&self, session_id: &str) -> Result<Option<ProgressSnapshot>> {
        self.get_optional(&format!("{}/sessions/{}/progress", API_PREFIX, session_id))
            .await
    }

    /// Remove the metadata of successfully wiped files.
    pub async fn purge_session(&self, session_id: &str) -> Result<PurgeResponse> {
        self.delete(&format!("{}/sessions/{}", API_PREFIX, session_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank_statement.pdf");
        std::fs::write(&path, b"statement").unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.name, "bank_statement.pdf");
        assert_eq!(file.size(), 9);
        assert_eq!(file.content_type, "application/octet-stream");
    }

    #[test]
    fn rejects_parent_components() {
        assert!(UploadFile::from_path("../secrets.txt").is_err());
    }
}
