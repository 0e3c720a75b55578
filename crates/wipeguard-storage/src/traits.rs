//! Blob storage seam for session files.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;
use wipeguard_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("File not found: {}", key)),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Where uploaded session files live.
///
/// Both backends (S3, local filesystem) implement this trait so the session services
/// never depend on a concrete backend.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `storage_key` and return the URL of the stored object.
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Download a file by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete the object stored under `storage_key`.
    ///
    /// Returns `StorageError::NotFound` when nothing is stored there, so a wipe never
    /// reports success for a blob it did not remove.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the size in bytes of an object, if it exists.
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;
    use wipeguard_core::ErrorMetadata;

    #[test]
    fn storage_errors_map_to_app_errors() {
        let err: AppError = StorageError::NotFound("s/1-a.txt".to_string()).into();
        assert_eq!(err.http_status_code(), 404);

        let err: AppError = StorageError::InvalidKey("bad".to_string()).into();
        assert_eq!(err.http_status_code(), 400);

        let err: AppError = StorageError::DeleteFailed("denied".to_string()).into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}
