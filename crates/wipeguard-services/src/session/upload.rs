use std::time::Instant;
use wipeguard_core::models::{
    validate_session_id, NewUploadedFile, ProgressOperation, UploadResponse, UploadedFileEntry,
};
use wipeguard_core::AppError;
use wipeguard_storage::generate_session_key;

use super::SessionService;

/// One file received from the client. `file_name` is kept as supplied; it is what gets
/// stored, returned and classified.
#[derive(Debug, Clone)]
pub struct UploadInput {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl SessionService {
    /// Store each file under a session-scoped key, then record its metadata.
    ///
    /// Sizes are checked before anything is written, so an oversized file rejects the whole
    /// batch.
    #[tracing::instrument(skip(self, files), fields(session_id = %session_id, file_count = files.len()))]
    pub async fn upload(
        &self,
        session_id: &str,
        files: Vec<UploadInput>,
    ) -> Result<UploadResponse, AppError> {
        validate_session_id(session_id)?;

        if files.is_empty() {
            return Err(AppError::BadRequest("No files provided".to_string()));
        }

        let max_mb = self.max_file_size_bytes / (1024 * 1024);
        if let Some(oversized) = files.iter().find(|f| f.data.len() > self.max_file_size_bytes) {
            return Err(AppError::PayloadTooLarge(format!(
                "File '{}' exceeds the maximum size of {} MB",
                oversized.file_name, max_mb
            )));
        }

        let total = files.len();
        let start = Instant::now();
        let mut uploaded = Vec::with_capacity(total);
        self.progress
            .report(session_id, ProgressOperation::Upload, 0, total, None);

        for (index, file) in files.into_iter().enumerate() {
            let key = generate_session_key(session_id, &file.file_name);
            let size = file.data.len() as i64;

            self.storage
                .upload_with_key(&key, file.data, &file.content_type)
                .await?;

            let record = self
                .repository
                .insert(NewUploadedFile {
                    session_id: session_id.to_string(),
                    file_name: file.file_name.clone(),
                    file_path: key.clone(),
                    file_size: size,
                    content_type: file.content_type,
                })
                .await;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    // Metadata insert failed: the blob would be unreachable, so drop it.
                    if let Err(cleanup) = self.storage.delete(&key).await {
                        tracing::warn!(
                            error = %cleanup,
                            key = %key,
                            "Failed to remove blob after metadata insert failure"
                        );
                    }
                    return Err(e);
                }
            };

            uploaded.push(UploadedFileEntry::from(&record));
            self.progress.report(
                session_id,
                ProgressOperation::Upload,
                index + 1,
                total,
                Some(&file.file_name),
            );
        }

        tracing::info!(
            session_id = %session_id,
            file_count = uploaded.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Session upload completed"
        );

        Ok(UploadResponse {
            success: true,
            files: uploaded,
            session_id: session_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{harness, input};
    use wipeguard_core::AppError;

    #[tokio::test]
    async fn stores_blobs_and_records_metadata() {
        let h = harness().await;

        let response = h
            .service
            .upload("session-1", vec![input("notes.txt", b"hello"), input("a.jpg", b"jpg")])
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.session_id, "session-1");
        assert_eq!(response.files.len(), 2);
        assert_eq!(response.files[0].name, "notes.txt");
        assert_eq!(response.files[0].size, 5);
        assert!(response.files[0].path.starts_with("session-1/"));
        assert!(response.files[0].path.ends_with("-notes.txt"));

        for file in &response.files {
            assert!(h.storage.exists(&file.path).await.unwrap());
        }
        assert_eq!(h.repository.all().len(), 2);

        let progress = h.service.progress().get("session-1").unwrap();
        assert_eq!((progress.completed, progress.total), (2, 2));
    }

    #[tokio::test]
    async fn keeps_client_file_name_outside_the_key() {
        let h = harness().await;

        let response = h
            .service
            .upload(
                "session-1",
                vec![
                    input("bank account.xlsx", b"b"),
                    input("report..final.pdf", b"r"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(response.files[0].name, "bank account.xlsx");
        assert!(response.files[0].path.ends_with("-bank_account.xlsx"));
        assert_eq!(response.files[1].name, "report..final.pdf");
        assert!(!response.files[1].path.contains(".."));
        assert_eq!(h.repository.all()[0].file_name, "bank account.xlsx");

        for file in &response.files {
            assert!(h.storage.exists(&file.path).await.unwrap());
        }
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let h = harness().await;
        let err = h.service.upload("session-1", Vec::new()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "No files provided"));
    }

    #[tokio::test]
    async fn oversized_file_rejects_whole_batch() {
        let h = harness().await;
        let big = vec![0u8; 2048];
        let err = h
            .service
            .upload("session-1", vec![input("ok.txt", b"x"), input("big.bin", &big)])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PayloadTooLarge(_)));
        assert!(h.repository.all().is_empty());
    }

    #[tokio::test]
    async fn invalid_session_id_is_rejected() {
        let h = harness().await;
        let err = h
            .service
            .upload("../escape", vec![input("a.txt", b"x")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
