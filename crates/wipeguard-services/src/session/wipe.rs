use std::time::Instant;
use wipeguard_core::models::{
    validate_session_id, ProgressOperation, UploadedFile, WipeOutcome, WipeResponse, WipeResult,
    WipeStatus, WipeType,
};
use wipeguard_core::AppError;

use super::SessionService;

impl SessionService {
    /// Delete the blob of every scanned, not yet wiped file of the session.
    ///
    /// A failure on one file is recorded on that file and does not stop the batch. Both wipe
    /// types perform a single deletion of the stored object. The session's progress entry is
    /// dropped once the batch is done.
    #[tracing::instrument(skip(self), fields(session_id = %session_id, wipe_type = %wipe_type))]
    pub async fn wipe(
        &self,
        session_id: &str,
        wipe_type: WipeType,
    ) -> Result<WipeResponse, AppError> {
        validate_session_id(session_id)?;

        let files = self.repository.list_wipe_candidates(session_id).await?;
        let total = files.len();
        let start = Instant::now();
        let mut results = Vec::with_capacity(total);

        self.progress
            .report(session_id, ProgressOperation::Wipe, 0, total, None);

        for (index, file) in files.into_iter().enumerate() {
            let result = match self.wipe_file(&file, wipe_type).await {
                Ok(()) => WipeResult {
                    id: file.id,
                    name: file.file_name.clone(),
                    status: WipeStatus::Success,
                    message: format!("Successfully wiped using {} method", wipe_type),
                },
                Err(e) => {
                    let error = e.to_string();
                    tracing::warn!(
                        file_id = %file.id,
                        key = %file.file_path,
                        error = %error,
                        "File wipe failed, continuing with remaining files"
                    );
                    if let Err(record_err) = self
                        .repository
                        .record_wipe(file.id, &WipeOutcome::failed(wipe_type, error.clone()))
                        .await
                    {
                        tracing::error!(
                            error = %record_err,
                            file_id = %file.id,
                            "Failed to record wipe failure"
                        );
                    }
                    WipeResult {
                        id: file.id,
                        name: file.file_name.clone(),
                        status: WipeStatus::Failed,
                        message: format!("Failed to wipe: {}", error),
                    }
                }
            };
            results.push(result);

            self.progress.report(
                session_id,
                ProgressOperation::Wipe,
                index + 1,
                total,
                Some(&file.file_name),
            );
        }

        // The response carries the final state.
        self.progress.clear(session_id);

        let response = WipeResponse::from_results(results, wipe_type);
        tracing::info!(
            session_id = %session_id,
            total = response.summary.total,
            successful = response.summary.successful,
            failed = response.summary.failed,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Session wipe completed"
        );

        Ok(response)
    }

    async fn wipe_file(&self, file: &UploadedFile, wipe_type: WipeType) -> Result<(), AppError> {
        self.storage.delete(&file.file_path).await?;
        self.repository
            .record_wipe(file.id, &WipeOutcome::success(wipe_type))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{harness, input};
    use wipeguard_core::models::{WipeStatus, WipeType};

    #[tokio::test]
    async fn wipes_every_scanned_file() {
        let h = harness().await;
        let upload = h
            .service
            .upload(
                "session-1",
                vec![input("password_list.txt", b"p"), input("notes.txt", b"n")],
            )
            .await
            .unwrap();
        h.service.scan("session-1", &[]).await.unwrap();

        let response = h.service.wipe("session-1", WipeType::Advanced).await.unwrap();

        assert_eq!(response.summary.total, 2);
        assert_eq!(response.summary.successful, 2);
        assert_eq!(response.summary.failed, 0);
        assert_eq!(
            response.results[0].message,
            "Successfully wiped using advanced method"
        );
        for file in &upload.files {
            assert!(!h.storage.exists(&file.path).await.unwrap());
        }
        assert!(h
            .repository
            .all()
            .iter()
            .all(|f| f.wipe_completed && f.wipe_type == Some(WipeType::Advanced)));
    }

    #[tokio::test]
    async fn finished_wipe_releases_progress_entry() {
        let h = harness().await;
        for session in ["session-1", "session-2", "session-3"] {
            h.service
                .upload(session, vec![input("notes.txt", b"n")])
                .await
                .unwrap();
            h.service.scan(session, &[]).await.unwrap();
            assert!(h.service.progress().get(session).is_some());

            h.service.wipe(session, WipeType::Standard).await.unwrap();
            assert!(h.service.progress().get(session).is_none());
        }
        assert!(h.service.progress().is_empty());
    }

    #[tokio::test]
    async fn unscanned_files_are_not_wiped() {
        let h = harness().await;
        h.service
            .upload("session-1", vec![input("notes.txt", b"n")])
            .await
            .unwrap();

        let response = h.service.wipe("session-1", WipeType::Standard).await.unwrap();
        assert_eq!(response.summary.total, 0);
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_batch() {
        let h = harness().await;
        let upload = h
            .service
            .upload(
                "session-1",
                vec![
                    input("a.txt", b"a"),
                    input("b.txt", b"b"),
                    input("c.txt", b"c"),
                ],
            )
            .await
            .unwrap();
        h.service.scan("session-1", &[]).await.unwrap();

        // Blob vanished behind the service's back.
        h.storage.delete(&upload.files[1].path).await.unwrap();

        let response = h.service.wipe("session-1", WipeType::Standard).await.unwrap();
        assert_eq!(response.summary.successful, 2);
        assert_eq!(response.summary.failed, 1);
        assert_eq!(response.results[1].status, WipeStatus::Failed);
        assert!(response.results[1].message.starts_with("Failed to wipe: "));
        assert_eq!(response.results[2].status, WipeStatus::Success);

        let failed = h
            .repository
            .all()
            .into_iter()
            .find(|f| f.id == upload.files[1].id)
            .unwrap();
        assert_eq!(failed.wipe_status, Some(WipeStatus::Failed));
        assert!(failed.wipe_error.is_some());

        // Only the failed file is retried.
        let retry = h.service.wipe("session-1", WipeType::Standard).await.unwrap();
        assert_eq!(retry.summary.total, 1);
        assert_eq!(retry.results[0].id, upload.files[1].id);
    }
}
