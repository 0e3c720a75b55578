use wipeguard_core::classifier::classify_with_reason;
use wipeguard_core::models::{
    validate_session_id, EntryKind, ProgressOperation, ScanResponse, ScannedFile,
};
use wipeguard_core::AppError;

use super::SessionService;

impl SessionService {
    /// Classify every file of the session and persist the labels.
    ///
    /// Files scanned before keep their stored label; `custom_keywords` are merged with the
    /// server-wide classifier keywords for this call only.
    #[tracing::instrument(skip(self, custom_keywords), fields(session_id = %session_id))]
    pub async fn scan(
        &self,
        session_id: &str,
        custom_keywords: &[String],
    ) -> Result<ScanResponse, AppError> {
        validate_session_id(session_id)?;

        let config = self.classifier.merged(custom_keywords);
        let files = self.repository.list_by_session(session_id).await?;
        let total = files.len();
        let mut scanned = Vec::with_capacity(total);

        self.progress
            .report(session_id, ProgressOperation::Scan, 0, total, None);

        for (index, file) in files.into_iter().enumerate() {
            let risk_level = match file.risk_level {
                Some(stored) if file.scan_completed => stored,
                _ => {
                    let classification =
                        classify_with_reason(&file.file_name, file.size_hint(), &config);
                    tracing::debug!(
                        file_id = %file.id,
                        file_name = %file.file_name,
                        risk_level = %classification.level,
                        reason = %classification.reason,
                        "File classified"
                    );
                    let stored = self
                        .repository
                        .record_scan(file.id, classification.level)
                        .await?;
                    stored.risk_level.unwrap_or(classification.level)
                }
            };

            self.progress.report(
                session_id,
                ProgressOperation::Scan,
                index + 1,
                total,
                Some(&file.file_name),
            );

            scanned.push(ScannedFile {
                id: file.id,
                name: file.file_name,
                size: file.file_size,
                path: file.file_path,
                kind: EntryKind::File,
                risk_level,
            });
        }

        let response = ScanResponse::from_files(scanned);
        tracing::info!(
            session_id = %session_id,
            total = response.summary.total,
            high = response.summary.high,
            medium = response.summary.medium,
            low = response.summary.low,
            recommended_wipe_type = %response.recommended_wipe_type,
            "Session scan completed"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{harness, input};
    use wipeguard_core::models::{RiskLevel, WipeType};

    #[tokio::test]
    async fn classifies_three_file_session() {
        let h = harness().await;
        h.service
            .upload(
                "session-1",
                vec![
                    input("password_list.txt", b"p"),
                    input("vacation_photo.jpg", b"j"),
                    input("notes.txt", b"n"),
                ],
            )
            .await
            .unwrap();

        let response = h.service.scan("session-1", &[]).await.unwrap();

        let levels: Vec<RiskLevel> = response.files.iter().map(|f| f.risk_level).collect();
        assert_eq!(levels, vec![RiskLevel::High, RiskLevel::Low, RiskLevel::Low]);
        assert_eq!(response.summary.total, 3);
        assert_eq!(response.summary.high, 1);
        assert_eq!(response.summary.medium, 0);
        assert_eq!(response.summary.low, 2);
        assert_eq!(response.recommended_wipe_type, WipeType::Advanced);

        assert!(h.repository.all().iter().all(|f| f.scan_completed));
    }

    #[tokio::test]
    async fn rescan_keeps_stored_label() {
        let h = harness().await;
        h.service
            .upload("session-1", vec![input("aadhar_card.jpg", b"a")])
            .await
            .unwrap();

        let first = h.service.scan("session-1", &[]).await.unwrap();
        assert_eq!(first.files[0].risk_level, RiskLevel::Low);

        let second = h
            .service
            .scan("session-1", &["aadhar".to_string()])
            .await
            .unwrap();
        assert_eq!(second.files[0].risk_level, RiskLevel::Low);
    }

    #[tokio::test]
    async fn custom_keywords_apply_to_unscanned_files() {
        let h = harness().await;
        h.service
            .upload("session-1", vec![input("aadhar_card.jpg", b"a")])
            .await
            .unwrap();

        let response = h
            .service
            .scan("session-1", &["Aadhar".to_string()])
            .await
            .unwrap();
        assert_eq!(response.files[0].risk_level, RiskLevel::High);
        assert_eq!(response.recommended_wipe_type, WipeType::Advanced);
    }

    #[tokio::test]
    async fn empty_session_scans_to_empty_summary() {
        let h = harness().await;
        let response = h.service.scan("nothing-here", &[]).await.unwrap();
        assert!(response.files.is_empty());
        assert_eq!(response.summary.total, 0);
        assert_eq!(response.recommended_wipe_type, WipeType::Standard);
    }
}
