use super::*;
use async_trait::async_trait;
use std::sync::Mutex;
use wipeguard_core::classifier::classify;
use wipeguard_core::models::{
    EntryKind, RiskLevel, ScannedFile, UploadResponse, UploadedFileEntry, WipeResponse,
};
use wipeguard_core::ClassifierConfig;

#[derive(Default)]
struct MockBackend {
    fail_upload: bool,
    fail_scan: bool,
    fail_wipe: bool,
    scan_delay: Option<Duration>,
    stored: Mutex<Vec<UploadedFileEntry>>,
    scan_keywords: Mutex<Vec<String>>,
    wipe_calls: Mutex<Vec<WipeType>>,
}

#[async_trait]
impl LifecycleBackend for MockBackend {
    async fn upload(
        &self,
        session_id: &str,
        files: &[UploadFile],
    ) -> anyhow::Result<UploadResponse> {
        if self.fail_upload {
            anyhow::bail!("connection refused");
        }
        let entries: Vec<UploadedFileEntry> = files
            .iter()
            .map(|f| UploadedFileEntry {
                id: Uuid::new_v4(),
                name: f.name.clone(),
                size: f.data.len() as i64,
                path: format!("{}/{}", session_id, f.name),
                kind: EntryKind::File,
            })
            .collect();
        *self.stored.lock().unwrap() = entries.clone();
        Ok(UploadResponse {
            success: true,
            files: entries,
            session_id: session_id.to_string(),
        })
    }

    async fn scan(
        &self,
        _session_id: &str,
        custom_keywords: &[String],
    ) -> anyhow::Result<ScanResponse> {
        if let Some(delay) = self.scan_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_scan {
            anyhow::bail!("API request failed with status 500");
        }
        *self.scan_keywords.lock().unwrap() = custom_keywords.to_vec();

        let config = ClassifierConfig::with_custom_keywords(custom_keywords);
        let files = self
            .stored
            .lock()
            .unwrap()
            .iter()
            .map(|entry| ScannedFile {
                id: entry.id,
                name: entry.name.clone(),
                size: entry.size,
                path: entry.path.clone(),
                kind: EntryKind::File,
                risk_level: classify(&entry.name, Some(entry.size as u64), &config),
            })
            .collect();
        Ok(ScanResponse::from_files(files))
    }

    async fn wipe(&self, _session_id: &str, wipe_type: WipeType) -> anyhow::Result<WipeResponse> {
        self.wipe_calls.lock().unwrap().push(wipe_type);
        if self.fail_wipe {
            anyhow::bail!("request timed out");
        }
        let results = self
            .stored
            .lock()
            .unwrap()
            .iter()
            .map(|entry| WipeResult {
                id: entry.id,
                name: entry.name.clone(),
                status: WipeStatus::Success,
                message: format!("Successfully wiped using {} method", wipe_type),
            })
            .collect();
        Ok(WipeResponse::from_results(results, wipe_type))
    }

    async fn progress(&self, session_id: &str) -> anyhow::Result<Option<ProgressSnapshot>> {
        let stored = self.stored.lock().unwrap();
        Ok(stored.first().map(|first| {
            ProgressSnapshot::new(
                session_id,
                ProgressOperation::Scan,
                1,
                stored.len(),
                Some(first.name.clone()),
            )
        }))
    }
}

fn wizard(backend: MockBackend) -> WipeWizard<MockBackend> {
    WipeWizard::new(backend, WipeSettings::default())
}

fn three_files() -> Vec<UploadFile> {
    vec![
        UploadFile::new("password_list.txt", vec![0; 1024 * 1024]),
        UploadFile::new("vacation_photo.jpg", vec![0; 2048]),
        UploadFile::new("notes.txt", vec![0; 100]),
    ]
}

fn ignore(_: ProgressUpdate) {}

#[tokio::test]
async fn runs_full_session() {
    let mut wizard = wizard(MockBackend::default());
    assert_eq!(wizard.step(), WizardStep::Select);

    wizard.select_files(three_files()).unwrap();

    let scan = wizard.start_scan(&mut ignore).await.unwrap();
    let levels: Vec<RiskLevel> = scan.files.iter().map(|f| f.risk_level).collect();
    assert_eq!(levels, vec![RiskLevel::High, RiskLevel::Low, RiskLevel::Low]);
    assert_eq!(scan.recommended_wipe_type, WipeType::Advanced);
    assert_eq!(wizard.step(), WizardStep::Review);
    assert!(wizard.session_id().is_some());

    let report = wizard.start_wipe(None, true, &mut ignore).await.unwrap();
    assert_eq!(report.files_wiped, 3);
    assert_eq!(report.files_failed, 0);
    assert_eq!(report.high_risk, 1);
    assert_eq!(report.wipe_type, WipeType::Advanced);
    assert_eq!(report.total_bytes, 1024 * 1024 + 2048 + 100);
    assert!(report.total_megabytes() > 1.0);
    assert_eq!(wizard.step(), WizardStep::Complete);

    wizard.reset().unwrap();
    assert_eq!(wizard.step(), WizardStep::Select);
    assert!(wizard.files().is_empty());
    assert!(wizard.report().is_none());
}

#[tokio::test]
async fn sends_settings_keywords_with_scan() {
    let mut wizard = wizard(MockBackend::default());
    wizard
        .select_files(vec![UploadFile::new("private_notes.txt", b"x".to_vec())])
        .unwrap();

    let scan = wizard.start_scan(&mut ignore).await.unwrap();
    assert_eq!(scan.files[0].risk_level, RiskLevel::High);

    let sent = wizard.backend().scan_keywords.lock().unwrap().clone();
    assert_eq!(sent, WipeSettings::default().sensitive_keywords);
}

#[tokio::test]
async fn explicit_wipe_type_overrides_recommendation() {
    let mut wizard = wizard(MockBackend::default());
    wizard.select_files(three_files()).unwrap();
    wizard.start_scan(&mut ignore).await.unwrap();

    let report = wizard
        .start_wipe(Some(WipeType::Standard), true, &mut ignore)
        .await
        .unwrap();
    assert_eq!(report.wipe_type, WipeType::Standard);
    assert_eq!(
        *wizard.backend().wipe_calls.lock().unwrap(),
        vec![WipeType::Standard]
    );
}

#[tokio::test]
async fn captcha_gates_selection() {
    let mut wizard = wizard(MockBackend::default()).with_captcha(CaptchaGate::new());
    assert_eq!(wizard.step(), WizardStep::Captcha);

    let err = wizard.select_files(three_files()).unwrap_err();
    assert!(matches!(
        err,
        WizardError::InvalidTransition {
            from: WizardStep::Captcha,
            ..
        }
    ));

    let err = wizard.verify_captcha("000000").unwrap_err();
    assert!(matches!(
        err,
        WizardError::CaptchaMismatch {
            remaining_attempts: 2
        }
    ));
    assert_eq!(wizard.step(), WizardStep::Captcha);

    let code = wizard.captcha_code().unwrap().to_lowercase();
    wizard.verify_captcha(&code).unwrap();
    assert_eq!(wizard.step(), WizardStep::Select);
}

#[tokio::test]
async fn captcha_locks_after_three_failures() {
    let mut wizard = wizard(MockBackend::default()).with_captcha(CaptchaGate::new());

    wizard.verify_captcha("000000").unwrap_err();
    wizard.verify_captcha("000000").unwrap_err();
    let err = wizard.verify_captcha("000000").unwrap_err();
    assert!(matches!(err, WizardError::CaptchaLocked { .. }));

    let code = wizard.captcha_code().unwrap().to_string();
    assert!(matches!(
        wizard.verify_captcha(&code),
        Err(WizardError::CaptchaLocked { .. })
    ));
    assert_eq!(wizard.step(), WizardStep::Captcha);
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let mut wizard = wizard(MockBackend::default());
    assert!(matches!(
        wizard.select_files(Vec::new()),
        Err(WizardError::EmptySelection)
    ));
    assert!(matches!(
        wizard.start_scan(&mut ignore).await,
        Err(WizardError::EmptySelection)
    ));
    assert_eq!(wizard.step(), WizardStep::Select);
}

#[tokio::test]
async fn upload_failure_returns_to_select() {
    let mut wizard = wizard(MockBackend {
        fail_upload: true,
        ..Default::default()
    });
    wizard.select_files(three_files()).unwrap();

    let err = wizard.start_scan(&mut ignore).await.unwrap_err();
    assert!(matches!(err, WizardError::Remote { operation: "upload", .. }));
    assert_eq!(wizard.step(), WizardStep::Select);
    assert_eq!(wizard.files().len(), 3);
    assert!(wizard.session_id().is_none());
}

#[tokio::test]
async fn scan_failure_returns_to_select() {
    let mut wizard = wizard(MockBackend {
        fail_scan: true,
        ..Default::default()
    });
    wizard.select_files(three_files()).unwrap();

    let err = wizard.start_scan(&mut ignore).await.unwrap_err();
    assert!(matches!(err, WizardError::Remote { operation: "scan", .. }));
    assert_eq!(wizard.step(), WizardStep::Select);
    assert!(!wizard.is_busy());
    assert!(wizard.scan_result().is_none());
}

#[tokio::test]
async fn wipe_failure_returns_to_review() {
    let mut wizard = wizard(MockBackend {
        fail_wipe: true,
        ..Default::default()
    });
    wizard.select_files(three_files()).unwrap();
    wizard.start_scan(&mut ignore).await.unwrap();

    let err = wizard.start_wipe(None, true, &mut ignore).await.unwrap_err();
    assert!(matches!(err, WizardError::Remote { operation: "wipe", .. }));
    assert_eq!(wizard.step(), WizardStep::Review);
    assert!(wizard.scan_result().is_some());
    assert!(wizard.report().is_none());
}

#[tokio::test]
async fn wipe_requires_confirmation() {
    let mut wizard = wizard(MockBackend::default());
    wizard.select_files(three_files()).unwrap();
    wizard.start_scan(&mut ignore).await.unwrap();

    let err = wizard.start_wipe(None, false, &mut ignore).await.unwrap_err();
    assert!(matches!(err, WizardError::ConfirmationRequired));
    assert_eq!(wizard.step(), WizardStep::Review);
    assert!(wizard.backend().wipe_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn confirmation_can_be_disabled() {
    let settings = WipeSettings {
        confirm_before_wipe: false,
        ..WipeSettings::default()
    };
    let mut wizard = WipeWizard::new(MockBackend::default(), settings);
    wizard.select_files(three_files()).unwrap();
    wizard.start_scan(&mut ignore).await.unwrap();

    wizard.start_wipe(None, false, &mut ignore).await.unwrap();
    assert_eq!(wizard.step(), WizardStep::Complete);
}

#[tokio::test]
async fn back_returns_to_select_and_drops_scan() {
    let mut wizard = wizard(MockBackend::default());
    wizard.select_files(three_files()).unwrap();
    wizard.start_scan(&mut ignore).await.unwrap();

    wizard.back().unwrap();
    assert_eq!(wizard.step(), WizardStep::Select);
    assert!(wizard.scan_result().is_none());
    assert_eq!(wizard.files().len(), 3);
}

#[tokio::test]
async fn out_of_order_transitions_are_rejected() {
    let mut wizard = wizard(MockBackend::default());

    assert!(matches!(
        wizard.back(),
        Err(WizardError::InvalidTransition {
            from: WizardStep::Select,
            action: "go back"
        })
    ));
    assert!(matches!(
        wizard.reset(),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        wizard.start_wipe(None, true, &mut ignore).await,
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        wizard.verify_captcha("ABCDEF"),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert_eq!(wizard.step(), WizardStep::Select);
}

#[tokio::test]
async fn reports_progress_while_scanning() {
    let mut wizard = wizard(MockBackend {
        scan_delay: Some(Duration::from_millis(60)),
        ..Default::default()
    })
    .with_poll_interval(Duration::from_millis(5));
    wizard.select_files(three_files()).unwrap();

    let mut updates: Vec<ProgressUpdate> = Vec::new();
    wizard
        .start_scan(&mut |update: ProgressUpdate| updates.push(update))
        .await
        .unwrap();

    assert_eq!(
        updates.first(),
        Some(&ProgressUpdate::new(ProgressOperation::Upload, 0, 3, None))
    );
    // Polled snapshot is forwarded once even though the server repeats it.
    let polled: Vec<&ProgressUpdate> = updates
        .iter()
        .filter(|u| u.phase == ProgressOperation::Scan && u.completed == 1)
        .collect();
    assert_eq!(polled.len(), 1);
    assert_eq!(polled[0].current_file.as_deref(), Some("password_list.txt"));

    let last = updates.last().unwrap();
    assert_eq!(last.phase, ProgressOperation::Scan);
    assert_eq!((last.completed, last.total), (3, 3));
    assert_eq!(last.percent(), 100);
}
