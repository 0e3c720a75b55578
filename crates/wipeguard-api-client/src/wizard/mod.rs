//! Session wizard: `captcha? → select → scan → review → wipe → complete`.
//!
//! Every transition takes `&mut self`, so a wizard runs at most one remote call at a time.
//! A failed call returns the wizard to its last interactive step; nothing is retried.

mod backend;
mod captcha;

pub use backend::LifecycleBackend;
pub use captcha::{
    CaptchaGate, CaptchaOutcome, CAPTCHA_ALPHABET, CAPTCHA_LENGTH, CAPTCHA_LOCKOUT,
    MAX_CAPTCHA_ATTEMPTS,
};

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;
use wipeguard_core::models::{
    percent_of, ProgressOperation, ProgressSnapshot, ScanResponse, WipeResponse, WipeResult,
    WipeStatus, WipeType,
};
use wipeguard_core::WipeSettings;

use crate::UploadFile;

/// How often the server is polled for progress while a scan or wipe is in flight.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Captcha,
    Select,
    Scan,
    Review,
    Wipe,
    Complete,
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            WizardStep::Captcha => write!(f, "captcha"),
            WizardStep::Select => write!(f, "select"),
            WizardStep::Scan => write!(f, "scan"),
            WizardStep::Review => write!(f, "review"),
            WizardStep::Wipe => write!(f, "wipe"),
            WizardStep::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("cannot {action} during the {from} step")]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },

    #[error("no files selected")]
    EmptySelection,

    #[error("the wipe has to be confirmed first")]
    ConfirmationRequired,

    #[error("captcha does not match, {remaining_attempts} attempt(s) left")]
    CaptchaMismatch { remaining_attempts: u32 },

    #[error("too many captcha attempts, retry in {}s", .retry_after.as_secs().max(1))]
    CaptchaLocked { retry_after: Duration },

    #[error("{operation} failed: {source}")]
    Remote {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// Progress of the phase currently running, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub phase: ProgressOperation,
    pub completed: usize,
    pub total: usize,
    pub current_file: Option<String>,
}

impl ProgressUpdate {
    pub fn new(
        phase: ProgressOperation,
        completed: usize,
        total: usize,
        current_file: Option<String>,
    ) -> Self {
        Self {
            phase,
            completed,
            total,
            current_file,
        }
    }

    pub fn percent(&self) -> u8 {
        percent_of(self.completed, self.total)
    }
}

impl From<&ProgressSnapshot> for ProgressUpdate {
    fn from(snapshot: &ProgressSnapshot) -> Self {
        Self::new(
            snapshot.operation,
            snapshot.completed,
            snapshot.total,
            snapshot.current_file.clone(),
        )
    }
}

/// Summary shown on the completion step.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub session_id: String,
    pub wipe_type: WipeType,
    pub files_wiped: usize,
    pub files_failed: usize,
    /// Bytes of the successfully wiped files
    pub total_bytes: u64,
    pub high_risk: usize,
    pub results: Vec<WipeResult>,
}

impl CompletionReport {
    fn new(session_id: String, scan: &ScanResponse, wipe: WipeResponse) -> Self {
        let wiped: HashSet<Uuid> = wipe
            .results
            .iter()
            .filter(|r| r.status == WipeStatus::Success)
            .map(|r| r.id)
            .collect();
        let total_bytes = scan
            .files
            .iter()
            .filter(|f| wiped.contains(&f.id))
            .map(|f| u64::try_from(f.size).unwrap_or(0))
            .sum();

        Self {
            session_id,
            wipe_type: wipe.summary.wipe_type,
            files_wiped: wipe.summary.successful,
            files_failed: wipe.summary.failed,
            total_bytes,
            high_risk: scan.summary.high,
            results: wipe.results,
        }
    }

    pub fn total_megabytes(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0)
    }
}

pub struct WipeWizard<B> {
    backend: B,
    settings: WipeSettings,
    step: WizardStep,
    captcha: Option<CaptchaGate>,
    poll_interval: Duration,
    files: Vec<UploadFile>,
    session_id: Option<String>,
    scan: Option<ScanResponse>,
    report: Option<CompletionReport>,
}

impl<B: LifecycleBackend> WipeWizard<B> {
    pub fn new(backend: B, settings: WipeSettings) -> Self {
        Self {
            backend,
            settings,
            step: WizardStep::Select,
            captcha: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            files: Vec::new(),
            session_id: None,
            scan: None,
            report: None,
        }
    }

    /// Require the captcha before file selection.
    pub fn with_captcha(mut self, gate: CaptchaGate) -> Self {
        self.captcha = Some(gate);
        self.step = WizardStep::Captcha;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &WipeSettings {
        &self.settings
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// True while a remote call is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.step, WizardStep::Scan | WizardStep::Wipe)
    }

    pub fn captcha_code(&self) -> Option<&str> {
        self.captcha.as_ref().map(|g| g.code())
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn scan_result(&self) -> Option<&ScanResponse> {
        self.scan.as_ref()
    }

    pub fn report(&self) -> Option<&CompletionReport> {
        self.report.as_ref()
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                from: self.step,
                action,
            })
        }
    }

    pub fn verify_captcha(&mut self, input: &str) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Captcha, "verify captcha")?;
        let gate = self
            .captcha
            .as_mut()
            .ok_or(WizardError::InvalidTransition {
                from: WizardStep::Captcha,
                action: "verify captcha",
            })?;

        match gate.verify(input) {
            CaptchaOutcome::Passed => {
                self.step = WizardStep::Select;
                Ok(())
            }
            CaptchaOutcome::Mismatch { remaining_attempts } => {
                Err(WizardError::CaptchaMismatch { remaining_attempts })
            }
            CaptchaOutcome::Locked { retry_after } => {
                Err(WizardError::CaptchaLocked { retry_after })
            }
        }
    }

    pub fn select_files(&mut self, files: Vec<UploadFile>) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Select, "select files")?;
        if files.is_empty() {
            return Err(WizardError::EmptySelection);
        }
        self.files = files;
        Ok(())
    }

    /// Upload the selection under a fresh session and classify it.
    pub async fn start_scan(
        &mut self,
        observer: &mut dyn FnMut(ProgressUpdate),
    ) -> Result<&ScanResponse, WizardError> {
        self.expect_step(WizardStep::Select, "start scan")?;
        if self.files.is_empty() {
            return Err(WizardError::EmptySelection);
        }

        let session_id = crate::new_session_id();
        let total = self.files.len();
        self.step = WizardStep::Scan;

        observer(ProgressUpdate::new(ProgressOperation::Upload, 0, total, None));
        if let Err(source) = self.backend.upload(&session_id, &self.files).await {
            tracing::warn!(error = %source, session_id = %session_id, "Upload failed");
            self.step = WizardStep::Select;
            return Err(WizardError::Remote {
                operation: "upload",
                source,
            });
        }
        observer(ProgressUpdate::new(
            ProgressOperation::Upload,
            total,
            total,
            self.files.last().map(|f| f.name.clone()),
        ));

        let scanned = track(
            &self.backend,
            &session_id,
            ProgressOperation::Scan,
            self.poll_interval,
            self.backend
                .scan(&session_id, &self.settings.sensitive_keywords),
            observer,
        )
        .await;

        let scan = match scanned {
            Ok(scan) => scan,
            Err(source) => {
                tracing::warn!(error = %source, session_id = %session_id, "Scan failed");
                self.step = WizardStep::Select;
                return Err(WizardError::Remote {
                    operation: "scan",
                    source,
                });
            }
        };

        let scanned_total = scan.files.len();
        observer(ProgressUpdate::new(
            ProgressOperation::Scan,
            scanned_total,
            scanned_total,
            scan.files.last().map(|f| f.name.clone()),
        ));

        self.session_id = Some(session_id);
        self.step = WizardStep::Review;
        Ok(self.scan.insert(scan))
    }

    /// Leave the review step to change the selection.
    pub fn back(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Review, "go back")?;
        self.scan = None;
        self.session_id = None;
        self.step = WizardStep::Select;
        Ok(())
    }

    /// Wipe the reviewed session. `wipe_type` defaults to the scan's recommendation.
    pub async fn start_wipe(
        &mut self,
        wipe_type: Option<WipeType>,
        confirmed: bool,
        observer: &mut dyn FnMut(ProgressUpdate),
    ) -> Result<&CompletionReport, WizardError> {
        self.expect_step(WizardStep::Review, "start wipe")?;
        if self.settings.confirm_before_wipe && !confirmed {
            return Err(WizardError::ConfirmationRequired);
        }

        let (Some(session_id), Some(scan)) = (self.session_id.clone(), self.scan.as_ref()) else {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "start wipe",
            });
        };
        let wipe_type = wipe_type.unwrap_or(scan.recommended_wipe_type);
        self.step = WizardStep::Wipe;

        let wiped = track(
            &self.backend,
            &session_id,
            ProgressOperation::Wipe,
            self.poll_interval,
            self.backend.wipe(&session_id, wipe_type),
            observer,
        )
        .await;

        let response = match wiped {
            Ok(response) => response,
            Err(source) => {
                tracing::warn!(error = %source, session_id = %session_id, "Wipe failed");
                self.step = WizardStep::Review;
                return Err(WizardError::Remote {
                    operation: "wipe",
                    source,
                });
            }
        };

        let total = response.summary.total;
        observer(ProgressUpdate::new(
            ProgressOperation::Wipe,
            total,
            total,
            response.results.last().map(|r| r.name.clone()),
        ));

        let report = match self.scan.as_ref() {
            Some(scan) => CompletionReport::new(session_id, scan, response),
            None => {
                self.step = WizardStep::Review;
                return Err(WizardError::InvalidTransition {
                    from: WizardStep::Wipe,
                    action: "complete wipe",
                });
            }
        };
        self.step = WizardStep::Complete;
        Ok(self.report.insert(report))
    }

    /// Start over with an empty selection.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Complete, "reset")?;
        self.files.clear();
        self.session_id = None;
        self.scan = None;
        self.report = None;
        self.step = WizardStep::Select;
        Ok(())
    }
}

/// Drive `operation` to completion, forwarding new server-side snapshots of `phase` while it
/// runs.
async fn track<B, T, Fut>(
    backend: &B,
    session_id: &str,
    phase: ProgressOperation,
    poll_interval: Duration,
    operation: Fut,
    observer: &mut dyn FnMut(ProgressUpdate),
) -> anyhow::Result<T>
where
    B: LifecycleBackend + ?Sized,
    Fut: Future<Output = anyhow::Result<T>>,
{
    tokio::pin!(operation);
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately.
    ticker.tick().await;
    let mut last: Option<ProgressSnapshot> = None;

    loop {
        tokio::select! {
            biased;
            result = &mut operation => return result,
            _ = ticker.tick() => {
                match backend.progress(session_id).await {
                    Ok(Some(snapshot))
                        if snapshot.operation == phase && last.as_ref() != Some(&snapshot) =>
                    {
                        observer(ProgressUpdate::from(&snapshot));
                        last = Some(snapshot);
                    }
                    Ok(_) => {}
                    Err(e) => tracing::debug!(error = %e, session_id, "Progress poll failed"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
