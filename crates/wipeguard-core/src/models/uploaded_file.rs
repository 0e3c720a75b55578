use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::risk::{RiskLevel, WipeStatus, WipeType};

/// Metadata row for one uploaded blob.
///
/// `risk_level` stays `None` until the first scan and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: Uuid,
    pub session_id: String,
    pub file_name: String,
    /// Storage key of the blob
    pub file_path: String,
    pub file_size: i64,
    pub content_type: String,
    pub upload_timestamp: DateTime<Utc>,
    pub risk_level: Option<RiskLevel>,
    pub scan_timestamp: Option<DateTime<Utc>>,
    pub scan_completed: bool,
    pub wipe_completed: bool,
    pub wipe_timestamp: Option<DateTime<Utc>>,
    pub wipe_type: Option<WipeType>,
    pub wipe_status: Option<WipeStatus>,
    pub wipe_error: Option<String>,
}

impl UploadedFile {
    /// Size as the classifier sees it. Negative sizes never reach the size-dependent branch.
    pub fn size_hint(&self) -> Option<u64> {
        u64::try_from(self.file_size).ok()
    }

    /// Whether a wipe call should (re)process this file.
    pub fn is_wipe_pending(&self) -> bool {
        self.scan_completed && self.wipe_status != Some(WipeStatus::Success)
    }
}

/// Values needed to insert a fresh upload record.
#[derive(Debug, Clone)]
pub struct NewUploadedFile {
    pub session_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub content_type: String,
}

/// Wipe outcome written back to the metadata row.
#[derive(Debug, Clone)]
pub struct WipeOutcome {
    pub wipe_type: WipeType,
    pub status: WipeStatus,
    pub error: Option<String>,
}

impl WipeOutcome {
    pub fn success(wipe_type: WipeType) -> Self {
        Self {
            wipe_type,
            status: WipeStatus::Success,
            error: None,
        }
    }

    pub fn failed(wipe_type: WipeType, error: impl Into<String>) -> Self {
        Self {
            wipe_type,
            status: WipeStatus::Failed,
            error: Some(error.into()),
        }
    }
}
