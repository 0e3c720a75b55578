//! Request and response bodies of the upload, scan and wipe operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::risk::{RiskLevel, WipeStatus, WipeType};
use super::uploaded_file::UploadedFile;
use crate::error::AppError;

pub const MAX_SESSION_ID_LENGTH: usize = 128;

/// Session identifiers become storage key prefixes, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_session_id(session_id: &str) -> Result<(), AppError> {
    if session_id.is_empty() {
        return Err(AppError::InvalidInput("sessionId is required".to_string()));
    }
    if session_id.len() > MAX_SESSION_ID_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "sessionId must be at most {} characters",
            MAX_SESSION_ID_LENGTH
        )));
    }
    if !session_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::InvalidInput(
            "sessionId may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }
    Ok(())
}

/// Kind tag carried by every file entry. Folders are never produced by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadedFileEntry {
    pub id: Uuid,
    pub name: String,
    pub size: i64,
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
}

impl From<&UploadedFile> for UploadedFileEntry {
    fn from(file: &UploadedFile) -> Self {
        Self {
            id: file.id,
            name: file.file_name.clone(),
            size: file.file_size,
            path: file.file_path.clone(),
            kind: EntryKind::File,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub files: Vec<UploadedFileEntry>,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[validate(length(min = 1, max = 128))]
    pub session_id: String,
    /// Extra sensitive keywords for this scan, merged with the server defaults
    #[serde(default)]
    #[validate(length(max = 100))]
    pub custom_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScannedFile {
    pub id: Uuid,
    pub name: String,
    pub size: i64,
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    pub fn from_levels<'a, I>(levels: I) -> Self
    where
        I: IntoIterator<Item = &'a RiskLevel>,
    {
        levels
            .into_iter()
            .fold(RiskSummary::default(), |mut summary, level| {
                summary.total += 1;
                match level {
                    RiskLevel::High => summary.high += 1,
                    RiskLevel::Medium => summary.medium += 1,
                    RiskLevel::Low => summary.low += 1,
                }
                summary
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub success: bool,
    pub files: Vec<ScannedFile>,
    pub recommended_wipe_type: WipeType,
    pub summary: RiskSummary,
}

impl ScanResponse {
    pub fn from_files(files: Vec<ScannedFile>) -> Self {
        let levels: Vec<RiskLevel> = files.iter().map(|f| f.risk_level).collect();
        Self {
            success: true,
            recommended_wipe_type: RiskLevel::recommended_wipe_type(&levels),
            summary: RiskSummary::from_levels(&levels),
            files,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WipeRequest {
    #[validate(length(min = 1, max = 128))]
    pub session_id: String,
    pub wipe_type: WipeType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WipeResult {
    pub id: Uuid,
    pub name: String,
    pub status: WipeStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WipeSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub wipe_type: WipeType,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WipeResponse {
    pub success: bool,
    pub results: Vec<WipeResult>,
    pub summary: WipeSummary,
}

impl WipeResponse {
    pub fn from_results(results: Vec<WipeResult>, wipe_type: WipeType) -> Self {
        let successful = results
            .iter()
            .filter(|r| r.status == WipeStatus::Success)
            .count();
        Self {
            success: true,
            summary: WipeSummary {
                total: results.len(),
                successful,
                failed: results.len() - successful,
                wipe_type,
            },
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub success: bool,
    pub session_id: String,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurgeResponse {
    pub success: bool,
    pub session_id: String,
    pub purged: u64,
}
