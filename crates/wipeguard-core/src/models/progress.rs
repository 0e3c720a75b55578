use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Server-side operation a progress snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProgressOperation {
    Upload,
    Scan,
    Wipe,
}

impl Display for ProgressOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ProgressOperation::Upload => write!(f, "upload"),
            ProgressOperation::Scan => write!(f, "scan"),
            ProgressOperation::Wipe => write!(f, "wipe"),
        }
    }
}

/// Latest per-file progress of a session's running (or last finished) operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub session_id: String,
    pub operation: ProgressOperation,
    pub completed: usize,
    pub total: usize,
    pub current_file: Option<String>,
    pub percent: u8,
}

impl ProgressSnapshot {
    pub fn new(
        session_id: impl Into<String>,
        operation: ProgressOperation,
        completed: usize,
        total: usize,
        current_file: Option<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            operation,
            completed,
            total,
            current_file,
            percent: percent_of(completed, total),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

/// Integer percentage, 100 for an empty batch.
pub fn percent_of(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed.min(total) * 100) / total) as u8
}
