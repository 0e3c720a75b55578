use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

/// Classifier output for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "risk_level", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `Advanced` if any level is `High`, otherwise `Standard`.
    pub fn recommended_wipe_type<'a, I>(levels: I) -> WipeType
    where
        I: IntoIterator<Item = &'a RiskLevel>,
    {
        if levels.into_iter().any(|level| *level == RiskLevel::High) {
            WipeType::Advanced
        } else {
            WipeType::Standard
        }
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(anyhow::anyhow!("Invalid risk level: {}", s)),
        }
    }
}

/// Wipe method requested by the client.
///
/// Both variants perform one deletion of the stored object; the distinction is a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "wipe_type", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum WipeType {
    Standard,
    Advanced,
}

impl WipeType {
    /// Human-readable method name shown by clients.
    pub fn method_name(&self) -> &'static str {
        match self {
            WipeType::Standard => "Single-pass random data overwrite",
            WipeType::Advanced => "DoD 5220.22-M (7-pass)",
        }
    }
}

impl Display for WipeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            WipeType::Standard => write!(f, "standard"),
            WipeType::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for WipeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(WipeType::Standard),
            "advanced" => Ok(WipeType::Advanced),
            _ => Err(anyhow::anyhow!("Invalid wipe type: {}", s)),
        }
    }
}

/// Per-file wipe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "wipe_status", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum WipeStatus {
    Success,
    Failed,
}

impl Display for WipeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            WipeStatus::Success => write!(f, "success"),
            WipeStatus::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommends_advanced_only_with_high_risk() {
        let levels = [RiskLevel::Low, RiskLevel::Medium];
        assert_eq!(RiskLevel::recommended_wipe_type(&levels), WipeType::Standard);

        let levels = [RiskLevel::Low, RiskLevel::High];
        assert_eq!(RiskLevel::recommended_wipe_type(&levels), WipeType::Advanced);

        let none: Vec<RiskLevel> = Vec::new();
        assert_eq!(RiskLevel::recommended_wipe_type(&none), WipeType::Standard);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&WipeType::Advanced).unwrap(), "\"advanced\"");
        assert_eq!(serde_json::to_string(&WipeStatus::Failed).unwrap(), "\"failed\"");
    }

    #[test]
    fn wipe_type_round_trips_through_display() {
        for wipe_type in [WipeType::Standard, WipeType::Advanced] {
            assert_eq!(wipe_type.to_string().parse::<WipeType>().unwrap(), wipe_type);
        }
        assert!("gutmann".parse::<WipeType>().is_err());
    }
}
