//! File risk classifier
//!
//! Assigns a [`RiskLevel`] from a file name and optional size using keyword, extension and
//! pattern heuristics. Classification is pure and total: every input yields a level.

pub mod keywords;
mod patterns;

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::models::RiskLevel;
use keywords::{
    find_keyword, CRITICAL_KEYWORDS, HIGH_RISK_EXTENSIONS, HIGH_RISK_KEYWORDS,
    LARGE_DOCUMENT_BYTES, MEDIUM_RISK_EXTENSIONS, MEDIUM_RISK_KEYWORDS,
};

/// User-defined keywords applied on top of the built-in tables.
///
/// Custom keywords rank with the high-risk tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    custom_keywords: Vec<String>,
}

impl ClassifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keywords are trimmed, lower-cased and de-duplicated; blank entries are dropped.
    pub fn with_custom_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::default().merged(keywords)
    }

    /// A copy of this config extended with more keywords.
    pub fn merged<I, S>(&self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut custom_keywords = self.custom_keywords.clone();
        for keyword in keywords {
            let normalized = keyword.as_ref().trim().to_lowercase();
            if !normalized.is_empty() && !custom_keywords.contains(&normalized) {
                custom_keywords.push(normalized);
            }
        }
        Self { custom_keywords }
    }

    pub fn custom_keywords(&self) -> &[String] {
        &self.custom_keywords
    }

    fn find_custom(&self, name: &str) -> Option<&str> {
        self.custom_keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| name.contains(keyword))
    }
}

/// Which rule decided the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "matched", rename_all = "camelCase")]
pub enum MatchReason {
    HighRiskExtension(String),
    CriticalKeyword(String),
    HighRiskKeyword(String),
    CustomKeyword(String),
    LargeDocument(String),
    MediumKeyword(String),
    SensitivePattern(String),
    NoMatch,
}

impl Display for MatchReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MatchReason::HighRiskExtension(ext) => write!(f, "high-risk extension .{}", ext),
            MatchReason::CriticalKeyword(k) => write!(f, "critical keyword '{}'", k),
            MatchReason::HighRiskKeyword(k) => write!(f, "high-risk keyword '{}'", k),
            MatchReason::CustomKeyword(k) => write!(f, "custom keyword '{}'", k),
            MatchReason::LargeDocument(k) => write!(f, "large document with keyword '{}'", k),
            MatchReason::MediumKeyword(k) => write!(f, "medium-risk keyword '{}'", k),
            MatchReason::SensitivePattern(p) => write!(f, "sensitive pattern ({})", p),
            MatchReason::NoMatch => write!(f, "no sensitive markers"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub level: RiskLevel,
    pub reason: MatchReason,
}

impl Classification {
    fn new(level: RiskLevel, reason: MatchReason) -> Self {
        Self { level, reason }
    }
}

/// Classify a file by name and size.
pub fn classify(name: &str, size: Option<u64>, config: &ClassifierConfig) -> RiskLevel {
    classify_with_reason(name, size, config).level
}

/// Like [`classify`], also reporting the rule that fired.
pub fn classify_with_reason(
    name: &str,
    size: Option<u64>,
    config: &ClassifierConfig,
) -> Classification {
    let lower = name.to_lowercase();
    let extension = extension_of(&lower);

    if HIGH_RISK_EXTENSIONS.contains(&extension) {
        return Classification::new(
            RiskLevel::High,
            MatchReason::HighRiskExtension(extension.to_string()),
        );
    }

    if MEDIUM_RISK_EXTENSIONS.contains(&extension) {
        if let Some(hit) = high_tier_match(&lower, config) {
            return hit;
        }
        let is_large = size.is_some_and(|bytes| bytes > LARGE_DOCUMENT_BYTES);
        if is_large {
            if let Some(keyword) = find_keyword(&lower, MEDIUM_RISK_KEYWORDS) {
                return Classification::new(
                    RiskLevel::Medium,
                    MatchReason::LargeDocument(keyword.to_string()),
                );
            }
        }
    }

    if let Some(hit) = high_tier_match(&lower, config) {
        return hit;
    }

    if let Some(keyword) = find_keyword(&lower, MEDIUM_RISK_KEYWORDS) {
        return Classification::new(
            RiskLevel::Medium,
            MatchReason::MediumKeyword(keyword.to_string()),
        );
    }

    if let Some(label) = patterns::find_pattern(&lower) {
        return Classification::new(
            RiskLevel::High,
            MatchReason::SensitivePattern(label.to_string()),
        );
    }

    Classification::new(RiskLevel::Low, MatchReason::NoMatch)
}

fn high_tier_match(lower: &str, config: &ClassifierConfig) -> Option<Classification> {
    if let Some(keyword) = find_keyword(lower, CRITICAL_KEYWORDS) {
        return Some(Classification::new(
            RiskLevel::High,
            MatchReason::CriticalKeyword(keyword.to_string()),
        ));
    }
    if let Some(keyword) = find_keyword(lower, HIGH_RISK_KEYWORDS) {
        return Some(Classification::new(
            RiskLevel::High,
            MatchReason::HighRiskKeyword(keyword.to_string()),
        ));
    }
    config.find_custom(lower).map(|keyword| {
        Classification::new(
            RiskLevel::High,
            MatchReason::CustomKeyword(keyword.to_string()),
        )
    })
}

/// Substring after the last '.', or empty when the name has no dot.
fn extension_of(lower: &str) -> &str {
    lower.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}
