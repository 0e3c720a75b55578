//! User-facing wipe settings.
//!
//! Settings live only for the lifetime of a client process; they are passed explicitly to the
//! wizard rather than read from any global.

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;

pub const DEFAULT_SENSITIVE_KEYWORDS: &[&str] = &[
    "password",
    "bank",
    "aadhar",
    "ssn",
    "credit",
    "passport",
    "social",
    "confidential",
    "secret",
    "private",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WipeSettings {
    pub sensitive_keywords: Vec<String>,
    pub enable_auto_scan: bool,
    pub show_detailed_logs: bool,
    pub confirm_before_wipe: bool,
}

impl Default for WipeSettings {
    fn default() -> Self {
        Self {
            sensitive_keywords: DEFAULT_SENSITIVE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            enable_auto_scan: true,
            show_detailed_logs: false,
            confirm_before_wipe: true,
        }
    }
}

impl WipeSettings {
    /// Adds a keyword after trimming and lower-casing it. Returns false for blanks and duplicates.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let normalized = keyword.trim().to_lowercase();
        if normalized.is_empty() || self.sensitive_keywords.contains(&normalized) {
            return false;
        }
        self.sensitive_keywords.push(normalized);
        true
    }

    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.sensitive_keywords.len();
        self.sensitive_keywords.retain(|k| k != keyword);
        self.sensitive_keywords.len() != before
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig::with_custom_keywords(&self.sensitive_keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = WipeSettings::default();
        assert_eq!(settings.sensitive_keywords.len(), 10);
        assert!(settings.enable_auto_scan);
        assert!(!settings.show_detailed_logs);
        assert!(settings.confirm_before_wipe);
    }

    #[test]
    fn add_and_remove_keywords() {
        let mut settings = WipeSettings::default();
        assert!(settings.add_keyword("  Payslip "));
        assert!(!settings.add_keyword("payslip"));
        assert!(!settings.add_keyword("   "));
        assert!(settings.sensitive_keywords.contains(&"payslip".to_string()));

        assert!(settings.remove_keyword("payslip"));
        assert!(!settings.remove_keyword("payslip"));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut settings = WipeSettings::default();
        settings.sensitive_keywords.clear();
        settings.confirm_before_wipe = false;
        settings.reset_to_defaults();
        assert_eq!(settings, WipeSettings::default());
    }

    #[test]
    fn classifier_config_carries_keywords() {
        let mut settings = WipeSettings::default();
        settings.add_keyword("payslip");
        let config = settings.classifier_config();
        assert!(config.custom_keywords().contains(&"payslip".to_string()));
        assert!(config.custom_keywords().contains(&"aadhar".to_string()));
    }
}
