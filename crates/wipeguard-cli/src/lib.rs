//! Formatting and prompt helpers shared by the `wipeguard` binary.

use wipeguard_api_client::{CompletionReport, ProgressUpdate};
use wipeguard_core::models::{ScanResponse, WipeStatus};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One progress line, e.g. `[scan]  66% (2/3) notes.txt`.
pub fn format_progress(update: &ProgressUpdate) -> String {
    let mut line = format!(
        "[{}] {:>3}% ({}/{})",
        update.phase,
        update.percent(),
        update.completed,
        update.total
    );
    if let Some(file) = &update.current_file {
        line.push(' ');
        line.push_str(&truncate_string(file, 48));
    }
    line
}

/// Table of scanned files followed by the risk summary and recommendation.
pub fn format_review(scan: &ScanResponse) -> String {
    let mut out = String::new();
    for file in &scan.files {
        out.push_str(&format!(
            "  {:<6} {:>12}  {}\n",
            file.risk_level,
            format_bytes(u64::try_from(file.size).unwrap_or(0)),
            truncate_string(&file.name, 60)
        ));
    }
    out.push_str(&format!(
        "{} file(s): {} high, {} medium, {} low\n",
        scan.summary.total, scan.summary.high, scan.summary.medium, scan.summary.low
    ));
    out.push_str(&format!(
        "Recommended wipe: {} ({})",
        scan.recommended_wipe_type,
        scan.recommended_wipe_type.method_name()
    ));
    out
}

pub fn format_report(report: &CompletionReport) -> String {
    let mut out = format!(
        "Wipe complete ({}): {} wiped, {} failed, {:.2} MB, {} high-risk file(s)",
        report.wipe_type,
        report.files_wiped,
        report.files_failed,
        report.total_megabytes(),
        report.high_risk
    );
    for result in report
        .results
        .iter()
        .filter(|r| r.status == WipeStatus::Failed)
    {
        out.push_str(&format!("\n  {}: {}", result.name, result.message));
    }
    out
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// `y` or `yes`, case-insensitive.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Initialize tracing for the CLI. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use wipeguard_core::models::{
        EntryKind, ProgressOperation, RiskLevel, ScannedFile, WipeResult, WipeType,
    };

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn scanned(n: u128, name: &str, size: i64, risk_level: RiskLevel) -> ScannedFile {
        ScannedFile {
            id: id(n),
            name: name.to_string(),
            size,
            path: format!("s/{}", name),
            kind: EntryKind::File,
            risk_level,
        }
    }

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
        assert_eq!(truncate_string("pässwörd_liste.txt", 7), "päss...");
    }

    #[test]
    fn progress_line() {
        let update = ProgressUpdate::new(
            ProgressOperation::Scan,
            2,
            3,
            Some("notes.txt".to_string()),
        );
        assert_eq!(format_progress(&update), "[scan]  66% (2/3) notes.txt");

        let empty = ProgressUpdate::new(ProgressOperation::Upload, 0, 0, None);
        assert_eq!(format_progress(&empty), "[upload] 100% (0/0)");
    }

    #[test]
    fn review_lists_files_and_recommendation() {
        let scan = ScanResponse::from_files(vec![
            scanned(1, "password_list.txt", 2048, RiskLevel::High),
            scanned(2, "notes.txt", 10, RiskLevel::Low),
        ]);
        let review = format_review(&scan);
        assert!(review.contains("high"));
        assert!(review.contains("2.0 KB"));
        assert!(review.contains("password_list.txt"));
        assert!(review.contains("2 file(s): 1 high, 0 medium, 1 low"));
        assert!(review.ends_with("Recommended wipe: advanced (DoD 5220.22-M (7-pass))"));
    }

    #[test]
    fn report_lists_failures() {
        let report = CompletionReport {
            session_id: "s".to_string(),
            wipe_type: WipeType::Standard,
            files_wiped: 1,
            files_failed: 1,
            total_bytes: 1024 * 1024,
            high_risk: 0,
            results: vec![
                WipeResult {
                    id: id(1),
                    name: "a.txt".to_string(),
                    status: WipeStatus::Success,
                    message: "Successfully wiped using standard method".to_string(),
                },
                WipeResult {
                    id: id(2),
                    name: "b.txt".to_string(),
                    status: WipeStatus::Failed,
                    message: "Failed to wipe: not found".to_string(),
                },
            ],
        };
        let text = format_report(&report);
        assert!(text.starts_with("Wipe complete (standard): 1 wiped, 1 failed, 1.00 MB"));
        assert!(text.contains("\n  b.txt: Failed to wipe: not found"));
        assert!(!text.contains("a.txt"));
    }

    #[test]
    fn bytes_are_humanized() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES\n"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }
}
