//! Shared key generation for storage backends.

use uuid::Uuid;

const MAX_KEY_FILENAME_LENGTH: usize = 255;

/// Storage key for a file uploaded in `session_id`: `{session_id}/{uuid}-{filename}`.
///
/// `filename` is the name as supplied by the client; only its key-safe form ends up in the key.
pub fn generate_session_key(session_id: &str, filename: &str) -> String {
    format!(
        "{}/{}-{}",
        session_id,
        Uuid::new_v4(),
        key_safe_filename(filename)
    )
}

/// Last path component of `filename` reduced to `[A-Za-z0-9._-]`, without `..` runs.
pub fn key_safe_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let mut safe: String = base
        .chars()
        .take(MAX_KEY_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    while safe.contains("..") {
        safe = safe.replace("..", ".");
    }

    if safe.trim_matches(['.', '_']).is_empty() {
        return "file".to_string();
    }
    safe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_session_scoped_and_unique() {
        let first = generate_session_key("session-1", "notes.txt");
        let second = generate_session_key("session-1", "notes.txt");

        assert!(first.starts_with("session-1/"));
        assert!(first.ends_with("-notes.txt"));
        assert_ne!(first, second);
    }

    #[test]
    fn key_filename_drops_unsafe_characters() {
        assert_eq!(key_safe_filename("bank account.xlsx"), "bank_account.xlsx");
        assert_eq!(key_safe_filename("/home/me/tax return.pdf"), "tax_return.pdf");
        assert_eq!(key_safe_filename("C:\\docs\\ssn_list.csv"), "ssn_list.csv");
        assert_eq!(key_safe_filename("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn key_filename_never_contains_parent_segments() {
        assert_eq!(key_safe_filename("report..final.pdf"), "report.final.pdf");
        assert_eq!(key_safe_filename("a....b"), "a.b");
        assert_eq!(key_safe_filename(".."), "file");
        assert_eq!(key_safe_filename(""), "file");

        let key = generate_session_key("s", "../../etc/passwd");
        assert!(!key.contains(".."));
        assert_eq!(key.matches('/').count(), 1);
    }

    #[test]
    fn key_filename_is_bounded() {
        let long = "x".repeat(300);
        assert_eq!(key_safe_filename(&long).len(), MAX_KEY_FILENAME_LENGTH);
    }
}
