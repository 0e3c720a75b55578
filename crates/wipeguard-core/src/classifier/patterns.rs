use regex::Regex;
use std::sync::LazyLock;

/// Identifier-shaped substrings in a lower-cased file name. Digit classes are ASCII only.
static SENSITIVE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("ssn", r"[0-9]{3}-[0-9]{2}-[0-9]{4}"),
        (
            "card_number",
            r"[0-9]{4}[-\s]?[0-9]{4}[-\s]?[0-9]{4}[-\s]?[0-9]{4}",
        ),
        ("md5_or_api_key", r"[a-z0-9]{32}"),
        ("sha1", r"[a-z0-9]{40}"),
        ("sha256", r"[a-z0-9]{64}"),
    ]
    .into_iter()
    .filter_map(|(label, pattern)| Regex::new(pattern).ok().map(|re| (label, re)))
    .collect()
});

/// Label of the first pattern found in `name`, if any.
pub(crate) fn find_pattern(name: &str) -> Option<&'static str> {
    SENSITIVE_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(label, _)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(SENSITIVE_PATTERNS.len(), 5);
    }

    #[test]
    fn detects_identifier_shapes() {
        assert_eq!(find_pattern("record-123-45-6789.txt"), Some("ssn"));
        assert_eq!(find_pattern("card 4111 1111 1111 1111.png"), Some("card_number"));
        assert_eq!(find_pattern("4111111111111111"), Some("card_number"));
        assert_eq!(
            find_pattern("d41d8cd98f00b204e9800998ecf8427e.bin"),
            Some("md5_or_api_key")
        );
        assert_eq!(find_pattern("holiday.jpg"), None);
        assert_eq!(find_pattern("12-34-5678"), None);
    }

    #[test]
    fn non_ascii_digits_are_not_identifiers() {
        assert_eq!(find_pattern("scan ١٢٣-٤٥-٦٧٨٩.jpg"), None);
        assert_eq!(find_pattern("card ١١١١ ٢٢٢٢ ٣٣٣٣ ٤٤٤٤.png"), None);
        assert_eq!(find_pattern("scan ১২৩-৪৫-৬৭৮৯.jpg"), None);
    }
}
