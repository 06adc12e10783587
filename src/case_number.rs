use regex::Regex;
use std::sync::LazyLock;

// Real data examples:
//   CASE NO.: 2023-012345-CA-01
//   Case No: 2022-004321-ca-13
//
// Shape: digits-digits-letters-digits. The court division letters are
// matched case-insensitively and returned as written.
static RE_CASE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+-\d+-[a-z]+-\d+\b").unwrap());

/// First case number anywhere in the text, or an empty string.
pub fn extract_case_id(text: &str) -> String {
    RE_CASE_NUMBER
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
