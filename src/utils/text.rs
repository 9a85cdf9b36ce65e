use regex::Regex;
use std::sync::LazyLock;

pub const PLACEHOLDER: &str = "Unknown";

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d{4})(?:-|$)").unwrap());

/// Pulls the leading four digit year out of a catalog date such as
/// `2004-05-01`, `2004-05` or `2004`.
pub fn extract_year(date: &str) -> Option<String> {
    YEAR_RE
        .captures(date)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn join_names(names: &[String]) -> Option<String> {
    let names: Vec<&str> = names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Non-empty trimmed text or the placeholder.
pub fn or_placeholder(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}
