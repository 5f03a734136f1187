use std::sync::LazyLock;

use regex::Regex;

/// ISO date prefix: YYYY-MM-DD, optionally followed by a time component.
static RE_ISO_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

/// Normalize a free-text lab name into the canonical lookup key:
/// lowercase, each whitespace run becomes `_`, everything outside
/// `[a-z0-9_]` is stripped.
pub fn normalize_lab_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            out.push(c);
        }
    }

    out
}

/// Whether a date string starts with YYYY-MM-DD (bare date or full ISO 8601).
pub fn is_iso_date_prefix(value: &str) -> bool {
    RE_ISO_DATE_PREFIX.is_match(value)
}

/// The date portion of an ISO timestamp (text before `T`).
pub fn date_portion(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}
