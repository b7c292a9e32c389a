//! Tag list parsing and text matching shared by every collection filter

use regex::Regex;
use std::sync::OnceLock;

fn separator_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // ASCII comma and full-width comma
    REGEX.get_or_init(|| Regex::new(r"[,，]").unwrap())
}

/// Split a user-entered tag string into trimmed, non-empty tags.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    separator_regex()
        .split(input)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive substring test; `needle` must already be lowercase.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// True if any tag contains `needle` (lowercase) case-insensitively.
pub fn any_tag_contains(tags: &[String], needle: &str) -> bool {
    tags.iter().any(|t| contains_ci(t, needle))
}
