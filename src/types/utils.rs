//! Shared helpers for identifier handling and cell text parsing.

use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Component, Path};
use std::sync::LazyLock;

static IDENTIFIER_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    // Literal pattern, cannot fail to compile
    Regex::new(r"[A-Za-z0-9._]+").unwrap_or_else(|e| panic!("invalid fragment pattern: {e}"))
});

/// Turn arbitrary text into an identifier.
///
/// Everything except ASCII letters, digits, `.` and `_` is removed and the
/// surviving fragments are joined back with `_`. Applying it twice yields the
/// same string.
pub fn normalize_identifier(s: &str) -> String {
    IDENTIFIER_FRAGMENT
        .find_iter(s)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join("_")
}

/// Split a comma-separated cell into a set of trimmed, non-empty entries.
pub fn split_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Trimmed, non-empty view of an optional cell value.
#[inline]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// True when `name` is exactly one normal path component (no separators,
/// no `.`/`..`, not absolute).
pub fn is_single_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}
