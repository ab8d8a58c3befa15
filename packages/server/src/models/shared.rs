/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Trim a free-text field, mapping blank input to `None`.
pub fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// HTML checkboxes are only submitted when ticked.
pub fn checkbox(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
