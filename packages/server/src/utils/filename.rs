/// Name used when nothing usable is left of a client filename.
pub const FALLBACK_FILENAME: &str = "upload";

/// Reduce a client-supplied filename to a safe flat name.
///
/// Directory components are dropped, characters outside `[A-Za-z0-9._-]`
/// become `_`, and leading dots are stripped so the result is never hidden.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Lower-cased text after the last `.`, if there is one.
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Whether the filename's extension is in `allowed` (compared case-insensitively).
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    file_extension(filename)
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)))
}
