//! Header normalization: `" Media Type "` -> `"media_type"`.

/// Normalize one column name.
/// Deterministic and idempotent: trim, lowercase, interior spaces to underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

pub fn normalize_headers<I, S>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    headers
        .into_iter()
        .map(|h| normalize_column_name(h.as_ref()))
        .collect()
}
