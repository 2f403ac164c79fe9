//! Tag input normalization at the presentation boundary.

/// Splits comma-separated tag input, trimming entries and dropping blanks.
///
/// Order and duplicates are kept as typed.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
