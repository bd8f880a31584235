//! Place-name normalization, applied to table keys and queries alike.

/// Trims surrounding whitespace and lowercases.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
