//! Cleanup of raw model output

const QUOTES: [char; 2] = ['"', '\''];

/// Trim the completion and drop one pair of wrapping quotes.
///
/// Only a single layer is removed, and only when both ends carry the same
/// quote character.
pub fn normalize_completion(raw: &str) -> String {
    let trimmed = raw.trim();

    for quote in QUOTES {
        if trimmed.chars().count() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[quote.len_utf8()..trimmed.len() - quote.len_utf8()].to_string();
        }
    }

    trimmed.to_string()
}
