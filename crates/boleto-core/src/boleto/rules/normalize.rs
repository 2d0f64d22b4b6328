//! Digit normalization for matched substrings.

/// Strip every character that is not an ASCII digit.
///
/// Returns `None` for absent or empty input so callers can chain it directly
/// onto an optional regex match.
pub fn normalize_digits(s: Option<&str>) -> Option<String> {
    let s = s.filter(|s| !s.is_empty())?;
    Some(s.chars().filter(|c| c.is_ascii_digit()).collect())
}
