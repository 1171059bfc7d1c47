//! Decides when string scalars may be written plain.
//!
//! The checks here are syntactic only. Whether a plain word would resolve
//! to something else than a string (`123`, `yes`, `2001-01-01`) is asked of the
//! resolver by the representer.

/// Characters that cannot start a plain scalar.
const LEADING_INDICATORS: &[u8] = b"-?:[]{}#&*!|>'\"%@`,";

/// Characters that end a plain scalar inside flow collections.
const FLOW_INDICATORS: &[char] = &[',', '[', ']', '{', '}'];

fn starts_badly(s: &str) -> bool {
    // Document end marker.
    if s.starts_with("...") {
        return true;
    }
    match s.as_bytes().first() {
        None => true,
        Some(b) => b.is_ascii_whitespace() || LEADING_INDICATORS.contains(b),
    }
}

/// Leading or trailing blanks are dropped from plain scalars by the reader.
fn has_outer_whitespace(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

/// Returns true if `s` can be written as a plain scalar in value position,
/// both in block and flow context.
#[inline]
pub(crate) fn is_plain_value_safe(s: &str) -> bool {
    if starts_badly(s) || has_outer_whitespace(s) {
        return false;
    }
    // `: ` starts a mapping value, ` #` a comment.
    if s.contains(": ") || s.ends_with(':') || s.contains(" #") {
        return false;
    }
    !s.chars().any(|c| c.is_control() || FLOW_INDICATORS.contains(&c) || c == '#')
}

/// Returns true if `s` can be written as a plain mapping key. Stricter than
/// [`is_plain_value_safe`]: `:` is never allowed.
#[inline]
pub(crate) fn is_plain_key_safe(s: &str) -> bool {
    is_plain_value_safe(s) && !s.contains(':')
}
