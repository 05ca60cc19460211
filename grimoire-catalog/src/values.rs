//! Lenient coercion of CSV cell text into column values.

/// Parse the leading base-10 integer of `s`, ignoring leading whitespace and
/// anything after the digits (`"12 mètres"` → 12). `None` when there are no
/// digits or the value does not fit.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Optional integer column: empty or non-numeric text is `None`.
pub fn optional_int(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    parse_leading_int(s)
}

/// Integer column with a default for empty, non-numeric, or zero text.
pub fn int_or(s: &str, default: i64) -> i64 {
    parse_leading_int(s)
        .filter(|n| *n != 0)
        .unwrap_or(default)
}

/// Optional text column, kept verbatim: empty text is `None`.
pub fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Optional text column, trimmed first: blank text is `None`.
pub fn trimmed(s: &str) -> Option<String> {
    non_empty(s.trim())
}
