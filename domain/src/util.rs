//! Shared text helpers.

/// Return the first `max_chars` Unicode scalar values of `s`.
///
/// Never splits a character; returns `s` unchanged when it is short enough.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Single-line preview of `s` for log fields, with a trailing `...` when cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    let cut = take_chars(first_line, max_chars);
    if cut.len() < s.len() {
        format!("{}...", cut)
    } else {
        cut.to_string()
    }
}
