//! Helpers for keeping player-supplied text on one log line.

use std::fmt::Write;

const MAX_PREVIEW: usize = 200;

/// Escape `s` for single-line logging, capped at a short preview.
///
/// Newlines, carriage returns and tabs become their backslash forms, other
/// control characters become `\xNN`. MUD colour codes pass through untouched.
pub fn escape_log(s: &str) -> String {
    escape_log_capped(s, MAX_PREVIEW)
}

/// Same as [`escape_log`] with an explicit character cap.
pub fn escape_log_capped(s: &str, cap: usize) -> String {
    let mut out = String::with_capacity(s.len().min(cap) + 4);
    let mut chars = s.chars();
    for ch in chars.by_ref().take(cap) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
