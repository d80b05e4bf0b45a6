//! Literal spelling shared by the C-family backends.

use std::fmt::Write as _;

/// Double-quoted string literal with escapes.
///
/// Quotes, backslashes and control characters are escaped; everything else
/// is copied through. The output is valid in both TypeScript and Go.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Shortest decimal text that reads back as the same `f64`, or `None` for
/// NaN and the infinities.
pub fn finite_float(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{value}"))
}
