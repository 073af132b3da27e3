//! Quoting predicate and string escaping shared by the encoder and decoder.

use crate::error::{Error, Result};
use crate::options::Delimiter;

/// True when `s` must be wrapped in quotes to round-trip as a string rather than being
/// misread as `null`/`true`/`false`, a number, or a structural token.
pub fn needs_quoting(s: &str, delim: Delimiter) -> bool {
    if s.is_empty() {
        return true;
    }
    let bytes = s.as_bytes();
    if bytes.first().is_some_and(u8::is_ascii_whitespace) || bytes.last().is_some_and(u8::is_ascii_whitespace) {
        return true;
    }
    if s == "true" || s == "false" || s == "null" {
        return true;
    }
    if s.starts_with('-') {
        return true;
    }
    if is_numeric_like(s) {
        return true;
    }
    let delim_byte = delim.as_byte();
    s.bytes().any(|b| {
        b == b':'
            || b == b'"'
            || b == b'\\'
            || b == b'['
            || b == b']'
            || b == b'{'
            || b == b'}'
            || b == b'\n'
            || b == b'\r'
            || b == b'\t'
            || b == delim_byte
    })
}

/// Grammar: optional `-`, then either a leading-zero-followed-by-digit (so `"05"` stays a
/// string), or a JSON-style number token (digits, optional `.digits`, optional exponent).
pub fn is_numeric_like(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes[0] == b'0' && bytes.len() > 1 && bytes[1].is_ascii_digit() {
        return true;
    }
    let mut i = 0;
    let mut saw_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        saw_digit = true;
    }
    if !saw_digit {
        return false;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let mut saw_frac_digit = false;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            saw_frac_digit = true;
        }
        if !saw_frac_digit {
            return false;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let mut saw_exp_digit = false;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            saw_exp_digit = true;
        }
        if !saw_exp_digit {
            return false;
        }
    }
    i == bytes.len()
}

/// A bare (unquoted) object key: leading ASCII letter or `_`, then alphanumerics, `_`, `.`.
pub fn is_valid_bare_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Doubles `\` and `"`, and maps the three whitespace control codes to their escapes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`]. `quoted` must already have its surrounding quotes stripped.
pub fn unescape(quoted: &str) -> Result<String> {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => return Err(Error::InvalidEscape(format!("\\{other}"))),
            None => return Err(Error::InvalidEscape("\\".to_string())),
        }
    }
    Ok(out)
}

/// Quotes `s` (escaping its contents) iff [`needs_quoting`] says so.
pub fn quote_value(s: &str, delim: Delimiter) -> String {
    if needs_quoting(s, delim) {
        format!("\"{}\"", escape(s))
    } else {
        s.to_string()
    }
}

/// Quotes an object key iff it is not a valid bare key.
pub fn quote_key(s: &str) -> String {
    if is_valid_bare_key(s) {
        s.to_string()
    } else {
        format!("\"{}\"", escape(s))
    }
}
