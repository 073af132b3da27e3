//! Line splitting, indent-to-depth mapping, and quote-aware scanning primitives.
//!
//! The decoder never scans raw source character by character: [`tokenize`] turns source text
//! into a flat list of [`Line`]s (blank lines dropped, indentation reduced to a depth), and
//! every subsequent parser walks that list with a forward cursor.

use crate::error::{Error, Result};
use crate::options::DecodeOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based line number in the original source, for diagnostics.
    pub number: usize,
    pub depth: usize,
    /// Content with the leading-indent prefix stripped.
    pub content: String,
}

/// True iff every byte is ASCII whitespace.
fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_whitespace())
}

fn leading_spaces(line: &str) -> (usize, usize, bool) {
    let mut spaces = 0;
    let mut tabs = 0;
    for c in line.chars() {
        match c {
            ' ' => spaces += 1,
            '\t' => tabs += 1,
            _ => break,
        }
    }
    (spaces, tabs, tabs > 0)
}

fn compute_depth(line: &str, indent: usize, strict: bool, line_no: usize) -> Result<(usize, usize)> {
    let (spaces, tabs, has_tabs) = leading_spaces(line);
    if strict {
        if has_tabs {
            return Err(Error::invalid_indentation(line_no, indent, spaces));
        }
        if indent == 0 {
            return Ok((0, spaces));
        }
        if spaces % indent != 0 {
            return Err(Error::invalid_indentation(line_no, indent, spaces));
        }
        Ok((spaces / indent, spaces))
    } else {
        let effective = spaces + tabs * indent.max(1);
        let width = indent.max(1);
        Ok((effective / width, effective))
    }
}

/// Splits `source` into content lines, normalizing `\r\n` to `\n`, dropping blank lines, and
/// computing each retained line's depth.
pub fn tokenize(source: &str, options: &DecodeOptions) -> Result<Vec<Line>> {
    let normalized = source.replace("\r\n", "\n");
    let mut out = Vec::new();
    for (idx, raw) in normalized.split('\n').enumerate() {
        let line_no = idx + 1;
        if is_blank(raw) {
            continue;
        }
        let (depth, prefix_len) = compute_depth(raw, options.indent, options.strict, line_no)?;
        let content = raw.chars().skip(prefix_len).collect::<String>();
        out.push(Line {
            number: line_no,
            depth,
            content,
        });
    }
    Ok(out)
}

/// Scans `s` left-to-right, honoring `"`-quoting (with `\`-escapes inside quotes), and returns
/// the byte index of the first unquoted occurrence of `needle`.
pub fn find_unquoted(s: &str, needle: u8) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut in_quotes = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == b'"' {
                in_quotes = false;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_quotes = true;
            i += 1;
            continue;
        }
        if b == needle {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Splits `s` on unquoted occurrences of `delim`, trimming ASCII spaces from each token.
/// Always returns at least one token (the whole trimmed string, if no delimiter is found).
pub fn split_delimited(s: &str, delim: u8) -> Vec<String> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == b'"' {
                in_quotes = false;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_quotes = true;
            i += 1;
            continue;
        }
        if b == delim {
            tokens.push(s[start..i].trim().to_string());
            start = i + 1;
            i += 1;
            continue;
        }
        i += 1;
    }
    tokens.push(s[start..].trim().to_string());
    tokens
}

/// A line is a list item iff it is exactly `-` or begins with `"- "`.
pub fn is_list_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

/// Returns the residue after the marker (empty for the bare `-` case).
pub fn strip_list_marker(content: &str) -> &str {
    if content == "-" {
        ""
    } else {
        &content[2..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_blank_lines_and_tracks_depth() {
        let src = "a:\n  b: 1\n\n  c: 2\n";
        let lines = tokenize(src, &DecodeOptions::default()).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].depth, 0);
        assert_eq!(lines[1].depth, 1);
        assert_eq!(lines[1].content, "b: 1");
        assert_eq!(lines[2].depth, 1);
    }

    #[test]
    fn strict_rejects_uneven_indent() {
        let src = "a:\n   b: 1\n";
        let err = tokenize(src, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidIndentation { .. }));
    }

    #[test]
    fn strict_rejects_tab_indent() {
        let src = "a:\n\tb: 1\n";
        let err = tokenize(src, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidIndentation { .. }));
    }

    #[test]
    fn find_unquoted_skips_quoted_delimiters() {
        assert_eq!(find_unquoted("\"a:b\":c", b':'), Some(5));
        assert_eq!(find_unquoted("\"a:b\"", b':'), None);
    }

    #[test]
    fn split_delimited_respects_quotes() {
        let tokens = split_delimited("\"a,b\",c,d", b',');
        assert_eq!(tokens, vec!["\"a,b\"", "c", "d"]);
    }

    #[test]
    fn split_delimited_single_token_when_no_delimiter() {
        assert_eq!(split_delimited("plain", b','), vec!["plain"]);
    }

    #[test]
    fn list_marker_detection() {
        assert!(is_list_item("-"));
        assert!(is_list_item("- x"));
        assert!(!is_list_item("-x"));
        assert_eq!(strip_list_marker("-"), "");
        assert_eq!(strip_list_marker("- x: 1"), "x: 1");
    }
}
