//! Parser for the `[N<delim?>]{fields}:` array-header grammar.

use crate::error::{Error, Result};
use crate::options::Delimiter;
use crate::tokenizer::{find_unquoted, split_delimited};

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayHeader {
    pub length: usize,
    pub delimiter: Delimiter,
    pub fields: Option<Vec<String>>,
    /// Text after the header's colon (and its single separating space), trimmed of nothing
    /// further. Empty string means no inline values were present.
    pub inline: String,
}

/// `s` must begin with `[`; the header may extend to the end of `s` (inline values trail the
/// colon). Returns the parsed header; `s` should be the whole remainder of the logical line
/// once any leading object key has already been split off by the caller.
pub fn parse_array_header(s: &str, line_no: usize) -> Result<ArrayHeader> {
    if !s.starts_with('[') {
        return Err(Error::invalid_header(line_no, s.to_string()));
    }
    let close = s
        .find(']')
        .ok_or_else(|| Error::invalid_header(line_no, s.to_string()))?;
    let bracket_content = &s[1..close];
    let (length_str, delimiter) = match bracket_content.chars().last() {
        Some('\t') => (&bracket_content[..bracket_content.len() - 1], Delimiter::Tab),
        Some('|') => (&bracket_content[..bracket_content.len() - 1], Delimiter::Pipe),
        _ => (bracket_content, Delimiter::Comma),
    };
    if length_str.is_empty() || !length_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_length(line_no, bracket_content.to_string()));
    }
    let length: usize = length_str
        .parse()
        .map_err(|_| Error::invalid_length(line_no, bracket_content.to_string()))?;

    let mut rest = &s[close + 1..];

    let fields = if rest.starts_with('{') {
        let fclose = find_unquoted(rest, b'}')
            .ok_or_else(|| Error::invalid_header(line_no, s.to_string()))?;
        let fields_content = &rest[1..fclose];
        rest = &rest[fclose + 1..];
        let tokens = split_delimited(fields_content, delimiter.as_byte())
            .into_iter()
            .map(|tok| {
                if let Some(unquoted) = tok.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
                    crate::quoting::unescape(unquoted)
                } else {
                    Ok(tok)
                }
            })
            .collect::<Result<Vec<String>>>()?;
        Some(tokens)
    } else {
        None
    };

    let rest = rest.trim_start_matches(' ');
    let rest = rest
        .strip_prefix(':')
        .ok_or_else(|| Error::missing_colon(line_no, s.to_string()))?;

    let inline = if let Some(stripped) = rest.strip_prefix(' ') {
        stripped.to_string()
    } else if rest.is_empty() {
        String::new()
    } else {
        return Err(Error::invalid_header(line_no, s.to_string()));
    };

    Ok(ArrayHeader {
        length,
        delimiter,
        fields,
        inline,
    })
}

/// True iff `s` looks like the start of an array header: an unquoted `[` appears, and the
/// matching `]` appears before any unquoted `:`.
pub fn looks_like_array_header(s: &str) -> bool {
    let trimmed = s.trim_start();
    if !trimmed.starts_with('[') {
        return false;
    }
    trimmed.find(']').is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitive_inline_header() {
        let h = parse_array_header("[3]: 10,20,30", 1).unwrap();
        assert_eq!(h.length, 3);
        assert_eq!(h.delimiter, Delimiter::Comma);
        assert_eq!(h.fields, None);
        assert_eq!(h.inline, "10,20,30");
    }

    #[test]
    fn parses_tabular_header() {
        let h = parse_array_header("[2]{id,name}:", 1).unwrap();
        assert_eq!(h.length, 2);
        assert_eq!(h.fields, Some(vec!["id".to_string(), "name".to_string()]));
        assert_eq!(h.inline, "");
    }

    #[test]
    fn parses_pipe_delimiter() {
        let h = parse_array_header("[2|]{id|name}:", 1).unwrap();
        assert_eq!(h.delimiter, Delimiter::Pipe);
        assert_eq!(h.fields, Some(vec!["id".to_string(), "name".to_string()]));
    }

    #[test]
    fn parses_tab_delimiter() {
        let h = parse_array_header("[2\t]:", 1).unwrap();
        assert_eq!(h.delimiter, Delimiter::Tab);
    }

    #[test]
    fn rejects_missing_colon() {
        let err = parse_array_header("[3]", 1).unwrap_err();
        assert!(matches!(err, Error::MissingColon { .. }));
    }

    #[test]
    fn rejects_empty_length() {
        let err = parse_array_header("[]:", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidLength { .. }));
    }

    #[test]
    fn list_array_header_has_no_fields_and_no_inline() {
        let h = parse_array_header("[2]:", 1).unwrap();
        assert_eq!(h.fields, None);
        assert_eq!(h.inline, "");
    }

    #[test]
    fn quoted_field_name_may_contain_closing_brace() {
        let h = parse_array_header("[1]{\"a}b\",name}:", 1).unwrap();
        assert_eq!(h.fields, Some(vec!["a}b".to_string(), "name".to_string()]));
        assert_eq!(h.inline, "");
    }
}
