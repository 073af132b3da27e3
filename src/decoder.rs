//! Decodes TOON text into a [`Value`] tree.
//!
//! Preprocessing ([`tokenize`]) turns the source into a flat `Vec<Line>` with blank lines
//! dropped and indentation reduced to a depth; everything below walks that vector with a single
//! forward cursor, matching the spec's "no implicit call stack" cursor discipline.

use crate::error::{Error, Result};
use crate::header::{looks_like_array_header, parse_array_header, ArrayHeader};
use crate::map::ToonMap;
use crate::options::DecodeOptions;
use crate::quoting::unescape;
use crate::tokenizer::{find_unquoted, is_list_item, split_delimited, strip_list_marker, tokenize, Line};
use crate::value::Value;

/// Decodes `source` as a TOON document.
pub fn decode(source: &str, options: &DecodeOptions) -> Result<Value> {
    let lines = tokenize(source, options)?;
    let mut cursor = Cursor::new(&lines, options);
    if cursor.lines.is_empty() {
        return Ok(Value::Object(ToonMap::new()));
    }
    if looks_like_array_header(&cursor.lines[0].content) {
        return cursor.parse_array(0);
    }
    if cursor.lines.len() == 1 && find_unquoted(&cursor.lines[0].content, b':').is_none() {
        return cursor.parse_primitive(&cursor.lines[0].content, cursor.lines[0].number);
    }
    cursor.parse_object(0)
}

struct Cursor<'a> {
    lines: &'a [Line],
    pos: usize,
    options: &'a DecodeOptions,
}

impl<'a> Cursor<'a> {
    fn new(lines: &'a [Line], options: &'a DecodeOptions) -> Self {
        Cursor { lines, pos: 0, options }
    }

    fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    /// Parses a full Object whose entries sit at `depth`, consuming every line that belongs to
    /// it (including nested children) and stopping once depth drops below `depth`.
    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        let mut map = ToonMap::new();
        while let Some(line) = self.peek() {
            if line.depth < depth {
                break;
            }
            if line.depth > depth {
                return Err(Error::invalid_syntax(line.number, "unexpected indentation"));
            }
            let line_no = line.number;
            let content = line.content.clone();
            let Some((key_raw, tail)) = split_key_and_tail(&content) else {
                if self.options.strict {
                    return Err(Error::missing_colon(line_no, content));
                }
                self.pos += 1;
                continue;
            };
            self.pos += 1;

            let key = parse_key(key_raw)?;

            let value = if !tail.is_empty() {
                if looks_like_array_header(tail) {
                    self.parse_array_header_and_body(tail, line_no, depth)?
                } else {
                    self.parse_primitive(tail, line_no)?
                }
            } else if self.peek().is_some_and(|l| l.depth > depth) {
                self.parse_object(depth + 1)?
            } else {
                Value::Object(ToonMap::new())
            };

            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    /// Parses an array whose header starts at `self.pos`'s current line (root form).
    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        let line = self.peek().expect("caller checked non-empty").clone();
        self.pos += 1;
        self.parse_array_header_and_body(&line.content, line.number, depth)
    }

    /// `header_text` is the `[...]...:` slice (and possibly inline values) already sliced out
    /// of the object-field tail or the whole root line; the header's own line has already been
    /// consumed from the cursor.
    fn parse_array_header_and_body(&mut self, header_text: &str, line_no: usize, depth: usize) -> Result<Value> {
        let header = parse_array_header(header_text, line_no)?;
        if !header.inline.is_empty() {
            return self.parse_inline_values(&header, line_no);
        }
        if let Some(fields) = header.fields.clone() {
            return self.parse_tabular_body(&header, &fields, depth, line_no);
        }
        self.parse_list_body(&header, depth, line_no)
    }

    fn parse_inline_values(&mut self, header: &ArrayHeader, line_no: usize) -> Result<Value> {
        let tokens = split_delimited(&header.inline, header.delimiter.as_byte());
        if self.options.strict && tokens.len() != header.length {
            return Err(Error::count_mismatch(line_no, header.length, tokens.len()));
        }
        tokens
            .iter()
            .map(|t| self.parse_primitive(t, line_no))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn parse_tabular_body(
        &mut self,
        header: &ArrayHeader,
        fields: &[String],
        depth: usize,
        header_line_no: usize,
    ) -> Result<Value> {
        let row_depth = depth + 1;
        let mut rows = Vec::new();
        while let Some(line) = self.peek() {
            if line.depth != row_depth || !looks_like_row(&line.content, header.delimiter.as_byte()) {
                break;
            }
            let content = line.content.clone();
            let line_no = line.number;
            self.pos += 1;
            let tokens = split_delimited(&content, header.delimiter.as_byte());
            if self.options.strict && tokens.len() != fields.len() {
                return Err(Error::width_mismatch(line_no, fields.len(), tokens.len()));
            }
            let mut obj = ToonMap::new();
            for (field, tok) in fields.iter().zip(tokens.iter()) {
                obj.insert(field.clone(), self.parse_primitive(tok, line_no)?);
            }
            rows.push(Value::Object(obj));
        }
        if self.options.strict && rows.len() != header.length {
            return Err(Error::count_mismatch(header_line_no, header.length, rows.len()));
        }
        Ok(Value::Array(rows))
    }

    fn parse_list_body(&mut self, header: &ArrayHeader, depth: usize, header_line_no: usize) -> Result<Value> {
        let item_depth = depth + 1;
        let mut items = Vec::new();
        while let Some(line) = self.peek() {
            if line.depth != item_depth || !is_list_item(&line.content) {
                break;
            }
            let line_no = line.number;
            let content = line.content.clone();
            self.pos += 1;
            let residue = strip_list_marker(&content);
            let item = if residue.is_empty() {
                if self.peek().is_some_and(|l| l.depth > item_depth) {
                    self.parse_object(item_depth + 1)?
                } else {
                    Value::Object(ToonMap::new())
                }
            } else if looks_like_array_header(residue) {
                self.parse_array_header_and_body(residue, line_no, item_depth)?
            } else if let Some((key_raw, tail)) = split_key_and_tail(residue) {
                self.parse_inline_object_item(key_raw, tail, line_no, item_depth)?
            } else {
                self.parse_primitive(residue, line_no)?
            };
            items.push(item);
        }
        if self.options.strict && items.len() != header.length {
            return Err(Error::count_mismatch(header_line_no, header.length, items.len()));
        }
        Ok(Value::Array(items))
    }

    /// Residue of a list marker that itself carries a `key`/tail pair — the first pair, plus
    /// any further `key`/tail continuation lines at `item_depth + 1`.
    fn parse_inline_object_item(
        &mut self,
        key_raw: &str,
        tail: &str,
        line_no: usize,
        item_depth: usize,
    ) -> Result<Value> {
        let mut map = ToonMap::new();
        let key = parse_key(key_raw)?;
        let value = if !tail.is_empty() {
            if looks_like_array_header(tail) {
                self.parse_array_header_and_body(tail, line_no, item_depth)?
            } else {
                self.parse_primitive(tail, line_no)?
            }
        } else if self.peek().is_some_and(|l| l.depth > item_depth) {
            self.parse_object(item_depth + 1)?
        } else {
            Value::Object(ToonMap::new())
        };
        map.insert(key, value);

        let field_depth = item_depth + 1;
        while let Some(line) = self.peek() {
            if line.depth != field_depth {
                break;
            }
            let content = line.content.clone();
            let Some((key_raw, tail)) = split_key_and_tail(&content) else {
                break;
            };
            let line_no = line.number;
            self.pos += 1;
            let key = parse_key(key_raw)?;
            let value = if !tail.is_empty() {
                if looks_like_array_header(tail) {
                    self.parse_array_header_and_body(tail, line_no, field_depth)?
                } else {
                    self.parse_primitive(tail, line_no)?
                }
            } else if self.peek().is_some_and(|l| l.depth > field_depth) {
                self.parse_object(field_depth + 1)?
            } else {
                Value::Object(ToonMap::new())
            };
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    fn parse_primitive(&self, token: &str, line_no: usize) -> Result<Value> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Ok(Value::String(String::new()));
        }
        if let Some(rest) = trimmed.strip_prefix('"') {
            let Some(unquoted) = rest.strip_suffix('"') else {
                return Err(Error::UnterminatedString { line: line_no });
            };
            return Ok(Value::String(unescape(unquoted)?));
        }
        match trimmed {
            "null" => return Ok(Value::Null),
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }
        if is_plain_number(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                return Ok(Value::Number(n));
            }
        }
        Ok(Value::String(trimmed.to_string()))
    }
}

/// Splits an object-field line into its key and remaining value text.
///
/// Two forms are grammatical here: `key: value` (colon separates them) and, because the
/// encoder writes array-valued fields as `key[N]...:` with no colon before the bracket (see
/// `encoder::write_object_field`), `key[header]` where the header's own colon is the first
/// one in the line. Disambiguate by position: if an unquoted `[` precedes the first unquoted
/// `:` and what follows is structurally a header, the key ends at the bracket; otherwise fall
/// back to splitting on the colon.
fn split_key_and_tail(content: &str) -> Option<(&str, &str)> {
    if let Some(bracket) = find_unquoted(content, b'[') {
        let bracket_first = match find_unquoted(content, b':') {
            Some(colon) => bracket < colon,
            None => true,
        };
        if bracket_first && looks_like_array_header(&content[bracket..]) {
            return Some((content[..bracket].trim(), &content[bracket..]));
        }
    }
    let colon = find_unquoted(content, b':')?;
    let key = content[..colon].trim();
    let tail = content[colon + 1..].strip_prefix(' ').unwrap_or(&content[colon + 1..]);
    Some((key, tail))
}

fn parse_key(raw: &str) -> Result<String> {
    if let Some(rest) = raw.strip_prefix('"') {
        if let Some(unquoted) = rest.strip_suffix('"') {
            return unescape(unquoted);
        }
        return Err(Error::UnterminatedString { line: 0 });
    }
    Ok(raw.to_string())
}

/// A tabular row is a line whose first unquoted delimiter occurs before any unquoted colon, or
/// which has no colon at all (single-column rows have neither).
fn looks_like_row(content: &str, delim: u8) -> bool {
    match find_unquoted(content, b':') {
        None => true,
        Some(colon) => find_unquoted(content, delim).is_some_and(|d| d < colon),
    }
}

/// Rejects the leading-zero-then-digit shape (`05`) so it stays a string, matching
/// [`crate::quoting::is_numeric_like`] minus the sign (already trimmed by the caller's token).
fn is_plain_number(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let bytes = body.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes[0] == b'0' && bytes.len() > 1 && bytes[1].is_ascii_digit() {
        return false;
    }
    crate::quoting::is_numeric_like(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Value {
        decode(s, &DecodeOptions::default()).unwrap()
    }

    #[test]
    fn empty_source_is_empty_object() {
        assert_eq!(dec(""), Value::Object(ToonMap::new()));
    }

    #[test]
    fn inline_numeric_array() {
        let v = dec("[3]: 10,20,30");
        assert_eq!(
            v,
            Value::Array(vec![Value::Number(10.0), Value::Number(20.0), Value::Number(30.0)])
        );
    }

    #[test]
    fn leading_zero_stays_string() {
        let v = dec("x: 05");
        let mut m = ToonMap::new();
        m.insert("x", Value::String("05".to_string()));
        assert_eq!(v, Value::Object(m));
    }

    #[test]
    fn strict_rejects_count_mismatch() {
        let err = decode("[3]: 10,20", &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::CountMismatch { .. }));
    }

    #[test]
    fn strict_rejects_width_mismatch() {
        let src = "[2]{a,b}:\n  1\n  2,3";
        let err = decode(src, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::WidthMismatch { .. }));
    }

    #[test]
    fn tabular_round_trip_shape() {
        let src = "[2]{id,name}:\n  1,Alice\n  2,Bob";
        let v = dec(src);
        let Value::Array(items) = v else { panic!("expected array") };
        assert_eq!(items.len(), 2);
        let Value::Object(first) = &items[0] else { panic!("expected object") };
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn list_array_of_objects() {
        let v = dec("[2]:\n  - x: 1\n  - x: 2");
        let Value::Array(items) = v else { panic!("expected array") };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_object().unwrap().get("x").unwrap().as_i64(), Some(1));
        assert_eq!(items[1].as_object().unwrap().get("x").unwrap().as_i64(), Some(2));
    }

    #[test]
    fn nested_object() {
        let v = dec("data:\n  x: 42");
        let mut inner = ToonMap::new();
        inner.insert("x", Value::Number(42.0));
        let mut outer = ToonMap::new();
        outer.insert("data", Value::Object(inner));
        assert_eq!(v, Value::Object(outer));
    }

    #[test]
    fn quoted_key_is_unescaped() {
        let v = dec("\"a:b\": 1");
        let mut m = ToonMap::new();
        m.insert("a:b", Value::Number(1.0));
        assert_eq!(v, Value::Object(m));
    }

    #[test]
    fn blank_lines_between_entries_are_skipped() {
        let v = dec("a: 1\n\nb: 2");
        let mut m = ToonMap::new();
        m.insert("a", Value::Number(1.0));
        m.insert("b", Value::Number(2.0));
        assert_eq!(v, Value::Object(m));
    }

    #[test]
    fn object_field_with_array_value_has_no_colon_before_bracket() {
        let v = dec("name: Alice\ntags[2]: admin,user");
        let Value::Object(m) = v else { panic!("expected object") };
        assert_eq!(m.get("name").and_then(Value::as_str), Some("Alice"));
        let Some(Value::Array(tags)) = m.get("tags") else { panic!("expected tags array") };
        assert_eq!(
            tags,
            &vec![Value::String("admin".to_string()), Value::String("user".to_string())]
        );
    }

    #[test]
    fn list_item_inline_field_with_array_value() {
        let v = dec("[1]:\n  - tags[2]: a,b");
        let Value::Array(items) = v else { panic!("expected array") };
        let Value::Object(first) = &items[0] else { panic!("expected object") };
        let Some(Value::Array(tags)) = first.get("tags") else { panic!("expected tags array") };
        assert_eq!(tags, &vec![Value::String("a".to_string()), Value::String("b".to_string())]);
    }

    #[test]
    fn tabular_column_name_containing_closing_brace_round_trips() {
        use crate::encoder::encode;
        use crate::options::EncodeOptions;

        let mut a = ToonMap::new();
        a.insert("a}b", Value::from(1));
        a.insert("name", Value::from("Alice"));
        let mut b = ToonMap::new();
        b.insert("a}b", Value::from(2));
        b.insert("name", Value::from("Bob"));
        let original = Value::Array(vec![Value::Object(a), Value::Object(b)]);

        let text = encode(&original, &EncodeOptions::default()).unwrap();
        let decoded = decode(&text, &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, original);
    }
}
