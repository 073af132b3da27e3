//! Encodes a [`Value`] tree as TOON text.
//!
//! The encoder never looks at the decoder's line-cursor machinery; it walks the value tree
//! top-down and writes directly into an owned `String` buffer, choosing one of three array
//! layouts at every array node (see [`array_layout`]).

use crate::error::Result;
use crate::options::{Delimiter, EncodeOptions};
use crate::quoting::{quote_key, quote_value};
use crate::value::Value;

/// Encodes `value` as TOON text under `options`.
///
/// This is practically infallible — see `Error::OutOfMemory` in the crate docs for why the
/// signature still returns a `Result`.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String> {
    let mut out = String::new();
    match value {
        Value::Object(map) if map.is_empty() => {}
        Value::Object(map) => {
            write_object_entries(&mut out, map, options, 0);
        }
        Value::Array(items) => {
            write_array(&mut out, items, options, 0);
        }
        primitive => out.push_str(&primitive_text(primitive, options.delimiter)),
    }
    Ok(out)
}

fn indent(out: &mut String, depth: usize, width: usize) {
    for _ in 0..depth * width {
        out.push(' ');
    }
}

/// Renders a single primitive value (never `Array`/`Object`).
fn primitive_text(value: &Value, delim: Delimiter) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => quote_value(s, delim),
        Value::Array(_) | Value::Object(_) => unreachable!("primitive_text called on non-leaf"),
    }
}

/// Zero, integers under 10^15 in magnitude, other finite floats in decimal form, and
/// very large/small magnitudes in scientific notation each get their own lexical rule
/// (see §4.4); non-finite numbers collapse to `null`.
fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        return format_scientific(n);
    }
    if n.fract() == 0.0 && abs < 1e15 {
        return format!("{}", n as i64);
    }
    let mut s = format!("{n}");
    if let Some(dot) = s.find('.') {
        if !s[dot..].contains(['e', 'E']) {
            while s.ends_with('0') {
                s.pop();
            }
            if s.ends_with('.') {
                s.pop();
            }
        }
    }
    s
}

/// Scientific form for magnitudes outside the plain-decimal range, matching the exponent
/// sign convention of a JS-style `Number.toString()` (`1e+21`, `1e-7`): Rust's `{:e}`
/// already yields the shortest round-tripping mantissa, so only the exponent's `+` sign
/// needs adding back in.
fn format_scientific(n: f64) -> String {
    let s = format!("{n:e}");
    let (mantissa, exp) = s.split_once('e').expect("LowerExp always emits 'e'");
    let exp_value: i32 = exp.parse().expect("LowerExp exponent is a plain integer");
    if exp_value >= 0 {
        format!("{mantissa}e+{exp_value}")
    } else {
        format!("{mantissa}e{exp_value}")
    }
}

enum ArrayLayout<'a> {
    /// Every item is a primitive.
    Inline,
    /// Non-empty, every item a non-empty object sharing the first item's key order.
    Tabular(Vec<&'a str>),
    /// The general-purpose fallback.
    List,
}

fn array_layout(items: &[Value]) -> ArrayLayout<'_> {
    if items.iter().all(Value::is_primitive) {
        return ArrayLayout::Inline;
    }
    if let Some(columns) = Value::tabular_columns(items) {
        return ArrayLayout::Tabular(columns.iter().map(String::as_str).collect());
    }
    ArrayLayout::List
}

/// Writes an array's header plus body at `depth` (the header's own indentation level).
fn write_array(out: &mut String, items: &[Value], options: &EncodeOptions, depth: usize) {
    match array_layout(items) {
        ArrayLayout::Inline => write_inline_array(out, items, options),
        ArrayLayout::Tabular(columns) => write_tabular_array(out, items, &columns, options, depth),
        ArrayLayout::List => write_list_array(out, items, options, depth),
    }
}

fn write_header(out: &mut String, len: usize, delim: Delimiter, fields: Option<&[&str]>) {
    out.push('[');
    out.push_str(&len.to_string());
    if let Some(marker) = delim.header_marker() {
        out.push(marker);
    }
    out.push(']');
    if let Some(fields) = fields {
        out.push('{');
        for (i, f) in fields.iter().enumerate() {
            if i > 0 {
                out.push(delim.as_char());
            }
            out.push_str(&quote_key(f));
        }
        out.push('}');
    }
    out.push(':');
}

fn write_inline_array(out: &mut String, items: &[Value], options: &EncodeOptions) {
    write_header(out, items.len(), options.delimiter, None);
    if items.is_empty() {
        return;
    }
    out.push(' ');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(options.delimiter.as_char());
        }
        out.push_str(&primitive_text(item, options.delimiter));
    }
}

fn write_tabular_array(
    out: &mut String,
    items: &[Value],
    columns: &[&str],
    options: &EncodeOptions,
    depth: usize,
) {
    write_header(out, items.len(), options.delimiter, Some(columns));
    let row_depth = depth + 1;
    for item in items {
        out.push('\n');
        indent(out, row_depth, options.indent);
        let obj = item.as_object().expect("tabular_columns guarantees Object");
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                out.push(options.delimiter.as_char());
            }
            let v = obj.get(col).expect("tabular_columns guarantees every column present");
            out.push_str(&primitive_text(v, options.delimiter));
        }
    }
}

fn write_list_array(out: &mut String, items: &[Value], options: &EncodeOptions, depth: usize) {
    write_header(out, items.len(), options.delimiter, None);
    let item_depth = depth + 1;
    for item in items {
        out.push('\n');
        indent(out, item_depth, options.indent);
        write_list_item(out, item, options, item_depth);
    }
}

/// Writes one `- ...` marker line (and any continuation lines it needs) at `item_depth`.
fn write_list_item(out: &mut String, item: &Value, options: &EncodeOptions, item_depth: usize) {
    match item {
        Value::Object(map) if map.is_empty() => {
            out.push('-');
        }
        Value::Object(map) => {
            out.push_str("- ");
            let mut entries = map.iter();
            let (first_key, first_value) = entries.next().expect("non-empty checked above");
            write_object_field(out, first_key, first_value, options, item_depth);
            for (key, value) in entries {
                out.push('\n');
                indent(out, item_depth + 1, options.indent);
                write_object_field(out, key, value, options, item_depth + 1);
            }
        }
        Value::Array(inner) => {
            out.push_str("- ");
            write_array(out, inner, options, item_depth);
        }
        primitive => {
            out.push_str("- ");
            out.push_str(&primitive_text(primitive, options.delimiter));
        }
    }
}

/// Writes `key: value` (or `key:` + nested body) for one object entry, at `depth`.
fn write_object_field(out: &mut String, key: &str, value: &Value, options: &EncodeOptions, depth: usize) {
    out.push_str(&quote_key(key));
    match value {
        Value::Object(map) if map.is_empty() => {
            out.push(':');
        }
        Value::Object(map) => {
            out.push(':');
            let child_depth = depth + 1;
            for (k, v) in map.iter() {
                out.push('\n');
                indent(out, child_depth, options.indent);
                write_object_field(out, k, v, options, child_depth);
            }
        }
        Value::Array(items) => {
            write_array(out, items, options, depth);
        }
        primitive => {
            out.push_str(": ");
            out.push_str(&primitive_text(primitive, options.delimiter));
        }
    }
}

/// Writes a top-level or nested-object's entries, one `key: value` pair per line, at `depth`.
fn write_object_entries(
    out: &mut String,
    map: &crate::map::ToonMap,
    options: &EncodeOptions,
    depth: usize,
) {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        indent(out, depth, options.indent);
        write_object_field(out, key, value, options, depth);
    }
}
