//! The in-memory value tree that the encoder consumes and the decoder produces.

use crate::map::ToonMap;
use std::fmt;

/// A TOON value: the six-variant tree every encode/decode call works against.
///
/// `Object` preserves insertion order (see [`ToonMap`]) because tabular encoding depends on
/// the first item's key order being stable across a whole array.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Always a finite double; `NaN`/`±infinity` collapse to `Null` on encode.
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(ToonMap),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// True for every variant that `needs_quoting`/array-layout treat as a leaf.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Truncates toward zero, matching the reflective adapter's integer-binding rule.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ToonMap> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ToonMap> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Whether every element of this value (recursively, for arrays and objects) is a
    /// primitive — the precondition for the primitive-inline array layout.
    pub(crate) fn is_shallow_primitive_array(items: &[Value]) -> bool {
        items.iter().all(Value::is_primitive)
    }

    /// Whether this array qualifies for tabular layout: non-empty, every item a non-empty
    /// object, all sharing the first item's key set, all leaf values primitive.
    pub(crate) fn tabular_columns(items: &[Value]) -> Option<Vec<String>> {
        let first = items.first()?.as_object()?;
        if first.is_empty() {
            return None;
        }
        let columns: Vec<String> = first.keys().map(String::from).collect();
        for item in items {
            let obj = item.as_object()?;
            if obj.len() != columns.len() {
                return None;
            }
            for col in &columns {
                match obj.get(col) {
                    Some(v) if v.is_primitive() => {}
                    _ => return None,
                }
            }
        }
        Some(columns)
    }
}

impl fmt::Display for Value {
    /// Renders using default encode options; this only fails on the allocator path described
    /// in `Error::OutOfMemory`, which this crate never triggers in practice.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::encoder::encode(self, &crate::options::EncodeOptions::default())
            .unwrap_or_default();
        f.write_str(&text)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<ToonMap> for Value {
    fn from(m: ToonMap) -> Self {
        Value::Object(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
