//! The `serde::Deserializer` half of the reflective bridge: drives a `T: Deserialize` impl over
//! an already-decoded [`Value`] tree. `from_str`/`from_slice`/`from_reader`/`decode_into` all
//! call the core [`crate::decoder::decode`] first and then this module — there is exactly one
//! implementation of TOON's textual grammar.

use crate::error::{Error, Result};
use crate::value::Value;
use serde::de::{
    self, DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess, VariantAccess, Visitor,
};

/// Drives `T::deserialize` over an owned `Value`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(value)
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => visitor.visit_f64(n),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(items) => visitor.visit_seq(SeqDeserializer { iter: items.into_iter() }),
            Value::Object(map) => visitor.visit_map(MapDeserializer {
                iter: map.into_iter(),
                value: None,
            }),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Bool(b) => visitor.visit_bool(b),
            other => Err(Error::type_mismatch("bool", type_name(&other))),
        }
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_i64(visitor)
    }
    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_i64(visitor)
    }
    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Number(n) => visitor.visit_i64(n as i64),
            other => Err(Error::type_mismatch("integer", type_name(&other))),
        }
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_u64(visitor)
    }
    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_u64(visitor)
    }
    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Number(n) => visitor.visit_u64(n as u64),
            other => Err(Error::type_mismatch("unsigned integer", type_name(&other))),
        }
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Number(n) => visitor.visit_f64(n),
            other => Err(Error::type_mismatch("number", type_name(&other))),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => visitor.visit_char(c),
                    _ => Err(Error::type_mismatch("single character", "string")),
                }
            }
            other => Err(Error::type_mismatch("char", type_name(&other))),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(s) => visitor.visit_string(s),
            other => Err(Error::type_mismatch("string", type_name(&other))),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Array(items) => {
                let bytes = items
                    .into_iter()
                    .map(|v| match v {
                        Value::Number(n) => Ok(n as u8),
                        other => Err(Error::type_mismatch("byte", type_name(&other))),
                    })
                    .collect::<Result<Vec<u8>>>()?;
                visitor.visit_byte_buf(bytes)
            }
            other => Err(Error::type_mismatch("byte array", type_name(&other))),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            other => Err(Error::type_mismatch("null", type_name(&other))),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Array(items) => visitor.visit_seq(SeqDeserializer { iter: items.into_iter() }),
            other => Err(Error::type_mismatch("array", type_name(&other))),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Object(map) => visitor.visit_map(MapDeserializer {
                iter: map.into_iter(),
                value: None,
            }),
            other => Err(Error::type_mismatch("object", type_name(&other))),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Value::Object(map) => {
                if map.len() != 1 {
                    return Err(Error::invalid_union_tag(format!(
                        "expected a single-entry object, found {} entries",
                        map.len()
                    )));
                }
                let (tag, payload) = map.into_iter().next().expect("len checked above");
                visitor.visit_enum(EnumDeserializer { tag, payload })
            }
            other => Err(Error::type_mismatch("enum (string or single-key object)", type_name(&other))),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl<'de> SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(v) => seed.deserialize(v).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        let (lower, upper) = self.iter.size_hint();
        upper.or(Some(lower))
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl<'de> MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((k, v)) => {
                self.value = Some(v);
                seed.deserialize(Value::String(k)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .expect("next_value_seed called before next_key_seed");
        seed.deserialize(value)
    }

    fn size_hint(&self) -> Option<usize> {
        let (lower, upper) = self.iter.size_hint();
        upper.or(Some(lower))
    }
}

struct EnumDeserializer {
    tag: String,
    payload: Value,
}

impl<'de> EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let tag = seed.deserialize(Value::String(self.tag))?;
        Ok((tag, VariantDeserializer { payload: self.payload }))
    }
}

struct VariantDeserializer {
    payload: Value,
}

impl<'de> VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.payload {
            Value::Null => Ok(()),
            other => Err(Error::type_mismatch("null", type_name(&other))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(self.payload)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.payload {
            Value::Array(items) => visitor.visit_seq(SeqDeserializer { iter: items.into_iter() }),
            other => Err(Error::type_mismatch("array", type_name(&other))),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.payload {
            Value::Object(map) => visitor.visit_map(MapDeserializer {
                iter: map.into_iter(),
                value: None,
            }),
            other => Err(Error::type_mismatch("object", type_name(&other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ToonMap;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn object_becomes_struct() {
        let mut m = ToonMap::new();
        m.insert("x", Value::Number(1.0));
        m.insert("y", Value::Number(2.0));
        let p: Point = from_value(Value::Object(m)).unwrap();
        assert_eq!(p, Point { x: 1, y: 2 });
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct WithDefault {
        #[serde(default)]
        count: i32,
    }

    #[test]
    fn missing_field_uses_default() {
        let v: WithDefault = from_value(Value::Object(ToonMap::new())).unwrap();
        assert_eq!(v, WithDefault { count: 0 });
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Shape {
        Circle(f64),
        Named { label: String },
        Point,
    }

    #[test]
    fn tagged_union_newtype_variant() {
        let mut m = ToonMap::new();
        m.insert("Circle", Value::Number(2.0));
        let s: Shape = from_value(Value::Object(m)).unwrap();
        assert_eq!(s, Shape::Circle(2.0));
    }

    #[test]
    fn tagged_union_struct_variant() {
        let mut inner = ToonMap::new();
        inner.insert("label", Value::String("a".to_string()));
        let mut m = ToonMap::new();
        m.insert("Named", Value::Object(inner));
        let s: Shape = from_value(Value::Object(m)).unwrap();
        assert_eq!(s, Shape::Named { label: "a".to_string() });
    }

    #[test]
    fn unit_variant_from_string() {
        let s: Shape = from_value(Value::String("Point".to_string())).unwrap();
        assert_eq!(s, Shape::Point);
    }

    #[test]
    fn unknown_enum_string_is_error() {
        let err = from_value::<Shape>(Value::String("Nonexistent".to_string())).unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue(_)));
    }

    #[test]
    fn short_array_into_fixed_tuple_is_array_size_mismatch() {
        let arr = Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]);
        let err = from_value::<(i32, i32, i32)>(arr).unwrap_err();
        assert!(matches!(err, Error::ArraySizeMismatch { expected: 3, .. }));
    }
}
