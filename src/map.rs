//! Ordered map type for TOON objects.
//!
//! [`ToonMap`] wraps [`IndexMap`] rather than `HashMap` because TOON's tabular array layout
//! depends on the first item's key order being preserved as the canonical column order; a
//! hash-table-backed map would scramble that order on every run.
//!
//! ```rust
//! use toon::{ToonMap, Value};
//!
//! let mut map = ToonMap::new();
//! map.insert("name", Value::from("Alice"));
//! map.insert("age", Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::value::Value;
use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToonMap(IndexMap<String, Value>);

impl ToonMap {
    pub fn new() -> Self {
        ToonMap(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ToonMap(IndexMap::with_capacity(capacity))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for ToonMap {
    fn from(map: HashMap<String, Value>) -> Self {
        ToonMap(map.into_iter().collect())
    }
}

impl IntoIterator for ToonMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ToonMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for ToonMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        ToonMap(IndexMap::from_iter(iter))
    }
}
