use serde::Serialize;
use std::ops::Deref;
use serde_json::{Map, Value};

/// Open-ended bag of raw JSON properties attached to a record.
///
/// Callers may seed or drop single entries; swapping the whole mapping is
/// reserved for the codec when it rebuilds a record from its input.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RawValues {
    values: Map<String, Value>,
}

impl RawValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value under `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Sets a single raw entry, returning the value it displaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub(crate) fn replace(&mut self, values: Map<String, Value>) -> Map<String, Value> {
        std::mem::replace(&mut self.values, values)
    }
}

impl<'a> IntoIterator for &'a RawValues {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Write handle returned by [`Record::raw_values_mut`](crate::Record::raw_values_mut).
///
/// Reads go through `Deref`; writes are limited to single entries.
#[derive(Debug)]
pub struct RawValuesMut<'a> {
    inner: &'a mut RawValues,
}

impl<'a> RawValuesMut<'a> {
    /// Wraps the bag a record owns. Record implementations call this from
    /// `raw_values_mut`.
    pub fn new(inner: &'a mut RawValues) -> Self {
        Self { inner }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.insert(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.inner.remove(key)
    }

    pub(crate) fn replace(&mut self, values: Map<String, Value>) -> Map<String, Value> {
        self.inner.replace(values)
    }
}

impl Deref for RawValuesMut<'_> {
    type Target = RawValues;

    fn deref(&self) -> &RawValues {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_read_back() {
        let mut raw = RawValues::new();
        assert!(raw.is_empty());

        assert_eq!(raw.insert("Property2", "value2"), None);
        raw.insert("Count", 3);

        assert_eq!(raw.len(), 2);
        assert_eq!(raw.get_str("Property2"), Some("value2"));
        assert_eq!(raw.get("Count"), Some(&json!(3)));
        assert_eq!(raw.get_str("Count"), None);
        assert!(!raw.contains_key("Missing"));
    }

    #[test]
    fn test_insert_returns_displaced_value() {
        let mut raw = RawValues::new();
        raw.insert("Key", "old");
        assert_eq!(raw.insert("Key", "new"), Some(json!("old")));
        assert_eq!(raw.remove("Key"), Some(json!("new")));
        assert!(raw.is_empty());
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut raw = RawValues::new();
        raw.insert("b", 1);
        raw.insert("a", 2);
        raw.insert("c", 3);

        let keys: Vec<&str> = raw.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_replace_swaps_whole_mapping() {
        let mut raw = RawValues::new();
        raw.insert("stale", true);

        let mut fresh = Map::new();
        fresh.insert("fresh".to_string(), json!(1));
        let previous = raw.replace(fresh);

        assert!(previous.contains_key("stale"));
        assert!(raw.contains_key("fresh"));
        assert!(!raw.contains_key("stale"));
    }

    #[test]
    fn test_handle_writes_single_entries_and_reads_through() {
        let mut raw = RawValues::new();
        {
            let mut handle = RawValuesMut::new(&mut raw);
            handle.insert("Os", "linux");
            handle.insert("Arch", "arm64");
            assert_eq!(handle.remove("Arch"), Some(json!("arm64")));
            assert_eq!(handle.get_str("Os"), Some("linux"));
            assert_eq!(handle.len(), 1);
        }
        assert_eq!(raw.get_str("Os"), Some("linux"));
    }

    #[test]
    fn test_handle_replace_swaps_underlying_bag() {
        let mut raw = RawValues::new();
        raw.insert("old", 1);

        let mut fresh = Map::new();
        fresh.insert("new".to_string(), json!(2));
        RawValuesMut::new(&mut raw).replace(fresh);

        assert!(raw.contains_key("new"));
        assert!(!raw.contains_key("old"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut raw = RawValues::new();
        raw.insert("x", json!({"nested": [1, 2]}));

        let value = serde_json::to_value(&raw).unwrap();
        assert_eq!(value, json!({"x": {"nested": [1, 2]}}));
    }
}
