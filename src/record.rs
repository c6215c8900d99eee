use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Caller-supplied field values for a single emission.
///
/// Also used for per-logger defaults. Keys are unordered; output order is
/// decided by the schema's field list, not by the record. A `null` value
/// counts as absent during resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Raw lookup; may return an explicit `null`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Lookup that treats an explicit `null` the same as a missing key.
    ///
    /// `0`, `false` and `""` are present values.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record { fields: map.into_iter().collect() }
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Record { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Error returned when converting a non-object JSON value into a [`Record`].
#[derive(thiserror::Error, Debug)]
#[error("record must be a JSON object, got {0}")]
pub struct NotAnObject(pub Value);

impl TryFrom<Value> for Record {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into()),
            other => Err(NotAnObject(other)),
        }
    }
}

/// Output of normalization: schema fields in declared order.
///
/// Serializes as a JSON object whose key order matches the field list
/// the record was resolved against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    entries: Vec<(String, Value)>,
}

impl NormalizedRecord {
    pub(crate) fn with_capacity(n: usize) -> Self {
        NormalizedRecord { entries: Vec::with_capacity(n) }
    }

    pub(crate) fn push(&mut self, key: String, value: Value) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to a single compact JSON line, without a trailing newline.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_absent_but_falsy_is_present() {
        let r = Record::new()
            .with("zero", 0)
            .with("no", false)
            .with("empty", "")
            .with("nothing", Value::Null);
        assert!(r.contains("zero"));
        assert!(r.contains("no"));
        assert!(r.contains("empty"));
        assert!(!r.contains("nothing"));
        assert!(r.get("nothing").is_some());
    }

    #[test]
    fn try_from_rejects_non_objects() {
        assert!(Record::try_from(json!([1, 2])).is_err());
        let r = Record::try_from(json!({"a": 1})).unwrap();
        assert_eq!(r.value("a"), Some(&json!(1)));
    }

    #[test]
    fn normalized_line_keeps_insertion_order() {
        let mut n = NormalizedRecord::default();
        n.push("zeta".into(), json!(1));
        n.push("alpha".into(), json!("a"));
        assert_eq!(n.to_line().unwrap(), r#"{"zeta":1,"alpha":"a"}"#);
    }
}
