//! The mapped field set handed to the notification dispatcher.

use indexmap::IndexMap;
use serde_json::Value;

/// Mapped notification fields, keyed by output field name.
///
/// Values are JSON-shaped: strings for `static`, `xml_tag` and
/// first-selected `torznab_attr` extractions, arrays for all-selected ones,
/// and null when nothing was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationPayload {
    fields: IndexMap<String, Value>,
}

impl NotificationPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Returns the raw value of a field, if set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns a field as a string slice, when present and textual.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Returns a field as an unsigned integer, accepting numeric strings.
    pub fn get_u64(&self, name: &str) -> Option<u64> {
        match self.fields.get(name)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Iterates over all fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of mapped fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields were mapped.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_accessors() {
        let mut payload = NotificationPayload::new();
        payload.insert("title", json!("Release"));
        payload.insert("ping_user", json!("123"));
        payload.insert("categories", json!(["5040", "5000"]));
        payload.insert("missing", Value::Null);

        assert_eq!(payload.get_str("title"), Some("Release"));
        assert_eq!(payload.get_u64("ping_user"), Some(123));
        assert_eq!(payload.get_str("categories"), None);
        assert_eq!(payload.get_str("missing"), None);
        assert!(payload.get("absent").is_none());
        assert_eq!(payload.len(), 4);
    }

    #[test]
    fn iterates_in_insertion_order() {
        let mut payload = NotificationPayload::new();
        payload.insert("b", json!("1"));
        payload.insert("a", json!("2"));
        let names: Vec<_> = payload.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
