//! Loosely-typed access to dataset items.
//!
//! Actor output has no guaranteed shape: any key may be absent, `null`, or
//! hold an unexpected type. [`RawRecord`] exposes each lookup as a [`Field`]
//! so "not there" is a value the caller matches on instead of an error.

use serde_json::Value;

/// Result of looking up one field on a [`RawRecord`]. `null` counts as missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Missing,
    Present(&'a Value),
}

impl<'a> Field<'a> {
    fn from_lookup(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(v) => Self::Present(v),
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Text rendering: strings as-is, numbers and booleans in JSON form.
    /// Arrays and objects are treated as missing.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Present(Value::String(s)) => Some(s.clone()),
            Self::Present(Value::Number(n)) => Some(n.to_string()),
            Self::Present(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Only a JSON string, with no coercion.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Present(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value; numeric strings such as `"1200"` are accepted.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Present(Value::Number(n)) => n.as_f64(),
            Self::Present(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// One dataset item as returned by the actor.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord(Value);

impl RawRecord {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Top-level field.
    #[must_use]
    pub fn field(&self, key: &str) -> Field<'_> {
        Field::from_lookup(self.0.get(key))
    }

    /// Field of a nested object, e.g. `channel.username`. Missing when the
    /// outer value is absent or not an object.
    #[must_use]
    pub fn nested(&self, outer: &str, inner: &str) -> Field<'_> {
        Field::from_lookup(self.0.get(outer).and_then(|o| o.as_object()?.get(inner)))
    }

    /// Whether `key` appears on this record at all, even as `null`.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.0.as_object().is_some_and(|o| o.contains_key(key))
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_field_present() {
        let record = RawRecord::new(json!({ "channel": { "username": "Mia" } }));
        assert_eq!(
            record.nested("channel", "username").as_text().as_deref(),
            Some("Mia")
        );
    }

    #[test]
    fn nested_field_missing_when_outer_is_not_object() {
        let record = RawRecord::new(json!({ "channel": "mia" }));
        assert!(record.nested("channel", "username").is_missing());
    }

    #[test]
    fn null_counts_as_missing_but_key_is_present() {
        let record = RawRecord::new(json!({ "views": null }));
        assert!(record.field("views").is_missing());
        assert!(record.has_key("views"));
        assert!(!record.has_key("bookmarks"));
    }

    #[test]
    fn as_number_accepts_numeric_strings() {
        let record = RawRecord::new(json!({ "a": 12, "b": " 3.5 ", "c": "lots", "d": [1] }));
        assert_eq!(record.field("a").as_number(), Some(12.0));
        assert_eq!(record.field("b").as_number(), Some(3.5));
        assert_eq!(record.field("c").as_number(), None);
        assert_eq!(record.field("d").as_number(), None);
    }

    #[test]
    fn as_str_does_not_coerce_numbers() {
        let record = RawRecord::new(json!({ "bio": 42 }));
        assert_eq!(record.field("bio").as_str(), None);
        assert_eq!(record.field("bio").as_text().as_deref(), Some("42"));
    }

    #[test]
    fn non_object_record_has_no_keys() {
        let record = RawRecord::new(json!([1, 2, 3]));
        assert!(!record.has_key("channel"));
        assert!(record.field("channel").is_missing());
    }
}
