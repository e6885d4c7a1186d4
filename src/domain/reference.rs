//! Reference values
//!
//! A reference field names another record by identifier. On the wire it is an
//! object `{"link": "...", "value": "..."}`; only `value` matters for
//! comparison and round-tripping.

use serde_json::Value;
use std::fmt;
use url::Url;

/// A "link + resolved value" pair for foreign-key-like fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceValue {
    link: Option<Url>,
    value: String,
}

impl ReferenceValue {
    /// Creates a reference carrying only a value token
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            link: None,
            value: value.into(),
        }
    }

    /// Sets the informational link
    pub fn with_link(mut self, link: Url) -> Self {
        self.link = Some(link);
        self
    }

    /// Returns the identifier/display token
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the link, if the server supplied one
    pub fn link(&self) -> Option<&Url> {
        self.link.as_ref()
    }

    /// Whether the value token is blank
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Decodes a reference from its wire representation.
    ///
    /// Returns `None` for bare strings, nulls, and objects without a string
    /// `value`. A bare string is a known quirk of the remote service (it is
    /// sent when a reference is empty or display values are requested) and is
    /// not an error.
    pub fn from_wire(raw: &Value) -> Option<Self> {
        match raw {
            Value::Object(map) => {
                let value = map.get("value").and_then(Value::as_str)?;
                let link = map
                    .get("link")
                    .and_then(Value::as_str)
                    .and_then(|l| Url::parse(l).ok());
                Some(Self {
                    link,
                    value: value.to_string(),
                })
            }
            Value::String(s) => {
                tracing::trace!(value = %s, "Reference represented as a string value, treating as absent");
                None
            }
            _ => None,
        }
    }

    /// Wire representation used on write: the bare value token.
    ///
    /// The link is never sent back.
    pub fn to_wire(&self) -> Value {
        Value::String(self.value.clone())
    }
}

impl fmt::Display for ReferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_wire_object() {
        let raw = json!({
            "link": "https://dev.service-now.com/api/now/table/sys_user/abc",
            "value": "abc"
        });
        let reference = ReferenceValue::from_wire(&raw).unwrap();
        assert_eq!(reference.value(), "abc");
        assert_eq!(
            reference.link().map(Url::as_str),
            Some("https://dev.service-now.com/api/now/table/sys_user/abc")
        );
    }

    #[test]
    fn test_from_wire_bare_string_is_absent() {
        assert!(ReferenceValue::from_wire(&json!("abc")).is_none());
        assert!(ReferenceValue::from_wire(&json!("")).is_none());
    }

    #[test]
    fn test_from_wire_other_shapes() {
        assert!(ReferenceValue::from_wire(&Value::Null).is_none());
        assert!(ReferenceValue::from_wire(&json!({"link": "https://x.y/z"})).is_none());
        assert!(ReferenceValue::from_wire(&json!(42)).is_none());
    }

    #[test]
    fn test_from_wire_invalid_link_is_dropped() {
        let reference = ReferenceValue::from_wire(&json!({"link": "not a url", "value": "v"})).unwrap();
        assert_eq!(reference.value(), "v");
        assert!(reference.link().is_none());
    }

    #[test]
    fn test_to_wire_ignores_link() {
        let reference = ReferenceValue::new("grp-1")
            .with_link(Url::parse("https://example.com/grp-1").unwrap());
        assert_eq!(reference.to_wire(), json!("grp-1"));
        assert_eq!(reference.to_string(), "grp-1");
    }
}
