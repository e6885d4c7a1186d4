//! Generic attribute model
//!
//! The identity-management host describes objects as a flat bag of named,
//! multi-valued, loosely typed attributes. This module provides that model
//! and the well-known attribute names the connector understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier attribute name (same as the wire field)
pub const ATTR_ID: &str = "sys_id";

/// Username attribute name
pub const ATTR_USERNAME: &str = "user_name";

/// Display-name attribute name
pub const ATTR_NAME: &str = "name";

/// Synthetic "member of" attribute, never a real field
pub const ATTR_MEMBER_OF: &str = "memberOf";

/// Host-level group-membership pseudo-attribute
pub const ATTR_GROUPS: &str = "__GROUPS__";

/// Host-level naming attribute
pub const ATTR_HOST_NAME: &str = "__NAME__";

/// Host-level unique identifier attribute
pub const ATTR_HOST_UID: &str = "__UID__";

/// Host-level password attribute
pub const ATTR_PASSWORD: &str = "__PASSWORD__";

/// Host-level enabled/disabled status attribute
pub const ATTR_ENABLE: &str = "__ENABLE__";

/// An untyped attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean value
    Bool(bool),

    /// Integer value
    Int(i64),

    /// String value
    Text(String),
}

impl AttributeValue {
    /// Returns the string slice when this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces the value to a boolean.
    ///
    /// Text values are accepted when they spell `true`/`false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Text(s) => s.trim().parse().ok(),
            AttributeValue::Int(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

/// A named attribute with an ordered list of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub name: String,

    /// Ordered values (may be empty)
    pub values: Vec<AttributeValue>,
}

impl Attribute {
    /// Creates an attribute with the given values
    pub fn new(name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a single-valued attribute
    pub fn single(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::new(name, vec![value.into()])
    }

    /// Returns the first value, if any
    pub fn first(&self) -> Option<&AttributeValue> {
        self.values.first()
    }

    /// Returns the first value as a string, stringifying non-text values
    pub fn first_string(&self) -> Option<String> {
        self.first().map(ToString::to_string)
    }
}

/// Finds an attribute by exact name
pub fn find<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.name == name)
}

/// Finds an attribute by name and returns its first value as a non-blank string
pub fn find_string(attributes: &[Attribute], name: &str) -> Option<String> {
    find(attributes, name)
        .and_then(Attribute::first_string)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_value_coercions() {
        assert_eq!(AttributeValue::from("true").as_bool(), Some(true));
        assert_eq!(AttributeValue::from(false).as_bool(), Some(false));
        assert_eq!(AttributeValue::from("yes").as_bool(), None);
        assert_eq!(AttributeValue::from(7i64).as_bool(), None);
        assert_eq!(AttributeValue::from("x").as_str(), Some("x"));
        assert_eq!(AttributeValue::from(true).as_str(), None);
    }

    #[test]
    fn test_attribute_value_display() {
        assert_eq!(AttributeValue::from(true).to_string(), "true");
        assert_eq!(AttributeValue::from(12i64).to_string(), "12");
        assert_eq!(AttributeValue::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_find_string() {
        let attrs = vec![
            Attribute::single(ATTR_USERNAME, "jdoe"),
            Attribute::single(ATTR_NAME, "  "),
            Attribute::new(ATTR_GROUPS, vec![]),
        ];
        assert_eq!(find_string(&attrs, ATTR_USERNAME), Some("jdoe".to_string()));
        assert_eq!(find_string(&attrs, ATTR_NAME), None);
        assert_eq!(find_string(&attrs, ATTR_GROUPS), None);
        assert!(find(&attrs, ATTR_GROUPS).is_some());
    }

    #[test]
    fn test_attribute_value_untagged_serde() {
        let values: Vec<AttributeValue> = serde_json::from_str(r#"["a", true, 3]"#).unwrap();
        assert_eq!(
            values,
            vec![
                AttributeValue::from("a"),
                AttributeValue::from(true),
                AttributeValue::from(3i64)
            ]
        );
    }
}
