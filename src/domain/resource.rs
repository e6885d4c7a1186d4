//! Resource record model
//!
//! [`Resource`] is the canonical in-memory form of one remote record (a user,
//! a group, or a group membership). Field storage is keyed by the static
//! schema table in [`crate::domain::schema`], so there is no per-field
//! accessor boilerplate and no runtime type inspection.

use super::errors::ConnectorError;
use super::ids::SysId;
use super::reference::ReferenceValue;
use super::result::Result;
use super::schema::{self, FieldDef, FieldKind, FIELDS, ID_FIELD};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A populated field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// String scalar
    Text(String),

    /// Boolean scalar
    Flag(bool),

    /// Reference to another record
    Reference(ReferenceValue),
}

impl FieldValue {
    /// The schema kind this value satisfies
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Reference(_) => FieldKind::Reference,
        }
    }

    /// Whether the value is blank and should be treated as absent
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(_) => false,
            FieldValue::Reference(r) => r.is_empty(),
        }
    }

    fn to_wire(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Flag(b) => Value::Bool(*b),
            FieldValue::Reference(r) => r.to_wire(),
        }
    }
}

/// One remote record
///
/// The identifier is `None` only for records that have not been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    sys_id: Option<SysId>,
    fields: BTreeMap<&'static str, FieldValue>,
}

impl Resource {
    /// Creates an empty, unpersisted record
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record bound to an existing identifier
    pub fn with_sys_id(sys_id: SysId) -> Self {
        Self {
            sys_id: Some(sys_id),
            fields: BTreeMap::new(),
        }
    }

    /// Returns the server-assigned identifier
    pub fn sys_id(&self) -> Option<&SysId> {
        self.sys_id.as_ref()
    }

    /// Replaces the identifier
    pub fn set_sys_id(&mut self, sys_id: SysId) {
        self.sys_id = Some(sys_id);
    }

    /// Returns a populated field value
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Sets a field, checking the name and kind against the schema table.
    ///
    /// Empty values clear the field.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let def = schema::field(name)
            .ok_or_else(|| ConnectorError::Validation(format!("Unknown resource field: {name}")))?;

        if def.kind != value.kind() {
            return Err(ConnectorError::Validation(format!(
                "Field {name} expects a {:?} value, got {:?}",
                def.kind,
                value.kind()
            )));
        }

        self.put(def, value);
        Ok(())
    }

    /// Sets a text field
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.set(name, FieldValue::Text(value.into()))
    }

    /// Sets a boolean field
    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<()> {
        self.set(name, FieldValue::Flag(value))
    }

    /// Sets a reference field
    pub fn set_reference(&mut self, name: &str, value: ReferenceValue) -> Result<()> {
        self.set(name, FieldValue::Reference(value))
    }

    pub(crate) fn put(&mut self, def: &'static FieldDef, value: FieldValue) {
        if value.is_empty() {
            self.fields.remove(def.name);
        } else {
            self.fields.insert(def.name, value);
        }
    }

    /// Returns a text field
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns a boolean field
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.fields.get(name) {
            Some(FieldValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns a reference field
    pub fn reference(&self, name: &str) -> Option<&ReferenceValue> {
        match self.fields.get(name) {
            Some(FieldValue::Reference(r)) => Some(r),
            _ => None,
        }
    }

    /// Display name of the record: `user_name` when set, otherwise `name`
    pub fn display_name(&self) -> Option<&str> {
        self.text("user_name").or_else(|| self.text("name"))
    }

    /// Iterates populated fields in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldDef, &FieldValue)> + '_ {
        FIELDS
            .iter()
            .filter_map(move |def| self.fields.get(def.name).map(|v| (def, v)))
    }

    /// Number of populated fields (identifier excluded)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is populated (identifier excluded)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encodes the record as a wire object, omitting absent and empty fields
    pub fn to_wire(&self) -> Value {
        let mut map = Map::new();
        if let Some(id) = &self.sys_id {
            map.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        }
        for (def, value) in self.iter() {
            map.insert(def.name.to_string(), value.to_wire());
        }
        Value::Object(map)
    }

    /// Decodes a record from a wire object.
    ///
    /// Unknown keys are ignored. Empty strings are treated as absent. A
    /// reference sent as a bare string decodes to absent.
    pub fn from_wire(raw: &Value) -> std::result::Result<Self, String> {
        let map = raw
            .as_object()
            .ok_or_else(|| format!("expected a record object, got {}", json_type(raw)))?;

        let mut resource = Resource::new();

        if let Some(id) = map.get(ID_FIELD).and_then(Value::as_str) {
            resource.sys_id = SysId::new(id).ok();
        }

        for (key, raw_value) in map {
            let Some(def) = schema::field(key) else {
                continue;
            };
            if let Some(value) = decode_field(def, raw_value) {
                resource.put(def, value);
            }
        }

        Ok(resource)
    }
}

fn decode_field(def: &FieldDef, raw: &Value) -> Option<FieldValue> {
    match def.kind {
        FieldKind::Text => match raw {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
            _ => None,
        },
        FieldKind::Flag => match raw {
            Value::Bool(b) => Some(FieldValue::Flag(*b)),
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => match s.trim().parse::<bool>() {
                Ok(b) => Some(FieldValue::Flag(b)),
                Err(_) => {
                    tracing::debug!(field = def.name, value = %s, "Ignoring non-boolean value for flag field");
                    None
                }
            },
            _ => None,
        },
        FieldKind::Reference => ReferenceValue::from_wire(raw).map(FieldValue::Reference),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Resource::from_wire(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_wire() -> Value {
        json!({
            "sys_id": "6816f79cc0a8016401c5a33be04be441",
            "user_name": "abel.tuter",
            "first_name": "Abel",
            "email": "",
            "active": "true",
            "vip": false,
            "failed_attempts": 3,
            "manager": {
                "link": "https://dev.service-now.com/api/now/table/sys_user/62826bf0",
                "value": "62826bf0"
            },
            "location": "",
            "department": "not-an-object",
            "unknown_field": "ignored"
        })
    }

    #[test]
    fn test_from_wire() {
        let resource = Resource::from_wire(&sample_wire()).unwrap();

        assert_eq!(
            resource.sys_id().map(SysId::as_str),
            Some("6816f79cc0a8016401c5a33be04be441")
        );
        assert_eq!(resource.text("user_name"), Some("abel.tuter"));
        assert_eq!(resource.text("email"), None);
        assert_eq!(resource.flag("active"), Some(true));
        assert_eq!(resource.flag("vip"), Some(false));
        assert_eq!(resource.text("failed_attempts"), Some("3"));
        assert_eq!(resource.reference("manager").map(|r| r.value()), Some("62826bf0"));
        assert!(resource.reference("location").is_none());
        assert!(resource.reference("department").is_none());
        assert_eq!(resource.len(), 6);
    }

    #[test]
    fn test_from_wire_rejects_non_object() {
        assert!(Resource::from_wire(&json!([])).is_err());
        assert!(Resource::from_wire(&Value::Null).is_err());
    }

    #[test]
    fn test_to_wire_omits_empty_and_link() {
        let mut resource = Resource::new();
        resource.set_text("user_name", "jdoe").unwrap();
        resource.set_text("email", "").unwrap();
        resource.set_flag("active", true).unwrap();
        resource
            .set_reference("manager", ReferenceValue::new("mgr-1"))
            .unwrap();

        assert_eq!(
            resource.to_wire(),
            json!({"user_name": "jdoe", "active": true, "manager": "mgr-1"})
        );
    }

    #[test]
    fn test_set_validates_name_and_kind() {
        let mut resource = Resource::new();
        assert!(resource.set_text("no_such_field", "x").is_err());
        assert!(resource.set_text("manager", "x").is_err());
        assert!(resource.set_flag("user_name", true).is_err());
        assert!(resource.is_empty());
    }

    #[test]
    fn test_empty_value_clears_field() {
        let mut resource = Resource::new();
        resource.set_text("title", "Engineer").unwrap();
        resource.set_text("title", " ").unwrap();
        assert!(resource.text("title").is_none());
    }

    #[test]
    fn test_display_name_prefers_user_name() {
        let mut resource = Resource::new();
        resource.set_text("name", "Abel Tuter").unwrap();
        assert_eq!(resource.display_name(), Some("Abel Tuter"));
        resource.set_text("user_name", "abel.tuter").unwrap();
        assert_eq!(resource.display_name(), Some("abel.tuter"));
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let resource: Resource = serde_json::from_value(sample_wire()).unwrap();
        let encoded = serde_json::to_value(&resource).unwrap();
        assert_eq!(encoded["manager"], json!("62826bf0"));
        assert_eq!(encoded["active"], json!(true));
        assert!(encoded.get("unknown_field").is_none());
    }
}
