//! Field mapper
//!
//! Bidirectional conversion between the host's flat attribute bag and a
//! [`Resource`]. Conversion is driven by the static schema table: the
//! [`FieldKind`] of each field decides how a value is read or written, so
//! there is no per-field-name branching here.
//!
//! Attribute names are the external lower_snake_case names. Internal field
//! identifiers are lowerCamelCase; [`to_camel_case`] and [`to_snake_case`]
//! translate between the two.

use crate::domain::attribute::{Attribute, AttributeValue, ATTR_ID, ATTR_MEMBER_OF};
use crate::domain::resource::{FieldValue, Resource};
use crate::domain::schema::{FieldDef, FieldKind, FIELDS};
use crate::domain::{ReferenceValue, SysId};
use std::collections::HashMap;
use std::sync::LazyLock;

static BY_INTERNAL_NAME: LazyLock<HashMap<String, &'static FieldDef>> =
    LazyLock::new(|| FIELDS.iter().map(|def| (to_camel_case(def.name), def)).collect());

/// Converts a lower_snake_case name to lowerCamelCase.
///
/// Names without an underscore, and names containing a double underscore,
/// are returned unchanged. The latter tag synthetic attributes that must
/// never collide with real fields.
///
/// ```
/// use snowbridge::core::mapper::to_camel_case;
///
/// assert_eq!(to_camel_case("cost_center"), "costCenter");
/// assert_eq!(to_camel_case("__GROUPS__"), "__GROUPS__");
/// ```
pub fn to_camel_case(name: &str) -> String {
    if !name.contains('_') || name.contains("__") {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len());
    for part in name.split('_').filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            if out.is_empty() {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Converts a lowerCamelCase name to lower_snake_case
///
/// ```
/// use snowbridge::core::mapper::to_snake_case;
///
/// assert_eq!(to_snake_case("costCenter"), "cost_center");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.extend(c.to_lowercase());
    }
    out
}

/// Resolves an attribute name (snake_case or camelCase) to a schema field
pub fn resolve_field(name: &str) -> Option<&'static FieldDef> {
    BY_INTERNAL_NAME.get(&to_camel_case(name)).copied()
}

/// Whether an attribute is a write-only marker rather than a real field
pub fn is_synthetic(name: &str) -> bool {
    name.contains("__") || name.eq_ignore_ascii_case(ATTR_MEMBER_OF)
}

/// Converts a record into attributes.
///
/// Absent and empty fields are omitted entirely, so hosts can diff attribute
/// sets without seeing placeholder values. References are emitted as their
/// value token; booleans stay booleans.
pub fn to_attributes(resource: &Resource) -> Vec<Attribute> {
    let mut attributes = Vec::with_capacity(resource.len() + 1);

    if let Some(id) = resource.sys_id() {
        attributes.push(Attribute::single(ATTR_ID, id.as_str()));
    }

    for (def, value) in resource.iter() {
        let value = match value {
            FieldValue::Text(s) => AttributeValue::Text(s.clone()),
            FieldValue::Flag(b) => AttributeValue::Bool(*b),
            FieldValue::Reference(r) => AttributeValue::Text(r.value().to_string()),
        };
        attributes.push(Attribute::single(def.name, value));
    }

    attributes
}

/// Populates a record from attributes.
///
/// Only the first value of each attribute is consulted: every field is
/// single-valued. Synthetic attributes (double-underscore names and
/// `memberOf`) are skipped, as are empty attributes and names with no
/// matching field.
pub fn from_attributes(attributes: &[Attribute], resource: &mut Resource) {
    for attribute in attributes {
        let name = attribute.name.as_str();

        let Some(first) = attribute.first() else {
            continue;
        };

        if is_synthetic(name) {
            tracing::debug!(attribute = name, "Skipping synthetic attribute");
            continue;
        }

        if name == ATTR_ID {
            match SysId::new(first.to_string()) {
                Ok(id) => resource.set_sys_id(id),
                Err(e) => tracing::warn!(error = %e, "Ignoring invalid identifier attribute"),
            }
            continue;
        }

        let Some(def) = resolve_field(name) else {
            tracing::debug!(attribute = name, "No resource field matches attribute, skipping");
            continue;
        };

        match convert(def, first) {
            Some(value) => resource.put(def, value),
            None => tracing::warn!(
                attribute = name,
                value = %first,
                "Attribute value does not fit field kind, skipping"
            ),
        }
    }
}

fn convert(def: &FieldDef, value: &AttributeValue) -> Option<FieldValue> {
    match def.kind {
        FieldKind::Text => Some(FieldValue::Text(value.to_string())),
        FieldKind::Flag => value.as_bool().map(FieldValue::Flag),
        FieldKind::Reference => Some(FieldValue::Reference(ReferenceValue::new(value.to_string()))),
    }
}
