//! Static record schema
//!
//! The remote record shape is fixed and known at build time. Every field the
//! connector reads or writes is declared once in [`FIELDS`] together with its
//! [`FieldKind`]; conversion code dispatches on the kind tag instead of on
//! field names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// External (wire) name of the record identifier
pub const ID_FIELD: &str = "sys_id";

/// How a field's value is represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Plain string scalar
    Text,

    /// Boolean scalar (the wire may carry `"true"`/`"false"` strings)
    Flag,

    /// Reference to another record, carried as `{link, value}` on the wire
    Reference,
}

/// One entry of the schema table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// External lower_snake_case name used on the wire and in attributes
    pub name: &'static str,

    /// Value representation
    pub kind: FieldKind,
}

impl FieldDef {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    const fn flag(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Flag,
        }
    }

    const fn reference(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Reference,
        }
    }

    /// Whether this field holds a reference value
    pub fn is_reference(&self) -> bool {
        self.kind == FieldKind::Reference
    }
}

/// All fields of a resource record, excluding the identifier.
///
/// The same shape is shared by users, groups and group memberships; each
/// table simply leaves the fields it doesn't know about empty.
pub static FIELDS: &[FieldDef] = &[
    // task / incident fields
    FieldDef::text("upon_approval"),
    FieldDef::text("expected_start"),
    FieldDef::text("reopen_count"),
    FieldDef::text("close_notes"),
    FieldDef::text("additional_assignee_list"),
    FieldDef::text("impact"),
    FieldDef::text("urgency"),
    FieldDef::text("correlation_id"),
    FieldDef::text("sys_tags"),
    FieldDef::text("description"),
    FieldDef::text("group_list"),
    FieldDef::text("priority"),
    FieldDef::text("delivery_plan"),
    FieldDef::text("sys_mod_count"),
    FieldDef::text("work_notes_list"),
    FieldDef::text("business_service"),
    FieldDef::text("follow_up"),
    FieldDef::text("closed_at"),
    FieldDef::text("sla_due"),
    FieldDef::text("delivery_task"),
    FieldDef::text("sys_updated_on"),
    FieldDef::text("work_end"),
    FieldDef::text("number"),
    FieldDef::text("closed_by"),
    FieldDef::text("work_start"),
    FieldDef::text("calendar_stc"),
    FieldDef::text("category"),
    FieldDef::text("business_duration"),
    FieldDef::text("incident_state"),
    FieldDef::text("activity_due"),
    FieldDef::text("correlation_display"),
    FieldDef::flag("active"),
    FieldDef::text("due_date"),
    FieldDef::flag("knowledge"),
    FieldDef::flag("made_sla"),
    FieldDef::text("comments_and_work_notes"),
    FieldDef::text("parent_incident"),
    FieldDef::text("state"),
    FieldDef::text("user_input"),
    FieldDef::text("sys_created_on"),
    FieldDef::text("approval_set"),
    FieldDef::text("reassignment_count"),
    FieldDef::text("rfc"),
    FieldDef::text("child_incidents"),
    FieldDef::text("opened_at"),
    FieldDef::text("short_description"),
    FieldDef::text("order"),
    FieldDef::text("sys_updated_by"),
    FieldDef::text("resolved_by"),
    FieldDef::text("notify"),
    FieldDef::text("upon_reject"),
    FieldDef::text("approval_history"),
    FieldDef::text("problem_id"),
    FieldDef::text("work_notes"),
    FieldDef::text("calendar_duration"),
    FieldDef::text("close_code"),
    FieldDef::text("approval"),
    FieldDef::text("caused_by"),
    FieldDef::text("severity"),
    FieldDef::text("sys_created_by"),
    FieldDef::text("resolved_at"),
    FieldDef::text("assigned_to"),
    FieldDef::text("business_stc"),
    FieldDef::text("wf_activity"),
    FieldDef::text("sys_domain_path"),
    FieldDef::text("subcategory"),
    FieldDef::text("rejection_goto"),
    FieldDef::text("sys_class_name"),
    FieldDef::text("watch_list"),
    FieldDef::text("time_worked"),
    FieldDef::text("contact_type"),
    FieldDef::text("escalation"),
    FieldDef::text("comments"),
    // user / group fields
    FieldDef::text("calendar_integration"),
    FieldDef::text("country"),
    FieldDef::text("user_password"),
    FieldDef::text("last_login_time"),
    FieldDef::text("source"),
    FieldDef::text("building"),
    FieldDef::flag("web_service_access_only"),
    FieldDef::text("notification"),
    FieldDef::flag("enable_multifactor_authn"),
    FieldDef::flag("vip"),
    FieldDef::text("zip"),
    FieldDef::text("home_phone"),
    FieldDef::text("time_format"),
    FieldDef::text("last_login"),
    FieldDef::text("phone"),
    FieldDef::text("name"),
    FieldDef::text("employee_number"),
    FieldDef::flag("password_needs_reset"),
    FieldDef::text("gender"),
    FieldDef::text("city"),
    FieldDef::text("failed_attempts"),
    FieldDef::text("user_name"),
    FieldDef::text("roles"),
    FieldDef::text("title"),
    FieldDef::flag("internal_integration_user"),
    FieldDef::text("ldap_server"),
    FieldDef::text("mobile_phone"),
    FieldDef::text("street"),
    FieldDef::text("first_name"),
    FieldDef::text("email"),
    FieldDef::text("introduction"),
    FieldDef::text("preferred_language"),
    FieldDef::flag("locked_out"),
    FieldDef::text("last_name"),
    FieldDef::text("photo"),
    FieldDef::text("middle_name"),
    FieldDef::text("time_zone"),
    FieldDef::text("date_format"),
    // references
    FieldDef::reference("schedule"),
    FieldDef::reference("manager"),
    FieldDef::reference("department"),
    FieldDef::reference("cost_center"),
    FieldDef::reference("opened_by"),
    FieldDef::reference("sys_domain"),
    FieldDef::reference("caller_id"),
    FieldDef::reference("location"),
    FieldDef::reference("company"),
    FieldDef::reference("assignment_group"),
    FieldDef::reference("cmdb_ci"),
    FieldDef::reference("default_perspective"),
    FieldDef::reference("parent"),
    // membership fields
    FieldDef::reference("user"),
    FieldDef::reference("group"),
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static FieldDef>> =
    LazyLock::new(|| FIELDS.iter().map(|def| (def.name, def)).collect());

/// Look up a field by its external (snake_case) name
pub fn field(name: &str) -> Option<&'static FieldDef> {
    BY_NAME.get(name).copied()
}
