//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`SysId`])
//! - **The attribute model** ([`Attribute`], [`AttributeValue`]) used by the
//!   identity-management host
//! - **The record model** ([`Resource`], [`ReferenceValue`], the static
//!   [`schema`] table)
//! - **Envelopes** ([`PagedResult`], [`BatchRequest`], [`BatchOperation`])
//! - **Error types** ([`ConnectorError`], [`TableApiError`]) and the
//!   [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use snowbridge::domain::{ReferenceValue, Resource};
//!
//! # fn example() -> snowbridge::domain::Result<()> {
//! let mut user = Resource::new();
//! user.set_text("user_name", "abel.tuter")?;
//! user.set_flag("active", true)?;
//! user.set_reference("manager", ReferenceValue::new("62826bf03710200044e0bfc8bcbe5df1"))?;
//!
//! assert!(user.sys_id().is_none());
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod batch;
pub mod errors;
pub mod ids;
pub mod paged;
pub mod reference;
pub mod resource;
pub mod result;
pub mod schema;

pub use attribute::{Attribute, AttributeValue};
pub use batch::{BatchHeader, BatchOperation, BatchRequest, HttpMethod};
pub use errors::{ConnectorError, TableApiError};
pub use ids::SysId;
pub use paged::PagedResult;
pub use reference::ReferenceValue;
pub use resource::{FieldValue, Resource};
pub use result::Result;
pub use schema::{FieldDef, FieldKind};
