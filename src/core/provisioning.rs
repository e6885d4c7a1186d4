//! Provisioning operations
//!
//! [`Provisioner`] is the entry point an identity-management host drives:
//! create, update, delete and search accounts and groups expressed as flat
//! attribute bags. It maps attributes onto records, calls the Table API and
//! maintains user group memberships through [`super::membership`].

use super::mapper;
use super::membership;
use crate::adapters::servicenow::{BatchResponse, ListQuery, ResourceTable, TableApi, TableClient};
use crate::config::ServiceNowConfig;
use crate::domain::attribute::{
    self, Attribute, AttributeValue, ATTR_ENABLE, ATTR_GROUPS, ATTR_HOST_NAME, ATTR_HOST_UID,
    ATTR_ID, ATTR_NAME, ATTR_PASSWORD, ATTR_USERNAME,
};
use crate::domain::{ConnectorError, Resource, Result, SysId, TableApiError};
use crate::{log_error_with_context, log_operation_start};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Page size for unpaged full scans when none is configured
pub const DEFAULT_SCAN_PAGE_SIZE: u64 = 100;

/// Kind of object the host manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A user account (`sys_user`)
    Account,
    /// A user group (`sys_user_group`)
    Group,
}

impl ObjectKind {
    /// Table holding objects of this kind
    pub fn table(&self) -> ResourceTable {
        match self {
            ObjectKind::Account => ResourceTable::User,
            ObjectKind::Group => ResourceTable::UserGroup,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Account => f.write_str("account"),
            ObjectKind::Group => f.write_str("group"),
        }
    }
}

/// Search criteria
///
/// Only equality is pushed to the server. Hosts translate any other filter
/// to [`SearchQuery::All`] and filter the results themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchQuery {
    /// Full scan
    #[default]
    All,
    /// Records whose attribute equals the attribute's first value
    Equals(Attribute),
}

/// Search options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Attributes to return; `None` returns every populated attribute.
    /// Include `__GROUPS__` to fetch an account's group ids.
    pub attributes_to_get: Option<Vec<String>>,

    /// Page size for a paged full scan
    pub page_size: Option<u64>,

    /// Cookie returned by the previous page
    pub paged_results_cookie: Option<String>,
}

impl SearchOptions {
    fn wants(&self, name: &str) -> bool {
        self.attributes_to_get
            .as_ref()
            .map_or(true, |names| names.iter().any(|n| n == name))
    }
}

/// One object returned by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorObject {
    /// Object kind
    pub kind: ObjectKind,
    /// Remote identifier
    pub uid: SysId,
    /// `user_name`, falling back to `name`
    pub name: Option<String>,
    /// Selected attributes
    pub attributes: Vec<Attribute>,
}

/// Outcome of a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Matching objects, in server order
    pub objects: Vec<ConnectorObject>,

    /// Cookie for the next page; `None` on the last page and for unpaged
    /// searches
    pub paged_results_cookie: Option<String>,

    /// Total matches reported by the server, for paged scans
    pub total_count: Option<u64>,
}

/// Provisioning facade over a [`TableApi`]
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use snowbridge::adapters::servicenow::TableClient;
/// use snowbridge::config::{secret_string, ServiceNowConfig};
/// use snowbridge::core::provisioning::{ObjectKind, Provisioner};
/// use snowbridge::domain::Attribute;
///
/// # async fn example() -> snowbridge::domain::Result<()> {
/// let config = ServiceNowConfig::new(
///     "https://dev12345.service-now.com",
///     "admin",
///     secret_string("password".to_string()),
/// );
/// let provisioner = Provisioner::new(Arc::new(TableClient::new(&config)?));
/// // or: Provisioner::from_config(&config)?
///
/// let uid = provisioner
///     .create(
///         ObjectKind::Account,
///         &[
///             Attribute::single("user_name", "abel.tuter"),
///             Attribute::single("email", "abel.tuter@example.com"),
///             Attribute::new("__GROUPS__", vec!["477a05d153013010b846ddeeff7b1225".into()]),
///         ],
///     )
///     .await?;
/// println!("created {uid}");
/// # Ok(())
/// # }
/// ```
pub struct Provisioner {
    api: Arc<dyn TableApi>,
    scan_page_size: u64,
}

impl Provisioner {
    /// Creates a provisioner with the default scan page size
    pub fn new(api: Arc<dyn TableApi>) -> Self {
        Self {
            api,
            scan_page_size: DEFAULT_SCAN_PAGE_SIZE,
        }
    }

    /// Creates a provisioner talking to the instance in `config`
    pub fn from_config(config: &ServiceNowConfig) -> Result<Self> {
        let client = TableClient::new(config)?;
        Ok(Self::new(Arc::new(client)).with_scan_page_size(config.page_size))
    }

    /// Sets the page size used to walk unpaged full scans
    pub fn with_scan_page_size(mut self, page_size: u64) -> Self {
        self.scan_page_size = page_size.max(1);
        self
    }

    /// The underlying Table API
    pub fn api(&self) -> &dyn TableApi {
        self.api.as_ref()
    }

    /// Whether the remote service answers
    pub async fn test(&self) -> bool {
        self.api.test_service().await
    }

    /// Creates an account or group, returning its identifier.
    ///
    /// For accounts, `__GROUPS__` values become memberships submitted as one
    /// batch after the record exists. A failed batch, or one with failed or
    /// unserviced sub-requests, is reported as an error but the created
    /// record is kept.
    pub async fn create(&self, kind: ObjectKind, attributes: &[Attribute]) -> Result<SysId> {
        let table = kind.table();
        log_operation_start!("create", table);

        if attributes.is_empty() {
            return Err(ConnectorError::Validation(
                "Set of attributes is empty".to_string(),
            ));
        }

        let mut record = build_record(attributes)?;
        self.api.create(table, &mut record).await?;

        let uid = record.sys_id().cloned().ok_or_else(|| {
            ConnectorError::Other(format!("{table} record was created without an identifier"))
        })?;

        match kind {
            ObjectKind::Account => {
                let groups = desired_groups(attributes);
                let applied = membership::assign_groups(self.api.as_ref(), &uid, &groups)
                    .await
                    .and_then(|response| ensure_batch_applied(&uid, response));
                if let Err(e) = applied {
                    log_error_with_context!(&e, format!("assigning groups to new user {uid}"));
                    return Err(e);
                }
            }
            ObjectKind::Group => warn_ignored_groups(kind, attributes),
        }

        Ok(uid)
    }

    /// Updates an account or group, returning its identifier.
    ///
    /// For accounts, every existing membership is deleted and the
    /// `__GROUPS__` values (if any) are added back, in one batch. Failed or
    /// unserviced sub-requests are reported as an error.
    pub async fn update(
        &self,
        kind: ObjectKind,
        uid: &str,
        attributes: &[Attribute],
    ) -> Result<SysId> {
        let table = kind.table();
        let uid = parse_uid(uid)?;
        log_operation_start!("update", table, uid);

        if attributes.is_empty() {
            return Err(ConnectorError::Validation(
                "Set of attributes is empty".to_string(),
            ));
        }

        let mut record = build_record(attributes)?;
        record.set_sys_id(uid.clone());

        let updated = self.api.update(table, &record).await?;
        let uid = updated.sys_id().cloned().unwrap_or(uid);

        match kind {
            ObjectKind::Account => {
                let groups = desired_groups(attributes);
                let applied = membership::replace_groups(self.api.as_ref(), &uid, &groups)
                    .await
                    .and_then(|response| ensure_batch_applied(&uid, response));
                if let Err(e) = applied {
                    log_error_with_context!(&e, format!("replacing groups of user {uid}"));
                    return Err(e);
                }
            }
            ObjectKind::Group => warn_ignored_groups(kind, attributes),
        }

        Ok(uid)
    }

    /// Deletes an account or group
    pub async fn delete(&self, kind: ObjectKind, uid: &str) -> Result<()> {
        let table = kind.table();
        let uid = parse_uid(uid)?;
        log_operation_start!("delete", table, uid);

        self.api.delete(table, &uid).await
    }

    /// Group ids of a user
    pub async fn memberships_of(&self, user_id: &SysId) -> Result<Vec<String>> {
        membership::group_ids_of(self.api.as_ref(), user_id).await
    }

    /// Searches accounts or groups
    ///
    /// Equality on `__UID__`/`sys_id` is a direct fetch, and a missing
    /// record yields an empty result. Equality on `__NAME__` matches `name`,
    /// then `user_name` for accounts, returning the first match. Equality on
    /// any other schema field is passed to the server as a query.
    pub async fn search(
        &self,
        kind: ObjectKind,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> Result<SearchResult> {
        let table = kind.table();
        log_operation_start!("search", table);

        match query {
            SearchQuery::All => self.scan(kind, options).await,
            SearchQuery::Equals(key) => {
                let Some(value) = key.first_string().filter(|v| !v.trim().is_empty()) else {
                    return Err(ConnectorError::Validation(format!(
                        "Search attribute {} has no value",
                        key.name
                    )));
                };

                let records = self.lookup(kind, &key.name, &value).await?;
                let mut objects = Vec::with_capacity(records.len());
                for record in &records {
                    objects.push(self.to_object(kind, record, options).await?);
                }

                Ok(SearchResult {
                    objects,
                    ..SearchResult::default()
                })
            }
        }
    }

    async fn lookup(&self, kind: ObjectKind, name: &str, value: &str) -> Result<Vec<Resource>> {
        let table = kind.table();

        if name == ATTR_HOST_UID || name == ATTR_ID {
            let id = parse_uid(value)?;
            return match self.api.get(table, &id).await {
                Ok(record) => Ok(vec![record]),
                Err(e) if e.is_not_found() => Ok(Vec::new()),
                Err(e) => Err(e),
            };
        }

        if name == ATTR_HOST_NAME {
            let mut found = self.list_where(table, ATTR_NAME, value).await?;
            if found.is_empty() && kind == ObjectKind::Account {
                found = self.list_where(table, ATTR_USERNAME, value).await?;
            }
            found.truncate(1);
            return Ok(found);
        }

        let Some(field) = mapper::resolve_field(name) else {
            return Err(ConnectorError::Validation(format!(
                "Cannot search on unknown attribute {name}"
            )));
        };
        self.list_where(table, field.name, value).await
    }

    async fn list_where(
        &self,
        table: ResourceTable,
        field: &str,
        value: &str,
    ) -> Result<Vec<Resource>> {
        let query = ListQuery::new().filter(format!("{field}={}", escape_query_value(value)));
        Ok(self.api.list(table, &query).await?.into_items())
    }

    async fn scan(&self, kind: ObjectKind, options: &SearchOptions) -> Result<SearchResult> {
        let table = kind.table();

        if let Some(page_size) = options.page_size.filter(|p| *p > 0) {
            let offset = parse_cookie(options.paged_results_cookie.as_deref())?;

            let page = self
                .api
                .list(table, &ListQuery::new().page(offset, page_size))
                .await?;
            let cookie = page.next_offset(offset, page_size).map(|next| next.to_string());
            let total_count = page.total_count;

            let mut objects = Vec::with_capacity(page.len());
            for record in &page.items {
                objects.push(self.to_object(kind, record, options).await?);
            }

            return Ok(SearchResult {
                objects,
                paged_results_cookie: cookie,
                total_count,
            });
        }

        let mut objects = Vec::new();
        let mut offset = Some(0);
        while let Some(current) = offset {
            let page = self
                .api
                .list(table, &ListQuery::new().page(current, self.scan_page_size))
                .await?;
            offset = page.next_offset(current, self.scan_page_size);

            for record in &page.items {
                objects.push(self.to_object(kind, record, options).await?);
            }
        }

        Ok(SearchResult {
            objects,
            ..SearchResult::default()
        })
    }

    async fn to_object(
        &self,
        kind: ObjectKind,
        record: &Resource,
        options: &SearchOptions,
    ) -> Result<ConnectorObject> {
        let uid = record.sys_id().cloned().ok_or_else(|| {
            ConnectorError::Remote(crate::domain::TableApiError::MalformedResponse(format!(
                "{} record without {ATTR_ID}",
                kind.table()
            )))
        })?;

        let mut attributes: Vec<Attribute> = mapper::to_attributes(record)
            .into_iter()
            .filter(|a| options.wants(&a.name))
            .collect();

        let wants_groups = options
            .attributes_to_get
            .as_ref()
            .is_some_and(|names| names.iter().any(|n| n == ATTR_GROUPS));
        if kind == ObjectKind::Account && wants_groups {
            let groups = membership::group_ids_of(self.api.as_ref(), &uid).await?;
            attributes.push(Attribute::new(
                ATTR_GROUPS,
                groups.into_iter().map(AttributeValue::from).collect(),
            ));
        }

        Ok(ConnectorObject {
            kind,
            name: record.display_name().map(str::to_string),
            uid,
            attributes,
        })
    }
}

/// Maps host attributes onto a new record.
///
/// `user_name` and `name` come from their attributes, with `__NAME__`
/// standing in for `name` when both are blank. `__PASSWORD__` becomes
/// `user_password` and `__ENABLE__` becomes `active`.
fn build_record(attributes: &[Attribute]) -> Result<Resource> {
    let mut record = Resource::new();

    let username = attribute::find_string(attributes, ATTR_USERNAME);
    let mut name = attribute::find_string(attributes, ATTR_NAME);
    if username.is_none() && name.is_none() {
        name = attribute::find_string(attributes, ATTR_HOST_NAME);
    }
    if let Some(username) = username {
        record.set_text(ATTR_USERNAME, username)?;
    }
    if let Some(name) = name {
        record.set_text(ATTR_NAME, name)?;
    }

    match attribute::find(attributes, ATTR_ENABLE).and_then(Attribute::first) {
        Some(value) => match value.as_bool() {
            Some(active) => record.set_flag("active", active)?,
            None => tracing::warn!(
                value = %value,
                "{ATTR_ENABLE} is not a boolean, status left unchanged"
            ),
        },
        None => tracing::debug!("No {ATTR_ENABLE} attribute, status left unchanged"),
    }

    mapper::from_attributes(attributes, &mut record);

    match attribute::find_string(attributes, ATTR_PASSWORD) {
        Some(password) => record.set_text("user_password", password)?,
        None => tracing::debug!("No password attribute"),
    }

    Ok(record)
}

fn desired_groups(attributes: &[Attribute]) -> Vec<String> {
    attribute::find(attributes, ATTR_GROUPS)
        .map(|groups| {
            groups
                .values
                .iter()
                .map(ToString::to_string)
                .filter(|g| !g.trim().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn warn_ignored_groups(kind: ObjectKind, attributes: &[Attribute]) {
    if attribute::find(attributes, ATTR_GROUPS).is_some() {
        tracing::warn!(kind = %kind, "{ATTR_GROUPS} only applies to accounts, ignoring");
    }
}

/// Turns a membership batch with failed or unserviced sub-requests into a
/// `RequestFailed` naming them and the user
fn ensure_batch_applied(uid: &SysId, response: Option<BatchResponse>) -> Result<()> {
    let Some(response) = response else {
        return Ok(());
    };

    let failed: Vec<_> = response.failed_requests().collect();
    if failed.is_empty() && response.unserviced_requests.is_empty() {
        return Ok(());
    }

    let failed_ids: Vec<String> = failed
        .iter()
        .map(|r| format!("{} ({})", r.id, r.status_code))
        .collect();
    tracing::error!(
        user_id = %uid,
        batch_id = %response.batch_request_id,
        failed = ?failed_ids,
        unserviced = ?response.unserviced_requests,
        "Membership changes were not fully applied"
    );

    Err(TableApiError::RequestFailed {
        status: failed.first().map(|r| r.status_code),
        message: format!(
            "membership batch {} for user {uid}: failed [{}], unserviced [{}]",
            response.batch_request_id,
            failed_ids.join(", "),
            response.unserviced_requests.join(", ")
        ),
    }
    .into())
}

fn parse_uid(uid: &str) -> Result<SysId> {
    let uid = uid.trim();
    if uid.is_empty() {
        return Err(ConnectorError::Validation(
            "Uid value not provided or empty".to_string(),
        ));
    }
    SysId::new(uid).map_err(ConnectorError::Validation)
}

/// Offset encoded in a paged results cookie; no cookie starts at zero
fn parse_cookie(cookie: Option<&str>) -> Result<u64> {
    match cookie.map(str::trim) {
        None | Some("") => Ok(0),
        Some(cookie) => cookie.parse::<u64>().map_err(|_| {
            ConnectorError::Validation(format!("Invalid paged results cookie: {cookie}"))
        }),
    }
}

/// Escapes a literal for an encoded query, where `^` separates conditions
fn escape_query_value(value: &str) -> String {
    value.replace('^', "^^")
}
