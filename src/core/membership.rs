//! Group membership batches
//!
//! Membership changes are expressed as one [`BatchRequest`] against
//! `sys_user_grmember`: one POST per desired group, preceded on update by a
//! DELETE for every existing membership of the user. The update is an
//! unconditional replace-all; nothing is diffed. The remote service executes
//! the sub-requests one by one, so a failure part-way leaves the user with a
//! partial membership set.

use crate::adapters::servicenow::{BatchResponse, ListQuery, ResourceTable, TableApi};
use crate::domain::{BatchOperation, BatchRequest, HttpMethod, Resource, Result, SysId};
use serde::Serialize;

/// Body of a membership POST
#[derive(Debug, Serialize)]
struct MembershipBody<'a> {
    user: &'a str,
    group: &'a str,
}

/// Sequential operation ids, starting at `"1"`
#[derive(Debug, Default)]
struct OperationIds(u32);

impl OperationIds {
    fn next(&mut self) -> String {
        self.0 += 1;
        self.0.to_string()
    }
}

fn push_additions(
    batch: &mut BatchRequest,
    ids: &mut OperationIds,
    user_id: &SysId,
    groups: &[String],
) -> Result<()> {
    let path = ResourceTable::UserGroupMembership.path();
    for group in groups {
        let body = MembershipBody {
            user: user_id.as_str(),
            group,
        };
        let op = BatchOperation::new(ids.next(), HttpMethod::Post, path.clone()).with_body(&body)?;
        batch.operations.push(op);
    }
    Ok(())
}

/// Batch adding `user_id` to every group in `groups`
pub fn compose_create(user_id: &SysId, groups: &[String]) -> Result<BatchRequest> {
    let mut batch = BatchRequest::generate();
    let mut ids = OperationIds::default();
    push_additions(&mut batch, &mut ids, user_id, groups)?;
    Ok(batch)
}

/// Batch replacing the user's `existing` memberships with `groups`.
///
/// Existing membership records without an identifier cannot be addressed
/// and are skipped.
pub fn compose_update(
    user_id: &SysId,
    existing: &[Resource],
    groups: &[String],
) -> Result<BatchRequest> {
    let mut batch = BatchRequest::generate();
    let mut ids = OperationIds::default();

    for membership in existing {
        match membership.sys_id() {
            Some(id) => batch.operations.push(BatchOperation::new(
                ids.next(),
                HttpMethod::Delete,
                ResourceTable::UserGroupMembership.record_path(id),
            )),
            None => tracing::warn!(user_id = %user_id, "Skipping membership without sys_id"),
        }
    }

    push_additions(&mut batch, &mut ids, user_id, groups)?;
    Ok(batch)
}

/// Lists the membership records of a user
pub async fn memberships_of<A>(api: &A, user_id: &SysId) -> Result<Vec<Resource>>
where
    A: TableApi + ?Sized,
{
    let query = ListQuery::new().filter(format!("user={user_id}"));
    let page = api.list(ResourceTable::UserGroupMembership, &query).await?;
    Ok(page.into_items())
}

/// Group ids the user belongs to, in server order
pub async fn group_ids_of<A>(api: &A, user_id: &SysId) -> Result<Vec<String>>
where
    A: TableApi + ?Sized,
{
    let memberships = memberships_of(api, user_id).await?;
    Ok(memberships
        .iter()
        .filter_map(|m| m.reference("group"))
        .map(|group| group.value().to_string())
        .collect())
}

/// Submits a batch, unless it is empty
pub async fn submit<A>(api: &A, batch: &BatchRequest) -> Result<Option<BatchResponse>>
where
    A: TableApi + ?Sized,
{
    if batch.is_empty() {
        tracing::debug!(batch_id = %batch.batch_id, "Skipping empty membership batch");
        return Ok(None);
    }

    crate::log_batch_submitted!(batch.batch_id, batch.len());
    api.execute_batch(batch).await.map(Some)
}

/// Adds a newly created user to `groups`
pub async fn assign_groups<A>(
    api: &A,
    user_id: &SysId,
    groups: &[String],
) -> Result<Option<BatchResponse>>
where
    A: TableApi + ?Sized,
{
    let batch = compose_create(user_id, groups)?;
    submit(api, &batch).await
}

/// Replaces every membership of an existing user with `groups`
pub async fn replace_groups<A>(
    api: &A,
    user_id: &SysId,
    groups: &[String],
) -> Result<Option<BatchResponse>>
where
    A: TableApi + ?Sized,
{
    let existing = memberships_of(api, user_id).await?;
    let batch = compose_update(user_id, &existing, groups)?;
    submit(api, &batch).await
}
