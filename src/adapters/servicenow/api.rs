//! Table API trait definition
//!
//! [`TableApi`] abstracts the remote record store so the provisioning flows
//! can run against the HTTP client or a test double.

use super::models::BatchResponse;
use super::table::ResourceTable;
use crate::domain::{BatchRequest, PagedResult, Resource, Result, SysId};
use async_trait::async_trait;

/// Parameters of a list call
///
/// With neither `offset` nor `limit` set, the server's default page is
/// returned and no paging parameters are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Encoded query, sent verbatim as `sysparm_query`
    pub filter: Option<String>,

    /// Zero-based index of the first record
    pub offset: Option<u64>,

    /// Maximum number of records to return
    pub limit: Option<u64>,

    /// Page backward (`rel=prev`) instead of forward
    pub backward: bool,
}

impl ListQuery {
    /// Unfiltered, unpaged query
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the encoded query
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets offset and limit
    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    /// Pages backward
    pub fn backward(mut self) -> Self {
        self.backward = true;
        self
    }

    /// Whether paging parameters should be sent
    pub fn is_paged(&self) -> bool {
        self.offset.is_some() || self.limit.is_some()
    }

    /// Query-string pairs, in a stable order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(filter) = &self.filter {
            params.push(("sysparm_query", filter.clone()));
        }
        if self.is_paged() {
            params.push(("sysparm_offset", self.offset.unwrap_or(0).to_string()));
            if let Some(limit) = self.limit {
                params.push(("sysparm_limit", limit.to_string()));
            }
            params.push(("rel", if self.backward { "prev" } else { "next" }.to_string()));
        }
        params
    }
}

/// Operations on the remote record store
///
/// Implementations never retry. Each call is one request (or one sequence
/// of requests, for composite flows) and reports failures through
/// [`crate::domain::TableApiError`] wrapped in the crate error.
#[async_trait]
pub trait TableApi: Send + Sync {
    /// Lists records of a table
    async fn list(&self, table: ResourceTable, query: &ListQuery) -> Result<PagedResult<Resource>>;

    /// Fetches one record by identifier
    async fn get(&self, table: ResourceTable, id: &SysId) -> Result<Resource>;

    /// Creates a record.
    ///
    /// On success the server-assigned identifier is written into `resource`
    /// and a copy of the updated record is returned.
    async fn create(&self, table: ResourceTable, resource: &mut Resource) -> Result<Resource>;

    /// Updates an existing record, returning the server's view of it
    async fn update(&self, table: ResourceTable, resource: &Resource) -> Result<Resource>;

    /// Deletes a record
    async fn delete(&self, table: ResourceTable, id: &SysId) -> Result<()>;

    /// Submits a batch of sub-requests in one call
    async fn execute_batch(&self, batch: &BatchRequest) -> Result<BatchResponse>;

    /// Whether the service is reachable and answering. Never fails.
    async fn test_service(&self) -> bool {
        self.list(ResourceTable::User, &ListQuery::new().page(0, 1))
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpaged_params() {
        assert!(ListQuery::new().to_params().is_empty());

        let params = ListQuery::new().filter("user=abc").to_params();
        assert_eq!(params, vec![("sysparm_query", "user=abc".to_string())]);
    }

    #[test]
    fn test_paged_params() {
        let params = ListQuery::new().filter("active=true").page(20, 10).to_params();
        assert_eq!(
            params,
            vec![
                ("sysparm_query", "active=true".to_string()),
                ("sysparm_offset", "20".to_string()),
                ("sysparm_limit", "10".to_string()),
                ("rel", "next".to_string()),
            ]
        );
    }

    #[test]
    fn test_backward_limit_only() {
        let query = ListQuery {
            limit: Some(5),
            ..ListQuery::new().backward()
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("sysparm_offset", "0".to_string()),
                ("sysparm_limit", "5".to_string()),
                ("rel", "prev".to_string()),
            ]
        );
    }
}
