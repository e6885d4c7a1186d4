//! List command implementation
//!
//! Prints one page of a table as JSON.

use super::{connect, exit_code_for, print_json, EXIT_OK};
use crate::adapters::servicenow::{ListQuery, ResourceTable, TableApi};
use clap::Args;
use serde::Serialize;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Table to list (sys_user, sys_user_group, sys_user_grmember)
    pub table: ResourceTable,

    /// Encoded query, e.g. `active=true^user_nameSTARTSWITHa`
    #[arg(short, long)]
    pub query: Option<String>,

    /// Index of the first record
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Maximum number of records; defaults to the configured page size
    #[arg(long)]
    pub limit: Option<u64>,
}

#[derive(Serialize)]
struct ListOutput {
    table: ResourceTable,
    offset: u64,
    count: usize,
    total_count: Option<u64>,
    next_offset: Option<u64>,
    records: Vec<serde_json::Value>,
}

impl ListArgs {
    fn to_query(&self, default_limit: u64) -> ListQuery {
        let query = ListQuery::new().page(self.offset, self.limit.unwrap_or(default_limit));
        match &self.query {
            Some(filter) => query.filter(filter.clone()),
            None => query,
        }
    }

    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, client) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let query = self.to_query(config.servicenow.page_size);
        let limit = query.limit.unwrap_or(config.servicenow.page_size);

        let page = match client.list(self.table, &query).await {
            Ok(page) => page,
            Err(e) => {
                crate::log_error_with_context!(&e, format!("listing {}", self.table));
                eprintln!("❌ Failed to list {}", self.table);
                eprintln!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let output = ListOutput {
            table: self.table,
            offset: self.offset,
            count: page.len(),
            total_count: page.total_count,
            next_offset: page.next_offset(self.offset, limit),
            records: page.items.iter().map(|r| r.to_wire()).collect(),
        };
        print_json(&output)?;
        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_query_defaults() {
        let args = ListArgs {
            table: ResourceTable::User,
            query: None,
            offset: 0,
            limit: None,
        };
        let query = args.to_query(100);
        assert_eq!(query.offset, Some(0));
        assert_eq!(query.limit, Some(100));
        assert!(query.filter.is_none());
    }

    #[test]
    fn test_to_query_with_filter() {
        let args = ListArgs {
            table: ResourceTable::UserGroup,
            query: Some("active=true".to_string()),
            offset: 20,
            limit: Some(10),
        };
        let query = args.to_query(100);
        assert_eq!(query.filter.as_deref(), Some("active=true"));
        assert_eq!(query.offset, Some(20));
        assert_eq!(query.limit, Some(10));
    }
}
