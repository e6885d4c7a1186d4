//! Shared helpers for tests against a mock ServiceNow instance

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use snowbridge::adapters::servicenow::TableClient;
use snowbridge::config::{secret_string, ServiceNowConfig};

/// `Basic base64(admin:admin)`
pub const ADMIN_AUTH: &str = "Basic YWRtaW46YWRtaW4=";

/// A mock instance answering Table and Batch API calls
pub struct MockInstance {
    pub server: ServerGuard,
}

impl MockInstance {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub fn config(&self) -> ServiceNowConfig {
        ServiceNowConfig::new(self.url(), "admin", secret_string("admin".to_string()))
    }

    pub fn client(&self) -> TableClient {
        TableClient::new(&self.config()).expect("client builds for mock instance")
    }

    /// Serves `records` from `path` in pages of `page_size`, with the total
    /// count header set
    pub async fn mock_pages(&mut self, path: &str, records: &[Value], page_size: usize) -> Vec<Mock> {
        let total = records.len();
        let mut mocks = Vec::new();

        for (i, page) in records.chunks(page_size).enumerate() {
            let offset = i * page_size;
            let mock = self
                .server
                .mock("GET", path)
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("sysparm_offset".into(), offset.to_string()),
                    Matcher::UrlEncoded("sysparm_limit".into(), page_size.to_string()),
                ]))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_header("x-total-count", &total.to_string())
                .with_body(json!({ "result": page }).to_string())
                .expect(1)
                .create_async()
                .await;
            mocks.push(mock);
        }

        mocks
    }
}

/// A `sys_user` record as returned by the Table API
pub fn user_json(i: usize) -> Value {
    json!({
        "sys_id": format!("user{i:04}"),
        "user_name": format!("user.{i}"),
        "email": format!("user.{i}@example.com"),
        "active": "true",
        "manager": {
            "link": "https://dev12345.service-now.com/api/now/table/sys_user/6816f79cc0a8016401c5a33be04be441",
            "value": "6816f79cc0a8016401c5a33be04be441"
        },
        "department": ""
    })
}

/// A `sys_user_group` record
pub fn group_json(id: &str, name: &str) -> Value {
    json!({ "sys_id": id, "name": name, "active": "true" })
}

/// A `sys_user_grmember` record
pub fn membership_json(id: &str, user: &str, group: &str) -> Value {
    json!({
        "sys_id": id,
        "user": { "link": format!("https://x/api/now/table/sys_user/{user}"), "value": user },
        "group": { "link": format!("https://x/api/now/table/sys_user_group/{group}"), "value": group }
    })
}
