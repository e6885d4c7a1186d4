//! Batch request model
//!
//! A batch bundles independent HTTP sub-requests into a single call to the
//! remote batch endpoint. The remote service executes them one by one; the
//! batch is *not* transactional.

use super::result::Result;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of a batched sub-request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// A name/value header pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
    /// Header name
    pub name: String,
    /// Header value
    pub value: String,
}

impl BatchHeader {
    /// Creates a header
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `Content-Type: application/json`
    pub fn json_content_type() -> Self {
        Self::new("Content-Type", "application/json")
    }
}

/// One sub-request of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOperation {
    /// Identifier, unique within the batch
    pub id: String,

    /// HTTP method
    pub method: HttpMethod,

    /// Path relative to the service root, e.g. `/api/now/table/sys_user`
    pub url: String,

    /// Ordered request headers
    pub headers: Vec<BatchHeader>,

    /// Base64-encoded JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl BatchOperation {
    /// Creates a body-less operation with a JSON content-type header
    pub fn new(id: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            method,
            url: url.into(),
            headers: vec![BatchHeader::json_content_type()],
            body: None,
        }
    }

    /// Attaches a body, encoded as base64 JSON
    pub fn with_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(general_purpose::STANDARD.encode(json));
        Ok(self)
    }

    /// Decodes the body back into JSON
    pub fn decoded_body(&self) -> Option<serde_json::Value> {
        let bytes = general_purpose::STANDARD.decode(self.body.as_ref()?).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// A complete batch submitted in one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Client-chosen batch identifier, echoed back by the server
    #[serde(rename = "batch_request_id")]
    pub batch_id: String,

    /// Sub-requests, executed in order
    #[serde(rename = "rest_requests")]
    pub operations: Vec<BatchOperation>,
}

impl BatchRequest {
    /// Creates an empty batch with the given identifier
    pub fn new(batch_id: impl Into<String>) -> Self {
        Self {
            batch_id: batch_id.into(),
            operations: Vec::new(),
        }
    }

    /// Creates an empty batch with a random identifier
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// Whether the batch has no operations
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_wire_shape() {
        let op = BatchOperation::new("1", HttpMethod::Post, "/api/now/table/sys_user_grmember")
            .with_body(&json!({"user": "u1", "group": "g1"}))
            .unwrap();

        let wire = serde_json::to_value(&op).unwrap();
        assert_eq!(wire["id"], "1");
        assert_eq!(wire["method"], "POST");
        assert_eq!(wire["url"], "/api/now/table/sys_user_grmember");
        assert_eq!(
            wire["headers"],
            json!([{"name": "Content-Type", "value": "application/json"}])
        );
        assert_eq!(op.decoded_body(), Some(json!({"user": "u1", "group": "g1"})));
    }

    #[test]
    fn test_operation_without_body_omits_field() {
        let op = BatchOperation::new("2", HttpMethod::Delete, "/api/now/table/sys_user_grmember/m1");
        let wire = serde_json::to_value(&op).unwrap();
        assert!(wire.get("body").is_none());
        assert_eq!(wire["method"], "DELETE");
    }

    #[test]
    fn test_request_wire_names() {
        let mut request = BatchRequest::new("batch-1");
        request
            .operations
            .push(BatchOperation::new("1", HttpMethod::Get, "/api/now/table/sys_user"));

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["batch_request_id"], "batch-1");
        assert_eq!(wire["rest_requests"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_generate_unique_ids() {
        let a = BatchRequest::generate();
        let b = BatchRequest::generate();
        assert_ne!(a.batch_id, b.batch_id);
        assert!(a.is_empty());
    }
}
