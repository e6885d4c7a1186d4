//! Table API wire envelopes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key wrapping every Table API payload
pub const RESULT_KEY: &str = "result";

/// Response header carrying the total number of matching records
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// `{"result": ...}` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct TableEnvelope {
    /// Record object or array of records; `None` when absent or null
    #[serde(default)]
    pub result: Option<Value>,
}

/// Response of the batch endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Echo of the submitted batch identifier
    pub batch_request_id: String,

    /// Sub-requests the server executed, in execution order
    pub serviced_requests: Vec<ServicedRequest>,

    /// Ids of sub-requests the server skipped
    #[serde(default)]
    pub unserviced_requests: Vec<String>,
}

impl BatchResponse {
    /// Serviced sub-requests whose status is not 2xx
    pub fn failed_requests(&self) -> impl Iterator<Item = &ServicedRequest> {
        self.serviced_requests.iter().filter(|r| !r.is_success())
    }
}

/// Outcome of one executed sub-request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicedRequest {
    /// Sub-request id from the batch
    pub id: String,

    /// HTTP status of the sub-request
    pub status_code: u16,

    /// Status reason phrase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// Base64-encoded response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Server-side execution time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
}

impl ServicedRequest {
    /// Whether the sub-request succeeded
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Partially decoded batch response, used to check the required keys before
/// committing to the full shape
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawBatchResponse {
    #[serde(default)]
    pub batch_request_id: Option<String>,
    #[serde(default)]
    pub serviced_requests: Option<Vec<ServicedRequest>>,
    #[serde(default)]
    pub unserviced_requests: Vec<String>,
}
