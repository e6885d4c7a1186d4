//! Table API HTTP client
//!
//! [`TableClient`] implements [`TableApi`] over reqwest with Basic
//! authentication. All responses go through one classification step
//! before any decoding happens, so every operation reports failures the
//! same way.

use super::api::{ListQuery, TableApi};
use super::html::HtmlDetector;
use super::models::{BatchResponse, RawBatchResponse, TableEnvelope, TOTAL_COUNT_HEADER};
use super::table::{ResourceTable, BATCH_API_PATH};
use crate::config::{basic_auth_header, SecretString, ServiceNowConfig};
use crate::domain::attribute::ATTR_ID;
use crate::domain::{
    BatchRequest, ConnectorError, PagedResult, Resource, Result, SysId, TableApiError,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Statuses accepted by read and write calls
const SUCCESS: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED, StatusCode::ACCEPTED];

/// Statuses accepted by delete
const DELETE_SUCCESS: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// Table API client
///
/// Holds only immutable configuration and a connection pool, so one
/// instance can be shared behind an `Arc`.
///
/// # Example
///
/// ```no_run
/// use snowbridge::adapters::servicenow::{ListQuery, ResourceTable, TableApi, TableClient};
/// use snowbridge::config::{secret_string, ServiceNowConfig};
///
/// # async fn example() -> snowbridge::domain::Result<()> {
/// let config = ServiceNowConfig::new(
///     "https://dev12345.service-now.com",
///     "admin",
///     secret_string("password".to_string()),
/// );
/// let client = TableClient::new(&config)?;
///
/// let page = client
///     .list(ResourceTable::User, &ListQuery::new().filter("active=true").page(0, 50))
///     .await?;
/// println!("{} of {:?} users", page.len(), page.total_count);
/// # Ok(())
/// # }
/// ```
pub struct TableClient {
    base_url: String,
    client: Client,
    authorization: SecretString,
    html: HtmlDetector,
}

/// A classified, successful exchange
struct Exchange {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl TableClient {
    /// Builds a client from connection settings
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Configuration`] if the base URL is invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: &ServiceNowConfig) -> Result<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            ConnectorError::Configuration(format!(
                "Invalid servicenow.base_url '{}': {e}",
                config.base_url
            ))
        })?;

        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for the Table API client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            ConnectorError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            authorization: basic_auth_header(&config.username, &config.password),
            html: HtmlDetector::new(),
        })
    }

    /// Instance root URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header(AUTHORIZATION, self.authorization.expose_secret().as_ref())
            .header(ACCEPT, "application/json")
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
        accepted: &[StatusCode],
    ) -> std::result::Result<Exchange, TableApiError> {
        tracing::debug!(method = %method, path = %path, "Sending Table API request");

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, path = %path, error = %e, "Table API request failed to complete");
            TableApiError::unreachable(e.to_string())
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| TableApiError::unreachable(format!("failed to read response body: {e}")))?;

        classify(&self.html, status, &headers, &body, accepted).map_err(|e| {
            tracing::error!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                body = %body,
                "Table API request rejected"
            );
            match e {
                TableApiError::NotFound(_) => TableApiError::NotFound(path.to_string()),
                other => other,
            }
        })?;

        Ok(Exchange {
            status,
            headers,
            body,
        })
    }
}

/// Classifies a response.
///
/// 404 is `NotFound`. A status outside `accepted`, an HTML content type, or
/// an HTML-looking body is `RequestFailed` carrying the raw body.
fn classify(
    html: &HtmlDetector,
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
    accepted: &[StatusCode],
) -> std::result::Result<(), TableApiError> {
    if status == StatusCode::NOT_FOUND {
        return Err(TableApiError::NotFound(body.to_string()));
    }

    if !accepted.contains(&status) {
        return Err(TableApiError::request_failed(status.as_u16(), body));
    }

    let html_content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("text/html"))
        .unwrap_or(false);

    if html_content_type || html.is_html(body) {
        return Err(TableApiError::request_failed(
            status.as_u16(),
            format!("bad response from service: {body}"),
        ));
    }

    Ok(())
}

fn decode_result(body: &str, context: &str) -> std::result::Result<Value, TableApiError> {
    let envelope: TableEnvelope = serde_json::from_str(body)
        .map_err(|e| TableApiError::MalformedResponse(format!("{context}: {e}")))?;

    envelope
        .result
        .ok_or_else(|| TableApiError::MalformedResponse(format!("{context}: missing result")))
}

fn decode_record(value: &Value, context: &str) -> std::result::Result<Resource, TableApiError> {
    Resource::from_wire(value).map_err(|e| TableApiError::MalformedResponse(format!("{context}: {e}")))
}

fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[async_trait]
impl TableApi for TableClient {
    async fn list(&self, table: ResourceTable, query: &ListQuery) -> Result<PagedResult<Resource>> {
        let path = table.path();
        let request = self.request(Method::GET, &path).query(&query.to_params());
        let exchange = self.send(request, Method::GET, &path, SUCCESS).await?;

        let context = format!("listing {table}");
        let result = decode_result(&exchange.body, &context)?;
        let Value::Array(rows) = result else {
            return Err(TableApiError::MalformedResponse(format!(
                "{context}: expected an array of records"
            ))
            .into());
        };

        let mut items = rows
            .iter()
            .map(|row| decode_record(row, &context))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if let Some(limit) = query.limit {
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            if items.len() > limit {
                tracing::warn!(
                    table = %table,
                    returned = items.len(),
                    limit,
                    "Server returned more records than requested, truncating"
                );
                items.truncate(limit);
            }
        }

        let mut page = PagedResult::new(items);
        if let Some(total) = total_count(&exchange.headers) {
            page = page.with_total_count(total);
        }

        tracing::debug!(table = %table, count = page.len(), total = ?page.total_count, "Listed records");
        Ok(page)
    }

    async fn get(&self, table: ResourceTable, id: &SysId) -> Result<Resource> {
        let path = table.record_path(id);
        let request = self.request(Method::GET, &path);
        let exchange = self.send(request, Method::GET, &path, SUCCESS).await?;

        let context = format!("fetching {table}/{id}");
        let result = decode_result(&exchange.body, &context)?;
        Ok(decode_record(&result, &context)?)
    }

    async fn create(&self, table: ResourceTable, resource: &mut Resource) -> Result<Resource> {
        let path = table.path();
        let request = self.request(Method::POST, &path).json(&resource.to_wire());
        let exchange = self.send(request, Method::POST, &path, SUCCESS).await?;

        let context = format!("creating {table} record");
        let result = decode_result(&exchange.body, &context)?;
        let sys_id = result
            .get(ATTR_ID)
            .and_then(Value::as_str)
            .and_then(|id| SysId::new(id).ok())
            .ok_or_else(|| {
                TableApiError::MalformedResponse(format!(
                    "{context}: response has no {ATTR_ID}: {}",
                    exchange.body
                ))
            })?;

        tracing::debug!(table = %table, sys_id = %sys_id, "Created record");
        resource.set_sys_id(sys_id);
        Ok(resource.clone())
    }

    async fn update(&self, table: ResourceTable, resource: &Resource) -> Result<Resource> {
        let id = resource.sys_id().ok_or_else(|| {
            TableApiError::ValidationFailed(format!("cannot update a {table} record without {ATTR_ID}"))
        })?;

        let path = table.record_path(id);
        let request = self.request(Method::PATCH, &path).json(&resource.to_wire());
        let exchange = self.send(request, Method::PATCH, &path, SUCCESS).await?;

        let context = format!("updating {table}/{id}");
        let result = decode_result(&exchange.body, &context)?;
        Ok(decode_record(&result, &context)?)
    }

    async fn delete(&self, table: ResourceTable, id: &SysId) -> Result<()> {
        let path = table.record_path(id);
        let request = self.request(Method::DELETE, &path);
        let exchange = self.send(request, Method::DELETE, &path, DELETE_SUCCESS).await?;

        tracing::debug!(table = %table, sys_id = %id, status = exchange.status.as_u16(), "Deleted record");
        Ok(())
    }

    async fn execute_batch(&self, batch: &BatchRequest) -> Result<BatchResponse> {
        let request = self.request(Method::POST, BATCH_API_PATH).json(batch);
        let exchange = self.send(request, Method::POST, BATCH_API_PATH, SUCCESS).await?;

        // An empty, null or undecodable body means the batch was never serviced
        let raw = serde_json::from_str::<Option<RawBatchResponse>>(&exchange.body)
            .ok()
            .flatten()
            .unwrap_or_default();

        let (Some(batch_request_id), Some(serviced_requests)) =
            (raw.batch_request_id, raw.serviced_requests)
        else {
            return Err(TableApiError::request_failed(
                exchange.status.as_u16(),
                format!("batch {} was not serviced: {}", batch.batch_id, exchange.body),
            )
            .into());
        };

        let response = BatchResponse {
            batch_request_id,
            serviced_requests,
            unserviced_requests: raw.unserviced_requests,
        };

        for failed in response.failed_requests() {
            tracing::warn!(
                batch_id = %response.batch_request_id,
                request_id = %failed.id,
                status = failed.status_code,
                "Batched request failed"
            );
        }
        if !response.unserviced_requests.is_empty() {
            tracing::warn!(
                batch_id = %response.batch_request_id,
                unserviced = ?response.unserviced_requests,
                "Batch partially serviced"
            );
        }

        Ok(response)
    }

    async fn test_service(&self) -> bool {
        match self.list(ResourceTable::User, &ListQuery::new().page(0, 1)).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Table API service check failed");
                false
            }
        }
    }
}
