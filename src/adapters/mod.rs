//! External system integrations for snowbridge.
//!
//! - [`servicenow`] - Table API client (records, paging, batch endpoint)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. Provisioning flows depend on the
//! [`servicenow::TableApi`] trait rather than on the HTTP client.
//!
//! ```rust,no_run
//! use snowbridge::adapters::servicenow::{TableApi, TableClient};
//! use snowbridge::config::{secret_string, ServiceNowConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceNowConfig::new(
//!     "https://dev12345.service-now.com",
//!     "admin",
//!     secret_string("pass".to_string()),
//! );
//!
//! let client = TableClient::new(&config)?;
//! if !client.test_service().await {
//!     eprintln!("instance unreachable");
//! }
//! # Ok(())
//! # }
//! ```

pub mod servicenow;
