//! Configuration management for snowbridge.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `SNOWBRIDGE_*`
//! environment overrides, defaults for optional settings and validation on
//! load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use snowbridge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("snowbridge.toml")?;
//! println!("Instance: {}", config.servicenow.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [servicenow]
//! base_url = "https://dev12345.service-now.com"
//! username = "integration.user"
//! password = "${SNOWBRIDGE_PASSWORD}"
//! timeout_seconds = 60
//! page_size = 100
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/snowbridge"
//! local_rotation = "daily"
//! ```
//!
//! Any key can also be overridden with `SNOWBRIDGE_<SECTION>_<KEY>`, e.g.
//! `SNOWBRIDGE_SERVICENOW_BASE_URL`.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, LoggingConfig, ServiceNowConfig, SnowbridgeConfig};
pub use secret::{basic_auth_header, secret_string, SecretString, SecretValue};
