//! Configuration schema types
//!
//! This module defines the configuration structure for snowbridge.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Largest page the Table API accepts for `sysparm_limit`
pub const MAX_PAGE_SIZE: u64 = 10_000;

/// Main snowbridge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnowbridgeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote Table API connection
    pub servicenow: ServiceNowConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SnowbridgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.servicenow.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Table API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceNowConfig {
    /// Instance root, e.g. `https://dev12345.service-now.com`
    pub base_url: String,

    /// Basic-auth user
    pub username: String,

    /// Basic-auth password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// TLS certificate verification enabled
    ///
    /// Only disable this against development instances with self-signed
    /// certificates.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Page size used for full scans that don't specify one
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl ServiceNowConfig {
    /// Creates a configuration with default transport settings
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password,
            tls_verify: true,
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }

    /// Validates the connection settings
    pub fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.trim().is_empty() {
            return Err("servicenow.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("servicenow.base_url must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!(
                "servicenow.base_url '{}' is not a valid URL",
                self.base_url
            ));
        }

        if self.username.trim().is_empty() {
            return Err("servicenow.username cannot be empty".to_string());
        }

        if self.password.expose_secret().as_ref().trim().is_empty() {
            return Err("servicenow.password cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("servicenow.timeout_seconds must be > 0".to_string());
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "servicenow.page_size must be between 1 and {MAX_PAGE_SIZE}"
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> u64 {
    100
}

fn default_local_path() -> String {
    "/var/log/snowbridge".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
