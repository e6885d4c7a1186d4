//! CLI command implementations
//!
//! Every command returns a process exit code:
//! 0 success, 2 configuration error, 4 connection error, 5 fatal error.

pub mod get;
pub mod list;
pub mod test_connection;
pub mod validate;

use crate::adapters::servicenow::TableClient;
use crate::config::{load_config, SnowbridgeConfig};
use crate::domain::{ConnectorError, TableApiError};

/// Exit code for success
pub const EXIT_OK: i32 = 0;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for connection errors
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Exit code matching an error
pub fn exit_code_for(error: &ConnectorError) -> i32 {
    match error {
        ConnectorError::Configuration(_) | ConnectorError::Validation(_) => EXIT_CONFIG,
        ConnectorError::Remote(TableApiError::RequestFailed { status: None, .. }) => {
            EXIT_CONNECTION
        }
        _ => EXIT_FATAL,
    }
}

/// Loads the configuration and builds a client, printing failures
fn connect(config_path: &str) -> Result<(SnowbridgeConfig, TableClient), i32> {
    let config = load_config(config_path).map_err(|e| {
        eprintln!("❌ Failed to load configuration file");
        eprintln!("   Error: {e}");
        EXIT_CONFIG
    })?;

    let client = TableClient::new(&config.servicenow).map_err(|e| {
        eprintln!("❌ Failed to create ServiceNow client");
        eprintln!("   Error: {e}");
        exit_code_for(&e)
    })?;

    Ok((config, client))
}

/// Prints a value as pretty JSON on stdout
fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
