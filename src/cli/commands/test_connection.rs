//! Test connection command implementation

use super::{connect, EXIT_CONNECTION, EXIT_OK};
use crate::adapters::servicenow::TableApi;
use clap::Args;

/// Arguments for the test-connection command
#[derive(Args, Debug)]
pub struct TestConnectionArgs {}

impl TestConnectionArgs {
    /// Execute the test-connection command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, client) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        tracing::info!(base_url = %client.base_url(), "Testing connection");
        println!("🔌 Connecting to {}", config.servicenow.base_url);

        if client.test_service().await {
            println!("✅ Connection successful");
            Ok(EXIT_OK)
        } else {
            println!("❌ Connection failed");
            Ok(EXIT_CONNECTION)
        }
    }
}
