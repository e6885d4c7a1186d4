//! Get command implementation

use super::{connect, exit_code_for, print_json, EXIT_CONFIG, EXIT_OK};
use crate::adapters::servicenow::{ResourceTable, TableApi};
use crate::domain::SysId;
use clap::Args;

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Table holding the record
    pub table: ResourceTable,

    /// Record sys_id
    pub id: String,
}

impl GetArgs {
    /// Execute the get command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let id = match SysId::new(self.id.trim()) {
            Ok(id) => id,
            Err(e) => {
                eprintln!("❌ Invalid sys_id: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let (_, client) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match client.get(self.table, &id).await {
            Ok(record) => {
                print_json(&record.to_wire())?;
                Ok(EXIT_OK)
            }
            Err(e) => {
                if e.is_not_found() {
                    eprintln!("❌ No {} record with sys_id {id}", self.table);
                } else {
                    crate::log_error_with_context!(&e, format!("fetching {}/{id}", self.table));
                    eprintln!("❌ Failed to fetch record");
                    eprintln!("   Error: {e}");
                }
                Ok(exit_code_for(&e))
            }
        }
    }
}
