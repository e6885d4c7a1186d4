//! CLI interface and argument parsing

pub mod commands;

use crate::config::{LoggingConfig, SnowbridgeConfig};
use clap::{Parser, Subcommand};

/// snowbridge - ServiceNow Table API provisioning connector
#[derive(Parser, Debug)]
#[command(name = "snowbridge")]
#[command(version, about, long_about = None)]
#[command(author = "snowbridge contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "snowbridge.toml", env = "SNOWBRIDGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SNOWBRIDGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging settings for the process.
    ///
    /// `--log-level` wins over `[application].log_level`. Without a loadable
    /// configuration the process logs to the console at `info`.
    pub fn logging_settings(&self, config: Option<&SnowbridgeConfig>) -> (String, LoggingConfig) {
        let level = self
            .log_level
            .clone()
            .or_else(|| config.map(|c| c.application.log_level.clone()))
            .unwrap_or_else(|| "info".to_string());
        let logging = config.map(|c| c.logging.clone()).unwrap_or_default();
        (level, logging)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Check that the instance answers with the configured credentials
    TestConnection(commands::test_connection::TestConnectionArgs),

    /// List one page of a table as JSON
    List(commands::list::ListArgs),

    /// Fetch one record as JSON
    Get(commands::get::GetArgs),
}

impl Commands {
    /// Execute the command against the configuration at `config_path`
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::ValidateConfig(args) => args.execute(config_path).await,
            Commands::TestConnection(args) => args.execute(config_path).await,
            Commands::List(args) => args.execute(config_path).await,
            Commands::Get(args) => args.execute(config_path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::servicenow::ResourceTable;

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["snowbridge", "validate-config"]);
        assert_eq!(cli.config, "snowbridge.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["snowbridge", "--config", "custom.toml", "test-connection"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::TestConnection(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["snowbridge", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    fn file_logging_config() -> SnowbridgeConfig {
        toml::from_str(
            r#"
[application]
log_level = "warn"

[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = "admin"

[logging]
local_enabled = true
local_path = "/var/log/snowbridge"
local_rotation = "hourly"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_logging_settings_from_config() {
        let config = file_logging_config();

        let cli = Cli::parse_from(["snowbridge", "validate-config"]);
        let (level, logging) = cli.logging_settings(Some(&config));
        assert_eq!(level, "warn");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_path, "/var/log/snowbridge");
        assert_eq!(logging.local_rotation, "hourly");

        let cli = Cli::parse_from(["snowbridge", "--log-level", "debug", "validate-config"]);
        let (level, logging) = cli.logging_settings(Some(&config));
        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
    }

    #[test]
    fn test_logging_settings_without_config() {
        let cli = Cli::parse_from(["snowbridge", "validate-config"]);
        let (level, logging) = cli.logging_settings(None);
        assert_eq!(level, "info");
        assert!(!logging.local_enabled);
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from([
            "snowbridge",
            "list",
            "sys_user_group",
            "--query",
            "active=true",
            "--offset",
            "10",
            "--limit",
            "5",
        ]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.table, ResourceTable::UserGroup);
                assert_eq!(args.query.as_deref(), Some("active=true"));
                assert_eq!(args.offset, 10);
                assert_eq!(args.limit, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_get() {
        let cli = Cli::parse_from(["snowbridge", "get", "sys_user", "6816f79cc0a8016401c5a33be04be441"]);
        match cli.command {
            Commands::Get(args) => {
                assert_eq!(args.table, ResourceTable::User);
                assert_eq!(args.id, "6816f79cc0a8016401c5a33be04be441");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_table() {
        assert!(Cli::try_parse_from(["snowbridge", "list", "incident"]).is_err());
    }
}
