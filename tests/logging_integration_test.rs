//! Integration tests for logging functionality
//!
//! A global subscriber can be installed once per process, so only one test
//! here calls `init_logging`.

use snowbridge::config::LoggingConfig;
use snowbridge::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/snowbridge");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_init_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists());
    let guard = init_logging("debug", &config).expect("Failed to initialize logging");
    assert!(guard.has_file_writer());
    assert!(log_path.is_dir());

    tracing::info!("written to the rolling file");
    snowbridge::log_operation_start!("search", "sys_user");

    // a second subscriber cannot be installed
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}

#[test]
fn test_init_logging_rejects_unknown_level() {
    assert!(init_logging("loud", &LoggingConfig::default()).is_err());
}
