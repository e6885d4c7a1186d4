//! Integration tests for configuration loading and validation
//!
//! Every test takes ENV_MUTEX because `SNOWBRIDGE_*` overrides apply to
//! every load in the process.

use secrecy::ExposeSecret;
use snowbridge::config::load_config;
use snowbridge::domain::ConnectorError;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDES: &[&str] = &[
    "SNOWBRIDGE_APPLICATION_LOG_LEVEL",
    "SNOWBRIDGE_SERVICENOW_BASE_URL",
    "SNOWBRIDGE_SERVICENOW_USERNAME",
    "SNOWBRIDGE_SERVICENOW_PASSWORD",
    "SNOWBRIDGE_SERVICENOW_TLS_VERIFY",
    "SNOWBRIDGE_SERVICENOW_TIMEOUT_SECONDS",
    "SNOWBRIDGE_SERVICENOW_PAGE_SIZE",
    "SNOWBRIDGE_LOGGING_LOCAL_ENABLED",
    "SNOWBRIDGE_LOGGING_LOCAL_PATH",
    "SNOWBRIDGE_LOGGING_LOCAL_ROTATION",
    "TEST_SN_PASSWORD",
];

fn cleanup_env_vars() {
    for name in OVERRIDES {
        std::env::remove_var(name);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[servicenow]
base_url = "https://dev12345.service-now.com"
username = "integration.user"
password = "p@ssw0rd"
tls_verify = false
timeout_seconds = 30
page_size = 250

[logging]
local_enabled = true
local_path = "/tmp/snowbridge"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.servicenow.base_url, "https://dev12345.service-now.com");
    assert_eq!(config.servicenow.username, "integration.user");
    assert_eq!(config.servicenow.password.expose_secret().as_ref(), "p@ssw0rd");
    assert!(!config.servicenow.tls_verify);
    assert_eq!(config.servicenow.timeout_seconds, 30);
    assert_eq!(config.servicenow.page_size, 250);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/snowbridge");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = "admin"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert!(config.servicenow.tls_verify);
    assert_eq!(config.servicenow.timeout_seconds, 60);
    assert_eq!(config.servicenow.page_size, 100);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_SN_PASSWORD", "from-environment");

    let file = write_config(
        r#"
# password = "${NOT_SUBSTITUTED_IN_COMMENTS}"
[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = "${TEST_SN_PASSWORD}"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");
    assert_eq!(
        config.servicenow.password.expose_secret().as_ref(),
        "from-environment"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = "${TEST_SN_PASSWORD}"
"#,
    );

    match load_config(file.path()) {
        Err(ConnectorError::Configuration(message)) => {
            assert!(message.contains("TEST_SN_PASSWORD"));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("SNOWBRIDGE_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("SNOWBRIDGE_SERVICENOW_BASE_URL", "https://prod.service-now.com");
    std::env::set_var("SNOWBRIDGE_SERVICENOW_PAGE_SIZE", "500");
    std::env::set_var("SNOWBRIDGE_SERVICENOW_TIMEOUT_SECONDS", "not-a-number");

    let file = write_config(
        r#"
[application]
log_level = "info"

[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = "admin"
timeout_seconds = 45
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.servicenow.base_url, "https://prod.service-now.com");
    assert_eq!(config.servicenow.page_size, 500);
    // unparseable overrides keep the file value
    assert_eq!(config.servicenow.timeout_seconds, 45);

    cleanup_env_vars();
}

#[test]
fn test_override_is_validated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("SNOWBRIDGE_SERVICENOW_PAGE_SIZE", "20000");

    let file = write_config(
        r#"
[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = "admin"
"#,
    );

    let result = load_config(file.path());
    cleanup_env_vars();
    assert!(matches!(result, Err(ConnectorError::Configuration(_))));
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for contents in [
        // unknown log level
        r#"
[application]
log_level = "verbose"

[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = "admin"
"#,
        // blank username
        r#"
[servicenow]
base_url = "https://dev12345.service-now.com"
username = "  "
password = "admin"
"#,
        // not http(s)
        r#"
[servicenow]
base_url = "dev12345.service-now.com"
username = "admin"
password = "admin"
"#,
        // missing section
        r#"
[application]
log_level = "info"
"#,
    ] {
        let file = write_config(contents);
        assert!(
            load_config(file.path()).is_err(),
            "accepted invalid config:\n{contents}"
        );
    }
}
