//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SnowbridgeConfig;
use super::secret::secret_string;
use crate::domain::errors::ConnectorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid"));

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SnowbridgeConfig
/// 4. Applies environment variable overrides (SNOWBRIDGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ConnectorError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is invalid, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use snowbridge::config::loader::load_config;
///
/// let config = load_config("snowbridge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SnowbridgeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConnectorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ConnectorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<SnowbridgeConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SnowbridgeConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ConnectorError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = PLACEHOLDER.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ConnectorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using SNOWBRIDGE_* prefix
///
/// Environment variables follow the pattern: SNOWBRIDGE_<SECTION>_<KEY>
/// For example: SNOWBRIDGE_SERVICENOW_BASE_URL. Values that fail to parse
/// leave the file setting in place.
fn apply_env_overrides(config: &mut SnowbridgeConfig) {
    if let Ok(val) = std::env::var("SNOWBRIDGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("SNOWBRIDGE_SERVICENOW_BASE_URL") {
        config.servicenow.base_url = val;
    }
    if let Ok(val) = std::env::var("SNOWBRIDGE_SERVICENOW_USERNAME") {
        config.servicenow.username = val;
    }
    if let Ok(val) = std::env::var("SNOWBRIDGE_SERVICENOW_PASSWORD") {
        config.servicenow.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("SNOWBRIDGE_SERVICENOW_TLS_VERIFY") {
        if let Ok(verify) = val.parse() {
            config.servicenow.tls_verify = verify;
        }
    }
    if let Ok(val) = std::env::var("SNOWBRIDGE_SERVICENOW_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.servicenow.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("SNOWBRIDGE_SERVICENOW_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.servicenow.page_size = size;
        }
    }

    if let Ok(val) = std::env::var("SNOWBRIDGE_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("SNOWBRIDGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("SNOWBRIDGE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("SNOWBRIDGE_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${SNOWBRIDGE_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("SNOWBRIDGE_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SNOWBRIDGE_LOADER_MISSING_VAR");
        let input = "password = \"${SNOWBRIDGE_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("SNOWBRIDGE_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("SNOWBRIDGE_LOADER_COMMENTED_VAR");
        let input = "# password = \"${SNOWBRIDGE_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = "pass"
page_size = 50
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.servicenow.base_url, "https://dev12345.service-now.com");
        assert_eq!(config.servicenow.password.expose_secret().as_ref(), "pass");
        assert_eq!(config.servicenow.page_size, 50);
        assert!(config.servicenow.tls_verify);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_parse_config_rejects_blank_password() {
        let toml_content = r#"
[servicenow]
base_url = "https://dev12345.service-now.com"
username = "admin"
password = ""
"#;
        let err = parse_config(toml_content).unwrap_err();
        assert!(matches!(err, ConnectorError::Configuration(_)));
        assert!(err.to_string().contains("password"));
    }
}
