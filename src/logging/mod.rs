//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output on stderr
//! - optional JSON file output with rotation
//! - level from configuration, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use snowbridge::logging::init_logging;
//! use snowbridge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a provisioning operation
///
/// # Example
///
/// ```no_run
/// use snowbridge::log_operation_start;
///
/// log_operation_start!("create", "sys_user");
/// log_operation_start!("update", "sys_user", "6816f79cc0a8016401c5a33be04be441");
/// ```
#[macro_export]
macro_rules! log_operation_start {
    ($operation:expr, $table:expr) => {
        tracing::info!(
            operation = $operation,
            table = %$table,
            "Starting operation"
        );
    };
    ($operation:expr, $table:expr, $id:expr) => {
        tracing::info!(
            operation = $operation,
            table = %$table,
            sys_id = %$id,
            "Starting operation"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use snowbridge::log_error_with_context;
/// use snowbridge::domain::ConnectorError;
///
/// let error = ConnectorError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

/// Log submission of a membership batch
///
/// # Example
///
/// ```no_run
/// use snowbridge::log_batch_submitted;
///
/// log_batch_submitted!("0d6f1a2e-batch", 3);
/// ```
#[macro_export]
macro_rules! log_batch_submitted {
    ($batch_id:expr, $operations:expr) => {
        tracing::info!(
            batch_id = %$batch_id,
            operations = $operations,
            "Submitting batch"
        );
    };
}
