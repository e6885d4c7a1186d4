// snowbridge - ServiceNow Table API provisioning connector
// Copyright (c) 2025 snowbridge contributors
// Licensed under the MIT License

use clap::Parser;
use snowbridge::cli::commands::EXIT_FATAL;
use snowbridge::cli::Cli;
use snowbridge::config::load_config;
use snowbridge::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Commands report an unloadable configuration themselves
    let config = load_config(&cli.config).ok();
    let (log_level, logging_config) = cli.logging_settings(config.as_ref());
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "snowbridge starting");

    let exit_code = match cli.command.execute(&cli.config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}
