//! gitlab-warden CLI entrypoint.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use gitlab_warden::config::OperationMode;
use gitlab_warden::{WardenConfig, WardenError};

use crate::cli::RunStatus;
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    // A missing `.env` is normal.
    drop(dotenvy::dotenv());
    init_tracing();

    match run().await {
        Ok(RunStatus::Succeeded) => ExitCode::SUCCESS,
        Ok(RunStatus::Reported) => ExitCode::FAILURE,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected mode.
///
/// Errors returned here were not part of any report and still need
/// printing.
async fn run() -> Result<RunStatus, WardenError> {
    let config = load_config()?;

    match config.operation_mode() {
        OperationMode::GrantAccess => cli::grant_access::run(&config).await,
        OperationMode::CollectItems => cli::collect_items::run(&config).await,
        OperationMode::Interactive => cli::interactive::run(&config)
            .await
            .map(|()| RunStatus::Succeeded),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`WardenError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<WardenConfig, WardenError> {
    WardenConfig::load().map_err(|error| WardenError::Configuration {
        message: error.to_string(),
    })
}

/// Logs go to stderr so that stdout carries only results.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();
}
