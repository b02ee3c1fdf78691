//! Collection operation: list a year's issues or merge requests.

use std::io::{self, Write};

use gitlab_warden::WardenConfig;
use gitlab_warden::gitlab::{
    ApiBase, GitLabGateway, PaginatedCollector, PersonalAccessToken, RestGateway, WardenError,
};

use super::output::write_collection_report;
use super::{RunStatus, connect};

/// Collects the configured item kind for the configured year.
///
/// # Errors
///
/// Returns [`WardenError::Configuration`] if required configuration is
/// missing, [`WardenError::MissingCredential`] without a token, or
/// [`WardenError::Io`] if the report cannot be written. When collection
/// stops early the items gathered so far and the summary naming the error
/// are written, and [`RunStatus::Reported`] is returned.
pub async fn run(config: &WardenConfig) -> Result<RunStatus, WardenError> {
    let mut stdout = io::stdout().lock();
    run_with_gateway_builder(config, RestGateway::for_token, &mut stdout).await
}

/// Collects items using a custom gateway builder.
///
/// This function is exposed for testing with mock gateways.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &WardenConfig,
    build_gateway: F,
    writer: &mut W,
) -> Result<RunStatus, WardenError>
where
    G: GitLabGateway,
    F: FnOnce(&PersonalAccessToken, ApiBase) -> Result<G, WardenError>,
    W: Write,
{
    let (item_kind, year) = config.collection_target()?;
    let settings = config.collector_settings()?;
    let gateway = connect(config, build_gateway)?;

    let report = PaginatedCollector::with_settings(&gateway, settings)
        .collect(item_kind, year)
        .await;
    write_collection_report(writer, &report)?;

    Ok(RunStatus::from_success(report.is_complete()))
}
