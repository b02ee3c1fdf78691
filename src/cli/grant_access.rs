//! Grant-access operation: converge one membership to a role.

use std::io::{self, Write};

use gitlab_warden::WardenConfig;
use gitlab_warden::gitlab::{
    ApiBase, GitLabGateway, MembershipReconciler, PersonalAccessToken, RestGateway, WardenError,
};

use super::output::write_reconcile_report;
use super::{RunStatus, connect};

/// Grants the configured role to the configured user.
///
/// # Errors
///
/// Returns [`WardenError::Configuration`] if required configuration is
/// missing, [`WardenError::MissingCredential`] without a token, or
/// [`WardenError::Io`] if the report cannot be written. A failed
/// reconciliation is written and yields [`RunStatus::Reported`].
pub async fn run(config: &WardenConfig) -> Result<RunStatus, WardenError> {
    let mut stdout = io::stdout().lock();
    run_with_gateway_builder(config, RestGateway::for_token, &mut stdout).await
}

/// Grants access using a custom gateway builder.
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
    let request = config.membership_request()?;
    let gateway = connect(config, build_gateway)?;

    let report = MembershipReconciler::new(&gateway)
        .reconcile(&request)
        .await;
    write_reconcile_report(writer, &report)?;

    Ok(RunStatus::from_success(report.is_success()))
}
