//! Shared test utilities.

pub mod runtime;

use gitlab_warden::gitlab::{ApiBase, PersonalAccessToken, RestGateway, WardenError};
use wiremock::MockServer;

/// Token every mocked server expects.
pub const TEST_TOKEN: &str = "glpat-bdd";

/// Builds a REST gateway pointed at the mock server.
///
/// # Errors
///
/// Returns an error if the server URI cannot be parsed or the client cannot
/// be built.
pub fn gateway_for(server: &MockServer) -> Result<RestGateway, WardenError> {
    let token = PersonalAccessToken::new(TEST_TOKEN)?;
    let api_base = ApiBase::parse(&server.uri())?;
    RestGateway::for_token(&token, api_base)
}

/// Number of requests the server has seen.
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map_or(0, |requests| requests.len())
}
