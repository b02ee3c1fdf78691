//! `reqwest` client construction helpers for gateway implementations.

use std::time::Duration;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::gitlab::error::WardenError;
use crate::gitlab::locator::PersonalAccessToken;

/// Header GitLab reads personal access tokens from.
pub(super) const PRIVATE_TOKEN: HeaderName = HeaderName::from_static("private-token");

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builds an HTTP client that authenticates every request with `token`.
///
/// # Errors
///
/// Returns `WardenError::Configuration` when the token is not a valid header
/// value or the client cannot be constructed.
pub(super) fn build_http_client(token: &PersonalAccessToken) -> Result<Client, WardenError> {
    let mut value =
        HeaderValue::from_str(token.value()).map_err(|error| WardenError::Configuration {
            message: format!("token is not a valid header value: {error}"),
        })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(PRIVATE_TOKEN, value);

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|error| WardenError::Configuration {
            message: format!("failed to configure GitLab HTTP client: {error}"),
        })
}
