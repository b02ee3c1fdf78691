//! Credential and API base wrappers for the GitLab REST client.

use std::fmt;

use url::Url;

use super::error::WardenError;

/// Default GitLab instance used when no API URL is configured.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `WardenError::MissingCredential` when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, WardenError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WardenError::MissingCredential);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Root of the GitLab `api/v4` REST namespace.
///
/// Accepts either an instance URL (`https://gitlab.example.com`) or a URL
/// that already points at the API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Parses an instance or API URL.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidUrl`] when the URL cannot be parsed or
    /// has no host.
    pub fn parse(input: &str) -> Result<Self, WardenError> {
        let mut url =
            Url::parse(input.trim()).map_err(|error| WardenError::InvalidUrl(error.to_string()))?;
        if url.host_str().is_none() {
            return Err(WardenError::InvalidUrl("URL must include a host".to_owned()));
        }

        let prefix = url.path().trim_matches('/').to_owned();
        let api_path = if prefix.ends_with("api/v4") {
            prefix
        } else if prefix.is_empty() {
            "api/v4".to_owned()
        } else {
            format!("{prefix}/api/v4")
        };
        url.set_path(&api_path);
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self(url))
    }

    /// Builds the absolute URL for an API path such as `users` or
    /// `projects/7/members`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
