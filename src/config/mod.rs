//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.warden.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `WARDEN_TOKEN`, `WARDEN_USERNAME`, ... or
//!    the legacy `GITLAB_PRIVATE_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--username`/`-u`, ...
//!
//! # Configuration File
//!
//! ```toml
//! token = "glpat-example"
//! api_url = "https://gitlab.example.com"
//! entity_kind = "group"
//! per_page = 50
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::gitlab::collector::{CollectorSettings, DEFAULT_MAX_PAGES};
use crate::gitlab::error::WardenError;
use crate::gitlab::locator::{ApiBase, DEFAULT_GITLAB_URL, PersonalAccessToken};
use crate::gitlab::membership::MembershipRequest;
use crate::gitlab::pagination::MAX_PER_PAGE;

/// Environment variable read when no token is configured.
pub const LEGACY_TOKEN_ENV: &str = "GITLAB_PRIVATE_TOKEN";

const DEFAULT_ENTITY_KIND: &str = "project";

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Grant or update a membership.
    GrantAccess,
    /// Collect a year's issues or merge requests.
    CollectItems,
    /// Prompt for an operation with the text menu.
    Interactive,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `WARDEN_TOKEN`, `GITLAB_PRIVATE_TOKEN`, or `--token`: Personal access token
/// - `WARDEN_API_URL` or `--api-url`: GitLab instance root
/// - `WARDEN_USERNAME` or `--username`: User to grant access to
/// - `WARDEN_ENTITY` or `--entity`: Project or group name or id
/// - `WARDEN_ROLE` or `--role`: Role name
/// - `WARDEN_ITEM_KIND` or `--item-kind`: `issues` or `mr`
/// - `WARDEN_YEAR` or `--year`: Creation year to collect
///
/// # Example
///
/// ```no_run
/// use gitlab_warden::WardenConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = WardenConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "WARDEN",
    discovery(
        dotfile_name = ".warden.toml",
        config_file_name = "warden.toml",
        app_name = "warden"
    )
)]
pub struct WardenConfig {
    /// Personal access token sent as `PRIVATE-TOKEN`.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `WARDEN_TOKEN` or `GITLAB_PRIVATE_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitLab instance root; `/api/v4` is appended.
    #[ortho_config(cli_short = 'a')]
    pub api_url: String,

    /// Username whose membership is reconciled.
    ///
    /// Setting it selects grant-access mode.
    #[ortho_config(cli_short = 'u')]
    pub username: Option<String>,

    /// Project or group name, or its numeric id.
    #[ortho_config(cli_short = 'e')]
    pub entity: Option<String>,

    /// `project` or `group`.
    #[ortho_config(cli_short = 'k')]
    pub entity_kind: String,

    /// Role name (`Guest`, `Reporter`, `Developer`, `Maintainer`, `Owner`).
    #[ortho_config(cli_short = 'r')]
    pub role: Option<String>,

    /// Kind of item to collect.
    ///
    /// Setting it selects collection mode.
    #[ortho_config(cli_short = 'i')]
    pub item_kind: Option<String>,

    /// Creation year of the collected items.
    #[ortho_config(cli_short = 'y')]
    pub year: Option<i32>,

    /// Items requested per page (1 to 100).
    #[ortho_config()]
    pub per_page: u8,

    /// Last page the collector will request.
    #[ortho_config()]
    pub max_pages: u32,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_GITLAB_URL.to_owned(),
            username: None,
            entity: None,
            entity_kind: DEFAULT_ENTITY_KIND.to_owned(),
            role: None,
            item_kind: None,
            year: None,
            per_page: MAX_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl WardenConfig {
    /// Resolves the token from configuration or the legacy
    /// `GITLAB_PRIVATE_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::MissingCredential`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, WardenError> {
        let raw = self
            .token
            .clone()
            .or_else(|| env::var(LEGACY_TOKEN_ENV).ok())
            .ok_or(WardenError::MissingCredential)?;
        PersonalAccessToken::new(raw)
    }

    /// Parses the configured API URL.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidUrl`] when `api_url` is not an absolute
    /// URL with a host.
    pub fn api_base(&self) -> Result<ApiBase, WardenError> {
        ApiBase::parse(&self.api_url)
    }

    /// Determines the operation mode based on provided configuration.
    ///
    /// A username selects `GrantAccess`, an item kind selects
    /// `CollectItems`, and anything else falls back to `Interactive`.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.username.is_some() {
            OperationMode::GrantAccess
        } else if self.item_kind.is_some() {
            OperationMode::CollectItems
        } else {
            OperationMode::Interactive
        }
    }

    /// Builds the membership request for grant-access mode.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::Configuration`] naming the first missing
    /// value among username, entity and role.
    pub fn membership_request(&self) -> Result<MembershipRequest, WardenError> {
        let username = require(
            self.username.as_deref(),
            "username is required (use --username or -u)",
        )?;
        let entity = require(
            self.entity.as_deref(),
            "project or group is required (use --entity or -e)",
        )?;
        let role = require(self.role.as_deref(), "role is required (use --role or -r)")?;
        Ok(MembershipRequest::new(username, entity, &self.entity_kind, role))
    }

    /// Returns the item kind and year for collection mode.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::Configuration`] when either is missing.
    pub fn collection_target(&self) -> Result<(&str, i32), WardenError> {
        let kind = require(
            self.item_kind.as_deref(),
            "item kind is required (use --item-kind or -i)",
        )?;
        let year = self.year.ok_or_else(|| WardenError::Configuration {
            message: "year is required (use --year or -y)".to_owned(),
        })?;
        Ok((kind, year))
    }

    /// Validated page size and page ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidInput`] when `per_page` is outside
    /// `1..=100` or `max_pages` is zero.
    pub fn collector_settings(&self) -> Result<CollectorSettings, WardenError> {
        CollectorSettings::new(self.per_page, self.max_pages)
    }
}

fn require<'value>(value: Option<&'value str>, message: &str) -> Result<&'value str, WardenError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| WardenError::Configuration {
            message: message.to_owned(),
        })
}

#[cfg(test)]
mod tests;
