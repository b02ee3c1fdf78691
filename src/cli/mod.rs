//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`grant_access`]: Converge one membership to a role
//! - [`collect_items`]: Gather a year's issues or merge requests
//! - [`interactive`]: Text menu driving both operations
//!
//! Output formatting utilities are in [`output`].

use gitlab_warden::WardenConfig;
use gitlab_warden::gitlab::{ApiBase, PersonalAccessToken, WardenError};

pub mod collect_items;
pub mod grant_access;
pub mod interactive;
pub mod output;

#[cfg(test)]
pub mod test_utils;

/// How a single-operation run ended.
///
/// A failed operation has already written its error as part of the report,
/// so it is not returned as an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The operation succeeded.
    Succeeded,
    /// The operation failed and its report says why.
    Reported,
}

impl RunStatus {
    const fn from_success(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Reported
        }
    }
}

/// Resolves the credential and API root, then builds a gateway with
/// `build_gateway`.
///
/// A missing token fails here, before any request is sent.
pub fn connect<G, F>(config: &WardenConfig, build_gateway: F) -> Result<G, WardenError>
where
    F: FnOnce(&PersonalAccessToken, ApiBase) -> Result<G, WardenError>,
{
    let token = config.resolve_token()?;
    let api_base = config.api_base()?;
    build_gateway(&token, api_base)
}

