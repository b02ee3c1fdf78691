//! Gateways for talking to the GitLab REST API.
//!
//! The trait is the seam between the reconciliation/collection logic and
//! HTTP. [`RestGateway`] implements it over `reqwest`; tests substitute the
//! `mockall` automock.

mod client;
mod error_mapping;
mod http_utils;
mod rest;

pub use rest::RestGateway;

use async_trait::async_trait;

use crate::gitlab::error::WardenError;
use crate::gitlab::models::{Entity, EntityKind, User};
use crate::gitlab::pagination::{ItemPage, ItemQuery};

/// Result of probing a single `(entity, user)` membership resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipProbe {
    /// HTTP 200: the user is a direct member.
    Present {
        /// Access level currently held, when the body reported one.
        access_level: Option<u8>,
    },
    /// HTTP 404: no membership exists.
    Absent,
    /// Any other status.
    Unexpected {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

/// Address of a membership: which entity, which user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberTarget {
    /// Project or group.
    pub kind: EntityKind,
    /// Project or group id.
    pub entity_id: u64,
    /// User id.
    pub user_id: u64,
}

impl MemberTarget {
    /// Path of the member collection (`projects/7/members`).
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!(
            "{}/{}/members",
            self.kind.collection_path(),
            self.entity_id
        )
    }

    /// Path of the individual member resource
    /// (`projects/7/members/3`).
    #[must_use]
    pub fn member_path(&self) -> String {
        format!("{}/{}", self.collection_path(), self.user_id)
    }
}

/// Operations the reconciler and collector need from GitLab.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitLabGateway: Send + Sync {
    /// `GET /users?username=<username>`.
    async fn find_users(&self, username: &str) -> Result<Vec<User>, WardenError>;

    /// `GET /projects?search=<term>` or `GET /groups?search=<term>`.
    async fn search_entities(
        &self,
        kind: EntityKind,
        term: &str,
    ) -> Result<Vec<Entity>, WardenError>;

    /// `GET /{projects|groups}/{id}/members/{user_id}`.
    ///
    /// Non-2xx statuses are reported through [`MembershipProbe`]; only
    /// transport failures are errors.
    async fn membership(&self, target: MemberTarget) -> Result<MembershipProbe, WardenError>;

    /// `PUT /{projects|groups}/{id}/members/{user_id}` with `{access_level}`.
    async fn update_membership(
        &self,
        target: MemberTarget,
        access_level: u8,
    ) -> Result<(), WardenError>;

    /// `POST /{projects|groups}/{id}/members` with `{user_id, access_level}`.
    async fn create_membership(
        &self,
        target: MemberTarget,
        access_level: u8,
    ) -> Result<(), WardenError>;

    /// `GET /issues` or `GET /merge_requests` for one page.
    async fn list_items(&self, query: &ItemQuery) -> Result<ItemPage, WardenError>;
}
