//! Resolution of human-readable names into GitLab ids.

use super::error::WardenError;
use super::gateway::GitLabGateway;
use super::models::{Entity, EntityKind, User};

/// Turns usernames and project/group names into resolved records.
///
/// First match wins: ambiguity is never an error. Search results that do
/// not match exactly are skipped.
pub struct EntityResolver<'client, Gateway>
where
    Gateway: GitLabGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> EntityResolver<'client, Gateway>
where
    Gateway: GitLabGateway,
{
    /// Create a resolver using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Resolves `username` to a user.
    ///
    /// Takes the first search result whose username equals `username`,
    /// ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::UserNotFound`] when no result carries the
    /// username, or any gateway failure.
    pub async fn resolve_user(&self, username: &str) -> Result<User, WardenError> {
        let users = self.client.find_users(username).await?;
        tracing::debug!(username, candidates = users.len(), "user search returned");

        users
            .into_iter()
            .find(|user| user.username.eq_ignore_ascii_case(username))
            .ok_or_else(|| WardenError::UserNotFound {
                username: username.to_owned(),
            })
    }

    /// Resolves a project or group from its exact name or its numeric id
    /// written as a string.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::EntityNotFound`] when no search result matches
    /// exactly, or any gateway failure.
    pub async fn resolve_entity(
        &self,
        name_or_id: &str,
        kind: EntityKind,
    ) -> Result<Entity, WardenError> {
        let candidates = self.client.search_entities(kind, name_or_id).await?;
        tracing::debug!(
            name = name_or_id,
            %kind,
            candidates = candidates.len(),
            "entity search returned"
        );

        candidates
            .into_iter()
            .find(|entity| entity.matches(name_or_id))
            .ok_or_else(|| WardenError::EntityNotFound {
                kind: kind.as_str().to_owned(),
                name: name_or_id.to_owned(),
            })
    }
}
