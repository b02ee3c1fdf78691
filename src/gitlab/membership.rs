//! Membership reconciliation: converge a user's access level on a project
//! or group to a target role.
//!
//! Each run is a single probe-then-act sequence. A present membership is
//! updated in place, an absent one is created. A create rejected with
//! `409 Conflict` means another writer added the member between the probe
//! and the write, so the update path is attempted once instead.

use super::error::WardenError;
use super::gateway::{GitLabGateway, MemberTarget, MembershipProbe};
use super::models::{Entity, EntityKind, User};
use super::resolver::EntityResolver;
use super::role::Role;

const CONFLICT: u16 = 409;

/// Inputs for one reconciliation, exactly as the operator supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRequest {
    /// Username to grant access to.
    pub username: String,
    /// Project or group name, or its numeric id.
    pub entity: String,
    /// `project` or `group`.
    pub entity_kind: String,
    /// Role name, e.g. `Developer`.
    pub role: String,
}

impl MembershipRequest {
    /// Builds a request from borrowed parts.
    #[must_use]
    pub fn new(username: &str, entity: &str, entity_kind: &str, role: &str) -> Self {
        Self {
            username: username.to_owned(),
            entity: entity.to_owned(),
            entity_kind: entity_kind.to_owned(),
            role: role.to_owned(),
        }
    }
}

/// What a reconciliation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipOutcome {
    /// The user was not a member and has been added.
    Created,
    /// The user was already a member and the access level was written.
    Updated,
    /// Nothing was changed, or the write was rejected.
    Failed(WardenError),
}

/// Result of [`MembershipReconciler::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// What happened.
    pub outcome: MembershipOutcome,
    /// Resolved user, when resolution got that far.
    pub user: Option<User>,
    /// Resolved project or group, when resolution got that far.
    pub entity: Option<Entity>,
    /// Target role, when the role name was valid.
    pub role: Option<Role>,
    /// Operator-facing message.
    pub detail: String,
}

impl ReconcileReport {
    /// Returns true for `Created` and `Updated`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self.outcome, MembershipOutcome::Failed(_))
    }

    /// The failure, if the reconciliation failed.
    #[must_use]
    pub const fn error(&self) -> Option<&WardenError> {
        match &self.outcome {
            MembershipOutcome::Failed(error) => Some(error),
            MembershipOutcome::Created | MembershipOutcome::Updated => None,
        }
    }

    fn failed(error: WardenError) -> Self {
        if error.is_validation() {
            tracing::info!(%error, "membership request rejected");
        } else {
            tracing::warn!(%error, "membership target could not be resolved");
        }
        Self {
            detail: format!("Error: {error}"),
            outcome: MembershipOutcome::Failed(error),
            user: None,
            entity: None,
            role: None,
        }
    }
}

/// Converges membership state through a [`GitLabGateway`].
pub struct MembershipReconciler<'client, Gateway>
where
    Gateway: GitLabGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> MembershipReconciler<'client, Gateway>
where
    Gateway: GitLabGateway,
{
    /// Create a reconciler using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Ensures `request.username` holds `request.role` on the named entity.
    ///
    /// The role name and the entity kind are validated, in that order,
    /// before any request is sent. Failures are reported through
    /// [`MembershipOutcome::Failed`]; nothing is retried and nothing is
    /// rolled back.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitlab_warden::gitlab::{
    ///     ApiBase, MembershipReconciler, MembershipRequest, PersonalAccessToken, RestGateway,
    /// };
    ///
    /// # async fn demo() -> Result<(), gitlab_warden::gitlab::WardenError> {
    /// let token = PersonalAccessToken::new("glpat-example")?;
    /// let gateway = RestGateway::for_token(&token, ApiBase::parse("https://gitlab.com")?)?;
    /// let request = MembershipRequest::new("alice", "backend-service", "project", "Developer");
    /// let report = MembershipReconciler::new(&gateway).reconcile(&request).await;
    /// println!("{}", report.detail);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn reconcile(&self, request: &MembershipRequest) -> ReconcileReport {
        let role = match Role::from_name(&request.role) {
            Ok(role) => role,
            Err(error) => return ReconcileReport::failed(error),
        };
        let kind = match EntityKind::parse(&request.entity_kind) {
            Ok(kind) => kind,
            Err(error) => {
                return ReconcileReport {
                    role: Some(role),
                    ..ReconcileReport::failed(error)
                };
            }
        };

        let resolver = EntityResolver::new(self.client);
        let user = match resolver.resolve_user(&request.username).await {
            Ok(user) => user,
            Err(error) => {
                return ReconcileReport {
                    role: Some(role),
                    ..ReconcileReport::failed(error)
                };
            }
        };
        let entity = match resolver.resolve_entity(&request.entity, kind).await {
            Ok(entity) => entity,
            Err(error) => {
                return ReconcileReport {
                    user: Some(user),
                    role: Some(role),
                    ..ReconcileReport::failed(error)
                };
            }
        };

        let target = MemberTarget {
            kind,
            entity_id: entity.id,
            user_id: user.id,
        };
        let outcome = self.converge(target, role).await;
        let detail = describe(&outcome, request, kind, role);

        match &outcome {
            MembershipOutcome::Failed(error) => {
                tracing::warn!(%error, username = %user.username, entity = %entity.name, "membership change failed");
            }
            MembershipOutcome::Created | MembershipOutcome::Updated => {
                tracing::info!(
                    username = %user.username,
                    entity = %entity.name,
                    %kind,
                    %role,
                    "membership converged"
                );
            }
        }

        ReconcileReport {
            outcome,
            user: Some(user),
            entity: Some(entity),
            role: Some(role),
            detail,
        }
    }

    async fn converge(&self, target: MemberTarget, role: Role) -> MembershipOutcome {
        let access_level = role.access_level();
        let probe = match self.client.membership(target).await {
            Ok(probe) => probe,
            Err(error) => return MembershipOutcome::Failed(error),
        };

        match probe {
            MembershipProbe::Present { access_level: held } => {
                let held_role = held.and_then(Role::from_access_level).map(Role::name);
                tracing::debug!(?held, ?held_role, access_level, "member present, updating");
                self.update(target, access_level).await
            }
            MembershipProbe::Absent => {
                match self.client.create_membership(target, access_level).await {
                    Ok(()) => MembershipOutcome::Created,
                    Err(error) if error.status() == Some(CONFLICT) => {
                        tracing::debug!("member created concurrently, falling back to update");
                        self.update(target, access_level).await
                    }
                    Err(error) => MembershipOutcome::Failed(error),
                }
            }
            MembershipProbe::Unexpected { status, body } => {
                MembershipOutcome::Failed(WardenError::Transport {
                    operation: "get membership".to_owned(),
                    status,
                    body,
                })
            }
        }
    }

    async fn update(&self, target: MemberTarget, access_level: u8) -> MembershipOutcome {
        match self.client.update_membership(target, access_level).await {
            Ok(()) => MembershipOutcome::Updated,
            Err(error) => MembershipOutcome::Failed(error),
        }
    }
}

fn describe(
    outcome: &MembershipOutcome,
    request: &MembershipRequest,
    kind: EntityKind,
    role: Role,
) -> String {
    let username = &request.username;
    let entity = &request.entity;
    match outcome {
        MembershipOutcome::Created => format!(
            "Successfully added user '{username}' to {kind} '{entity}' with role '{role}'."
        ),
        MembershipOutcome::Updated => format!(
            "Successfully updated role of user '{username}' in {kind} '{entity}' to '{role}'."
        ),
        MembershipOutcome::Failed(error) => format!("Error: {error}"),
    }
}

#[cfg(test)]
#[path = "membership_tests.rs"]
mod tests;
