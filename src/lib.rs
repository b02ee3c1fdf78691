//! gitlab-warden library crate: GitLab membership reconciliation and
//! yearly issue/merge request collection.
//!
//! The library resolves usernames and project/group names into ids,
//! converges a user's membership to a target role, and walks paginated
//! issue and merge request listings for a calendar year. All HTTP goes
//! through the [`gitlab::GitLabGateway`] trait so the logic can run against
//! a mock.

pub mod config;
pub mod gitlab;

pub use config::WardenConfig;
pub use gitlab::{
    CollectionReport, EntityResolver, MembershipOutcome, MembershipReconciler, MembershipRequest,
    PaginatedCollector, ReconcileReport, RestGateway, Role, WardenError, level_of,
};
