//! GitLab membership reconciliation and work-item collection.
//!
//! Names supplied by an operator are resolved into ids through the search
//! endpoints, then a membership is converged to a target role or a yearly
//! issue/merge request listing is walked page by page. Every HTTP call goes
//! through [`GitLabGateway`] so that the logic can be exercised against a
//! mock.

pub mod collector;
pub mod error;
pub mod gateway;
pub mod locator;
pub mod membership;
pub mod models;
pub mod pagination;
pub mod resolver;
pub mod role;
pub mod window;

pub use collector::{CollectionReport, CollectorSettings, DEFAULT_MAX_PAGES, PaginatedCollector};
pub use error::WardenError;
pub use gateway::{GitLabGateway, MemberTarget, MembershipProbe, RestGateway};
pub use locator::{ApiBase, DEFAULT_GITLAB_URL, PersonalAccessToken};
pub use membership::{MembershipOutcome, MembershipReconciler, MembershipRequest, ReconcileReport};
pub use models::{Entity, EntityKind, Item, ItemKind, User};
pub use pagination::{ItemPage, ItemQuery, MAX_PER_PAGE, PageInfo};
pub use resolver::EntityResolver;
pub use role::{Role, level_of};
pub use window::{MAX_YEAR, MIN_YEAR, YearWindow};

#[cfg(test)]
pub use gateway::MockGitLabGateway;
