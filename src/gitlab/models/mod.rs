//! Data models for users, projects, groups, and collected work items.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::WardenError;

#[cfg(feature = "test-support")]
pub mod test_support;

/// GitLab user as returned by the user search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Numeric user id.
    pub id: u64,
    /// Login name.
    pub username: String,
}

/// Kind of entity a membership is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A single project (repository).
    Project,
    /// A group or subgroup.
    Group,
}

impl EntityKind {
    /// Singular name used in messages and input (`project`, `group`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Group => "group",
        }
    }

    /// Collection path segment used in the REST API.
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Group => "groups",
        }
    }

    /// Parses exactly `project` or `group`.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidEntityKind`] for anything else.
    pub fn parse(value: &str) -> Result<Self, WardenError> {
        match value {
            "project" => Ok(Self::Project),
            "group" => Ok(Self::Group),
            _ => Err(WardenError::InvalidEntityKind {
                kind: value.to_owned(),
            }),
        }
    }
}

impl FromStr for EntityKind {
    type Err = WardenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Project or group resolved from a name or id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Numeric project or group id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Whether this is a project or a group.
    pub kind: EntityKind,
}

impl Entity {
    /// Returns true when `name_or_id` equals this entity's name exactly or
    /// its stringified id.
    #[must_use]
    pub fn matches(&self, name_or_id: &str) -> bool {
        self.name == name_or_id || self.id.to_string() == name_or_id
    }
}

/// Kind of work item gathered by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Issues (`/issues`).
    Issue,
    /// Merge requests (`/merge_requests`).
    MergeRequest,
}

impl ItemKind {
    /// Label used in summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::MergeRequest => "merge request",
        }
    }

    /// Collection path used in the REST API.
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Issue => "issues",
            Self::MergeRequest => "merge_requests",
        }
    }

    /// Parses the accepted spellings of an item kind.
    ///
    /// Issues: `issue`, `issues`. Merge requests: `mr`, `mrs`,
    /// `merge_request`, `merge_requests`, `mergeRequest`. Matching is
    /// exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidInput`] for any other value.
    pub fn parse(value: &str) -> Result<Self, WardenError> {
        match value {
            "issue" | "issues" => Ok(Self::Issue),
            "mr" | "mrs" | "merge_request" | "merge_requests" | "mergeRequest" => {
                Ok(Self::MergeRequest)
            }
            _ => Err(WardenError::InvalidInput {
                message: format!("item kind '{value}' must be 'issue' or 'mr'"),
            }),
        }
    }
}

impl FromStr for ItemKind {
    type Err = WardenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Opaque issue or merge request record.
///
/// The collector never inspects item fields; accessors exist for display
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(serde_json::Value);

impl Item {
    /// Wraps a raw JSON record.
    #[must_use]
    pub const fn new(raw: serde_json::Value) -> Self {
        Self(raw)
    }

    /// Project-scoped id (`iid`) when present.
    #[must_use]
    pub fn iid(&self) -> Option<u64> {
        self.0.get("iid").and_then(serde_json::Value::as_u64)
    }

    /// Title when present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(serde_json::Value::as_str)
    }

    /// Web URL when present.
    #[must_use]
    pub fn web_url(&self) -> Option<&str> {
        self.0.get("web_url").and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) id: u64,
    pub(super) username: String,
}

impl From<ApiUser> for User {
    fn from(value: ApiUser) -> Self {
        Self {
            id: value.id,
            username: value.username,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiEntity {
    pub(super) id: u64,
    pub(super) name: String,
}

impl ApiEntity {
    pub(super) fn into_entity(self, kind: EntityKind) -> Entity {
        Entity {
            id: self.id,
            name: self.name,
            kind,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiMember {
    pub(super) access_level: Option<u8>,
}
