//! Role catalogue mapping role names to GitLab access levels.
//!
//! The mapping is fixed and total over five names. Lookups are exact and
//! case-sensitive so that a typo is rejected before any request is sent.

use std::fmt;
use std::str::FromStr;

use super::error::WardenError;

/// Membership role on a project or group.
///
/// # Example
///
/// ```
/// use gitlab_warden::gitlab::Role;
///
/// let role: Role = "Developer".parse().expect("known role");
/// assert_eq!(role.access_level(), 30);
/// assert_eq!(role.name(), "Developer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Access level 10.
    Guest,
    /// Access level 20.
    Reporter,
    /// Access level 30.
    Developer,
    /// Access level 40.
    Maintainer,
    /// Access level 50.
    Owner,
}

impl Role {
    /// Every role in ascending access-level order.
    pub const ALL: [Self; 5] = [
        Self::Guest,
        Self::Reporter,
        Self::Developer,
        Self::Maintainer,
        Self::Owner,
    ];

    /// Looks up a role by its catalogue name.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidRole`] when `name` is not one of the
    /// five recognised names.
    pub fn from_name(name: &str) -> Result<Self, WardenError> {
        Self::ALL
            .into_iter()
            .find(|role| role.name() == name)
            .ok_or_else(|| WardenError::InvalidRole {
                role: name.to_owned(),
                valid: valid_names(),
            })
    }

    /// Looks up a role by its numeric access level.
    #[must_use]
    pub fn from_access_level(level: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.access_level() == level)
    }

    /// Numeric access level GitLab uses for this role.
    #[must_use]
    pub const fn access_level(self) -> u8 {
        match self {
            Self::Guest => 10,
            Self::Reporter => 20,
            Self::Developer => 30,
            Self::Maintainer => 40,
            Self::Owner => 50,
        }
    }

    /// Catalogue name of this role.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::Reporter => "Reporter",
            Self::Developer => "Developer",
            Self::Maintainer => "Maintainer",
            Self::Owner => "Owner",
        }
    }
}

impl FromStr for Role {
    type Err = WardenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_name(value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Returns the access level for a role name.
///
/// # Errors
///
/// Returns [`WardenError::InvalidRole`] for names outside the catalogue.
pub fn level_of(name: &str) -> Result<u8, WardenError> {
    Role::from_name(name).map(Role::access_level)
}

fn valid_names() -> String {
    Role::ALL
        .iter()
        .map(|role| role.name())
        .collect::<Vec<_>>()
        .join(", ")
}
