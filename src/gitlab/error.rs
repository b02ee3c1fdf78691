//! Error types exposed by the GitLab reconciliation and collection layer.

use thiserror::Error;

/// Errors surfaced while validating input or communicating with GitLab.
///
/// Validation variants (`InvalidRole`, `InvalidEntityKind`, `InvalidInput`)
/// are always raised before any request leaves the process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WardenError {
    /// The requested role name is not part of the role catalogue.
    #[error("invalid role '{role}'. Valid roles are: {valid}")]
    InvalidRole {
        /// Role name supplied by the caller.
        role: String,
        /// Comma-separated list of accepted role names.
        valid: String,
    },

    /// The entity kind is neither `project` nor `group`.
    #[error("invalid entity type '{kind}'. Must be 'project' or 'group'")]
    InvalidEntityKind {
        /// Entity kind supplied by the caller.
        kind: String,
    },

    /// A collection request was malformed (unknown item kind, bad year or
    /// page settings).
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected value.
        message: String,
    },

    /// No GitLab user carries the requested username.
    #[error("user '{username}' not found")]
    UserNotFound {
        /// Username that was searched for.
        username: String,
    },

    /// No project or group matched the requested name or id.
    #[error("{kind} '{name}' not found")]
    EntityNotFound {
        /// `project` or `group`.
        kind: String,
        /// Name or id that was searched for.
        name: String,
    },

    /// The authentication token was absent or blank.
    #[error("GitLab private token not found (use --token, WARDEN_TOKEN, or GITLAB_PRIVATE_TOKEN)")]
    MissingCredential,

    /// GitLab rejected the token.
    #[error("GitLab rejected the token: {message}")]
    Authentication {
        /// Status and message returned with the 401/403 response.
        message: String,
    },

    /// GitLab answered with an unexpected HTTP status.
    #[error("{operation} failed: {status} - {body}")]
    Transport {
        /// Operation that was being performed.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Response body, or the message extracted from it.
        body: String,
    },

    /// The request never produced an HTTP response.
    #[error("network error talking to GitLab: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response arrived but could not be decoded.
    #[error("GitLab API error: {message}")]
    Api {
        /// Decoding failure detail.
        message: String,
    },

    /// The page ceiling was reached before GitLab signalled exhaustion.
    #[error("stopped after {limit} pages of {kind} without reaching the last page")]
    PaginationLimitExceeded {
        /// Item kind being collected.
        kind: String,
        /// Configured page ceiling.
        limit: u32,
    },

    /// The configured API URL could not be parsed.
    #[error("GitLab URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl WardenError {
    /// Returns true for errors raised by input validation, before any
    /// request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRole { .. } | Self::InvalidEntityKind { .. } | Self::InvalidInput { .. }
        )
    }

    /// Returns the HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}
