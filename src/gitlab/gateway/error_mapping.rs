//! Error mapping helpers for the `reqwest` GitLab gateway.

use http::StatusCode;

use crate::gitlab::error::WardenError;

use super::http_utils::describe_body;

/// Checks if a GitLab status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) fn map_reqwest_error(operation: &str, error: &reqwest::Error) -> WardenError {
    if error.is_decode() {
        return WardenError::Api {
            message: format!("{operation} response decoding failed: {error}"),
        };
    }

    WardenError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

/// Authentication failures get a short message; every other status keeps
/// the response body as received.
pub(super) fn map_http_error(operation: &str, status: StatusCode, body: &str) -> WardenError {
    if is_auth_failure(status) {
        WardenError::Authentication {
            message: format!(
                "{operation} failed: GitLab returned {status} {}",
                describe_body(body)
            ),
        }
    } else {
        WardenError::Transport {
            operation: operation.to_owned(),
            status: status.as_u16(),
            body: body.to_owned(),
        }
    }
}
