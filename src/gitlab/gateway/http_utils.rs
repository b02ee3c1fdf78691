//! Shared HTTP utilities for gateway implementations.

use http::header::{HeaderMap, HeaderName};

/// Page-count hint sent with paginated responses.
pub(super) const X_TOTAL_PAGES: HeaderName = HeaderName::from_static("x-total-pages");

const MAX_BODY_CHARS: usize = 500;

pub(super) fn header_to_u32(headers: &HeaderMap, name: &HeaderName) -> Option<u32> {
    headers
        .get(name)
        .and_then(|raw| raw.to_str().ok())
        .and_then(|text| text.trim().parse().ok())
}

/// Pulls the human-readable part out of a GitLab error body.
///
/// GitLab answers with `{"message": ...}` or `{"error": ...}`; `message`
/// may itself be an object of field errors, in which case it is rendered
/// as compact JSON.
pub(super) fn extract_gitlab_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    let field = value.get("message").or_else(|| value.get("error"))?;
    match field {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Message if the body carries one, else the body itself, truncated.
pub(super) fn describe_body(body: &str) -> String {
    let detail = extract_gitlab_message(body).unwrap_or_else(|| body.trim().to_owned());
    truncate_for_message(&detail, MAX_BODY_CHARS)
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
