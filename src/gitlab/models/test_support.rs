//! JSON fixture builders mirroring GitLab REST payloads.
//!
//! Shared by unit and behavioural tests so that mocked responses stay
//! consistent with what the deserialisers expect.
//!
//! # Examples
//!
//! ```
//! use gitlab_warden::gitlab::models::test_support::{item_page, user_json};
//!
//! let user = user_json(7, "alice");
//! assert_eq!(user["username"], "alice");
//!
//! let page = item_page(2, 3);
//! assert_eq!(page.as_array().map(Vec::len), Some(3));
//! ```

use serde_json::{Value, json};

/// Builds a user record as returned by `GET /users`.
#[must_use]
pub fn user_json(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "name": username,
        "state": "active"
    })
}

/// Builds a project or group record as returned by the search endpoints.
#[must_use]
pub fn entity_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "path": name.to_lowercase().replace(' ', "-")
    })
}

/// Builds a membership record as returned by the members endpoints.
#[must_use]
pub fn member_json(user_id: u64, username: &str, access_level: u8) -> Value {
    json!({
        "id": user_id,
        "username": username,
        "access_level": access_level
    })
}

/// Builds a page of `count` items numbered from `(page - 1) * count + 1`.
///
/// Item ids are unique across pages of the same size so that tests can
/// detect duplicates or reordering.
#[must_use]
pub fn item_page(page: u64, count: u64) -> Value {
    let first = page.saturating_sub(1).saturating_mul(count).saturating_add(1);
    let items: Vec<Value> = (first..first.saturating_add(count))
        .map(|iid| {
            json!({
                "id": iid.saturating_add(1000),
                "iid": iid,
                "title": format!("item {iid}"),
                "created_at": "2023-06-01T12:00:00Z"
            })
        })
        .collect();
    Value::Array(items)
}
