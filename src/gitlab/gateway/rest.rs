//! `reqwest`-backed implementation of [`GitLabGateway`].

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::gitlab::error::WardenError;
use crate::gitlab::locator::{ApiBase, PersonalAccessToken};
use crate::gitlab::models::{ApiEntity, ApiMember, ApiUser, Entity, EntityKind, Item, User};
use crate::gitlab::pagination::{ItemPage, ItemQuery, PageInfo};

use super::client::build_http_client;
use super::error_mapping::{map_http_error, map_reqwest_error};
use super::http_utils::{X_TOTAL_PAGES, header_to_u32};
use super::{GitLabGateway, MemberTarget, MembershipProbe};

/// GitLab REST gateway over `reqwest`.
pub struct RestGateway {
    client: Client,
    api_base: ApiBase,
}

impl RestGateway {
    /// Creates a gateway from a configured client.
    #[must_use]
    pub const fn new(client: Client, api_base: ApiBase) -> Self {
        Self { client, api_base }
    }

    /// Builds a client that authenticates with `token` against `api_base`.
    ///
    /// # Errors
    ///
    /// Returns `WardenError::Configuration` when the HTTP client cannot be
    /// constructed.
    pub fn for_token(token: &PersonalAccessToken, api_base: ApiBase) -> Result<Self, WardenError> {
        Ok(Self::new(build_http_client(token)?, api_base))
    }

    async fn get(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Response, WardenError> {
        let url = self.api_base.endpoint(path);
        tracing::debug!(%url, operation, "GET");
        self.client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|error| map_reqwest_error(operation, &error))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WardenError> {
        let response = self.get(operation, path, query).await?;
        let body = successful_body(operation, response).await?;
        serde_json::from_str(&body).map_err(|error| WardenError::Api {
            message: format!("{operation} response deserialisation failed: {error}"),
        })
    }

    async fn send_write<B: Serialize + Sync>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
        payload: &B,
    ) -> Result<(), WardenError> {
        let response = request
            .json(payload)
            .send()
            .await
            .map_err(|error| map_reqwest_error(operation, &error))?;
        successful_body(operation, response).await.map(drop)
    }
}

/// Returns the body of a 2xx response, or maps the status to an error.
async fn successful_body(operation: &str, response: Response) -> Result<String, WardenError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| map_reqwest_error(operation, &error))?;

    if status.is_success() {
        Ok(body)
    } else {
        tracing::debug!(operation, status = status.as_u16(), "GitLab rejected request");
        Err(map_http_error(operation, status, &body))
    }
}

#[derive(Debug, Serialize)]
struct UpdateMember {
    access_level: u8,
}

#[derive(Debug, Serialize)]
struct CreateMember {
    user_id: u64,
    access_level: u8,
}

#[async_trait]
impl GitLabGateway for RestGateway {
    async fn find_users(&self, username: &str) -> Result<Vec<User>, WardenError> {
        let users: Vec<ApiUser> = self
            .get_json("find user", "users", &[("username", username.to_owned())])
            .await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn search_entities(
        &self,
        kind: EntityKind,
        term: &str,
    ) -> Result<Vec<Entity>, WardenError> {
        let operation = format!("find {kind}");
        let entities: Vec<ApiEntity> = self
            .get_json(
                &operation,
                kind.collection_path(),
                &[("search", term.to_owned())],
            )
            .await?;
        Ok(entities
            .into_iter()
            .map(|entity| entity.into_entity(kind))
            .collect())
    }

    async fn membership(&self, target: MemberTarget) -> Result<MembershipProbe, WardenError> {
        let operation = "get membership";
        let response = self.get(operation, &target.member_path(), &[]).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| map_reqwest_error(operation, &error))?;

        Ok(match status {
            StatusCode::OK => MembershipProbe::Present {
                access_level: serde_json::from_str::<ApiMember>(&body)
                    .ok()
                    .and_then(|member| member.access_level),
            },
            StatusCode::NOT_FOUND => MembershipProbe::Absent,
            other => MembershipProbe::Unexpected {
                status: other.as_u16(),
                body,
            },
        })
    }

    async fn update_membership(
        &self,
        target: MemberTarget,
        access_level: u8,
    ) -> Result<(), WardenError> {
        let url = self.api_base.endpoint(&target.member_path());
        tracing::debug!(%url, access_level, "PUT membership");
        self.send_write(
            "update membership",
            self.client.put(url),
            &UpdateMember { access_level },
        )
        .await
    }

    async fn create_membership(
        &self,
        target: MemberTarget,
        access_level: u8,
    ) -> Result<(), WardenError> {
        let url = self.api_base.endpoint(&target.collection_path());
        tracing::debug!(%url, access_level, "POST membership");
        self.send_write(
            "create membership",
            self.client.post(url),
            &CreateMember {
                user_id: target.user_id,
                access_level,
            },
        )
        .await
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<ItemPage, WardenError> {
        let operation = format!("list {}", query.kind);
        let response = self
            .get(
                &operation,
                query.kind.collection_path(),
                &query.query_params(),
            )
            .await?;
        let total_pages = header_to_u32(response.headers(), &X_TOTAL_PAGES);
        let body = successful_body(&operation, response).await?;

        let items: Vec<Item> = if body.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&body).map_err(|error| WardenError::Api {
                message: format!("{operation} response deserialisation failed: {error}"),
            })?
        };

        Ok(ItemPage {
            items,
            page_info: PageInfo::new(query.page).with_total_pages(total_pages),
        })
    }
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;
