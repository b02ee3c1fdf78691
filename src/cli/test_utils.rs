//! Shared test utilities for CLI tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gitlab_warden::gitlab::{
    Entity, EntityKind, GitLabGateway, Item, ItemKind, ItemPage, ItemQuery, MemberTarget,
    MembershipProbe, PageInfo, User, WardenError,
};
use serde_json::json;

/// In-memory GitLab holding users, projects, groups, memberships and a
/// fixed number of items per kind.
#[derive(Clone, Default)]
pub struct FakeGitLab {
    users: Vec<User>,
    entities: Vec<Entity>,
    /// Access levels keyed by `(kind, entity id, user id)`.
    pub members: Arc<Mutex<HashMap<(EntityKind, u64, u64), u8>>>,
    items: HashMap<ItemKind, usize>,
    /// Number of requests served.
    pub calls: Arc<Mutex<usize>>,
}

impl FakeGitLab {
    /// Adds a user.
    #[must_use]
    pub fn with_user(mut self, id: u64, username: &str) -> Self {
        self.users.push(User {
            id,
            username: username.to_owned(),
        });
        self
    }

    /// Adds a project or group.
    #[must_use]
    pub fn with_entity(mut self, id: u64, name: &str, kind: EntityKind) -> Self {
        self.entities.push(Entity {
            id,
            name: name.to_owned(),
            kind,
        });
        self
    }

    /// Seeds `count` items of `kind`, all created in any requested year.
    #[must_use]
    pub fn with_items(mut self, kind: ItemKind, count: usize) -> Self {
        self.items.insert(kind, count);
        self
    }

    /// Access level currently held.
    pub fn access_level(&self, kind: EntityKind, entity_id: u64, user_id: u64) -> Option<u8> {
        self.members
            .lock()
            .expect("members mutex should be available")
            .get(&(kind, entity_id, user_id))
            .copied()
    }

    /// Requests served so far.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().expect("calls mutex should be available")
    }

    fn record_call(&self) {
        *self.calls.lock().expect("calls mutex should be available") += 1;
    }

    fn set_level(&self, target: MemberTarget, access_level: u8) {
        self.members
            .lock()
            .expect("members mutex should be available")
            .insert((target.kind, target.entity_id, target.user_id), access_level);
    }
}

#[async_trait]
impl GitLabGateway for FakeGitLab {
    async fn find_users(&self, username: &str) -> Result<Vec<User>, WardenError> {
        self.record_call();
        Ok(self
            .users
            .iter()
            .filter(|user| user.username.eq_ignore_ascii_case(username))
            .cloned()
            .collect())
    }

    async fn search_entities(
        &self,
        kind: EntityKind,
        term: &str,
    ) -> Result<Vec<Entity>, WardenError> {
        self.record_call();
        Ok(self
            .entities
            .iter()
            .filter(|entity| entity.kind == kind)
            .filter(|entity| entity.name.contains(term) || entity.id.to_string() == term)
            .cloned()
            .collect())
    }

    async fn membership(&self, target: MemberTarget) -> Result<MembershipProbe, WardenError> {
        self.record_call();
        Ok(
            match self.access_level(target.kind, target.entity_id, target.user_id) {
                Some(level) => MembershipProbe::Present {
                    access_level: Some(level),
                },
                None => MembershipProbe::Absent,
            },
        )
    }

    async fn update_membership(
        &self,
        target: MemberTarget,
        access_level: u8,
    ) -> Result<(), WardenError> {
        self.record_call();
        self.set_level(target, access_level);
        Ok(())
    }

    async fn create_membership(
        &self,
        target: MemberTarget,
        access_level: u8,
    ) -> Result<(), WardenError> {
        self.record_call();
        self.set_level(target, access_level);
        Ok(())
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<ItemPage, WardenError> {
        self.record_call();
        let total = self.items.get(&query.kind).copied().unwrap_or(0);
        let per_page = usize::from(query.per_page);
        let skip = usize::try_from(query.page.saturating_sub(1))
            .expect("page should fit in usize")
            * per_page;
        let items = (skip..total.min(skip + per_page))
            .map(|index| {
                let iid = index + 1;
                Item::new(json!({ "iid": iid, "title": format!("{} {iid}", query.kind) }))
            })
            .collect();
        Ok(ItemPage {
            items,
            page_info: PageInfo::new(query.page),
        })
    }
}
