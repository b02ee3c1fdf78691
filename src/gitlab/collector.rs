//! Exhaustive collection of issues or merge requests created in one year.
//!
//! Pages are requested one at a time, starting at page 1, until GitLab
//! returns an empty page, the `X-Total-Pages` hint says the last page was
//! reached, a request fails, or the page ceiling is hit. Items gathered
//! before a failure are always returned.

use super::error::WardenError;
use super::gateway::GitLabGateway;
use super::models::{Item, ItemKind};
use super::pagination::{ItemQuery, MAX_PER_PAGE, validate_per_page};
use super::window::YearWindow;

/// Default page ceiling.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Page size and page ceiling for a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorSettings {
    per_page: u8,
    max_pages: u32,
}

impl CollectorSettings {
    /// Validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidInput`] when `per_page` is outside
    /// `1..=100` or `max_pages` is zero.
    pub fn new(per_page: u8, max_pages: u32) -> Result<Self, WardenError> {
        validate_per_page(per_page)?;
        if max_pages == 0 {
            return Err(WardenError::InvalidInput {
                message: "max_pages must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            per_page,
            max_pages,
        })
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Result of [`PaginatedCollector::collect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    /// Parsed item kind, absent when the kind was rejected.
    pub kind: Option<ItemKind>,
    /// Requested year.
    pub year: i32,
    /// Items in server order, including those gathered before a failure.
    pub items: Vec<Item>,
    /// Pages that returned successfully, including a final empty page.
    pub pages_fetched: u32,
    /// Why collection stopped early, if it did.
    pub error: Option<WardenError>,
    /// Operator-facing summary line.
    pub summary: String,
}

impl CollectionReport {
    /// Returns true when every page was collected.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    fn rejected(year: i32, error: WardenError) -> Self {
        Self {
            kind: None,
            year,
            items: Vec::new(),
            pages_fetched: 0,
            summary: format!("Error: {error}"),
            error: Some(error),
        }
    }
}

/// Walks paginated issue or merge request listings.
pub struct PaginatedCollector<'client, Gateway>
where
    Gateway: GitLabGateway,
{
    client: &'client Gateway,
    settings: CollectorSettings,
}

impl<'client, Gateway> PaginatedCollector<'client, Gateway>
where
    Gateway: GitLabGateway,
{
    /// Create a collector with default settings.
    #[must_use]
    pub fn new(client: &'client Gateway) -> Self {
        Self::with_settings(client, CollectorSettings::default())
    }

    /// Create a collector with explicit settings.
    #[must_use]
    pub const fn with_settings(client: &'client Gateway, settings: CollectorSettings) -> Self {
        Self { client, settings }
    }

    /// Collects every `item_kind` item created during `year`.
    ///
    /// `item_kind` accepts `issue`, `issues`, `mr`, `mrs`, `merge_request`,
    /// `merge_requests` and `mergeRequest`. An unknown kind or a year
    /// outside `1900..=2100` is rejected before any request is sent.
    pub async fn collect(&self, item_kind: &str, year: i32) -> CollectionReport {
        let kind = match ItemKind::parse(item_kind) {
            Ok(kind) => kind,
            Err(error) => return CollectionReport::rejected(year, error),
        };
        let window = match YearWindow::new(year) {
            Ok(window) => window,
            Err(error) => {
                return CollectionReport {
                    kind: Some(kind),
                    ..CollectionReport::rejected(year, error)
                };
            }
        };

        let (items, pages_fetched, error) = self.walk(kind, window).await;
        let count = items.len();
        let label = kind.label();
        let summary = match &error {
            None => format!("Found {count} {label} created in {year}."),
            Some(limit @ WardenError::PaginationLimitExceeded { .. }) => {
                format!("Error: {limit}. Found {count} {label} created in {year} before stopping.")
            }
            Some(failure) => format!(
                "An error occurred while fetching {label} (page {}): {failure}",
                pages_fetched.saturating_add(1)
            ),
        };

        match &error {
            None => tracing::info!(count, %kind, year, pages_fetched, "collection complete"),
            Some(failure) => {
                tracing::warn!(%failure, count, %kind, year, pages_fetched, "collection stopped early");
            }
        }

        CollectionReport {
            kind: Some(kind),
            year,
            items,
            pages_fetched,
            error,
            summary,
        }
    }

    async fn walk(
        &self,
        kind: ItemKind,
        window: YearWindow,
    ) -> (Vec<Item>, u32, Option<WardenError>) {
        let mut items = Vec::new();
        let mut page = 1_u32;

        loop {
            let query = ItemQuery {
                kind,
                window,
                page,
                per_page: self.settings.per_page,
            };
            let fetched = match self.client.list_items(&query).await {
                Ok(fetched) => fetched,
                Err(error) => return (items, page.saturating_sub(1), Some(error)),
            };
            tracing::debug!(
                page = fetched.page_info.current_page(),
                count = fetched.items.len(),
                total_pages = ?fetched.page_info.total_pages(),
                "fetched page"
            );

            if fetched.items.is_empty() {
                return (items, page, None);
            }
            items.extend(fetched.items);

            if fetched.page_info.is_last_page() {
                return (items, page, None);
            }
            if page >= self.settings.max_pages {
                let error = WardenError::PaginationLimitExceeded {
                    kind: kind.label().to_owned(),
                    limit: self.settings.max_pages,
                };
                return (items, page, Some(error));
            }
            page = page.saturating_add(1);
        }
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
