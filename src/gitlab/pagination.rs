//! Pagination state for GitLab collection endpoints.
//!
//! GitLab paginates with `page`/`per_page` query parameters and reports the
//! page count in the `X-Total-Pages` response header. The header is a hint:
//! GitLab omits it for very large result sets.

use super::error::WardenError;
use super::models::{Item, ItemKind};
use super::window::YearWindow;

/// Largest page size GitLab accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// Page state reported alongside one page of results.
///
/// # Example
///
/// ```
/// use gitlab_warden::gitlab::PageInfo;
///
/// let info = PageInfo::new(2).with_total_pages(Some(2));
/// assert!(info.is_last_page());
/// assert!(!PageInfo::new(1).is_last_page());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    current_page: u32,
    /// Total number of pages if the server declared it.
    total_pages: Option<u32>,
}

impl PageInfo {
    /// Creates a new page info instance with an unknown page count.
    #[must_use]
    pub const fn new(current_page: u32) -> Self {
        Self {
            current_page,
            total_pages: None,
        }
    }

    /// Sets the total number of pages.
    #[must_use]
    pub const fn with_total_pages(mut self, total_pages: Option<u32>) -> Self {
        self.total_pages = total_pages;
        self
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the total number of pages if known.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Returns true when the server declared a page count and this page is
    /// at or beyond it.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        match self.total_pages {
            Some(total) => self.current_page >= total,
            None => false,
        }
    }
}

/// Filtered query for one page of issues or merge requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemQuery {
    /// Which collection to query.
    pub kind: ItemKind,
    /// Creation-time window.
    pub window: YearWindow,
    /// Page number (1-based).
    pub page: u32,
    /// Page size.
    pub per_page: u8,
}

impl ItemQuery {
    /// Query parameters in the order they are sent.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("scope", "all".to_owned()),
            ("created_after", self.window.created_after()),
            ("created_before", self.window.created_before()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// One page of items together with its pagination state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPage {
    /// Items on this page, in server order.
    pub items: Vec<Item>,
    /// Pagination state.
    pub page_info: PageInfo,
}

/// Validates a page size.
///
/// # Errors
///
/// Returns [`WardenError::InvalidInput`] when `per_page` is zero or above
/// [`MAX_PER_PAGE`].
pub fn validate_per_page(per_page: u8) -> Result<(), WardenError> {
    if per_page == 0 {
        return Err(WardenError::InvalidInput {
            message: "per_page must be at least 1".to_owned(),
        });
    }

    if per_page > MAX_PER_PAGE {
        return Err(WardenError::InvalidInput {
            message: format!("per_page must not exceed {MAX_PER_PAGE}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ItemQuery, PageInfo, validate_per_page};
    use crate::gitlab::models::ItemKind;
    use crate::gitlab::window::YearWindow;

    #[rstest]
    #[case::unknown_total(3, None, false)]
    #[case::before_last(1, Some(2), false)]
    #[case::at_last(2, Some(2), true)]
    #[case::past_last(5, Some(2), true)]
    #[case::zero_total(1, Some(0), true)]
    fn last_page_follows_declared_total(
        #[case] current: u32,
        #[case] total: Option<u32>,
        #[case] expected: bool,
    ) {
        let info = PageInfo::new(current).with_total_pages(total);
        assert_eq!(info.is_last_page(), expected);
    }

    #[rstest]
    #[case::zero(0, false)]
    #[case::one(1, true)]
    #[case::max(100, true)]
    #[case::over(101, false)]
    fn validates_page_size(#[case] per_page: u8, #[case] valid: bool) {
        assert_eq!(validate_per_page(per_page).is_ok(), valid);
    }

    #[rstest]
    fn query_carries_window_bounds_and_page() {
        let query = ItemQuery {
            kind: ItemKind::MergeRequest,
            window: YearWindow::new(2023).expect("2023 is in range"),
            page: 4,
            per_page: 100,
        };

        assert_eq!(
            query.query_params(),
            vec![
                ("scope", "all".to_owned()),
                ("created_after", "2023-01-01T00:00:00Z".to_owned()),
                ("created_before", "2024-01-01T00:00:00Z".to_owned()),
                ("per_page", "100".to_owned()),
                ("page", "4".to_owned()),
            ]
        );
    }
}
