//! Query parameters for data-table listings

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::repository::{OrderDirection, Pagination};

/// Default number of items per page
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Maximum allowed items per page
pub const MAX_PER_PAGE: u32 = 100;

/// Sort direction for data-table queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Sort in ascending order (A-Z, 0-9, oldest first)
    #[default]
    Asc,
    /// Sort in descending order (Z-A, 9-0, newest first)
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl From<SortOrder> for OrderDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => OrderDirection::Ascending,
            SortOrder::Desc => OrderDirection::Descending,
        }
    }
}

/// Query parameters accepted by the `dt` operation
///
/// # Example
///
/// ```rust
/// use acacia_admin::handlers::DtQuery;
///
/// let query = DtQuery::default();
/// assert_eq!(query.page_number(), 1);
/// assert_eq!(query.items_per_page(), 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DtQuery {
    /// Page number (1-indexed). None defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of items per page. None defaults to [`DEFAULT_PER_PAGE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Field name to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Sort direction (asc or desc)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,

    /// Search query string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl DtQuery {
    /// The 1-indexed page number, defaulting to 1
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Items per page, clamped to 1..=[`MAX_PER_PAGE`]
    #[must_use]
    pub fn items_per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// The sort order, defaulting to ascending
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    /// The repository pagination window for this query
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::page(
            u64::from(self.page_number()),
            u64::from(self.items_per_page()),
        )
    }

    /// The repository sort selector, if a sort field was requested
    #[must_use]
    pub fn order_by(&self) -> Option<(&str, OrderDirection)> {
        self.sort
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| (s, self.sort_order().into()))
    }
}
