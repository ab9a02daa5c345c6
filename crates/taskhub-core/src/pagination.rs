//! Page-based pagination for list endpoints.
//!
//! List endpoints accept `page` (1-indexed, default 1) and `size`
//! (1-50, default 10) query parameters. Out-of-range values are clamped
//! rather than rejected.
//!
//! # Example
//!
//! ```ignore
//! use taskhub_core::pagination::{PaginationParams, PaginationMeta};
//!
//! let params = PaginationParams { page: Some(3), size: Some(20) };
//! assert_eq!(params.offset(), 40);
//!
//! let meta = PaginationMeta::new(&params, 100);
//! assert!(meta.has_more);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 50;

/// Metadata about a paginated response.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "data": [...],
///   "meta": {
///     "total": 100,
///     "page": 3,
///     "size": 10,
///     "has_more": true
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items matching the filters
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page (the size that was applied)
    pub size: i64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        Self {
            total,
            page: params.page(),
            size: params.size(),
            has_more: params.offset() + params.size() < total,
        }
    }
}

/// Pagination parameters, usually built from a filter's `page`/`size` fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, ToSchema)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    pub page: Option<i64>,
    /// Items per page (1-50, default: 10)
    pub size: Option<i64>,
}

impl PaginationParams {
    /// Returns the page number, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Returns the page size, clamped to [1, 50].
    #[must_use]
    pub fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Returns the number of rows to skip: `(page - 1) * size`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.size()
    }
}
