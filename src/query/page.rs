//! Page slicing and total-page metadata
//!
//! # Example
//!
//! ```rust
//! use marquee::query::page::{paginate, PageQuery};
//!
//! let items: Vec<i32> = (1..=5).collect();
//! let query = PageQuery::new().with_page(2).with_per_page(2);
//!
//! assert_eq!(paginate(&items, &query), &[3, 4]);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Maximum allowed items per page
pub const MAX_PER_PAGE: u32 = 50;

/// Pagination query parameters
///
/// Both fields are optional on the wire; defaults are applied through
/// [`PageQuery::page_number`] and [`PageQuery::items_per_page`]. Page numbers
/// are not clamped: page 1 is the floor only through the default, and a
/// requested `page=0` lands on the first page because the offset saturates.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Page number (1-indexed). None defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Items per page. None defaults to DEFAULT_PER_PAGE, capped at MAX_PER_PAGE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PageQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// The 1-indexed page number, defaulting to 1
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Items per page with the default and cap applied
    ///
    /// ```rust
    /// use marquee::query::page::{PageQuery, MAX_PER_PAGE};
    ///
    /// assert_eq!(PageQuery::new().items_per_page(), 10);
    /// assert_eq!(PageQuery::new().with_per_page(1000).items_per_page(), MAX_PER_PAGE);
    /// ```
    #[must_use]
    pub fn items_per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Number of items to skip: `(page - 1) * per_page`, saturating at zero
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page_number().saturating_sub(1) as usize * self.items_per_page() as usize
    }
}

/// Slice one page out of an already-filtered collection, preserving order
pub fn paginate<'a, T>(items: &'a [T], query: &PageQuery) -> &'a [T] {
    let offset = query.offset();
    if offset >= items.len() {
        return &[];
    }
    let end = usize::min(offset + query.items_per_page() as usize, items.len());
    &items[offset..end]
}

/// Total page count: `ceil(count / per_page)`, 0 for an empty collection
#[must_use]
pub fn total_pages(count: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    ((count + per_page - 1) / per_page) as u32
}

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    /// Current page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total matching items across all pages
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether a next page exists
    pub has_next: bool,
    /// Whether a previous page exists
    pub has_prev: bool,
}

impl PageMeta {
    /// Build metadata for a page, deriving the page count from the total
    #[must_use]
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = total_pages(total, per_page);
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1 && total_pages > 0,
        }
    }

    /// Metadata for a query against a known total
    #[must_use]
    pub fn for_query(query: &PageQuery, total: u64) -> Self {
        Self::new(query.page_number(), query.items_per_page(), total)
    }
}
