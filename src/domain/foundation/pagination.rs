//! Pagination primitives shared by list operations.

use serde::{Deserialize, Serialize};

/// Maximum number of items a caller may request per page.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Default number of items per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// A validated page request (1-based page number, clamped limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Creates a page request, clamping out-of-range values.
    ///
    /// Page numbers below 1 become 1; limits are clamped to
    /// `1..=MAX_PAGE_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

/// Pagination metadata echoed back to list callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl PageMeta {
    /// Computes metadata for a page request against a total item count.
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let limit = u64::from(request.limit());
        let total_pages = ((total_items + limit - 1) / limit) as u32;
        Self {
            current_page: request.page(),
            total_pages,
            total_items,
            items_per_page: request.limit(),
        }
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total_items),
        }
    }

    /// Maps the page items while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps_page_to_one() {
        let request = PageRequest::new(0, 20);
        assert_eq!(request.page(), 1);
    }

    #[test]
    fn page_request_clamps_limit_to_maximum() {
        let request = PageRequest::new(1, 500);
        assert_eq!(request.limit(), MAX_PAGE_LIMIT);
    }

    #[test]
    fn page_request_clamps_zero_limit_to_one() {
        let request = PageRequest::new(1, 0);
        assert_eq!(request.limit(), 1);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let request = PageRequest::new(3, 20);
        assert_eq!(request.offset(), 40);
    }

    #[test]
    fn page_meta_computes_total_pages_rounding_up() {
        let meta = PageMeta::new(PageRequest::new(1, 20), 41);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total_items, 41);
        assert_eq!(meta.items_per_page, 20);
    }

    #[test]
    fn page_meta_handles_empty_results() {
        let meta = PageMeta::new(PageRequest::new(1, 20), 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn page_map_preserves_metadata() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(2, 3), 7);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1", "2", "3"]);
        assert_eq!(mapped.meta.current_page, 2);
        assert_eq!(mapped.meta.total_pages, 3);
    }

    #[test]
    fn sort_order_deserializes_lowercase() {
        let order: SortOrder = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(order, SortOrder::Asc);
    }
}
