//! Pagination primitives
//!
//! Page numbers are 1-based. `PageRequest` is built from optional query
//! parameters and clamps them into range; `Pagination` is the metadata
//! returned next to a page of items.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build from raw query values.
    ///
    /// Missing or zero `page` becomes 1. Missing or zero `limit` becomes
    /// `default_limit`; anything above `max_limit` is clamped.
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32, max_limit: u32) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(max_limit)
            .max(1);
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

/// Page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let limit = u64::from(request.limit());
        let total_pages = total_items.div_ceil(limit);
        let end = request.offset() + limit;

        Self {
            current_page: request.page(),
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            total_items,
            has_next: end < total_items,
            has_prev: request.page() > 1,
        }
    }
}
