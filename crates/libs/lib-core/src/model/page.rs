//! # Pagination
//!
//! [`PageRequest`] coerces raw `page`/`limit` query values into a usable request;
//! malformed values fall back to defaults instead of failing. [`Page`] carries one
//! slice of results plus the totals computed from the same snapshot.

use crate::config::{DEFAULT_MAX_PAGE_LIMIT, DEFAULT_PAGE_LIMIT};
use serde::Serialize;

/// A validated page request: `page >= 1`, `1 <= limit <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from already-typed values, using the stock limits.
    pub fn new(page: i64, limit: i64) -> Self {
        Self::coerce(Some(page), Some(limit), DEFAULT_PAGE_LIMIT, DEFAULT_MAX_PAGE_LIMIT)
    }

    /// Build a request from raw query strings.
    ///
    /// Absent, unparsable, or non-positive values take the defaults
    /// (`page = 1`, `limit = default_limit`); limits above `max_limit` are clamped.
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u32,
        max_limit: u32,
    ) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::coerce(parse(page), parse(limit), default_limit, max_limit)
    }

    fn coerce(page: Option<i64>, limit: Option<i64>, default_limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.max(1);
        let default_limit = default_limit.clamp(1, max_limit);

        let page = page
            .filter(|p| *p > 0)
            .map(|p| p.min(u32::MAX as i64) as u32)
            .unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .map(|l| l.min(max_limit as i64) as u32)
            .unwrap_or(default_limit);

        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records before this page.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// One page of items with the totals it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            limit: request.limit(),
            total,
            total_pages: total_pages(total, request.limit()),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total / limit)`, zero for an empty collection.
pub fn total_pages(total: u64, limit: u32) -> u64 {
    let limit = limit.max(1) as u64;
    total.div_ceil(limit)
}

/// Slice `items` (already in listing order) for `request`.
pub fn slice_for<T: Clone>(items: &[T], request: PageRequest) -> Vec<T> {
    let start = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    items
        .iter()
        .skip(start)
        .take(request.limit() as usize)
        .cloned()
        .collect()
}
