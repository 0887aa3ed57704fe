//! Pagination parameters and paged results

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Raw 1-based paging request; either part may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// `(page, limit, offset)` with page >= 1 and limit clamped to 1..=100.
    pub fn normalize(&self) -> (usize, usize, usize) {
        let page = self.page.map_or(1, |p| p.max(1) as usize);
        let limit = self
            .limit
            .map_or(DEFAULT_PAGE_SIZE, |l| (l as usize).clamp(1, MAX_PAGE_SIZE));
        (page, limit, (page - 1) * limit)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cuts the requested page out of an already ordered result set.
    pub fn paginate(items: Vec<T>, params: PaginationParams) -> Self {
        let (page, limit, offset) = params.normalize();
        let total = items.len();
        let data = items.into_iter().skip(offset).take(limit).collect();

        Self {
            data,
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit).max(1),
        }
    }
}
