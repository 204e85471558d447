//! Search query parameters and pagination
//!
//! The query model does double duty: it drives the repository search and
//! provides the canonical cache-key encoding. Two logically identical
//! requests must map to the same key, so the encoding covers every field
//! in a fixed order.

use serde::{Deserialize, Serialize};

/// Hard ceiling on page size, applied during normalization.
pub const MAX_PAGE_SIZE: usize = 100;

// == Query Params ==
/// Query parameters accepted by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Substring to search for; empty means no text filter
    pub search: String,
    /// Field the substring applies to: "name" or "email"
    pub search_by: String,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    /// One of "id", "name", "email", "age"; unknown values fall back to "id"
    pub sort_by: String,
    /// "asc" or "desc"
    pub sort_order: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            search_by: String::new(),
            min_age: None,
            max_age: None,
            sort_by: "id".to_string(),
            sort_order: "asc".to_string(),
            page: 1,
            page_size: 10,
        }
    }
}

impl QueryParams {
    // == Normalize ==
    /// Clamps paging values into their valid ranges and lowercases the
    /// sort order. Out-of-range values are corrected, not rejected.
    pub fn normalized(mut self) -> Self {
        if self.page == 0 {
            self.page = 1;
        }
        if self.page_size == 0 {
            self.page_size = 10;
        }
        self.page_size = self.page_size.min(MAX_PAGE_SIZE);
        self.sort_order = self.sort_order.to_lowercase();
        self
    }

    // == Cache Key ==
    /// Deterministic encoding of the full parameter set.
    ///
    /// Every field participates so that logically distinct requests can
    /// never collide on a key.
    pub fn cache_key(&self) -> String {
        format!(
            "users:search:q={}&by={}&min={}&max={}&sort={}&order={}&page={}&size={}",
            self.search,
            self.search_by,
            self.min_age.map_or_else(|| "-".to_string(), |v| v.to_string()),
            self.max_age.map_or_else(|| "-".to_string(), |v| v.to_string()),
            self.sort_by,
            self.sort_order,
            self.page,
            self.page_size,
        )
    }
}

// == Pagination ==
/// Paging metadata attached to every search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

// == Paginated Response ==
/// A page of results plus its paging metadata. This is the shape the
/// search handler caches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    /// Assembles a page from the already-sliced data and the total match
    /// count.
    pub fn new(data: Vec<T>, params: &QueryParams, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(params.page_size);
        Self {
            data,
            pagination: Pagination {
                current_page: params.page,
                page_size: params.page_size,
                total_items,
                total_pages,
                has_next: params.page < total_pages,
                has_previous: params.page > 1,
            },
        }
    }
}
