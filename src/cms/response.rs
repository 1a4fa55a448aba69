//! Response envelopes returned by the content API

use serde::Deserialize;

/// One page of a collection, with pagination metadata
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionPage<T> {
    pub data: Vec<T>,
    pub meta: Meta,
}

impl<T> CollectionPage<T> {
    /// Total matching records across all pages
    pub fn total(&self) -> usize {
        self.meta.pagination.total
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
}
