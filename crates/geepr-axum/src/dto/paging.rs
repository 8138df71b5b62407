//! Paging metadata shared by every list response.

use geepr_core::Page;
use serde::Serialize;

/// `page`, `pageSize` and `totalPages`, flattened into list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    pub total_pages: u64,
}

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.index,
            page_size: page.size,
            total_pages: page.total_pages(),
        }
    }
}
