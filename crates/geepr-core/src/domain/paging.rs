//! Paging types shared by every list operation.

use serde::Serialize;

/// Page size used when a caller asks for fewer than one item per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A caller's page request, as received.
///
/// The index is 1-based. Values below 1 are not rejected here; the query
/// layer clamps them (index to 1, size to [`DEFAULT_PAGE_SIZE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: i64,
    pub size: i64,
}

impl PageRequest {
    pub const fn new(index: i64, size: i64) -> Self {
        Self { index, size }
    }

    /// The request with out-of-range values clamped.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self {
            index: if self.index < 1 { 1 } else { self.index },
            size: if self.size < 1 {
                DEFAULT_PAGE_SIZE
            } else {
                self.size
            },
        }
    }

    /// Rows to skip, computed from the normalized request.
    ///
    /// Saturates at `i64::MAX`, which lands past the last row.
    pub const fn offset(self) -> i64 {
        let page = self.normalized();
        page.size.saturating_mul(page.index - 1)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a list result plus the number of rows matching the same
/// filters before paging.
///
/// The page and the total come from two separate queries, so under
/// concurrent writes they can disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// Normalized 1-based page index.
    pub index: i64,
    /// Normalized page size.
    pub size: i64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        let size = self.size.max(1).unsigned_abs();
        self.total.div_ceil(size)
    }
}
