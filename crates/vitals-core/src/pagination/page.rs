//! Assembled pages and their derived metadata.

use serde::{Deserialize, Serialize};

use super::PageRequest;

/// Outcome of the counting sub-query that accompanies a page.
///
/// Counting is best-effort: when it fails the page is still served, and the
/// status records that the total is unknown rather than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountStatus {
    /// The store reported this many matching documents.
    Exact(u64),
    /// The count could not be computed.
    Unavailable,
}

impl CountStatus {
    /// Returns the total, or 0 when the count is unavailable.
    #[inline]
    pub fn total(self) -> u64 {
        match self {
            Self::Exact(total) => total,
            Self::Unavailable => 0,
        }
    }

    /// Returns true if the store reported an exact count.
    #[inline]
    pub fn is_exact(self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

/// A window of items together with the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    count: CountStatus,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Combines a fetched window, its count and the originating request.
    ///
    /// Pure: a request beyond the last page simply carries no items.
    pub fn assemble(items: Vec<T>, count: CountStatus, request: PageRequest) -> Self {
        Self {
            items,
            count,
            request,
        }
    }

    /// Creates an empty page with an exact count of zero.
    pub fn empty(request: PageRequest) -> Self {
        Self::assemble(Vec::new(), CountStatus::Exact(0), request)
    }

    /// Returns the items in this page.
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its items.
    #[inline]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the count outcome.
    #[inline]
    pub fn count_status(&self) -> CountStatus {
        self.count
    }

    /// Returns the total number of matching items, 0 if unknown.
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.count.total()
    }

    /// Returns the 1-based page number.
    #[inline]
    pub fn page_number(&self) -> u32 {
        self.request.page_number()
    }

    /// Returns the requested page size.
    #[inline]
    pub fn page_size(&self) -> u32 {
        self.request.page_size()
    }

    /// Returns the number of pages, 0 when there are no items.
    pub fn total_pages(&self) -> u64 {
        self.total_count().div_ceil(u64::from(self.page_size()))
    }

    /// Returns true unless this is the first page.
    #[inline]
    pub fn has_previous_page(&self) -> bool {
        self.page_number() > 1
    }

    /// Returns true if items exist beyond this page.
    #[inline]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page_number()) * u64::from(self.page_size()) < self.total_count()
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            request: self.request,
        }
    }

    /// Maps the items with a fallible function, failing on the first error.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            count: self.count,
            request: self.request,
        })
    }
}
