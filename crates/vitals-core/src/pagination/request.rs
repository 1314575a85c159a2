//! Normalized page requests.

use serde::{Deserialize, Serialize};

/// Page size used when the caller asks for less than one item per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A normalized, 1-based page request.
///
/// Construction never fails: out-of-range input is clamped so that a malformed
/// request still yields a sane page. `page_number` is at least 1 and
/// `page_size` lies within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPageRequest")]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

/// Unvalidated wire form of [`PageRequest`].
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageRequest {
    page_number: Option<i64>,
    page_size: Option<i64>,
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        Self::normalize(raw.page_number, raw.page_size)
    }
}

impl PageRequest {
    /// Creates a page request, clamping both values into range.
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self::normalize(Some(page_number), Some(page_size))
    }

    /// Creates a page request from possibly absent values.
    ///
    /// An absent or non-positive page number becomes 1. An absent or
    /// non-positive page size becomes [`DEFAULT_PAGE_SIZE`]; anything above
    /// [`MAX_PAGE_SIZE`] is clamped down to it.
    pub fn normalize(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        let page_number = match page_number {
            Some(number) if number >= 1 => u32::try_from(number).unwrap_or(u32::MAX),
            _ => 1,
        };

        let page_size = match page_size {
            Some(size) if size >= 1 => size.min(i64::from(MAX_PAGE_SIZE)) as u32,
            _ => DEFAULT_PAGE_SIZE,
        };

        Self {
            page_number,
            page_size,
        }
    }

    /// Returns the 1-based page number.
    #[inline]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Returns the number of items per page.
    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of items preceding this page.
    #[inline]
    pub fn skip(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }

    /// Returns the maximum number of items on this page.
    #[inline]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalize(None, None)
    }
}
