use serde::{Deserialize, Serialize};
use vitals_core::PageRequest;

/// `?pageNumber=&pageSize=` query parameters.
///
/// Both are optional and never rejected for being out of range: they are
/// normalized into a [`PageRequest`]. Only a value that is not an integer at
/// all fails extraction.
#[must_use]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    /// 1-based page number.
    pub page_number: Option<i64>,
    /// Items per page.
    pub page_size: Option<i64>,
}

impl From<PaginationRequest> for PageRequest {
    fn from(request: PaginationRequest) -> Self {
        PageRequest::normalize(request.page_number, request.page_size)
    }
}
