//! Wire forms of documents and pages.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use vitals_core::{CountStatus, Document, DocumentKind, Page};

/// A stored document as returned to clients.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub document_kind: DocumentKind,
    pub date: Date,
    pub payload: serde_json::Value,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            document_kind: document.document_kind,
            date: document.date,
            payload: document.payload,
        }
    }
}

/// A page of documents with its navigation metadata.
///
/// `totalCount` is 0 when `countStatus` is `unavailable`, so clients that
/// only read the numbers keep working when counting fails.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub items: Vec<DocumentResponse>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub count_status: CountStatusResponse,
}

/// Whether `totalCount` is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountStatusResponse {
    Exact,
    Unavailable,
}

impl From<CountStatus> for CountStatusResponse {
    fn from(status: CountStatus) -> Self {
        match status {
            CountStatus::Exact(_) => Self::Exact,
            CountStatus::Unavailable => Self::Unavailable,
        }
    }
}

impl From<Page<Document>> for PageResponse {
    fn from(page: Page<Document>) -> Self {
        Self {
            total_count: page.total_count(),
            page_number: page.page_number(),
            page_size: page.page_size(),
            total_pages: page.total_pages(),
            has_previous_page: page.has_previous_page(),
            has_next_page: page.has_next_page(),
            count_status: page.count_status().into(),
            items: page.into_items().into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use serde_json::json;
    use vitals_core::{NewDocument, PageRequest};

    use super::*;

    #[test]
    fn page_metadata_is_camel_case() {
        let items = vec![
            NewDocument::new(DocumentKind::Food, date(2024, 3, 1), json!({"kcal": 2100}))
                .with_id("f1")
                .into_document(1),
        ];
        let page = Page::assemble(items, CountStatus::Exact(41), PageRequest::new(2, 20));

        let json = serde_json::to_value(PageResponse::from(page)).unwrap();
        assert_eq!(json["totalCount"], 41);
        assert_eq!(json["pageNumber"], 2);
        assert_eq!(json["pageSize"], 20);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasPreviousPage"], true);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["countStatus"], "exact");
        assert_eq!(json["items"][0]["documentKind"], "Food");
        assert_eq!(json["items"][0]["date"], "2024-03-01");
    }

    #[test]
    fn unavailable_count_reads_as_zero() {
        let page: Page<Document> =
            Page::assemble(Vec::new(), CountStatus::Unavailable, PageRequest::default());

        let response = PageResponse::from(page);
        assert_eq!(response.total_count, 0);
        assert_eq!(response.total_pages, 0);
        assert_eq!(response.count_status, CountStatusResponse::Unavailable);
    }
}
