//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust
//! use vitals_core::MemoryStore;
//! use vitals_server::handler::routes;
//! use vitals_server::service::ServiceState;
//!
//! let state = ServiceState::new(MemoryStore::new());
//! let app: axum::Router = routes().with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod documents;
mod error;
mod monitors;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};
use tower_http::trace::TraceLayer;

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes, request tracing and a JSON 404
/// fallback.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(documents::routes())
        .merge(monitors::routes())
        .fallback(handler)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use futures::stream::{self, StreamExt};
    use jiff::civil::date;
    use serde_json::{Value, json};
    use vitals_core::store::{BatchStream, DocumentQuery, Predicate};
    use vitals_core::{
        Document, DocumentKind, DocumentStore, MemoryStore, NewDocument,
        Result as CoreResult,
    };

    use crate::handler::response::{DocumentResponse, HealthResponse, PageResponse};
    use crate::handler::routes;
    use crate::service::ServiceState;

    /// Returns a new [`TestServer`] with the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = routes().with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a store holding three January 2024 activity documents and one
    /// sleep document.
    async fn seeded_store() -> anyhow::Result<MemoryStore> {
        let store = MemoryStore::new();
        let seed = [
            ("a1", DocumentKind::Activity, date(2024, 1, 1), json!({"steps": 4200})),
            ("a2", DocumentKind::Activity, date(2024, 1, 15), json!({"steps": 9100})),
            ("a3", DocumentKind::Activity, date(2024, 1, 31), json!({"steps": 12050})),
            ("s1", DocumentKind::Sleep, date(2024, 1, 15), json!({"minutes": 431})),
        ];

        for (id, kind, day, payload) in seed {
            store.insert(NewDocument::new(kind, day, payload).with_id(id)).await?;
        }

        Ok(store)
    }

    /// Returns a new [`TestServer`] over the seeded store.
    async fn create_test_server() -> anyhow::Result<TestServer> {
        let state = ServiceState::new(seeded_store().await?);
        create_test_server_with_state(state)
    }

    fn ids(page: &PageResponse) -> Vec<&str> {
        page.items.iter().map(|item| item.id.as_str()).collect()
    }

    /// Fails either every query or every count.
    struct FailingStore {
        inner: MemoryStore,
        fail_queries: bool,
    }

    #[async_trait]
    impl DocumentStore for FailingStore {
        fn query(&self, query: DocumentQuery) -> BatchStream<'_> {
            if self.fail_queries {
                let error = vitals_core::Error::store().with_message("cursor lost");
                stream::iter([Err(error)]).boxed()
            } else {
                self.inner.query(query)
            }
        }

        async fn count(&self, kind: DocumentKind, predicate: Predicate) -> CoreResult<u64> {
            if self.fail_queries {
                self.inner.count(kind, predicate).await
            } else {
                Err(vitals_core::Error::store().with_message("count throttled"))
            }
        }

        async fn insert(&self, document: NewDocument) -> CoreResult<Document> {
            self.inner.insert(document).await
        }
    }

    #[tokio::test]
    async fn health_reports_ok() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<HealthResponse>(), HealthResponse::ok());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/nowhere").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["name"], "not_found");
        Ok(())
    }

    #[tokio::test]
    async fn list_newest_first() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/activity/documents").await;
        response.assert_status_ok();

        let page = response.json::<PageResponse>();
        assert_eq!(ids(&page), ["a3", "a2", "a1"]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, vitals_core::DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_previous_page);
        assert!(!page.has_next_page);
        Ok(())
    }

    #[tokio::test]
    async fn list_second_page() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .get("/activity/documents")
            .add_query_param("pageNumber", 2)
            .add_query_param("pageSize", 2)
            .await;
        response.assert_status_ok();

        let page = response.json::<PageResponse>();
        assert_eq!(ids(&page), ["a1"]);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_pagination_is_normalized() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .get("/activity/documents")
            .add_query_param("pageNumber", -4)
            .add_query_param("pageSize", 0)
            .await;
        response.assert_status_ok();

        let page = response.json::<PageResponse>();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, vitals_core::DEFAULT_PAGE_SIZE);
        assert_eq!(page.items.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_pagination_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .get("/activity/documents")
            .add_query_param("pageSize", "lots")
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["name"], "bad_request");
        Ok(())
    }

    #[tokio::test]
    async fn kinds_are_isolated_and_case_insensitive() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let page = server.get("/SLEEP/documents").await.json::<PageResponse>();
        assert_eq!(ids(&page), ["s1"]);
        assert!(page.items.iter().all(|d| d.document_kind == DocumentKind::Sleep));

        let empty = server.get("/food/documents").await.json::<PageResponse>();
        assert!(empty.items.is_empty());
        assert_eq!(empty.total_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_kind_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/heartrate/documents").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["resource"], "heartrate");
        Ok(())
    }

    #[tokio::test]
    async fn get_by_date() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/activity/documents/2024-01-15").await;
        response.assert_status_ok();
        let document = response.json::<DocumentResponse>();
        assert_eq!(document.id, "a2");
        assert_eq!(document.payload, json!({"steps": 9100}));

        server
            .get("/activity/documents/2024-01-16")
            .await
            .assert_status_not_found();

        server
            .get("/activity/documents/15-01-2024")
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn range_is_inclusive() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .get("/activity/documents/range")
            .add_query_param("startDate", "2024-01-01")
            .add_query_param("endDate", "2024-01-15")
            .await;
        response.assert_status_ok();

        let page = response.json::<PageResponse>();
        assert_eq!(ids(&page), ["a2", "a1"]);
        assert_eq!(page.total_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_ranges_are_rejected() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let inverted = server
            .get("/activity/documents/range")
            .add_query_param("startDate", "2024-02-01")
            .add_query_param("endDate", "2024-01-01")
            .await;
        inverted.assert_status_bad_request();
        assert_eq!(inverted.json::<Value>()["message"], "Invalid date range");

        server
            .get("/activity/documents/range")
            .add_query_param("startDate", "2024-13-01")
            .add_query_param("endDate", "2024-12-31")
            .await
            .assert_status_bad_request();

        server
            .get("/activity/documents/range")
            .add_query_param("endDate", "2024-12-31")
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn count_failure_still_serves_items() -> anyhow::Result<()> {
        let store = FailingStore {
            inner: seeded_store().await?,
            fail_queries: false,
        };
        let server = create_test_server_with_state(ServiceState::new(store))?;

        let response = server.get("/activity/documents").await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["totalCount"], 0);
        assert_eq!(body["countStatus"], "unavailable");
        assert_eq!(body["items"].as_array().map(Vec::len), Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_failure_is_internal_error() -> anyhow::Result<()> {
        let store = FailingStore {
            inner: seeded_store().await?,
            fail_queries: true,
        };
        let server = create_test_server_with_state(ServiceState::new(store))?;

        let response = server.get("/activity/documents").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.json::<Value>();
        assert_eq!(body["name"], "internal_server_error");
        assert_eq!(body["context"], "get_all failed: cursor lost");
        Ok(())
    }

    #[tokio::test]
    async fn shutdown_cancels_reads() -> anyhow::Result<()> {
        let state = ServiceState::from_shared(Arc::new(seeded_store().await?));
        state.shutdown.cancel();
        let server = create_test_server_with_state(state)?;

        server
            .get("/activity/documents")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
        server
            .get("/activity/documents/2024-01-15")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
        Ok(())
    }
}
