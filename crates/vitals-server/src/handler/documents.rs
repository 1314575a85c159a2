//! Read-only document handlers shared by every document kind.
//!
//! The kind is the first path segment (`/activity/documents`,
//! `/sleep/documents`, ...), so one set of handlers serves all of them
//! through a per-request [`DocumentRepository`].
//!
//! [`DocumentRepository`]: vitals_core::DocumentRepository

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;

use crate::extract::{Path, Query};
use crate::handler::request::{
    DateRangeRequest, DocumentDatePathParams, DocumentKindPathParams, PaginationRequest,
};
use crate::handler::response::{DocumentResponse, PageResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for document operations.
const TRACING_TARGET: &str = "vitals_server::handler::documents";

/// Lists one page of documents, newest first.
#[tracing::instrument(skip_all, fields(kind = %path_params.kind))]
async fn list_documents(
    State(state): State<ServiceState>,
    Path(path_params): Path<DocumentKindPathParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<PageResponse>> {
    let kind = path_params.document_kind()?;
    let request = pagination.into();

    tracing::debug!(
        target: TRACING_TARGET,
        kind = %kind,
        page_number = ?pagination.page_number,
        page_size = ?pagination.page_size,
        "Listing documents"
    );

    let page = state.repository(kind).get_all(request).await?;

    tracing::info!(
        target: TRACING_TARGET,
        kind = %kind,
        page_number = page.page_number(),
        items = page.items().len(),
        total_count = page.total_count(),
        count_exact = page.count_status().is_exact(),
        "Documents listed"
    );

    Ok(Json(page.into()))
}

/// Returns the document recorded for a single day.
#[tracing::instrument(skip_all, fields(kind = %path_params.kind, date = %path_params.date))]
async fn get_document_by_date(
    State(state): State<ServiceState>,
    Path(path_params): Path<DocumentDatePathParams>,
) -> Result<Json<DocumentResponse>> {
    let kind = path_params.document_kind()?;
    let date = path_params.date()?;

    let Some(document) = state.repository(kind).get_by_date(date).await? else {
        tracing::debug!(target: TRACING_TARGET, kind = %kind, date = %date, "No document for date");
        return Err(ErrorKind::NotFound
            .with_message("No document recorded for this date")
            .with_resource(format!("{}/{}", kind.partition_key(), date)));
    };

    Ok(Json(document.into()))
}

/// Lists one page of documents dated within an inclusive range, newest first.
#[tracing::instrument(skip_all, fields(kind = %path_params.kind))]
async fn list_documents_by_range(
    State(state): State<ServiceState>,
    Path(path_params): Path<DocumentKindPathParams>,
    Query(range): Query<DateRangeRequest>,
) -> Result<Json<PageResponse>> {
    let kind = path_params.document_kind()?;
    let (start, end) = range.bounds()?;

    tracing::debug!(
        target: TRACING_TARGET,
        kind = %kind,
        start = %start,
        end = %end,
        "Listing documents by date range"
    );

    let page = state
        .repository(kind)
        .get_by_date_range(start, end, range.page_request())
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        kind = %kind,
        start = %start,
        end = %end,
        items = page.items().len(),
        total_count = page.total_count(),
        "Documents listed by date range"
    );

    Ok(Json(page.into()))
}

/// Returns a [`Router`] with all document routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/{kind}/documents", get(list_documents))
        .route("/{kind}/documents/range", get(list_documents_by_range))
        .route("/{kind}/documents/{date}", get(get_document_by_date))
}
