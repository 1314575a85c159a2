//! Ordered, offset-bounded fetches.

use futures::TryStreamExt;
use tokio_util::sync::CancellationToken;

use crate::store::{BatchStream, DocumentQuery, DocumentStore, Predicate, SortOrder};
use crate::{Document, DocumentKind, Error, Result, TRACING_TARGET_QUERY};

/// Drains every batch of `batches` into a single list.
///
/// Stops at the first failing batch. If `cancel` fires first, the stream is
/// dropped and the result is a cancellation error, never a partial list.
pub async fn drain(batches: BatchStream<'_>, cancel: &CancellationToken) -> Result<Vec<Document>> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::cancelled()),
        result = batches.try_concat() => result,
    }
}

/// Fetches at most `limit` documents of `kind` matching `predicate`, newest
/// first, after skipping `skip` of them.
///
/// Errors are logged and returned tagged with `operation`.
pub async fn fetch_window(
    store: &dyn DocumentStore,
    kind: DocumentKind,
    predicate: Predicate,
    skip: u64,
    limit: u64,
    cancel: &CancellationToken,
    operation: &'static str,
) -> Result<Vec<Document>> {
    let query = DocumentQuery::new(kind, predicate)
        .with_order(SortOrder::NewestFirst)
        .with_window(skip, limit);

    let documents = drain(store.query(query), cancel).await.map_err(|error| {
        if !error.is_cancelled() {
            tracing::error!(
                target: TRACING_TARGET_QUERY,
                operation,
                kind = %kind,
                skip,
                limit,
                error = %error,
                "Windowed fetch failed"
            );
        }
        error.with_operation(operation)
    })?;

    tracing::debug!(
        target: TRACING_TARGET_QUERY,
        operation,
        kind = %kind,
        skip,
        limit,
        fetched = documents.len(),
        "Windowed fetch completed"
    );

    Ok(documents)
}
