//! [`DocumentStore`] backed by the `documents` table.

use async_stream::try_stream;
use async_trait::async_trait;
use vitals_core::store::{BatchStream, DocumentQuery, DocumentStore, Predicate};
use vitals_core::{Document, DocumentKind, Error, NewDocument, Result};

use crate::model::{DocumentRow, NewDocumentRow};
use crate::query::{Pagination, PgDocumentRepository};
use crate::{PgClient, PgError, TRACING_TARGET_QUERY};

fn store_error(operation: &'static str) -> impl FnOnce(PgError) -> Error {
    move |error| Error::from(error).with_operation(operation)
}

/// Number of rows to request next, or `None` once `limit` rows were fetched.
fn next_batch(batch_size: u64, limit: Option<u64>, fetched: u64) -> Option<u64> {
    let take = match limit {
        Some(limit) => limit.saturating_sub(fetched).min(batch_size),
        None => batch_size,
    };

    (take > 0).then_some(take)
}

#[async_trait]
impl DocumentStore for PgClient {
    /// Streams matching rows one `batch_size` window at a time.
    ///
    /// A single connection is held for the whole stream. The stream ends after
    /// a short batch, an empty batch, or once the query's limit is reached.
    fn query(&self, query: DocumentQuery) -> BatchStream<'_> {
        let batch_size = self.config().batch_size();

        Box::pin(try_stream! {
            let mut conn = self.get_connection().await.map_err(store_error("query"))?;
            let mut fetched = 0_u64;

            while let Some(take) = next_batch(batch_size, query.limit, fetched) {
                let pagination = Pagination::from_window(take, query.offset.saturating_add(fetched));
                let rows = conn
                    .find_documents(query.kind, query.predicate, query.order, pagination)
                    .await
                    .map_err(store_error("query"))?;

                let received = rows.len() as u64;
                tracing::trace!(
                    target: TRACING_TARGET_QUERY,
                    kind = %query.kind,
                    offset = pagination.offset,
                    requested = take,
                    received,
                    "Fetched document batch"
                );

                if received == 0 {
                    break;
                }

                let batch = rows
                    .into_iter()
                    .map(DocumentRow::into_document)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(store_error("query"))?;

                fetched += received;
                yield batch;

                if received < take {
                    break;
                }
            }
        })
    }

    async fn count(&self, kind: DocumentKind, predicate: Predicate) -> Result<u64> {
        let mut conn = self.get_connection().await.map_err(store_error("count"))?;
        let count = conn
            .count_documents(kind, predicate)
            .await
            .map_err(store_error("count"))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn insert(&self, document: NewDocument) -> Result<Document> {
        let mut conn = self.get_connection().await.map_err(store_error("insert"))?;
        let row = conn
            .insert_document(NewDocumentRow::from(document))
            .await
            .map_err(store_error("insert"))?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            id = %row.id,
            kind = %row.document_kind,
            sequence = row.sequence,
            "Inserted document"
        );

        row.into_document().map_err(store_error("insert"))
    }
}
