//! In-process document store.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use tokio::sync::RwLock;

use super::{BatchStream, DocumentQuery, DocumentStore, Predicate, SortOrder};
use crate::{Document, DocumentKind, Error, NewDocument, Result, TRACING_TARGET_STORE};

/// Default number of documents per batch.
const DEFAULT_BATCH_SIZE: usize = 100;

/// A [`DocumentStore`] kept entirely in memory.
///
/// Documents are held in insertion order and results are handed out in
/// batches of a configurable size, so callers see the same multi-batch
/// behavior as with a remote store. Cloning is cheap and clones share state.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryState>>,
    batch_size: usize,
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: Vec<Document>,
    next_sequence: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets the number of documents returned per batch (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    async fn select(&self, query: DocumentQuery) -> Vec<Document> {
        let state = self.inner.read().await;
        let matching = state
            .documents
            .iter()
            .filter(|document| document.document_kind == query.kind)
            .filter(|document| query.predicate.matches(document.date));

        let ordered: Vec<&Document> = match query.order {
            SortOrder::Natural => matching.collect(),
            SortOrder::NewestFirst => matching.rev().collect(),
        };

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        ordered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn query(&self, query: DocumentQuery) -> BatchStream<'_> {
        let batch_size = self.batch_size;

        stream::once(self.select(query))
            .flat_map(move |documents| {
                let batches: Vec<Result<Vec<Document>>> = documents
                    .chunks(batch_size)
                    .map(|chunk| Ok(chunk.to_vec()))
                    .collect();
                stream::iter(batches)
            })
            .boxed()
    }

    async fn count(&self, kind: DocumentKind, predicate: Predicate) -> Result<u64> {
        let state = self.inner.read().await;
        let count = state
            .documents
            .iter()
            .filter(|document| document.document_kind == kind && predicate.matches(document.date))
            .count();

        Ok(count as u64)
    }

    async fn insert(&self, document: NewDocument) -> Result<Document> {
        let mut state = self.inner.write().await;

        let duplicate = state
            .documents
            .iter()
            .any(|stored| stored.document_kind == document.document_kind && stored.id == document.id);
        if duplicate {
            return Err(Error::conflict()
                .with_operation("insert")
                .with_message(format!(
                    "document '{}' already exists in partition '{}'",
                    document.id, document.document_kind
                )));
        }

        state.next_sequence += 1;
        let document = document.into_document(state.next_sequence);
        state.documents.push(document.clone());

        tracing::trace!(
            target: TRACING_TARGET_STORE,
            id = %document.id,
            kind = %document.document_kind,
            sequence = document.sequence,
            "Stored document in memory"
        );

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;
    use jiff::civil::date;
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    async fn seeded(batch_size: usize) -> MemoryStore {
        let store = MemoryStore::new().with_batch_size(batch_size);
        for day in 1..=5 {
            let document = NewDocument::new(DocumentKind::Sleep, date(2024, 2, day), json!({}))
                .with_id(format!("sleep-{day}"));
            store.insert(document).await.unwrap();
        }
        store
            .insert(NewDocument::new(DocumentKind::Food, date(2024, 2, 1), json!({})))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn results_arrive_in_batches() {
        let store = seeded(2).await;
        let query = DocumentQuery::new(DocumentKind::Sleep, Predicate::Partition);

        let batches: Vec<Vec<Document>> = store.query(query).try_collect().await.unwrap();
        let sizes: Vec<_> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, [2, 2, 1]);
    }

    #[tokio::test]
    async fn newest_first_window() {
        let store = seeded(10).await;
        let query = DocumentQuery::new(DocumentKind::Sleep, Predicate::Partition)
            .with_order(SortOrder::NewestFirst)
            .with_window(1, 2);

        let documents: Vec<Document> = store.query(query).try_concat().await.unwrap();
        let ids: Vec<_> = documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["sleep-4", "sleep-3"]);
    }

    #[tokio::test]
    async fn empty_result_has_no_batches() {
        let store = seeded(10).await;
        let query = DocumentQuery::new(DocumentKind::Weight, Predicate::Partition);
        let batches: Vec<Vec<Document>> = store.query(query).try_collect().await.unwrap();
        assert!(batches.is_empty());
    }

    #[tokio::test]
    async fn count_is_partition_scoped() {
        let store = seeded(10).await;
        let predicate = Predicate::DateRange {
            start: date(2024, 2, 2),
            end: date(2024, 2, 4),
        };

        assert_eq!(store.count(DocumentKind::Sleep, Predicate::Partition).await.unwrap(), 5);
        assert_eq!(store.count(DocumentKind::Sleep, predicate).await.unwrap(), 3);
        assert_eq!(store.count(DocumentKind::Food, Predicate::Partition).await.unwrap(), 1);
        assert_eq!(MemoryStore::new().count(DocumentKind::Food, Predicate::Partition).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected_per_partition() {
        let store = seeded(10).await;

        let duplicate = NewDocument::new(DocumentKind::Sleep, date(2024, 3, 1), json!({}))
            .with_id("sleep-1");
        let error = store.insert(duplicate).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Conflict);

        let other_partition = NewDocument::new(DocumentKind::Weight, date(2024, 3, 1), json!({}))
            .with_id("sleep-1");
        assert!(store.insert(other_partition).await.is_ok());
    }

    #[tokio::test]
    async fn sequences_increase() {
        let store = MemoryStore::new();
        let first = store
            .insert(NewDocument::new(DocumentKind::Activity, date(2024, 1, 1), json!({})))
            .await
            .unwrap();
        let second = store
            .insert(NewDocument::new(DocumentKind::Activity, date(2024, 1, 1), json!({})))
            .await
            .unwrap();
        assert!(second.sequence > first.sequence);
    }
}
