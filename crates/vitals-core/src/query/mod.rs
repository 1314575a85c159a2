//! Store-agnostic building blocks of the paginated query layer.
//!
//! Every document kind shares these: a best-effort count, an ordered window
//! drained from a batch stream, and a first-match lookup by date. The
//! [`DocumentRepository`] composes them into its public operations.
//!
//! [`DocumentRepository`]: crate::DocumentRepository

mod count;
mod lookup;
mod window;

pub use count::estimate_count;
pub use lookup::find_by_date;
pub use window::{drain, fetch_window};

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use futures::StreamExt;
    use futures::stream;
    use jiff::civil::date;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::store::{BatchStream, DocumentQuery, DocumentStore, MemoryStore, Predicate};
    use crate::{CountStatus, Document, DocumentKind, Error, ErrorKind, NewDocument, Result};

    fn document(id: &str, day: i8) -> Document {
        NewDocument::new(DocumentKind::Activity, date(2024, 1, day), json!({}))
            .with_id(id)
            .into_document(i64::from(day))
    }

    /// Replays a fixed script of batches and fails every count.
    struct ScriptedStore {
        batches: Vec<Result<Vec<Document>, ErrorKind>>,
        pending: bool,
    }

    #[async_trait]
    impl DocumentStore for ScriptedStore {
        fn query(&self, _query: DocumentQuery) -> BatchStream<'_> {
            let batches: Vec<Result<Vec<Document>>> = self
                .batches
                .iter()
                .map(|batch| batch.clone().map_err(Error::new))
                .collect();
            let scripted = stream::iter(batches);
            if self.pending {
                scripted.chain(stream::pending()).boxed()
            } else {
                scripted.boxed()
            }
        }

        async fn count(&self, _kind: DocumentKind, _predicate: Predicate) -> Result<u64> {
            Err(Error::store().with_message("count timed out"))
        }

        async fn insert(&self, _document: NewDocument) -> Result<Document> {
            Err(Error::store())
        }
    }

    #[tokio::test]
    async fn drain_concatenates_batches_in_order() {
        let store = ScriptedStore {
            batches: vec![
                Ok(vec![document("a", 1), document("b", 2)]),
                Ok(vec![]),
                Ok(vec![document("c", 3)]),
            ],
            pending: false,
        };

        let cancel = CancellationToken::new();
        let query = DocumentQuery::new(DocumentKind::Activity, Predicate::Partition);
        let documents = drain(store.query(query), &cancel).await.unwrap();
        let ids: Vec<_> = documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn failing_batch_fails_the_window() {
        let store = ScriptedStore {
            batches: vec![Ok(vec![document("a", 1)]), Err(ErrorKind::Store)],
            pending: false,
        };

        let cancel = CancellationToken::new();
        let error = fetch_window(
            &store,
            DocumentKind::Activity,
            Predicate::Partition,
            0,
            10,
            &cancel,
            "get_all",
        )
        .await
        .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Store);
        assert_eq!(error.operation(), "get_all");
    }

    #[tokio::test]
    async fn cancellation_stops_the_drain() {
        let store = ScriptedStore {
            batches: vec![Ok(vec![document("a", 1)])],
            pending: true,
        };

        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let query = DocumentQuery::new(DocumentKind::Activity, Predicate::Partition);
        let error = drain(store.query(query), &cancel).await.unwrap_err();
        assert!(error.is_cancelled());
    }

    #[tokio::test]
    async fn count_failure_degrades() {
        let store = ScriptedStore {
            batches: vec![],
            pending: false,
        };

        let cancel = CancellationToken::new();
        let status = estimate_count(&store, DocumentKind::Activity, Predicate::Partition, &cancel)
            .await
            .unwrap();
        assert_eq!(status, CountStatus::Unavailable);
    }

    #[tokio::test]
    async fn cancelled_count_is_not_degraded() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let store = MemoryStore::new();
        let error = estimate_count(&store, DocumentKind::Sleep, Predicate::Partition, &cancel)
            .await
            .unwrap_err();
        assert!(error.is_cancelled());
    }

    #[tokio::test]
    async fn first_match_wins_for_shared_dates() {
        let store = MemoryStore::new();
        for id in ["first", "second"] {
            let document = NewDocument::new(DocumentKind::Weight, date(2024, 5, 5), json!({}))
                .with_id(id);
            store.insert(document).await.unwrap();
        }

        let cancel = CancellationToken::new();
        let found = find_by_date(&store, DocumentKind::Weight, date(2024, 5, 5), &cancel, "get_by_date")
            .await
            .unwrap();
        assert_eq!(found.map(|d| d.id), Some("first".to_owned()));

        let missing = find_by_date(&store, DocumentKind::Weight, date(2024, 5, 6), &cancel, "get_by_date")
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
