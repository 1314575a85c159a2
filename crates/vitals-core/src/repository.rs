//! Kind-scoped repository facade.

use std::fmt;
use std::marker::PhantomData;

use jiff::civil::Date;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::query::{estimate_count, fetch_window, find_by_date};
use crate::store::{Predicate, SharedStore};
use crate::{
    Document, DocumentKind, Error, NewDocument, Page, PageRequest, Result, TRACING_TARGET_QUERY,
};

/// Read (and single-write) access to one document kind.
///
/// Every kind gets the same three read operations; only the payload type `P`
/// differs. The repository holds no state beyond its store handle, so all
/// operations are idempotent for an unchanged store and safe to call
/// concurrently.
///
/// Paginated reads run the count and the window fetch concurrently. A failing
/// count degrades to a total of zero; a failing window fails the operation.
pub struct DocumentRepository<P = serde_json::Value> {
    store: SharedStore,
    kind: DocumentKind,
    cancel: CancellationToken,
    payload: PhantomData<fn() -> P>,
}

impl<P> DocumentRepository<P> {
    /// Creates a repository for `kind` backed by `store`.
    pub fn new(store: SharedStore, kind: DocumentKind) -> Self {
        Self {
            store,
            kind,
            cancel: CancellationToken::new(),
            payload: PhantomData,
        }
    }

    /// Ties every operation to `cancel`.
    ///
    /// Once the token fires, in-flight and future operations fail with a
    /// cancellation error instead of returning partial results.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the document kind this repository serves.
    #[inline]
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

impl<P> DocumentRepository<P>
where
    P: DeserializeOwned,
{
    /// Returns the document dated `date`, or `None` if there is none.
    ///
    /// When several documents share the date, the earliest inserted one wins.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_QUERY, fields(kind = %self.kind))]
    pub async fn get_by_date(&self, date: Date) -> Result<Option<Document<P>>> {
        let document = find_by_date(
            self.store.as_ref(),
            self.kind,
            date,
            &self.cancel,
            "get_by_date",
        )
        .await?;

        document
            .map(|document| typed(document, "get_by_date"))
            .transpose()
    }

    /// Returns one page of all documents, newest first.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_QUERY, fields(kind = %self.kind))]
    pub async fn get_all(&self, request: PageRequest) -> Result<Page<Document<P>>> {
        self.paged(Predicate::Partition, request, "get_all").await
    }

    /// Returns one page of documents dated within `start..=end`, newest first.
    ///
    /// An inverted range (`start > end`) matches nothing and yields an empty
    /// page with a total of zero.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_QUERY, fields(kind = %self.kind))]
    pub async fn get_by_date_range(
        &self,
        start: Date,
        end: Date,
        request: PageRequest,
    ) -> Result<Page<Document<P>>> {
        self.paged(Predicate::DateRange { start, end }, request, "get_by_date_range")
            .await
    }

    async fn paged(
        &self,
        predicate: Predicate,
        request: PageRequest,
        operation: &'static str,
    ) -> Result<Page<Document<P>>> {
        let store = self.store.as_ref();

        let (count, window) = futures::join!(
            estimate_count(store, self.kind, predicate, &self.cancel),
            fetch_window(
                store,
                self.kind,
                predicate,
                request.skip(),
                request.limit(),
                &self.cancel,
                operation,
            ),
        );

        let documents = window?;
        let count = count.map_err(|error| error.with_operation(operation))?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            operation,
            kind = %self.kind,
            page_number = request.page_number(),
            page_size = request.page_size(),
            items = documents.len(),
            total_count = count.total(),
            "Assembled page"
        );

        Page::assemble(documents, count, request).try_map(|document| typed(document, operation))
    }
}

impl<P> DocumentRepository<P>
where
    P: Serialize + DeserializeOwned,
{
    /// Stores a new document dated `date` under a random id.
    pub async fn create(&self, date: Date, payload: &P) -> Result<Document<P>> {
        let payload = serde_json::to_value(payload)
            .map_err(|error| Error::from(error).with_operation("create"))?;
        self.insert(NewDocument::new(self.kind, date, payload)).await
    }

    /// Stores `document`, which must belong to this repository's kind.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_QUERY, fields(kind = %self.kind, id = %document.id))]
    pub async fn insert(&self, document: NewDocument) -> Result<Document<P>> {
        if document.document_kind != self.kind {
            return Err(Error::configuration().with_operation("insert").with_message(format!(
                "cannot store a '{}' document in the '{}' partition",
                document.document_kind, self.kind
            )));
        }

        if self.cancel.is_cancelled() {
            return Err(Error::cancelled().with_operation("insert"));
        }

        let stored = self.store.insert(document).await?;

        tracing::info!(
            target: TRACING_TARGET_QUERY,
            id = %stored.id,
            date = %stored.date,
            "Document created"
        );

        typed(stored, "insert")
    }
}

impl<P> Clone for DocumentRepository<P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            kind: self.kind,
            cancel: self.cancel.clone(),
            payload: PhantomData,
        }
    }
}

impl<P> fmt::Debug for DocumentRepository<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentRepository")
            .field("kind", &self.kind)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

fn typed<P>(document: Document, operation: &'static str) -> Result<Document<P>>
where
    P: DeserializeOwned,
{
    document
        .into_typed()
        .map_err(|error: Error| error.with_operation(operation))
}
