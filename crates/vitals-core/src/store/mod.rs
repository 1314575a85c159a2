//! The document store contract.
//!
//! The query layer talks to storage only through [`DocumentStore`]. A store
//! answers partition-scoped predicate queries with a stream of batches (a
//! continuation model: each item is one round-trip worth of rows), counts
//! matching documents, and inserts single documents.

mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use jiff::civil::Date;
pub use memory::MemoryStore;

use crate::{Document, DocumentKind, NewDocument, Result};

/// A lazily evaluated sequence of result batches.
///
/// The stream ends when the store signals there are no more results. Dropping
/// it stops fetching.
pub type BatchStream<'a> = BoxStream<'a, Result<Vec<Document>>>;

/// Shared, thread-safe handle to a document store.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Filter applied within a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Every document in the partition.
    Partition,
    /// Documents dated exactly on the given day.
    DateEquals(Date),
    /// Documents dated within `start..=end`.
    DateRange {
        /// Inclusive lower bound.
        start: Date,
        /// Inclusive upper bound.
        end: Date,
    },
}

impl Predicate {
    /// Returns true if a document dated `date` satisfies this predicate.
    pub fn matches(&self, date: Date) -> bool {
        match *self {
            Self::Partition => true,
            Self::DateEquals(day) => date == day,
            Self::DateRange { start, end } => start <= date && date <= end,
        }
    }
}

/// Result ordering requested from the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// The store's natural order, ascending insertion order.
    #[default]
    Natural,
    /// Most recently inserted first.
    NewestFirst,
}

/// A partition-scoped query with optional offset/limit windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentQuery {
    /// Partition the query is scoped to.
    pub kind: DocumentKind,
    /// Filter within the partition.
    pub predicate: Predicate,
    /// Result ordering.
    pub order: SortOrder,
    /// Number of matching documents to skip.
    pub offset: u64,
    /// Maximum number of documents to return, unbounded if `None`.
    pub limit: Option<u64>,
}

impl DocumentQuery {
    /// Creates an unbounded query in natural order.
    pub fn new(kind: DocumentKind, predicate: Predicate) -> Self {
        Self {
            kind,
            predicate,
            order: SortOrder::Natural,
            offset: 0,
            limit: None,
        }
    }

    /// Sets the result ordering.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Restricts the query to `limit` documents after skipping `offset`.
    pub fn with_window(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }
}

/// Storage backend for partitioned documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs a query and returns its results as a stream of batches.
    fn query(&self, query: DocumentQuery) -> BatchStream<'_>;

    /// Counts documents in `kind` matching `predicate`.
    async fn count(&self, kind: DocumentKind, predicate: Predicate) -> Result<u64>;

    /// Inserts a single document.
    ///
    /// Fails with [`ErrorKind::Conflict`] if a document with the same id
    /// already exists in the partition.
    ///
    /// [`ErrorKind::Conflict`]: crate::ErrorKind::Conflict
    async fn insert(&self, document: NewDocument) -> Result<Document>;
}
