//! Document repository for partition-scoped reads and inserts.

use std::future::Future;

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::Date;
use vitals_core::DocumentKind;
use vitals_core::store::{Predicate, SortOrder};

use super::Pagination;
use crate::model::{DocumentRow, NewDocumentRow};
use crate::schema::documents;
use crate::{PgConnection, PgError, PgResult};

/// Builds the partition-scoped, predicate-filtered base query.
///
/// Date ranges are inclusive on both ends; an inverted range matches nothing.
pub fn filtered(kind: DocumentKind, predicate: Predicate) -> documents::BoxedQuery<'static, Pg> {
    let query = documents::table
        .filter(documents::document_kind.eq(kind.partition_key()))
        .into_boxed();

    match predicate {
        Predicate::Partition => query,
        Predicate::DateEquals(date) => query.filter(documents::date.eq(Date::from(date))),
        Predicate::DateRange { start, end } => {
            query.filter(documents::date.between(Date::from(start), Date::from(end)))
        }
    }
}

/// Repository for document table operations.
pub trait PgDocumentRepository {
    /// Inserts a single document row.
    ///
    /// Fails with a unique violation if `(document_kind, id)` already exists.
    fn insert_document(
        &mut self,
        document: NewDocumentRow,
    ) -> impl Future<Output = PgResult<DocumentRow>> + Send;

    /// Lists one window of matching documents in the requested order.
    fn find_documents(
        &mut self,
        kind: DocumentKind,
        predicate: Predicate,
        order: SortOrder,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<DocumentRow>>> + Send;

    /// Counts all matching documents.
    fn count_documents(
        &mut self,
        kind: DocumentKind,
        predicate: Predicate,
    ) -> impl Future<Output = PgResult<i64>> + Send;
}

impl PgDocumentRepository for PgConnection {
    async fn insert_document(&mut self, document: NewDocumentRow) -> PgResult<DocumentRow> {
        let row = diesel::insert_into(documents::table)
            .values(&document)
            .returning(DocumentRow::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(row)
    }

    async fn find_documents(
        &mut self,
        kind: DocumentKind,
        predicate: Predicate,
        order: SortOrder,
        pagination: Pagination,
    ) -> PgResult<Vec<DocumentRow>> {
        let query = filtered(kind, predicate).select(DocumentRow::as_select());
        let query = match order {
            SortOrder::Natural => query.order(documents::sequence.asc()),
            SortOrder::NewestFirst => query.order(documents::sequence.desc()),
        };

        let rows = query
            .offset(pagination.offset)
            .limit(pagination.limit)
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(rows)
    }

    async fn count_documents(
        &mut self,
        kind: DocumentKind,
        predicate: Predicate,
    ) -> PgResult<i64> {
        let count = filtered(kind, predicate)
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }
}
