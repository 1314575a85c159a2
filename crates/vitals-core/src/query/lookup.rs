//! Natural-key lookups.

use jiff::civil::Date;
use tokio_util::sync::CancellationToken;

use super::drain;
use crate::store::{DocumentQuery, DocumentStore, Predicate};
use crate::{Document, DocumentKind, Result, TRACING_TARGET_QUERY};

/// Returns the first document of `kind` dated `date`, if any.
///
/// Dates are not unique in the store. All matches are drained and the first
/// one in natural store order wins; extra matches are reported with a warning.
pub async fn find_by_date(
    store: &dyn DocumentStore,
    kind: DocumentKind,
    date: Date,
    cancel: &CancellationToken,
    operation: &'static str,
) -> Result<Option<Document>> {
    let query = DocumentQuery::new(kind, Predicate::DateEquals(date));

    let matches = drain(store.query(query), cancel).await.map_err(|error| {
        if !error.is_cancelled() {
            tracing::error!(
                target: TRACING_TARGET_QUERY,
                operation,
                kind = %kind,
                date = %date,
                error = %error,
                "Date lookup failed"
            );
        }
        error.with_operation(operation)
    })?;

    if matches.len() > 1 {
        tracing::warn!(
            target: TRACING_TARGET_QUERY,
            operation,
            kind = %kind,
            date = %date,
            matches = matches.len(),
            "Multiple documents share a date, returning the first"
        );
    }

    Ok(matches.into_iter().next())
}
