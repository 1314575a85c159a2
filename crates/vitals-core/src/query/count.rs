//! Best-effort counting.

use tokio_util::sync::CancellationToken;

use crate::store::{DocumentStore, Predicate};
use crate::{CountStatus, DocumentKind, Error, Result, TRACING_TARGET_QUERY};

/// Counts the documents in `kind` matching `predicate`.
///
/// A failing count never fails the caller: the error is logged and the result
/// is [`CountStatus::Unavailable`]. The only error returned is cancellation.
pub async fn estimate_count(
    store: &dyn DocumentStore,
    kind: DocumentKind,
    predicate: Predicate,
    cancel: &CancellationToken,
) -> Result<CountStatus> {
    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            return Err(Error::cancelled().with_operation("estimate_count"));
        }
        result = store.count(kind, predicate) => result,
    };

    match result {
        Ok(total) => Ok(CountStatus::Exact(total)),
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_QUERY,
                kind = %kind,
                predicate = ?predicate,
                error = %error,
                "Count query failed, reporting total as unavailable"
            );
            Ok(CountStatus::Unavailable)
        }
    }
}
