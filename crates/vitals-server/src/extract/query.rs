//! Query string extractor with structured rejections.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Tracing target for query string extraction.
const TRACING_TARGET: &str = "vitals_server::extract::query";

/// Query string extractor that rejects with a JSON [`Error`].
///
/// A parameter that is present but cannot be parsed (`pageNumber=abc`) is a
/// `400 Bad Request` naming the offending field where serde reports it.
///
/// ```rust,no_run
/// use serde::Deserialize;
/// use vitals_server::extract::Query;
///
/// #[derive(Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Params {
///     page_number: Option<i64>,
/// }
///
/// async fn handler(Query(params): Query<Params>) {
///     let _ = params.page_number;
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Consumes the wrapper and returns the inner query parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(query)) => Ok(Query(query)),
            Err(rejection) => Err(enhance_query_error(rejection)),
        }
    }
}

fn enhance_query_error(rejection: QueryRejection) -> Error<'static> {
    tracing::debug!(
        target: TRACING_TARGET,
        error = %rejection,
        "Query parameter parsing failed"
    );

    match rejection {
        QueryRejection::FailedToDeserializeQueryString(err) => {
            let error_message = err.body_text();

            if error_message.contains("missing field") {
                let field_name = extract_field_name(&error_message).unwrap_or("unknown");
                ErrorKind::BadRequest
                    .with_message("Missing required query parameter")
                    .with_context(format!(
                        "The query parameter '{field_name}' is required but was not provided"
                    ))
            } else if error_message.contains("duplicate field") {
                let field_name = extract_field_name(&error_message).unwrap_or("unknown");
                ErrorKind::BadRequest
                    .with_message("Duplicate query parameter")
                    .with_context(format!(
                        "The query parameter '{field_name}' was provided more than once"
                    ))
            } else {
                ErrorKind::BadRequest
                    .with_message("Invalid query parameters")
                    .with_context(error_message)
            }
        }
        _ => ErrorKind::BadRequest
            .with_message("Invalid query parameters")
            .with_context("The query string could not be parsed"),
    }
}

/// Pulls the first backtick-quoted name out of a serde error message.
fn extract_field_name(error_message: &str) -> Option<&str> {
    let start = error_message.find('`')? + 1;
    let end = error_message[start..].find('`')?;
    Some(&error_message[start..start + end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_from_serde_message() {
        assert_eq!(
            extract_field_name("missing field `startDate`"),
            Some("startDate")
        );
        assert_eq!(extract_field_name("duplicate field `pageSize`"), Some("pageSize"));
        assert_eq!(extract_field_name("invalid digit found in string"), None);
    }
}
