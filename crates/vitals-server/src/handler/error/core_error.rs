//! Conversion of query layer errors into HTTP errors.

use vitals_core::ErrorKind as CoreErrorKind;

use crate::handler::{Error, ErrorKind};

impl From<vitals_core::Error> for Error<'static> {
    fn from(error: vitals_core::Error) -> Self {
        let kind = match error.kind() {
            CoreErrorKind::Conflict => ErrorKind::Conflict,
            CoreErrorKind::Cancelled => ErrorKind::ServiceUnavailable,
            CoreErrorKind::Store
            | CoreErrorKind::Serialization
            | CoreErrorKind::Configuration => ErrorKind::InternalServerError,
        };

        kind.with_context(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn store_failure_is_internal() {
        let error = vitals_core::Error::store()
            .with_operation("get_all")
            .with_message("connection reset");

        let error = Error::from(error);
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.context(), Some("get_all failed: connection reset"));
    }

    #[test]
    fn conflict_and_cancellation() {
        let conflict = Error::from(vitals_core::Error::conflict());
        assert_eq!(conflict.kind().status_code(), StatusCode::CONFLICT);

        let cancelled = Error::from(vitals_core::Error::cancelled());
        assert_eq!(cancelled.kind().status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
