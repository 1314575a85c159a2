//! Common error type definitions.

use std::borrow::Cow;

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in vitals-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The document store failed to execute a query or write.
    Store,
    /// A document with the same id already exists in the partition.
    Conflict,
    /// A stored payload could not be (de)serialized.
    Serialization,
    /// The operation was cancelled before it completed.
    Cancelled,
    /// Invalid configuration.
    Configuration,
}

/// A structured error type for query layer operations.
///
/// Every error names the operation that failed (e.g. `get_all`), so that a
/// message surfaced by the route layer identifies where it came from.
#[derive(Debug, Error)]
#[error("{operation} failed: {message}")]
#[must_use = "errors should be handled appropriately"]
pub struct Error {
    /// The kind of error that occurred.
    kind: ErrorKind,
    /// Name of the failing operation.
    operation: Cow<'static, str>,
    /// Human-readable message.
    message: Cow<'static, str>,
    /// Optional source error.
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    ///
    /// The operation defaults to `unknown` and the message to the kind name.
    pub fn new(kind: ErrorKind) -> Self {
        let name: &'static str = kind.into();
        Self {
            kind,
            operation: Cow::Borrowed("unknown"),
            message: Cow::Borrowed(name),
            source: None,
        }
    }

    /// Creates a new store error.
    pub fn store() -> Self {
        Self::new(ErrorKind::Store)
    }

    /// Creates a new conflict error.
    pub fn conflict() -> Self {
        Self::new(ErrorKind::Conflict)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new cancellation error.
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled).with_message("operation was cancelled")
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Sets the name of the failing operation.
    pub fn with_operation(mut self, operation: impl Into<Cow<'static, str>>) -> Self {
        self.operation = operation.into();
        self
    }

    /// Sets the error message.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the name of the failing operation.
    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if the operation was cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization()
            .with_message(error.to_string())
            .with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_operation() {
        let error = Error::store()
            .with_operation("get_all")
            .with_message("connection reset");

        assert_eq!(error.to_string(), "get_all failed: connection reset");
        assert_eq!(error.kind(), ErrorKind::Store);
    }

    #[test]
    fn default_message_is_kind_name() {
        let error = Error::conflict();
        assert_eq!(error.message(), "conflict");
        assert_eq!(error.operation(), "unknown");
    }

    #[test]
    fn cancelled_error() {
        let error = Error::cancelled().with_operation("get_by_date");
        assert!(error.is_cancelled());
        assert_eq!(error.kind().as_ref(), "cancelled");
    }

    #[test]
    fn source_is_preserved() {
        let source = std::io::Error::other("disk on fire");
        let error = Error::store().with_source(source);
        let source = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk on fire"));
    }
}
