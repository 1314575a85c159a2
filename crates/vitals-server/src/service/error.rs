//! Service layer error types.

use thiserror::Error;
use vitals_postgres::PgError;

/// Result type for service operations.
pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

/// Failures while assembling the [`ServiceState`].
///
/// [`ServiceState`]: crate::service::ServiceState
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid configuration values.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: PgError,
    },

    /// The database could not be reached or migrated.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: PgError,
    },
}

impl ServiceError {
    /// Creates a new database error with source.
    pub fn database(message: impl Into<String>, source: PgError) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }
}

impl From<PgError> for ServiceError {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(message) => Self::Config {
                source: PgError::Config(message.clone()),
                message,
            },
            other => Self::database("Database operation failed", other),
        }
    }
}
