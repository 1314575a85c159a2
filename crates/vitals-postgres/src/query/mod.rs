//! Database query repositories.
//!
//! Repository traits are implemented directly on [`PgConnection`], so they are
//! available on any pooled connection.
//!
//! [`PgConnection`]: crate::PgConnection

mod document;

pub use document::{PgDocumentRepository, filtered};
use serde::{Deserialize, Serialize};

/// Largest number of rows a single query may return.
pub const MAX_LIMIT: i64 = 1000;

/// Offset/limit parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    ///
    /// The limit is clamped to `1..=MAX_LIMIT` and the offset to be non-negative.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Creates pagination from unsigned values, saturating on overflow.
    pub fn from_window(limit: u64, offset: u64) -> Self {
        Self::new(
            i64::try_from(limit).unwrap_or(i64::MAX),
            i64::try_from(offset).unwrap_or(i64::MAX),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_is_clamped() {
        assert_eq!(Pagination::new(0, -5), Pagination { limit: 1, offset: 0 });
        assert_eq!(Pagination::new(5000, 10), Pagination { limit: 1000, offset: 10 });
        assert_eq!(
            Pagination::from_window(u64::MAX, u64::MAX),
            Pagination { limit: 1000, offset: i64::MAX }
        );
    }
}
