//! Document row models.

use std::str::FromStr;

use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp};
use vitals_core::{Document, DocumentKind, NewDocument};

use crate::schema::documents;
use crate::{PgError, PgResult};

/// A stored document row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentRow {
    /// Partition key.
    pub document_kind: String,
    /// Writer-assigned identifier, unique within the partition.
    pub id: String,
    /// Calendar day the document describes.
    pub date: Date,
    /// Kind-specific metric data.
    pub payload: serde_json::Value,
    /// Insertion order.
    pub sequence: i64,
    /// Timestamp when the row was written.
    pub created_at: Timestamp,
}

/// Data for inserting a new document row.
///
/// `sequence` and `created_at` are assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentRow {
    pub document_kind: String,
    pub id: String,
    pub date: Date,
    pub payload: serde_json::Value,
}

impl DocumentRow {
    /// Returns when the row was written.
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }

    /// Maps the row back into a document.
    ///
    /// Fails if the stored partition key is not a known document kind.
    pub fn into_document(self) -> PgResult<Document> {
        let document_kind = DocumentKind::from_str(&self.document_kind).map_err(|_| {
            PgError::Unexpected(format!("unknown document kind '{}'", self.document_kind).into())
        })?;

        Ok(Document {
            id: self.id,
            document_kind,
            date: self.date.into(),
            payload: self.payload,
            sequence: self.sequence,
        })
    }
}

impl From<NewDocument> for NewDocumentRow {
    fn from(document: NewDocument) -> Self {
        Self {
            document_kind: document.document_kind.partition_key().to_owned(),
            id: document.id,
            date: document.date.into(),
            payload: document.payload,
        }
    }
}
