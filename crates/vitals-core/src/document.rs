//! Stored documents and their partition key.

use jiff::civil::Date;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::Result;

/// Discriminator identifying which metric a document represents.
///
/// The string form doubles as the partition key: every document written by a
/// service carries exactly one constant value here, and every query issued by
/// that service is scoped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum DocumentKind {
    /// Daily activity summaries.
    Activity,
    /// Sleep logs.
    Sleep,
    /// Body weight logs.
    Weight,
    /// Food and nutrition logs.
    Food,
}

impl DocumentKind {
    /// Returns the partition key value for this kind.
    #[inline]
    pub fn partition_key(self) -> &'static str {
        self.into()
    }
}

/// An immutable record as returned by the document store.
///
/// `P` is the kind-specific payload; the query layer never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<P = serde_json::Value> {
    /// Writer-assigned identifier, unique within the partition.
    pub id: String,
    /// Partition key.
    pub document_kind: DocumentKind,
    /// Calendar day the document describes (`YYYY-MM-DD`).
    pub date: Date,
    /// Kind-specific metric data.
    pub payload: P,
    /// Store-assigned insertion order, increasing with every write.
    #[serde(skip)]
    pub sequence: i64,
}

impl Document {
    /// Deserializes the opaque JSON payload into a typed one.
    pub fn into_typed<P>(self) -> Result<Document<P>>
    where
        P: DeserializeOwned,
    {
        Ok(Document {
            payload: serde_json::from_value(self.payload)?,
            id: self.id,
            document_kind: self.document_kind,
            date: self.date,
            sequence: self.sequence,
        })
    }
}

/// Data required to insert a new document.
///
/// The insertion order is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    /// Writer-assigned identifier.
    pub id: String,
    /// Partition key.
    pub document_kind: DocumentKind,
    /// Calendar day the document describes.
    pub date: Date,
    /// Kind-specific metric data.
    pub payload: serde_json::Value,
}

impl NewDocument {
    /// Creates a new document with a random identifier.
    pub fn new(document_kind: DocumentKind, date: Date, payload: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            document_kind,
            date,
            payload,
        }
    }

    /// Replaces the generated identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builds the stored form once the store has assigned an insertion order.
    pub fn into_document(self, sequence: i64) -> Document {
        Document {
            id: self.id,
            document_kind: self.document_kind,
            date: self.date,
            payload: self.payload,
            sequence,
        }
    }
}
