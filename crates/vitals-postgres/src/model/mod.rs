//! Database models for the `documents` table.

mod document;

pub use document::{DocumentRow, NewDocumentRow};
