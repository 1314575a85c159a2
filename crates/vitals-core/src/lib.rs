#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for the paginated query layer.
pub const TRACING_TARGET_QUERY: &str = "vitals_core::query";

/// Tracing target for document store implementations.
pub const TRACING_TARGET_STORE: &str = "vitals_core::store";

mod document;
mod error;
mod pagination;
mod repository;

pub mod query;
pub mod store;

pub use document::{Document, DocumentKind, NewDocument};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use pagination::{CountStatus, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use repository::DocumentRepository;
pub use store::{DocumentStore, MemoryStore, SharedStore};
