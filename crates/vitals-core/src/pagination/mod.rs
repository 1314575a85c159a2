//! Pagination types for the document query layer.
//!
//! A [`PageRequest`] is always valid once constructed; a [`Page`] derives its
//! navigation metadata from the request and a [`CountStatus`].

mod page;
mod request;

pub use page::{CountStatus, Page};
pub use request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
