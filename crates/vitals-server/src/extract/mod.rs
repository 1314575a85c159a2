//! Request extractors whose rejections are rendered as [`Error`] responses.
//!
//! [`Error`]: crate::handler::Error

mod path;
mod query;

pub use path::Path;
pub use query::Query;
