//! Request parameters and their validation.

mod pagination;
mod paths;
mod range;

pub use pagination::PaginationRequest;
pub use paths::{DocumentDatePathParams, DocumentKindPathParams, parse_date};
pub use range::DateRangeRequest;
