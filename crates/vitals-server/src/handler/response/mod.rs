//! Response bodies.

mod documents;
mod error_response;
mod monitors;

pub use documents::{DocumentResponse, PageResponse};
pub use error_response::ErrorResponse;
pub use monitors::HealthResponse;
