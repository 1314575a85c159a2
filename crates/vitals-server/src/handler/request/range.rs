//! Inclusive date range request parameters.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use vitals_core::PageRequest;

use super::{PaginationRequest, parse_date};
use crate::handler::{ErrorKind, Result};

/// `?startDate=&endDate=&pageNumber=&pageSize=` query parameters.
///
/// The bounds are kept as strings so that a malformed date is reported
/// with the name of the parameter that carried it. Pagination fields are
/// listed inline since `serde(flatten)` loses the integer types of
/// urlencoded values.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeRequest {
    pub start_date: String,
    pub end_date: String,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl DateRangeRequest {
    /// Parses both bounds and checks that they are ordered.
    ///
    /// Both bounds are inclusive; `start == end` selects a single day.
    pub fn bounds(&self) -> Result<(Date, Date)> {
        let start = parse_date("startDate", &self.start_date)?;
        let end = parse_date("endDate", &self.end_date)?;

        if start > end {
            return Err(ErrorKind::BadRequest
                .with_message("Invalid date range")
                .with_context(format!("startDate {start} is after endDate {end}")));
        }

        Ok((start, end))
    }

    /// Returns the normalized page request.
    pub fn page_request(&self) -> PageRequest {
        PaginationRequest {
            page_number: self.page_number,
            page_size: self.page_size,
        }
        .into()
    }
}
