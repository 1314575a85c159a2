//! Path parameter types for the document routes.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use vitals_core::DocumentKind;

use crate::handler::{ErrorKind, Result};

/// Path parameters for `/{kind}/documents`.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentKindPathParams {
    /// Document kind, matched case-insensitively.
    pub kind: String,
}

impl DocumentKindPathParams {
    /// Resolves the kind segment; an unknown kind is a missing resource.
    pub fn document_kind(&self) -> Result<DocumentKind> {
        parse_kind(&self.kind)
    }
}

/// Path parameters for `/{kind}/documents/{date}`.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentDatePathParams {
    /// Document kind, matched case-insensitively.
    pub kind: String,
    /// Calendar day in `YYYY-MM-DD` form.
    pub date: String,
}

impl DocumentDatePathParams {
    /// Resolves the kind segment.
    pub fn document_kind(&self) -> Result<DocumentKind> {
        parse_kind(&self.kind)
    }

    /// Parses the date segment.
    pub fn date(&self) -> Result<Date> {
        parse_date("date", &self.date)
    }
}

fn parse_kind(kind: &str) -> Result<DocumentKind> {
    DocumentKind::from_str(kind).map_err(|_| {
        ErrorKind::NotFound
            .with_message("Unknown document kind")
            .with_resource(kind.to_owned())
    })
}

/// Parses a `YYYY-MM-DD` parameter named `field`, rejecting it with a 400.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date> {
    Date::from_str(value).map_err(|error| {
        ErrorKind::BadRequest
            .with_message(format!("Invalid {field}, expected YYYY-MM-DD"))
            .with_context(error.to_string())
    })
}
