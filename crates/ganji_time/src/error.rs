//! Error types for civil calendar handling.

use thiserror::Error;

/// Errors from calendar validation and parsing.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar field is out of range or a value is not finite.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// A date/time string could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}
