//! Error types for solar-term lookup and chart resolution.

use ganji_base::BaseError;
use ganji_time::TimeError;
use thiserror::Error;

/// Errors from resolvers, the solar-term cache and luck generation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Invalid civil date or time.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// Cycle arithmetic or notation failure.
    #[error("cycle error: {0}")]
    Base(#[from] BaseError),
    /// The oracle has no instant for this year and longitude.
    #[error("no solar-term instant for year {year} at {longitude_deg} deg")]
    OracleMiss { year: i32, longitude_deg: f64 },
    /// An option value is out of range.
    #[error("invalid option: {0}")]
    InvalidConfig(&'static str),
}
