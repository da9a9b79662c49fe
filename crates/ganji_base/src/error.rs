//! Error types for stem-branch calculations.

use ganji_time::TimeError;
use thiserror::Error;

/// Errors from cycle arithmetic, notation parsing and chart scoring.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Error from calendar validation.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// A computed cycle position fell outside 0..60. Indicates a logic fault.
    #[error("cycle index {0} outside 0..60")]
    OutOfRangeCycleIndex(i64),
    /// Solar month number outside 1..=12.
    #[error("solar month {0} outside 1..=12")]
    InvalidMonthIndex(u8),
    /// Stem and branch of different parity never meet in the 60-cycle.
    #[error("stem {stem} and branch {branch} do not form a cycle pair")]
    InvalidPair { stem: char, branch: char },
    /// A luck window needs more events than the sequence cap allows.
    #[error("luck sequence exceeds {limit} events")]
    TooManyLuckEvents { limit: usize },
    /// Text that is not a stem/branch in either script.
    #[error("unknown notation: {0}")]
    UnknownNotation(String),
}
