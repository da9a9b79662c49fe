//! Civil calendar arithmetic for stem-branch chart computation.
//!
//! This crate provides:
//! - Proleptic-Gregorian calendar ↔ Julian Date / Julian Day Number conversion
//! - `CivilTime`, the local wall-clock instant every resolver starts from
//! - Calendar stepping (days, months, minutes) with day-of-month clamping

pub mod civil;
pub mod error;
pub mod julian;

pub use civil::CivilTime;
pub use error::TimeError;
pub use julian::{
    J2000_JD, MINUTES_PER_DAY, SECONDS_PER_DAY, TROPICAL_YEAR_DAYS, calendar_to_jd,
    calendar_to_jdn, days_in_month, is_leap_year, jd_to_calendar, jd_to_jdn, jdn_to_calendar,
};
