//! Local civil date/time.
//!
//! `CivilTime` is the wall-clock reading the caller supplies, already
//! corrected for time zone and daylight saving. Absolute instants are
//! carried as Julian Days in UT; [`CivilTime::to_ut_jd`] and
//! [`CivilTime::from_ut_jd`] bridge the two with a fixed UTC offset.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{
    MINUTES_PER_DAY, SECONDS_PER_DAY, calendar_to_jd, calendar_to_jdn, days_in_month, jd_to_jdn,
    jdn_to_calendar,
};

/// Earliest year accepted by [`CivilTime::try_new`].
pub const MIN_YEAR: i32 = -4000;
/// Latest year accepted by [`CivilTime::try_new`].
pub const MAX_YEAR: i32 = 9999;

/// Local civil calendar date and clock time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    #[serde(default)]
    pub second: f64,
}

impl CivilTime {
    /// Construct without validation.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Construct and validate every field.
    pub fn try_new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let t = Self::new(year, month, day, hour, minute, second);
        t.validate()?;
        Ok(t)
    }

    /// Midnight at the start of a date.
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Check that every field is in range and the seconds are finite.
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(TimeError::InvalidDate(format!(
                "year {} outside {MIN_YEAR}..={MAX_YEAR}",
                self.year
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::InvalidDate(format!("month {}", self.month)));
        }
        let dim = days_in_month(self.year, self.month);
        if self.day == 0 || self.day > dim {
            return Err(TimeError::InvalidDate(format!(
                "day {} in {:04}-{:02}",
                self.day, self.year, self.month
            )));
        }
        if self.hour > 23 || self.minute > 59 {
            return Err(TimeError::InvalidDate(format!(
                "time {:02}:{:02}",
                self.hour, self.minute
            )));
        }
        if !self.second.is_finite() || !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidDate(format!("second {}", self.second)));
        }
        Ok(())
    }

    /// Minutes elapsed since local midnight (0..1440).
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Julian Date of this wall-clock reading, treating it as its own time scale.
    pub fn to_jd(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / MINUTES_PER_DAY
            + self.second / SECONDS_PER_DAY;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Integer Julian Day Number of the calendar date (time of day ignored).
    pub fn jdn(&self) -> i64 {
        calendar_to_jdn(self.year, self.month, self.day)
    }

    /// Rebuild a civil reading from a Julian Date in the same time scale.
    ///
    /// Seconds are rounded to the millisecond so that a value produced by
    /// [`CivilTime::to_jd`] comes back with its original minute.
    pub fn from_jd(jd: f64) -> Self {
        let mut jdn = jd_to_jdn(jd);
        let mut secs = (jd + 0.5 - jdn as f64) * SECONDS_PER_DAY;
        secs = (secs * 1000.0).round() / 1000.0;
        if secs >= SECONDS_PER_DAY {
            jdn += 1;
            secs -= SECONDS_PER_DAY;
        }
        let (year, month, day) = jdn_to_calendar(jdn);
        let hour = (secs / 3600.0).floor() as u32;
        let minute = ((secs - hour as f64 * 3600.0) / 60.0).floor() as u32;
        let second = secs - hour as f64 * 3600.0 - minute as f64 * 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Julian Date in UT for a clock running `utc_offset_minutes` ahead of UTC.
    pub fn to_ut_jd(&self, utc_offset_minutes: i32) -> f64 {
        self.to_jd() - utc_offset_minutes as f64 / MINUTES_PER_DAY
    }

    /// Local civil reading of a UT Julian Date.
    pub fn from_ut_jd(jd_ut: f64, utc_offset_minutes: i32) -> Self {
        Self::from_jd(jd_ut + utc_offset_minutes as f64 / MINUTES_PER_DAY)
    }

    /// Same date at a different clock time.
    pub fn with_time(&self, hour: u32, minute: u32) -> Self {
        Self::new(self.year, self.month, self.day, hour, minute, 0.0)
    }

    /// Shift by whole days, keeping the clock time.
    pub fn add_days(&self, days: i64) -> Self {
        let (year, month, day) = jdn_to_calendar(self.jdn() + days);
        Self {
            year,
            month,
            day,
            ..*self
        }
    }

    /// Shift by calendar months, clamping the day to the target month's length.
    pub fn add_months(&self, months: i64) -> Self {
        let zero_based = self.year as i64 * 12 + (self.month as i64 - 1) + months;
        let year = zero_based.div_euclid(12) as i32;
        let month = zero_based.rem_euclid(12) as u32 + 1;
        let day = self.day.min(days_in_month(year, month));
        Self {
            year,
            month,
            day,
            ..*self
        }
    }

    /// Shift by calendar years (29 February clamps to 28 February).
    pub fn add_years(&self, years: i64) -> Self {
        self.add_months(years * 12)
    }

    /// Shift by a (possibly fractional) number of minutes.
    pub fn add_minutes(&self, minutes: f64) -> Self {
        Self::from_jd(self.to_jd() + minutes / MINUTES_PER_DAY)
    }
}

impl Display for CivilTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )?;
        let whole = self.second.floor();
        if self.second > 0.0 {
            if (self.second - whole).abs() < 1e-9 {
                write!(f, ":{:02}", whole as u32)?;
            } else {
                write!(f, ":{:06.3}", self.second)?;
            }
        }
        Ok(())
    }
}

impl FromStr for CivilTime {
    type Err = TimeError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDThh:mm` and `YYYY-MM-DDThh:mm:ss`
    /// (a space may replace the `T`). The result is validated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (date, time) = match s.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t)),
            None => (s, None),
        };

        let (sign, date) = match date.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, date),
        };
        let date_parts: Vec<&str> = date.split('-').collect();
        if date_parts.len() != 3 {
            return Err(TimeError::Parse(format!("expected YYYY-MM-DD, got {s}")));
        }
        let year: i32 = parse_field(date_parts[0], s)?;
        let month: u32 = parse_field(date_parts[1], s)?;
        let day: u32 = parse_field(date_parts[2], s)?;

        let (hour, minute, second) = match time {
            None => (0, 0, 0.0),
            Some(t) => {
                let parts: Vec<&str> = t.split(':').collect();
                match parts.as_slice() {
                    [h, m] => (parse_field(h, s)?, parse_field(m, s)?, 0.0),
                    [h, m, sec] => (parse_field(h, s)?, parse_field(m, s)?, parse_field(sec, s)?),
                    _ => return Err(TimeError::Parse(format!("expected hh:mm[:ss], got {s}"))),
                }
            }
        };

        Self::try_new(sign * year, month, day, hour, minute, second)
    }
}

fn parse_field<T: FromStr>(field: &str, whole: &str) -> Result<T, TimeError> {
    field
        .parse()
        .map_err(|_| TimeError::Parse(format!("bad field '{field}' in '{whole}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_fields() {
        assert!(CivilTime::try_new(2023, 2, 29, 0, 0, 0.0).is_err());
        assert!(CivilTime::try_new(2024, 2, 29, 0, 0, 0.0).is_ok());
        assert!(CivilTime::try_new(2024, 13, 1, 0, 0, 0.0).is_err());
        assert!(CivilTime::try_new(2024, 1, 1, 24, 0, 0.0).is_err());
        assert!(CivilTime::try_new(2024, 1, 1, 0, 0, f64::NAN).is_err());
    }

    #[test]
    fn jd_roundtrip_keeps_minute() {
        let t = CivilTime::new(1990, 5, 15, 14, 30, 0.0);
        let back = CivilTime::from_jd(t.to_jd());
        assert_eq!(back, t);
    }

    #[test]
    fn ut_offset_roundtrip() {
        let t = CivilTime::new(2024, 2, 4, 17, 27, 0.0);
        let jd_ut = t.to_ut_jd(540);
        assert!((t.to_jd() - jd_ut - 540.0 / 1440.0).abs() < 1e-12);
        assert_eq!(CivilTime::from_ut_jd(jd_ut, 540), t);
    }

    #[test]
    fn add_days_crosses_year() {
        let t = CivilTime::new(2023, 12, 31, 23, 30, 0.0);
        let next = t.add_days(1);
        assert_eq!((next.year, next.month, next.day), (2024, 1, 1));
        assert_eq!((next.hour, next.minute), (23, 30));
        let prev = CivilTime::date(2024, 3, 1).add_days(-1);
        assert_eq!((prev.month, prev.day), (2, 29));
    }

    #[test]
    fn add_months_clamps_day() {
        let t = CivilTime::date(2024, 1, 31);
        let feb = t.add_months(1);
        assert_eq!((feb.year, feb.month, feb.day), (2024, 2, 29));
        let back = t.add_months(-2);
        assert_eq!((back.year, back.month, back.day), (2023, 11, 30));
        let leap = CivilTime::date(2024, 2, 29).add_years(10);
        assert_eq!((leap.year, leap.month, leap.day), (2034, 2, 28));
    }

    #[test]
    fn add_minutes_wraps_midnight() {
        let t = CivilTime::new(2024, 1, 1, 23, 50, 0.0);
        let later = t.add_minutes(20.0);
        assert_eq!((later.day, later.hour, later.minute), (2, 0, 10));
    }

    #[test]
    fn parse_variants() {
        let a: CivilTime = "1990-05-15T14:30".parse().unwrap();
        assert_eq!(a, CivilTime::new(1990, 5, 15, 14, 30, 0.0));
        let b: CivilTime = "1990-05-15 14:30:15".parse().unwrap();
        assert!((b.second - 15.0).abs() < 1e-12);
        let c: CivilTime = "1990-05-15".parse().unwrap();
        assert_eq!(c.minute_of_day(), 0);
        assert!("1990-02-30".parse::<CivilTime>().is_err());
        assert!("garbage".parse::<CivilTime>().is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(
            CivilTime::new(2024, 1, 5, 3, 7, 0.0).to_string(),
            "2024-01-05T03:07"
        );
        assert_eq!(
            CivilTime::new(2024, 1, 5, 3, 7, 9.0).to_string(),
            "2024-01-05T03:07:09"
        );
    }
}
