//! Types for pillar resolution.

use ganji_base::{DayBoundaryRule, FourPillars, GanZhi};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::solar_term_types::SolarTerm;

/// Default observer longitude (degrees east), Seoul region.
pub const DEFAULT_OBSERVER_LONGITUDE_DEG: f64 = 127.5;
/// Default UTC offset in minutes (KST).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 540;

/// How civil instants are read when resolving pillars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Degrees east, in [-180, 180].
    pub observer_longitude_deg: f64,
    /// Minutes the civil clock runs ahead of UTC.
    pub utc_offset_minutes: i32,
    pub day_boundary: DayBoundaryRule,
    /// Read the day and hour pillars on local mean time at the observer.
    pub local_mean_time: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            observer_longitude_deg: DEFAULT_OBSERVER_LONGITUDE_DEG,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            day_boundary: DayBoundaryRule::Jasi,
            local_mean_time: false,
        }
    }
}

impl ChartOptions {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.observer_longitude_deg.is_finite()
            || !(-180.0..=180.0).contains(&self.observer_longitude_deg)
        {
            return Err(SearchError::InvalidConfig(
                "observer_longitude_deg must be within [-180, 180]",
            ));
        }
        if !(-14 * 60..=14 * 60).contains(&self.utc_offset_minutes) {
            return Err(SearchError::InvalidConfig(
                "utc_offset_minutes must be within [-840, 840]",
            ));
        }
        Ok(())
    }

    /// Minutes to add to the civil clock to get local mean time.
    pub fn mean_time_shift_minutes(&self) -> f64 {
        if self.local_mean_time {
            self.observer_longitude_deg * 4.0 - self.utc_offset_minutes as f64
        } else {
            0.0
        }
    }
}

/// The sexagenary year containing an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearInfo {
    pub ganzhi: GanZhi,
    /// Gregorian year whose 입춘 opens this sexagenary year.
    pub effective_year: i32,
    /// JD UT of the opening 입춘, inclusive.
    pub start_jd: f64,
    /// JD UT of the next 입춘, exclusive.
    pub end_jd: f64,
}

/// The solar month containing an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthInfo {
    pub ganzhi: GanZhi,
    /// 1 (인 month, opened by 입춘) ..= 12 (축 month, opened by 소한).
    pub month_index: u8,
    /// Term opening the month.
    pub term: SolarTerm,
    /// JD UT, inclusive.
    pub start_jd: f64,
    /// JD UT, exclusive.
    pub end_jd: f64,
}

/// A resolved chart with the boundaries behind its year and month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartInfo {
    pub pillars: FourPillars,
    pub year: YearInfo,
    pub month: MonthInfo,
    /// JD UT of the birth instant.
    pub birth_jd: f64,
}
