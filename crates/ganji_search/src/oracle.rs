//! The solar-term oracle seam and two in-process implementations.
//!
//! An oracle answers one question: at what UT instant inside Gregorian
//! `year` does the Sun's apparent ecliptic longitude reach a target value?
//! Production deployments inject a precise ephemeris-backed oracle;
//! [`MeanSunOracle`] is a low-precision analytic stand-in and
//! [`TableOracle`] serves fixed instants.

use std::collections::HashMap;

use ganji_time::{J2000_JD, calendar_to_jd};

/// Source of solar-term instants.
pub trait SolarTermOracle: Send + Sync {
    /// JD UT at which the Sun reaches `solar_longitude_deg` during `year`,
    /// as seen by an observer at `observer_longitude_deg` east.
    ///
    /// `None` when the oracle cannot answer for this year.
    fn find(&self, year: i32, solar_longitude_deg: f64, observer_longitude_deg: f64)
    -> Option<f64>;
}

impl<F> SolarTermOracle for F
where
    F: Fn(i32, f64, f64) -> Option<f64> + Send + Sync,
{
    fn find(&self, year: i32, solar_longitude_deg: f64, observer_longitude_deg: f64) -> Option<f64> {
        self(year, solar_longitude_deg, observer_longitude_deg)
    }
}

/// Normalize an angle to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to [-180, 180).
fn normalize_180(deg: f64) -> f64 {
    normalize_360(deg + 180.0) - 180.0
}

/// Apparent geocentric solar longitude (degrees) from the truncated
/// mean-anomaly series: mean longitude, equation of centre, aberration
/// and the dominant nutation term. Good to about 0.01 deg.
pub fn apparent_solar_longitude_deg(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / 36_525.0;
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_360(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}

/// Bisection oracle over [`apparent_solar_longitude_deg`].
///
/// The observer longitude does not enter a geocentric longitude and is
/// ignored. Years outside `[min_year, max_year]` are not answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanSunOracle {
    pub min_year: i32,
    pub max_year: i32,
    /// Stop when the bracket is narrower than this many days.
    pub tolerance_days: f64,
}

impl Default for MeanSunOracle {
    fn default() -> Self {
        Self {
            min_year: 1000,
            max_year: 3000,
            tolerance_days: 1e-7,
        }
    }
}

const MAX_BISECTIONS: usize = 80;
const BRACKET_HALF_WIDTH_DAYS: f64 = 6.0;
const DAYS_PER_DEGREE: f64 = 365.2422 / 360.0;

impl MeanSunOracle {
    pub fn new(min_year: i32, max_year: i32) -> Self {
        Self {
            min_year,
            max_year,
            ..Self::default()
        }
    }

    /// Rough instant of the crossing: the March equinox plus the mean motion.
    /// Longitudes from 280 deg up fall in January to March of `year`.
    fn estimate(year: i32, target: f64) -> f64 {
        let equinox = calendar_to_jd(year, 3, 20.5);
        let mut offset = target * DAYS_PER_DEGREE;
        if target >= 280.0 {
            offset -= 360.0 * DAYS_PER_DEGREE;
        }
        equinox + offset
    }
}

impl SolarTermOracle for MeanSunOracle {
    fn find(&self, year: i32, solar_longitude_deg: f64, _observer_longitude_deg: f64) -> Option<f64> {
        if year < self.min_year || year > self.max_year || !solar_longitude_deg.is_finite() {
            return None;
        }
        let target = normalize_360(solar_longitude_deg);
        let est = Self::estimate(year, target);
        let diff = |jd: f64| normalize_180(apparent_solar_longitude_deg(jd) - target);

        let mut lo = est - BRACKET_HALF_WIDTH_DAYS;
        let mut hi = est + BRACKET_HALF_WIDTH_DAYS;
        if diff(lo) > 0.0 || diff(hi) < 0.0 {
            return None;
        }
        for _ in 0..MAX_BISECTIONS {
            if hi - lo < self.tolerance_days {
                break;
            }
            let mid = 0.5 * (lo + hi);
            if diff(mid) < 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Some(0.5 * (lo + hi))
    }
}

/// Fixed instants keyed by (year, longitude); the observer is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOracle {
    entries: HashMap<(i32, u64), f64>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: i32, solar_longitude_deg: f64, jd: f64) {
        self.entries
            .insert((year, normalize_360(solar_longitude_deg).to_bits()), jd);
    }

    pub fn with(mut self, year: i32, solar_longitude_deg: f64, jd: f64) -> Self {
        self.insert(year, solar_longitude_deg, jd);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SolarTermOracle for TableOracle {
    fn find(&self, year: i32, solar_longitude_deg: f64, _observer_longitude_deg: f64) -> Option<f64> {
        self.entries
            .get(&(year, normalize_360(solar_longitude_deg).to_bits()))
            .copied()
    }
}
