//! Julian Date ↔ proleptic-Gregorian calendar conversion.
//!
//! Two flavours are provided. The floating-point pair (`calendar_to_jd`,
//! `jd_to_calendar`) follows Meeus, *Astronomical Algorithms* ch. 7: months
//! ≤ 2 are counted as months 13/14 of the prior year and the Gregorian
//! century correction `B = 2 − A + ⌊A/4⌋` is applied. The integer pair
//! (`calendar_to_jdn`, `jdn_to_calendar`) is Fliegel–Van Flandern and is
//! used wherever whole-day stepping must be exact.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds in one civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Mean tropical year in days, used to express elapsed time as an age.
pub const TROPICAL_YEAR_DAYS: f64 = 365.2422;

/// Whether `year` is a Gregorian leap year.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a Gregorian month. Returns 0 for an invalid month.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Convert a calendar date with fractional day to a Julian Date.
///
/// `day_frac` is the day of month plus the elapsed fraction of that day,
/// e.g. `15.5` for noon on the 15th.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day_frac + b - 1524.5
}

/// Convert a Julian Date back to `(year, month, day_frac)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day_frac = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day_frac)
}

/// Day-granular Julian Day Number: `⌊JD + 0.5⌋`.
pub fn jd_to_jdn(jd: f64) -> i64 {
    (jd + 0.5).floor() as i64
}

/// Integer Julian Day Number of a Gregorian calendar date.
pub const fn calendar_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let y = year as i64;
    let m = month as i64;
    let d = day as i64;
    let a = (m - 14) / 12;
    (1461 * (y + 4800 + a)) / 4 + (367 * (m - 2 - 12 * a)) / 12
        - (3 * ((y + 4900 + a) / 100)) / 4
        + d
        - 32075
}

/// Gregorian calendar date of an integer Julian Day Number.
pub const fn jdn_to_calendar(jdn: i64) -> (i32, u32, u32) {
    let mut l = jdn + 68_569;
    let n = 4 * l / 146_097;
    l -= (146_097 * n + 3) / 4;
    let i = 4000 * (l + 1) / 1_461_001;
    l = l - 1461 * i / 4 + 31;
    let j = 80 * l / 2447;
    let day = l - 2447 * j / 80;
    l = j / 11;
    let month = j + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;
    (year as i32, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_from_calendar() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn jd_roundtrip_midday() {
        let (y, m, d) = jd_to_calendar(J2000_JD);
        assert_eq!((y, m), (2000, 1));
        assert!((d - 1.5).abs() < 1e-9);
    }

    #[test]
    fn january_uses_prior_year_branch() {
        // 1999-12-31 00:00 is exactly one day before 2000-01-01 00:00
        let dec31 = calendar_to_jd(1999, 12, 31.0);
        let jan1 = calendar_to_jd(2000, 1, 1.0);
        assert!((jan1 - dec31 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn integer_jdn_matches_float() {
        assert_eq!(calendar_to_jdn(2000, 1, 1), 2_451_545);
        assert_eq!(jd_to_jdn(calendar_to_jd(2000, 1, 1.0)), 2_451_545);
        assert_eq!(calendar_to_jdn(2024, 2, 10), 2_460_351);
    }

    #[test]
    fn jdn_inverse() {
        assert_eq!(jdn_to_calendar(2_451_545), (2000, 1, 1));
        assert_eq!(jdn_to_calendar(2_460_351), (2024, 2, 10));
        assert_eq!(jdn_to_calendar(calendar_to_jdn(1900, 3, 1)), (1900, 3, 1));
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 13), 0);
    }
}
