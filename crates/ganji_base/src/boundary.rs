//! Day-boundary policies: which civil day the hours around midnight belong to.
//!
//! | rule            | day shift                         | hour-stem correction            |
//! |-----------------|-----------------------------------|---------------------------------|
//! | 자시 (`Jasi`)      | ≥ 23:00 → next day               | none                            |
//! | 조자시/야자시 (`JojaYaja`) | never                        | +2 for 23:00–24:00              |
//! | 인시 (`Insi`)      | < 03:00 → previous day           | +2 for 23:00–03:00 (자, 축 slots) |
//!
//! The corrections keep the hour pillar on the continuous 60-cycle whatever
//! the day pillar rule, so the three rules only disagree about the day.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;

const MINUTE_23H: u32 = 23 * 60;
const MINUTE_03H: u32 = 3 * 60;

/// Policy deciding where one civil day ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundaryRule {
    /// Day turns over at 23:00.
    #[default]
    #[serde(alias = "자시")]
    Jasi,
    /// Day turns over at midnight; 23:00–24:00 is the late rat hour.
    #[serde(alias = "조자시/야자시", alias = "야자시", alias = "조자시")]
    JojaYaja,
    /// Day turns over at 03:00.
    #[serde(alias = "인시")]
    Insi,
}

/// All rules in display order.
pub const ALL_DAY_BOUNDARY_RULES: [DayBoundaryRule; 3] = [
    DayBoundaryRule::Jasi,
    DayBoundaryRule::JojaYaja,
    DayBoundaryRule::Insi,
];

impl DayBoundaryRule {
    /// Korean label as shown to users.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jasi => "자시",
            Self::JojaYaja => "조자시/야자시",
            Self::Insi => "인시",
        }
    }

    /// Whole days to add to the civil date before computing the day pillar.
    pub const fn day_shift(self, minute_of_day: u32) -> i64 {
        match self {
            Self::Jasi if minute_of_day >= MINUTE_23H => 1,
            Self::Insi if minute_of_day < MINUTE_03H => -1,
            _ => 0,
        }
    }

    /// Stem positions to add to the closed-form hour stem.
    pub const fn hour_stem_correction(self, minute_of_day: u32) -> i64 {
        match self {
            Self::Jasi => 0,
            Self::JojaYaja => {
                if minute_of_day >= MINUTE_23H {
                    2
                } else {
                    0
                }
            }
            Self::Insi => {
                if minute_of_day >= MINUTE_23H || minute_of_day < MINUTE_03H {
                    2
                } else {
                    0
                }
            }
        }
    }
}

impl Display for DayBoundaryRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DayBoundaryRule {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "자시" | "jasi" => Ok(Self::Jasi),
            "조자시/야자시" | "야자시" | "조자시" | "joja_yaja" | "joja-yaja" => Ok(Self::JojaYaja),
            "인시" | "insi" => Ok(Self::Insi),
            other => Err(BaseError::UnknownNotation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts() {
        assert_eq!(DayBoundaryRule::Jasi.day_shift(22 * 60 + 59), 0);
        assert_eq!(DayBoundaryRule::Jasi.day_shift(23 * 60), 1);
        assert_eq!(DayBoundaryRule::Insi.day_shift(2 * 60 + 59), -1);
        assert_eq!(DayBoundaryRule::Insi.day_shift(3 * 60), 0);
        assert_eq!(DayBoundaryRule::JojaYaja.day_shift(23 * 60 + 30), 0);
        assert_eq!(DayBoundaryRule::JojaYaja.day_shift(30), 0);
    }

    #[test]
    fn corrections() {
        assert_eq!(DayBoundaryRule::Jasi.hour_stem_correction(23 * 60 + 10), 0);
        assert_eq!(DayBoundaryRule::JojaYaja.hour_stem_correction(23 * 60 + 10), 2);
        assert_eq!(DayBoundaryRule::JojaYaja.hour_stem_correction(10), 0);
        assert_eq!(DayBoundaryRule::Insi.hour_stem_correction(10), 2);
        assert_eq!(DayBoundaryRule::Insi.hour_stem_correction(2 * 60 + 30), 2);
        assert_eq!(DayBoundaryRule::Insi.hour_stem_correction(3 * 60), 0);
    }

    #[test]
    fn parse_korean_labels() {
        for rule in ALL_DAY_BOUNDARY_RULES {
            assert_eq!(rule.label().parse::<DayBoundaryRule>().unwrap(), rule);
        }
        assert!("정오".parse::<DayBoundaryRule>().is_err());
    }
}
