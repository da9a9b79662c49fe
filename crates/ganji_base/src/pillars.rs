//! A resolved four-pillar chart.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::error::BaseError;
use crate::ganzhi::GanZhi;
use crate::stem::Stem;

/// Year, month, day and (when the birth hour is known) hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: GanZhi,
    pub month: GanZhi,
    pub day: GanZhi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<GanZhi>,
}

impl FourPillars {
    pub fn new(year: GanZhi, month: GanZhi, day: GanZhi, hour: Option<GanZhi>) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    /// Parse stored pillar strings (either script).
    pub fn from_strings(
        year: &str,
        month: &str,
        day: &str,
        hour: Option<&str>,
    ) -> Result<Self, BaseError> {
        Ok(Self {
            year: year.parse()?,
            month: month.parse()?,
            day: day.parse()?,
            hour: hour.map(str::parse).transpose()?,
        })
    }

    /// The day stem (일간), reference point for ten-god work.
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// Pillars in year, month, day, hour order.
    pub fn slots(&self) -> [Option<GanZhi>; 4] {
        [Some(self.year), Some(self.month), Some(self.day), self.hour]
    }

    /// Known pillars in year, month, day, hour order.
    pub fn present(&self) -> impl Iterator<Item = GanZhi> + '_ {
        self.slots().into_iter().flatten()
    }

    pub fn branches(&self) -> Vec<Branch> {
        self.present().map(|p| p.branch).collect()
    }

    /// Hangul strings for storage; `None` for an unknown hour.
    pub fn to_strings(&self) -> [Option<String>; 4] {
        self.slots().map(|p| p.map(|g| g.hangul()))
    }
}

impl Display for FourPillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.year, self.month, self.day)?;
        match self.hour {
            Some(h) => write!(f, " {h}"),
            None => f.write_str(" --"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_print() {
        let p = FourPillars::from_strings("경오", "辛巳", "무오", None).unwrap();
        assert_eq!(p.day_master(), Stem::Mu);
        assert_eq!(p.to_string(), "경오 신사 무오 --");
        assert_eq!(
            p.to_strings(),
            [
                Some("경오".to_string()),
                Some("신사".to_string()),
                Some("무오".to_string()),
                None
            ]
        );
        assert_eq!(p.present().count(), 3);
    }

    #[test]
    fn bad_notation_is_rejected() {
        assert!(FourPillars::from_strings("경오", "신사", "무자", Some("xx")).is_err());
        assert!(FourPillars::from_strings("갑축", "신사", "무오", None).is_err());
    }

    #[test]
    fn serde_skips_unknown_hour() {
        let p = FourPillars::from_strings("갑진", "병인", "갑진", None).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"year":"갑진","month":"병인","day":"갑진"}"#);
        let back: FourPillars = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
