//! Types for luck-cycle generation.

use ganji_base::{Direction, LuckEvent};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::solar_term_types::SolarTermEvent;

/// Upper bound accepted for [`LuckOptions::until_years`].
pub const MAX_UNTIL_YEARS: u32 = 200;

/// How the first decade transition is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckMethod {
    /// Whole days to the term, divided by three, anchored to 1 January.
    #[default]
    #[serde(alias = "표준")]
    Standard,
    /// Exact time to the term scaled by 120.
    #[serde(alias = "정밀")]
    Precision,
}

/// Luck generation options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckOptions {
    pub method: LuckMethod,
    /// Count the term's own day when running forward (standard method).
    pub inclusive_forward_day: bool,
    /// Events are generated up to this many years after birth.
    pub until_years: u32,
}

impl Default for LuckOptions {
    fn default() -> Self {
        Self {
            method: LuckMethod::Standard,
            inclusive_forward_day: true,
            until_years: 100,
        }
    }
}

impl LuckOptions {
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.until_years == 0 || self.until_years > MAX_UNTIL_YEARS {
            return Err(SearchError::InvalidConfig(
                "until_years must be within 1..=200",
            ));
        }
        Ok(())
    }
}

/// How the first decade transition was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuckStart {
    pub method: LuckMethod,
    pub direction: Direction,
    /// Month-opening term the count ran to.
    pub term: SolarTermEvent,
    /// Days between birth and the term (whole days for the standard method).
    pub days: f64,
    /// `days / 3`: years until the first transition.
    pub luck_number: f64,
    /// JD UT of the first transition.
    pub first_jd: f64,
}

/// Decade luck pillars for a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuckCycle {
    pub start: LuckStart,
    /// Natal month pillar first, then one event per decade.
    pub events: Vec<LuckEvent>,
}

impl LuckCycle {
    /// Event in force at `jd`.
    pub fn active(&self, jd: f64) -> Option<&LuckEvent> {
        ganji_base::active_event(&self.events, jd).and_then(|i| self.events.get(i))
    }

    /// `[start, end)` of event `index`; the last event ends at `until_jd`.
    pub fn window(&self, index: usize, until_jd: f64) -> Option<(f64, f64)> {
        let start = self.events.get(index)?.jd;
        let end = self.events.get(index + 1).map_or(until_jd, |e| e.jd);
        Some((start, end))
    }
}
