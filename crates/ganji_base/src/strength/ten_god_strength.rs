//! Share of each ten god across a chart.
//!
//! Stems other than the day master count one unit each. Each branch counts
//! one unit spread over its hidden stems by their day weights.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::pillars::FourPillars;
use crate::ten_god::{ALL_TEN_GODS, TenGod, TenGodGroup, classify_stem};

use super::scores::apportion;

/// Raw ten-god weights, indexed by [`TenGod::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TenGodScores(pub [f64; 10]);

impl TenGodScores {
    pub fn get(&self, god: TenGod) -> f64 {
        self.0[god.index()]
    }

    pub fn group_total(&self, group: TenGodGroup) -> f64 {
        ALL_TEN_GODS
            .iter()
            .filter(|g| g.group() == group)
            .map(|g| self.get(*g))
            .sum()
    }

    pub fn to_percent(&self) -> TenGodPercent {
        TenGodPercent(apportion(&self.0))
    }
}

/// Integer ten-god percentages summing to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenGodPercent(pub [u32; 10]);

impl TenGodPercent {
    pub fn get(&self, god: TenGod) -> u32 {
        self.0[god.index()]
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Non-zero entries in ten-god order.
    pub fn entries(&self) -> Vec<(TenGod, u32)> {
        ALL_TEN_GODS
            .into_iter()
            .map(|g| (g, self.get(g)))
            .filter(|(_, v)| *v > 0)
            .collect()
    }
}

impl Serialize for TenGodPercent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(10))?;
        for god in ALL_TEN_GODS {
            map.serialize_entry(god.hangul(), &self.get(god))?;
        }
        map.end()
    }
}

/// Raw ten-god weights of a chart relative to its day master.
pub fn ten_god_scores(pillars: &FourPillars) -> TenGodScores {
    let day = pillars.day_master();
    let mut scores = [0.0; 10];

    let other_stems = [Some(pillars.year), Some(pillars.month), pillars.hour];
    for gz in other_stems.into_iter().flatten() {
        scores[classify_stem(day, gz.stem).index()] += 1.0;
    }

    for gz in pillars.present() {
        let hidden = gz.branch.hidden_stems();
        let days: f64 = hidden.iter().map(|h| h.days as f64).sum();
        for h in hidden {
            scores[classify_stem(day, h.stem).index()] += h.days as f64 / days;
        }
    }
    TenGodScores(scores)
}

/// Ten-god percentages of a chart.
pub fn ten_god_percent(pillars: &FourPillars) -> TenGodPercent {
    ten_god_scores(pillars).to_percent()
}
