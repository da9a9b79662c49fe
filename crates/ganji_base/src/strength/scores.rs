//! Raw and normalized five-element score vectors.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::element::{ALL_ELEMENTS, Element};

/// Total every normalized vector sums to.
pub const PERCENT_TOTAL: u32 = 100;

/// Non-negative raw score per element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementScores {
    #[serde(alias = "목")]
    pub wood: f64,
    #[serde(alias = "화")]
    pub fire: f64,
    #[serde(alias = "토")]
    pub earth: f64,
    #[serde(alias = "금")]
    pub metal: f64,
    #[serde(alias = "수")]
    pub water: f64,
}

impl ElementScores {
    pub const ZERO: Self = Self::from_array([0.0; 5]);

    pub const fn from_array(v: [f64; 5]) -> Self {
        Self {
            wood: v[0],
            fire: v[1],
            earth: v[2],
            metal: v[3],
            water: v[4],
        }
    }

    pub const fn to_array(&self) -> [f64; 5] {
        [self.wood, self.fire, self.earth, self.metal, self.water]
    }

    pub const fn get(&self, e: Element) -> f64 {
        self.to_array()[e.index()]
    }

    pub fn add_to(&mut self, e: Element, amount: f64) {
        let slot = match e {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        };
        *slot += amount;
    }

    pub fn total(&self) -> f64 {
        self.to_array().iter().sum()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_array(self.to_array().map(|v| v * factor))
    }

    /// Integer percentages summing to 100 (all zero when there is no signal).
    pub fn to_percent(&self) -> ElementPercent {
        ElementPercent::from_array(apportion(&self.to_array()))
    }
}

impl Add for ElementScores {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for ElementScores {
    fn add_assign(&mut self, rhs: Self) {
        for e in ALL_ELEMENTS {
            self.add_to(e, rhs.get(e));
        }
    }
}

/// Integer percentage per element; sums to 100 or is all zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementPercent {
    #[serde(alias = "목")]
    pub wood: u32,
    #[serde(alias = "화")]
    pub fire: u32,
    #[serde(alias = "토")]
    pub earth: u32,
    #[serde(alias = "금")]
    pub metal: u32,
    #[serde(alias = "수")]
    pub water: u32,
}

impl ElementPercent {
    pub const fn from_array(v: [u32; 5]) -> Self {
        Self {
            wood: v[0],
            fire: v[1],
            earth: v[2],
            metal: v[3],
            water: v[4],
        }
    }

    pub const fn to_array(&self) -> [u32; 5] {
        [self.wood, self.fire, self.earth, self.metal, self.water]
    }

    pub const fn get(&self, e: Element) -> u32 {
        self.to_array()[e.index()]
    }

    pub fn sum(&self) -> u32 {
        self.to_array().iter().sum()
    }

    /// Element with the largest share (first in element order on ties).
    pub fn dominant(&self) -> Option<Element> {
        if self.sum() == 0 {
            return None;
        }
        let arr = self.to_array();
        let mut best = 0;
        for i in 1..arr.len() {
            if arr[i] > arr[best] {
                best = i;
            }
        }
        Some(Element::from_index(best))
    }
}

/// Largest-remainder (Hamilton) apportionment of `values` into 100 units.
///
/// Negative and non-finite entries count as zero. When nothing remains the
/// result is all zero. Leftover units go to the largest fractional
/// remainders; equal remainders are served in slice order.
pub fn apportion<const N: usize>(values: &[f64; N]) -> [u32; N] {
    let clean = values.map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 });
    let sum: f64 = clean.iter().sum();
    let mut out = [0u32; N];
    if !sum.is_finite() || sum <= 0.0 {
        return out;
    }

    let mut remainders = [0.0f64; N];
    for i in 0..N {
        let exact = clean[i] * PERCENT_TOTAL as f64 / sum;
        let floor = exact.floor();
        out[i] = floor as u32;
        remainders[i] = exact - floor;
    }

    let mut order: Vec<usize> = (0..N).collect();
    // Stable sort keeps slice order among equal remainders.
    order.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]));

    let assigned: u32 = out.iter().sum();
    if assigned < PERCENT_TOTAL {
        let missing = (PERCENT_TOTAL - assigned) as usize;
        for &i in order.iter().cycle().take(missing) {
            out[i] += 1;
        }
    } else if assigned > PERCENT_TOTAL {
        // Only reachable through float noise: take back from the smallest remainders.
        let mut excess = assigned - PERCENT_TOTAL;
        for &i in order.iter().rev() {
            if excess == 0 {
                break;
            }
            if out[i] > 0 {
                out[i] -= 1;
                excess -= 1;
            }
        }
    }
    out
}
