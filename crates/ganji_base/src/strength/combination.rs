//! Three-harmony (삼합) and half-harmony (반합) branch combinations.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Element;

/// A three-harmony group: birth (생지), peak (왕지) and storage (고지) branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarmonyGroup {
    pub birth: Branch,
    pub peak: Branch,
    pub storage: Branch,
    pub element: Element,
}

/// The four groups: 申子辰 水, 亥卯未 木, 寅午戌 火, 巳酉丑 金.
pub const HARMONY_GROUPS: [HarmonyGroup; 4] = [
    HarmonyGroup {
        birth: Branch::Sin,
        peak: Branch::Ja,
        storage: Branch::Jin,
        element: Element::Water,
    },
    HarmonyGroup {
        birth: Branch::Hae,
        peak: Branch::Myo,
        storage: Branch::Mi,
        element: Element::Wood,
    },
    HarmonyGroup {
        birth: Branch::In,
        peak: Branch::O,
        storage: Branch::Sul,
        element: Element::Fire,
    },
    HarmonyGroup {
        birth: Branch::Sa,
        peak: Branch::Yu,
        storage: Branch::Chuk,
        element: Element::Metal,
    },
];

/// Which members of a group are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyKind {
    ThreeHarmony,
    BirthPeak,
    PeakStorage,
    BirthStorage,
}

/// A detected combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harmony {
    pub element: Element,
    pub kind: HarmonyKind,
}

/// Bonus points added to a group's element for each kind of combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinationBonus {
    pub three_harmony: f64,
    pub half_birth_peak: f64,
    pub half_peak_storage: f64,
    pub half_birth_storage: f64,
}

impl Default for CombinationBonus {
    fn default() -> Self {
        Self {
            three_harmony: 20.0,
            half_birth_peak: 12.0,
            half_peak_storage: 8.0,
            half_birth_storage: 4.0,
        }
    }
}

impl CombinationBonus {
    /// No combination bonuses at all.
    pub const NONE: Self = Self {
        three_harmony: 0.0,
        half_birth_peak: 0.0,
        half_peak_storage: 0.0,
        half_birth_storage: 0.0,
    };

    pub fn for_kind(&self, kind: HarmonyKind) -> f64 {
        match kind {
            HarmonyKind::ThreeHarmony => self.three_harmony,
            HarmonyKind::BirthPeak => self.half_birth_peak,
            HarmonyKind::PeakStorage => self.half_peak_storage,
            HarmonyKind::BirthStorage => self.half_birth_storage,
        }
    }

    /// The single largest bonus applicable to one group, if any.
    pub fn best(&self, group: &HarmonyGroup, branches: &[Branch]) -> Option<(HarmonyKind, f64)> {
        group_kinds(group, branches)
            .into_iter()
            .map(|k| (k, self.for_kind(k)))
            .filter(|(_, v)| *v > 0.0)
            .fold(None, |best, cur| match best {
                Some((_, b)) if b >= cur.1 => best,
                _ => Some(cur),
            })
    }
}

fn group_kinds(group: &HarmonyGroup, branches: &[Branch]) -> Vec<HarmonyKind> {
    let birth = branches.contains(&group.birth);
    let peak = branches.contains(&group.peak);
    let storage = branches.contains(&group.storage);
    let mut kinds = Vec::new();
    if birth && peak && storage {
        kinds.push(HarmonyKind::ThreeHarmony);
    }
    if birth && peak {
        kinds.push(HarmonyKind::BirthPeak);
    }
    if peak && storage {
        kinds.push(HarmonyKind::PeakStorage);
    }
    if birth && storage {
        kinds.push(HarmonyKind::BirthStorage);
    }
    kinds
}

/// The strongest combination present in each group, in group order.
pub fn detect_harmonies(branches: &[Branch]) -> Vec<Harmony> {
    HARMONY_GROUPS
        .iter()
        .filter_map(|g| {
            group_kinds(g, branches).first().map(|&kind| Harmony {
                element: g.element,
                kind,
            })
        })
        .collect()
}
