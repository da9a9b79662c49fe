//! Raw element scores for single pillars and whole charts.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::branch::Branch;
use crate::ganzhi::GanZhi;
use crate::pillars::FourPillars;

use super::combination::{CombinationBonus, HARMONY_GROUPS};
use super::scores::ElementScores;

/// Points one pillar carries before weighting.
pub const PILLAR_POINTS: f64 = 100.0;

/// How a branch's half of a pillar is credited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchScoring {
    /// All to the branch's own element.
    #[default]
    Primary,
    /// Split across hidden stems by their day weights.
    HiddenStems,
}

/// Scoring knobs shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthPolicy {
    /// Added to the month branch's element for a full chart.
    pub seasonal_bonus: f64,
    pub combination: CombinationBonus,
    pub branch_scoring: BranchScoring,
}

impl Default for StrengthPolicy {
    fn default() -> Self {
        Self {
            seasonal_bonus: 10.0,
            combination: CombinationBonus::default(),
            branch_scoring: BranchScoring::Primary,
        }
    }
}

fn credit_branch(scores: &mut ElementScores, branch: Branch, points: f64, mode: BranchScoring) {
    match mode {
        BranchScoring::Primary => scores.add_to(branch.element(), points),
        BranchScoring::HiddenStems => {
            let hidden = branch.hidden_stems();
            let days: f64 = hidden.iter().map(|h| h.days as f64).sum();
            for h in hidden {
                scores.add_to(h.stem.element(), points * h.days as f64 / days);
            }
        }
    }
}

fn credit_pillar(scores: &mut ElementScores, gz: GanZhi, points: f64, mode: BranchScoring) {
    scores.add_to(gz.stem.element(), points / 2.0);
    credit_branch(scores, gz.branch, points / 2.0, mode);
}

/// A single pillar: half to the stem's element, half to the branch.
pub fn ganzhi_scores(gz: GanZhi, mode: BranchScoring) -> ElementScores {
    let mut scores = ElementScores::ZERO;
    credit_pillar(&mut scores, gz, PILLAR_POINTS, mode);
    scores
}

/// A whole chart: 100 points shared by the known pillars, then the seasonal
/// bonus on the month branch and at most one harmony bonus per group.
pub fn chart_scores(pillars: &FourPillars, policy: &StrengthPolicy) -> ElementScores {
    let present: Vec<GanZhi> = pillars.present().collect();
    let share = PILLAR_POINTS / present.len() as f64;
    let mut scores = ElementScores::ZERO;
    for gz in &present {
        credit_pillar(&mut scores, *gz, share, policy.branch_scoring);
    }

    if policy.seasonal_bonus > 0.0 {
        scores.add_to(pillars.month.branch.element(), policy.seasonal_bonus);
    }

    let branches = pillars.branches();
    for group in &HARMONY_GROUPS {
        if let Some((kind, bonus)) = policy.combination.best(group, &branches) {
            trace!(element = ?group.element, ?kind, bonus, "harmony bonus");
            scores.add_to(group.element, bonus);
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn gz(s: &str) -> GanZhi {
        s.parse().unwrap()
    }

    #[test]
    fn gapja_splits_wood_water() {
        let s = ganzhi_scores(gz("갑자"), BranchScoring::Primary);
        assert_eq!(s.to_array(), [50.0, 0.0, 0.0, 0.0, 50.0]);
        assert_eq!(s.to_percent().to_array(), [50, 0, 0, 0, 50]);
    }

    #[test]
    fn hidden_stems_split_branch_half() {
        // 축: 계9 신3 기18 of 30 days.
        let s = ganzhi_scores(gz("을축"), BranchScoring::HiddenStems);
        assert_eq!(s.wood, 50.0);
        assert!((s.water - 15.0).abs() < 1e-9);
        assert!((s.metal - 5.0).abs() < 1e-9);
        assert!((s.earth - 30.0).abs() < 1e-9);
        assert!((s.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn chart_without_hour_uses_three_shares() {
        let p = FourPillars::from_strings("갑자", "병인", "무진", None).unwrap();
        let policy = StrengthPolicy {
            seasonal_bonus: 0.0,
            combination: CombinationBonus::NONE,
            ..StrengthPolicy::default()
        };
        let s = chart_scores(&p, &policy);
        assert!((s.total() - 100.0).abs() < 1e-9);
        let third = 100.0 / 3.0 / 2.0;
        assert!((s.get(Element::Wood) - 2.0 * third).abs() < 1e-9);
        assert!((s.get(Element::Earth) - 2.0 * third).abs() < 1e-9);
    }

    #[test]
    fn chart_bonuses_apply() {
        // 자 and 진 form a half water frame; month branch 인 is wood.
        let p = FourPillars::from_strings("갑자", "병인", "무진", None).unwrap();
        let plain = chart_scores(
            &p,
            &StrengthPolicy {
                seasonal_bonus: 0.0,
                combination: CombinationBonus::NONE,
                ..StrengthPolicy::default()
            },
        );
        let full = chart_scores(&p, &StrengthPolicy::default());
        assert!((full.wood - plain.wood - 10.0).abs() < 1e-9);
        assert!((full.water - plain.water - 8.0).abs() < 1e-9);
        assert_eq!(full.fire, plain.fire);
    }
}
