//! Hour pillar: twelve two-hour branch slots and the closed-form stem.
//!
//! Hour stem = `((day_stem mod 5)·2 + hour_branch) mod 10`, plus the rule's
//! midnight correction. This reproduces the 오자둔 table (갑/기 days open
//! with 갑자, 을/경 with 병자, 병/신 with 무자, 정/임 with 경자, 무/계 with 임자).

use ganji_time::CivilTime;

use crate::boundary::DayBoundaryRule;
use crate::branch::Branch;
use crate::day_pillar::day_pillar;
use crate::error::BaseError;
use crate::ganzhi::GanZhi;
use crate::stem::Stem;

/// A two-hour slot: branch and half-open minute-of-day range `[start, end)`.
///
/// The 자 slot wraps midnight, so its `start` is greater than its `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSlot {
    pub branch: Branch,
    pub start_minute: u32,
    pub end_minute: u32,
}

impl HourSlot {
    pub const fn contains(&self, minute_of_day: u32) -> bool {
        if self.start_minute <= self.end_minute {
            minute_of_day >= self.start_minute && minute_of_day < self.end_minute
        } else {
            minute_of_day >= self.start_minute || minute_of_day < self.end_minute
        }
    }
}

const fn slot(branch: Branch, start_minute: u32, end_minute: u32) -> HourSlot {
    HourSlot {
        branch,
        start_minute,
        end_minute,
    }
}

/// The twelve slots in branch order.
pub const HOUR_SLOTS: [HourSlot; 12] = [
    slot(Branch::Ja, 23 * 60, 60),
    slot(Branch::Chuk, 60, 3 * 60),
    slot(Branch::In, 3 * 60, 5 * 60),
    slot(Branch::Myo, 5 * 60, 7 * 60),
    slot(Branch::Jin, 7 * 60, 9 * 60),
    slot(Branch::Sa, 9 * 60, 11 * 60),
    slot(Branch::O, 11 * 60, 13 * 60),
    slot(Branch::Mi, 13 * 60, 15 * 60),
    slot(Branch::Sin, 15 * 60, 17 * 60),
    slot(Branch::Yu, 17 * 60, 19 * 60),
    slot(Branch::Sul, 19 * 60, 21 * 60),
    slot(Branch::Hae, 21 * 60, 23 * 60),
];

/// Slot containing a minute of the day.
pub fn hour_slot(minute_of_day: u32) -> HourSlot {
    let m = minute_of_day % 1440;
    HOUR_SLOTS
        .iter()
        .copied()
        .find(|s| s.contains(m))
        .unwrap_or(HOUR_SLOTS[0])
}

/// Closed-form hour stem before any boundary correction.
pub const fn base_hour_stem(day_stem: Stem, hour_branch: Branch) -> Stem {
    Stem::from_index((day_stem.index() as i64 % 5) * 2 + hour_branch.index() as i64)
}

/// Hour pillar of a civil instant.
///
/// `day` may carry an already-resolved day pillar for the same instant and
/// rule; otherwise it is resolved here.
pub fn hour_pillar(
    civil: &CivilTime,
    rule: DayBoundaryRule,
    day: Option<GanZhi>,
) -> Result<GanZhi, BaseError> {
    let day = match day {
        Some(d) => d,
        None => day_pillar(civil, rule)?,
    };
    let minute = civil.minute_of_day();
    let branch = hour_slot(minute).branch;
    let stem = base_hour_stem(day.stem, branch).offset(rule.hour_stem_correction(minute));
    GanZhi::new(stem, branch)
}
