//! Luck-pillar stepping shared by every luck algorithm.
//!
//! A luck sequence opens with the natal pillar at birth (age 1). From the
//! first transition on, each event steps one cycle position in the chart's
//! direction and falls one period after the previous event. Algorithms
//! differ only in how they pick the first transition.

use serde::{Deserialize, Serialize};
use tracing::trace;

use ganji_time::{CivilTime, MINUTES_PER_DAY, TROPICAL_YEAR_DAYS};

use crate::element::Polarity;
use crate::error::BaseError;
use crate::ganzhi::GanZhi;
use crate::stem::Stem;

/// Hard cap on events in one luck sequence.
///
/// Two-hour steps over 200 years stay below it.
pub const MAX_LUCK_EVENTS: usize = 1_000_000;

/// Stepping direction through the cycle; fixed per chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[serde(alias = "순행")]
    Forward,
    #[serde(alias = "역행")]
    Backward,
}

impl Direction {
    /// Yang-year male and yin-year female charts run forward.
    pub fn for_chart(gender: Gender, year_stem: Stem) -> Self {
        match (gender, year_stem.polarity()) {
            (Gender::Male, Polarity::Yang) | (Gender::Female, Polarity::Yin) => Self::Forward,
            _ => Self::Backward,
        }
    }

    /// +1 forward, −1 backward.
    pub const fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[serde(alias = "남", alias = "m")]
    Male,
    #[serde(alias = "여", alias = "f")]
    Female,
}

/// Spacing between consecutive luck events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckPeriod {
    Decades,
    Years,
    Months,
    TwoHours,
}

impl LuckPeriod {
    /// Calendar months per step, or `None` for clock-based steps.
    pub const fn months(self) -> Option<i64> {
        match self {
            Self::Decades => Some(120),
            Self::Years => Some(12),
            Self::Months => Some(1),
            Self::TwoHours => None,
        }
    }

    /// Instant `steps` periods after `jd`, stepping on the local civil calendar.
    pub fn advance(self, jd: f64, steps: i64, utc_offset_minutes: i32) -> f64 {
        if steps == 0 {
            return jd;
        }
        match self.months() {
            Some(m) => CivilTime::from_ut_jd(jd, utc_offset_minutes)
                .add_months(m * steps)
                .to_ut_jd(utc_offset_minutes),
            None => jd + (steps * 120) as f64 / MINUTES_PER_DAY,
        }
    }
}

/// One luck pillar and when it takes over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuckEvent {
    /// JD UT at which this pillar starts.
    pub jd: f64,
    pub ganzhi: GanZhi,
    /// Whole years since birth, at least 1.
    pub age: u32,
}

impl LuckEvent {
    /// Start as a local civil reading.
    pub fn local_time(&self, utc_offset_minutes: i32) -> CivilTime {
        CivilTime::from_ut_jd(self.jd, utc_offset_minutes)
    }
}

/// Age in whole tropical years, never below 1.
pub fn age_at(birth_jd: f64, jd: f64) -> u32 {
    let years = ((jd - birth_jd) / TROPICAL_YEAR_DAYS).floor();
    if years.is_finite() && years > 1.0 {
        years as u32
    } else {
        1
    }
}

/// Inputs of [`step_luck`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuckSteps {
    pub natal: GanZhi,
    pub direction: Direction,
    pub birth_jd: f64,
    /// First transition; moved forward by whole periods while not after birth.
    pub first_jd: f64,
    pub period: LuckPeriod,
    /// Last instant an event may start at.
    pub until_jd: f64,
    pub utc_offset_minutes: i32,
}

/// Emit the natal event and every stepped event up to `until_jd`.
///
/// Fails with [`BaseError::TooManyLuckEvents`] instead of truncating when the
/// window would need more than [`MAX_LUCK_EVENTS`] events.
pub fn step_luck(steps: &LuckSteps) -> Result<Vec<LuckEvent>, BaseError> {
    let too_many = BaseError::TooManyLuckEvents {
        limit: MAX_LUCK_EVENTS,
    };

    let mut first = steps.first_jd;
    let mut guard = 0;
    while first <= steps.birth_jd {
        if guard == MAX_LUCK_EVENTS {
            return Err(too_many);
        }
        first = steps.period.advance(first, 1, steps.utc_offset_minutes);
        guard += 1;
    }

    if steps.period.months().is_none() {
        let slots = ((steps.until_jd - first) * MINUTES_PER_DAY / 120.0).floor();
        if slots.is_finite() && slots + 2.0 > MAX_LUCK_EVENTS as f64 {
            return Err(too_many);
        }
    }

    let mut events = vec![LuckEvent {
        jd: steps.birth_jd,
        ganzhi: steps.natal,
        age: 1,
    }];
    let sign = steps.direction.sign();
    for k in 1_i64.. {
        let jd = steps
            .period
            .advance(first, k - 1, steps.utc_offset_minutes);
        if jd > steps.until_jd {
            break;
        }
        if events.len() == MAX_LUCK_EVENTS {
            return Err(too_many);
        }
        let ganzhi = steps.natal.step(sign * k);
        let age = age_at(steps.birth_jd, jd);
        trace!(k, jd, %ganzhi, age, "luck step");
        events.push(LuckEvent { jd, ganzhi, age });
    }
    Ok(events)
}

/// Index of the event in force at `jd`, if `jd` is not before the first one.
pub fn active_event(events: &[LuckEvent], jd: f64) -> Option<usize> {
    let after = events.partition_point(|e| e.jd <= jd);
    after.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natal() -> GanZhi {
        "병인".parse().unwrap()
    }

    fn steps(direction: Direction) -> LuckSteps {
        let birth = CivilTime::new(1990, 6, 15, 12, 0, 0.0).to_ut_jd(540);
        LuckSteps {
            natal: natal(),
            direction,
            birth_jd: birth,
            first_jd: CivilTime::new(1993, 1, 1, 12, 0, 0.0).to_ut_jd(540),
            period: LuckPeriod::Decades,
            until_jd: birth + 100.0 * TROPICAL_YEAR_DAYS,
            utc_offset_minutes: 540,
        }
    }

    #[test]
    fn decades_step_forward() {
        let ev = step_luck(&steps(Direction::Forward)).unwrap();
        assert_eq!(ev[0].ganzhi, natal());
        assert_eq!(ev[0].age, 1);
        assert_eq!(ev[1].ganzhi.to_string(), "정묘");
        assert_eq!(ev[2].ganzhi.to_string(), "무진");
        assert_eq!(ev[1].local_time(540).year, 1993);
        assert_eq!(ev[2].local_time(540).year, 2003);
        assert_eq!(ev[2].age, 12);
        assert!(ev.windows(2).all(|w| w[0].jd < w[1].jd));
        assert_eq!(ev.len(), 11);
    }

    #[test]
    fn backward_mirrors_forward() {
        let f = step_luck(&steps(Direction::Forward)).unwrap();
        let b = step_luck(&steps(Direction::Backward)).unwrap();
        assert_eq!(f.len(), b.len());
        for (k, (x, y)) in f.iter().zip(&b).enumerate() {
            assert_eq!(x.jd, y.jd);
            assert_eq!(x.ganzhi, natal().step(k as i64));
            assert_eq!(y.ganzhi, natal().step(-(k as i64)));
        }
    }

    #[test]
    fn first_transition_not_after_birth_is_pushed() {
        let mut s = steps(Direction::Forward);
        s.first_jd = s.birth_jd;
        let ev = step_luck(&s).unwrap();
        assert!(ev[1].jd > ev[0].jd);
        assert_eq!(ev[1].local_time(540).year, 2000);
    }

    #[test]
    fn two_hour_steps() {
        let mut s = steps(Direction::Forward);
        s.period = LuckPeriod::TwoHours;
        s.first_jd = s.birth_jd + 1.0 / 24.0;
        s.until_jd = s.birth_jd + 1.0;
        let ev = step_luck(&s).unwrap();
        // natal + 12 slots starting one hour after birth within one day.
        assert_eq!(ev.len(), 13);
        assert!((ev[2].jd - ev[1].jd - 120.0 / MINUTES_PER_DAY).abs() < 1e-9);
    }

    #[test]
    fn two_hour_steps_cover_a_century() {
        let mut s = steps(Direction::Forward);
        s.period = LuckPeriod::TwoHours;
        s.first_jd = s.birth_jd + 1.0 / 24.0;
        let ev = step_luck(&s).unwrap();
        assert!(ev.len() > 400_000);
        let last = ev[ev.len() - 1].jd;
        assert!(last <= s.until_jd);
        assert!(s.until_jd - last < 120.0 / MINUTES_PER_DAY);
    }

    #[test]
    fn oversized_window_is_an_error() {
        let mut s = steps(Direction::Forward);
        s.period = LuckPeriod::TwoHours;
        s.until_jd = s.birth_jd + 300.0 * TROPICAL_YEAR_DAYS;
        assert_eq!(
            step_luck(&s),
            Err(BaseError::TooManyLuckEvents {
                limit: MAX_LUCK_EVENTS
            })
        );

        s.period = LuckPeriod::Months;
        s.until_jd = s.birth_jd + 200_000.0 * TROPICAL_YEAR_DAYS;
        assert_eq!(
            step_luck(&s),
            Err(BaseError::TooManyLuckEvents {
                limit: MAX_LUCK_EVENTS
            })
        );
    }

    #[test]
    fn active_event_lookup() {
        let ev = step_luck(&steps(Direction::Forward)).unwrap();
        assert_eq!(active_event(&ev, ev[0].jd - 1.0), None);
        assert_eq!(active_event(&ev, ev[0].jd), Some(0));
        assert_eq!(active_event(&ev, ev[1].jd - 1e-6), Some(0));
        assert_eq!(active_event(&ev, ev[3].jd + 10.0), Some(3));
        assert_eq!(active_event(&ev, 1e9), Some(ev.len() - 1));
    }

    #[test]
    fn direction_by_gender_and_year() {
        assert_eq!(Direction::for_chart(Gender::Male, Stem::Gyeong), Direction::Forward);
        assert_eq!(Direction::for_chart(Gender::Female, Stem::Gyeong), Direction::Backward);
        assert_eq!(Direction::for_chart(Gender::Male, Stem::Sin), Direction::Backward);
        assert_eq!(Direction::for_chart(Gender::Female, Stem::Sin), Direction::Forward);
    }
}
