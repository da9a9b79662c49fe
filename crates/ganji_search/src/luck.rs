//! Luck-cycle generation: decade pillars plus year, month, day and
//! two-hour sub-lists.
//!
//! Decade pillars step the natal month pillar; both methods only decide the
//! first transition and then hand over to [`ganji_base::step_luck`]. The
//! sub-lists are not stepped: each entry is resolved on its own.

use ganji_base::{
    Direction, Gender, GanZhi, LuckEvent, LuckPeriod, LuckSteps, age_at, month_ganzhi, step_luck,
    year_ganzhi,
};
use ganji_time::{CivilTime, MINUTES_PER_DAY, TROPICAL_YEAR_DAYS, days_in_month};
use tracing::debug;

use crate::chart::PillarResolver;
use crate::error::SearchError;
use crate::luck_types::{LuckCycle, LuckMethod, LuckOptions, LuckStart};

/// Days of elapsed time that make one luck year.
pub const DAYS_PER_LUCK_YEAR: f64 = 3.0;
/// Precision method time dilation.
pub const PRECISION_SCALE: f64 = 120.0;

/// Builds luck sequences for births resolved through a [`PillarResolver`].
#[derive(Debug, Clone, Copy)]
pub struct LuckCycleBuilder<'a> {
    resolver: PillarResolver<'a>,
    options: LuckOptions,
}

impl<'a> LuckCycleBuilder<'a> {
    pub fn new(resolver: PillarResolver<'a>, options: LuckOptions) -> Result<Self, SearchError> {
        options.validate()?;
        Ok(Self { resolver, options })
    }

    pub fn resolver(&self) -> &PillarResolver<'a> {
        &self.resolver
    }

    pub fn options(&self) -> &LuckOptions {
        &self.options
    }

    /// Last instant an event may start at for a birth at `birth_jd`.
    pub fn until_jd(&self, birth_jd: f64) -> f64 {
        birth_jd + self.options.until_years as f64 * TROPICAL_YEAR_DAYS
    }

    /// Direction from gender and the birth year's stem polarity.
    pub fn direction_for(&self, gender: Gender, birth: &CivilTime) -> Result<Direction, SearchError> {
        let year = self.resolver.year_pillar(birth)?;
        Ok(Direction::for_chart(gender, year.stem))
    }

    /// First decade transition under the configured method.
    pub fn luck_start(
        &self,
        birth: &CivilTime,
        direction: Direction,
    ) -> Result<LuckStart, SearchError> {
        let birth_jd = self.resolver.to_jd(birth)?;
        let cache = self.resolver.cache();
        let obs = self.resolver.options().observer_longitude_deg;
        let term = match direction {
            Direction::Forward => cache.next_month_term(birth_jd, obs)?,
            Direction::Backward => cache.prev_month_term(birth_jd, obs)?,
        };
        let elapsed = (term.jd - birth_jd).abs();

        let (days, first_jd) = match self.options.method {
            LuckMethod::Standard => {
                let mut days = elapsed.floor();
                if direction == Direction::Forward && self.options.inclusive_forward_day {
                    days += 1.0;
                }
                let decade_number = ((days / DAYS_PER_LUCK_YEAR).floor() as i32).max(1);
                let offset = self.resolver.options().utc_offset_minutes;
                let anchor = |year: i32| CivilTime::new(year, 1, 1, 12, 0, 0.0).to_ut_jd(offset);
                let mut first = anchor(birth.year + decade_number - 1);
                if first <= birth_jd {
                    first = anchor(birth.year + 1);
                }
                (days, first)
            }
            LuckMethod::Precision => {
                // Walk whole slots from the start of the birth slot until the
                // term is crossed; births sharing a slot share the transition.
                let slot = 120.0 / MINUTES_PER_DAY;
                let anchor = birth_jd - self.minutes_into_slot(birth) / MINUTES_PER_DAY;
                let slots = ((term.jd - anchor).abs() / slot).ceil().max(1.0);
                let days = slots * slot;
                (days, anchor + PRECISION_SCALE * days)
            }
        };

        let start = LuckStart {
            method: self.options.method,
            direction,
            term,
            days,
            luck_number: days / DAYS_PER_LUCK_YEAR,
            first_jd,
        };
        debug!(
            method = ?start.method,
            ?direction,
            term = %term.term,
            days,
            first_jd,
            "luck start"
        );
        Ok(start)
    }

    /// Decade pillars (대운): natal month pillar, then one step per decade.
    pub fn daewoon(&self, birth: &CivilTime, direction: Direction) -> Result<LuckCycle, SearchError> {
        let start = self.luck_start(birth, direction)?;
        let natal = self.resolver.month_pillar(birth)?;
        let birth_jd = self.resolver.to_jd(birth)?;
        let events = step_luck(&LuckSteps {
            natal,
            direction,
            birth_jd,
            first_jd: start.first_jd,
            period: LuckPeriod::Decades,
            until_jd: self.until_jd(birth_jd),
            utc_offset_minutes: self.resolver.options().utc_offset_minutes,
        })?;
        Ok(LuckCycle { start, events })
    }

    /// Natal pillar stepped at any period.
    ///
    /// Years step the year pillar from the next 입춘, months step the month
    /// pillar from the next month term, two-hour blocks step the hour pillar
    /// from the next slot boundary, and decades follow [`Self::daewoon`].
    pub fn stepped(
        &self,
        birth: &CivilTime,
        direction: Direction,
        period: LuckPeriod,
    ) -> Result<Vec<LuckEvent>, SearchError> {
        let birth_jd = self.resolver.to_jd(birth)?;
        let (natal, first_jd) = match period {
            LuckPeriod::Decades => return Ok(self.daewoon(birth, direction)?.events),
            LuckPeriod::Years => {
                let info = self.resolver.year_info(birth)?;
                (info.ganzhi, info.end_jd)
            }
            LuckPeriod::Months => {
                let info = self.resolver.month_info(birth)?;
                (info.ganzhi, info.end_jd)
            }
            LuckPeriod::TwoHours => {
                let natal = self.resolver.hour_pillar(birth, None)?;
                (natal, birth_jd + self.minutes_to_next_slot(birth) / MINUTES_PER_DAY)
            }
        };
        Ok(step_luck(&LuckSteps {
            natal,
            direction,
            birth_jd,
            first_jd,
            period,
            until_jd: self.until_jd(birth_jd),
            utc_offset_minutes: self.resolver.options().utc_offset_minutes,
        })?)
    }

    /// Minutes since the odd-hour slot boundary at or before `civil` on the
    /// pillar clock, in `[0, 120)`.
    fn minutes_into_slot(&self, civil: &CivilTime) -> f64 {
        let shift = self.resolver.options().mean_time_shift_minutes();
        let clock = civil.minute_of_day() as f64 + civil.second / 60.0 + shift;
        // Boundaries sit at 01:00, 03:00, ... 23:00.
        (clock - 60.0).rem_euclid(120.0)
    }

    /// Minutes from `civil` to the next odd-hour slot boundary on the pillar clock.
    fn minutes_to_next_slot(&self, civil: &CivilTime) -> f64 {
        120.0 - self.minutes_into_slot(civil)
    }

    /// Year pillars (세운) whose 입춘 years overlap `[start_jd, end_jd)`.
    pub fn sewoon(
        &self,
        birth_jd: f64,
        start_jd: f64,
        end_jd: f64,
    ) -> Result<Vec<LuckEvent>, SearchError> {
        let cache = self.resolver.cache();
        let obs = self.resolver.options().observer_longitude_deg;
        let first_year = self.resolver.to_civil(start_jd).year - 1;
        let last_year = self.resolver.to_civil(end_jd).year;
        let mut events = Vec::new();
        for year in first_year..=last_year {
            let li_chun = cache.li_chun(year, obs)?;
            let next = cache.li_chun(year + 1, obs)?;
            if next <= start_jd || li_chun >= end_jd {
                continue;
            }
            events.push(LuckEvent {
                jd: li_chun,
                ganzhi: year_ganzhi(year)?,
                age: age_at(birth_jd, li_chun),
            });
        }
        Ok(events)
    }

    /// Year pillars for `count` consecutive sexagenary years from `first_year`.
    pub fn sewoon_years(
        &self,
        birth_jd: f64,
        first_year: i32,
        count: u32,
    ) -> Result<Vec<LuckEvent>, SearchError> {
        let obs = self.resolver.options().observer_longitude_deg;
        let end = i32::try_from(count)
            .ok()
            .and_then(|n| first_year.checked_add(n))
            .ok_or(SearchError::InvalidConfig("sewoon year range overflows"))?;
        (first_year..end)
            .map(|year| {
                let jd = self.resolver.cache().li_chun(year, obs)?;
                Ok(LuckEvent {
                    jd,
                    ganzhi: year_ganzhi(year)?,
                    age: age_at(birth_jd, jd),
                })
            })
            .collect()
    }

    /// Month pillars (월운) of the sexagenary year opened by 입춘 of `year`.
    pub fn wolwoon(&self, birth_jd: f64, year: i32) -> Result<Vec<LuckEvent>, SearchError> {
        let bounds = self
            .resolver
            .cache()
            .month_boundaries(year, self.resolver.options().observer_longitude_deg)?;
        let year_stem = year_ganzhi(year)?.stem;
        bounds
            .iter()
            .enumerate()
            .map(|(k, b)| {
                Ok(LuckEvent {
                    jd: b.jd,
                    ganzhi: month_ganzhi(year_stem, k as u8 + 1)?,
                    age: age_at(birth_jd, b.jd),
                })
            })
            .collect()
    }

    /// Day pillars (일운) of every civil day in a month, starting at local midnight.
    pub fn ilwoon(
        &self,
        birth_jd: f64,
        year: i32,
        month: u32,
    ) -> Result<Vec<LuckEvent>, SearchError> {
        CivilTime::date(year, month, 1).validate()?;
        (1..=days_in_month(year, month))
            .map(|day| {
                let midnight = CivilTime::date(year, month, day);
                let jd = self.resolver.to_jd(&midnight)?;
                let ganzhi = self.resolver.day_pillar(&midnight.with_time(12, 0))?;
                Ok(LuckEvent {
                    jd,
                    ganzhi,
                    age: age_at(birth_jd, jd),
                })
            })
            .collect()
    }

    /// Two-hour pillars (시운) of a civil date, from the 자 slot opening the
    /// evening before through the 해 slot.
    pub fn siun(&self, birth_jd: f64, date: &CivilTime) -> Result<Vec<LuckEvent>, SearchError> {
        date.validate()?;
        let shift = self.resolver.options().mean_time_shift_minutes();
        let opening = date.with_time(0, 0).add_minutes(-60.0 - shift);
        (0..12)
            .map(|k| {
                let start = opening.add_minutes(120.0 * k as f64);
                let mid = start.add_minutes(60.0);
                let jd = self.resolver.to_jd(&start)?;
                let ganzhi: GanZhi = self.resolver.hour_pillar(&mid, None)?;
                Ok(LuckEvent {
                    jd,
                    ganzhi,
                    age: age_at(birth_jd, jd),
                })
            })
            .collect()
    }
}
