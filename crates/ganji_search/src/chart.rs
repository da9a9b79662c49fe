//! Year, month, day and hour pillar resolution for civil instants.
//!
//! Year and month compare the instant's UT Julian Date against 입춘 and the
//! month-opening terms; both use the same JD so they agree at every
//! boundary. Day and hour read the civil clock (optionally shifted to local
//! mean time) and need no solar terms.

use ganji_base::{FourPillars, GanZhi, day_pillar, hour_pillar, month_ganzhi, year_ganzhi};
use ganji_time::CivilTime;
use tracing::debug;

use crate::chart_types::{ChartInfo, ChartOptions, MonthInfo, YearInfo};
use crate::error::SearchError;
use crate::solar_term::SolarTermCache;
use crate::solar_term_types::{MONTH_START_TERMS, SolarTerm};

/// Pillar resolvers bound to a solar-term cache and a set of options.
#[derive(Debug, Clone, Copy)]
pub struct PillarResolver<'a> {
    cache: &'a SolarTermCache,
    options: ChartOptions,
}

impl<'a> PillarResolver<'a> {
    pub fn new(cache: &'a SolarTermCache, options: ChartOptions) -> Result<Self, SearchError> {
        options.validate()?;
        Ok(Self { cache, options })
    }

    pub fn cache(&self) -> &'a SolarTermCache {
        self.cache
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// JD UT of a civil instant under these options.
    pub fn to_jd(&self, civil: &CivilTime) -> Result<f64, SearchError> {
        civil.validate()?;
        Ok(civil.to_ut_jd(self.options.utc_offset_minutes))
    }

    /// Civil instant of a JD UT under these options.
    pub fn to_civil(&self, jd: f64) -> CivilTime {
        CivilTime::from_ut_jd(jd, self.options.utc_offset_minutes)
    }

    /// Clock reading used for the day and hour pillars.
    fn pillar_clock(&self, civil: &CivilTime) -> CivilTime {
        let shift = self.options.mean_time_shift_minutes();
        if shift == 0.0 {
            *civil
        } else {
            civil.add_minutes(shift)
        }
    }

    /// Effective year of a JD UT in Gregorian year `year`: `year`, or the
    /// one before when the instant precedes its 입춘.
    fn effective_year_at(&self, jd: f64, year: i32) -> Result<i32, SearchError> {
        let li_chun = self.cache.li_chun(year, self.options.observer_longitude_deg)?;
        Ok(if jd < li_chun { year - 1 } else { year })
    }

    /// Solar month (1..=12) of a JD UT inside `effective_year`.
    ///
    /// Walks the month-opening terms back from 소한 and stops at the first one
    /// not after `jd`. Terms of a Gregorian year later than `civil_year` are
    /// skipped without a lookup, so pillars resolve up to the oracle's last year.
    fn month_index_at(
        &self,
        jd: f64,
        civil_year: i32,
        effective_year: i32,
    ) -> Result<u8, SearchError> {
        let obs = self.options.observer_longitude_deg;
        for (k, term) in MONTH_START_TERMS.into_iter().enumerate().skip(1).rev() {
            let year = if term == SolarTerm::Sohan { effective_year + 1 } else { effective_year };
            if year > civil_year {
                continue;
            }
            if jd >= self.cache.term(year, term, obs)?.jd {
                return Ok(k as u8 + 1);
            }
        }
        Ok(1)
    }

    /// Sexagenary year of a JD UT with both 입춘 bounds, looked up from the
    /// Gregorian year `year`.
    fn year_info_at(&self, jd: f64, year: i32) -> Result<YearInfo, SearchError> {
        let obs = self.options.observer_longitude_deg;
        let li_chun = self.cache.li_chun(year, obs)?;
        let (effective_year, start_jd, end_jd) = if jd < li_chun {
            (year - 1, self.cache.li_chun(year - 1, obs)?, li_chun)
        } else {
            let next = self.cache.li_chun(year + 1, obs)?;
            if jd >= next {
                (year + 1, next, self.cache.li_chun(year + 2, obs)?)
            } else {
                (year, li_chun, next)
            }
        };
        Ok(YearInfo {
            ganzhi: year_ganzhi(effective_year)?,
            effective_year,
            start_jd,
            end_jd,
        })
    }

    /// Year pillar and its 입춘 bounds.
    pub fn year_info(&self, civil: &CivilTime) -> Result<YearInfo, SearchError> {
        let jd = self.to_jd(civil)?;
        self.year_info_at(jd, civil.year)
    }

    fn month_info_at(&self, jd: f64, year: &YearInfo) -> Result<MonthInfo, SearchError> {
        let bounds = self
            .cache
            .month_boundaries(year.effective_year, self.options.observer_longitude_deg)?;
        let k = bounds
            .iter()
            .rposition(|b| jd >= b.jd)
            .unwrap_or_default();
        let end_jd = bounds.get(k + 1).map_or(year.end_jd, |b| b.jd);
        let month_index = k as u8 + 1;
        Ok(MonthInfo {
            ganzhi: month_ganzhi(year.ganzhi.stem, month_index)?,
            month_index,
            term: bounds[k].term,
            start_jd: bounds[k].jd,
            end_jd,
        })
    }

    /// Month pillar and its term bounds.
    pub fn month_info(&self, civil: &CivilTime) -> Result<MonthInfo, SearchError> {
        let jd = self.to_jd(civil)?;
        let year = self.year_info_at(jd, civil.year)?;
        self.month_info_at(jd, &year)
    }

    /// Year pillar; only this year's 입춘 is looked up.
    pub fn year_pillar(&self, civil: &CivilTime) -> Result<GanZhi, SearchError> {
        let jd = self.to_jd(civil)?;
        Ok(year_ganzhi(self.effective_year_at(jd, civil.year)?)?)
    }

    /// Month pillar without the term bounds of [`Self::month_info`].
    pub fn month_pillar(&self, civil: &CivilTime) -> Result<GanZhi, SearchError> {
        let jd = self.to_jd(civil)?;
        let effective_year = self.effective_year_at(jd, civil.year)?;
        let month_index = self.month_index_at(jd, civil.year, effective_year)?;
        Ok(month_ganzhi(year_ganzhi(effective_year)?.stem, month_index)?)
    }

    pub fn day_pillar(&self, civil: &CivilTime) -> Result<GanZhi, SearchError> {
        civil.validate()?;
        Ok(day_pillar(&self.pillar_clock(civil), self.options.day_boundary)?)
    }

    /// Hour pillar; `day` may carry the day pillar already resolved for `civil`.
    pub fn hour_pillar(
        &self,
        civil: &CivilTime,
        day: Option<GanZhi>,
    ) -> Result<GanZhi, SearchError> {
        civil.validate()?;
        Ok(hour_pillar(
            &self.pillar_clock(civil),
            self.options.day_boundary,
            day,
        )?)
    }

    /// Full chart with year and month bounds. When the birth hour is
    /// unknown, pass a noon reading and `hour_known = false`.
    pub fn chart(&self, civil: &CivilTime, hour_known: bool) -> Result<ChartInfo, SearchError> {
        let birth_jd = self.to_jd(civil)?;
        let year = self.year_info_at(birth_jd, civil.year)?;
        let month = self.month_info_at(birth_jd, &year)?;
        let day = self.day_pillar(civil)?;
        let hour = if hour_known {
            Some(self.hour_pillar(civil, Some(day))?)
        } else {
            None
        };
        let pillars = FourPillars::new(year.ganzhi, month.ganzhi, day, hour);
        debug!(%civil, %pillars, "resolved chart");
        Ok(ChartInfo {
            pillars,
            year,
            month,
            birth_jd,
        })
    }

    /// Four pillars without the bounds carried by [`Self::chart`]; needs no
    /// solar term beyond the instant's own year.
    pub fn four_pillars(
        &self,
        civil: &CivilTime,
        hour_known: bool,
    ) -> Result<FourPillars, SearchError> {
        let jd = self.to_jd(civil)?;
        let effective_year = self.effective_year_at(jd, civil.year)?;
        let year = year_ganzhi(effective_year)?;
        let month_index = self.month_index_at(jd, civil.year, effective_year)?;
        let month = month_ganzhi(year.stem, month_index)?;
        let day = self.day_pillar(civil)?;
        let hour = if hour_known {
            Some(self.hour_pillar(civil, Some(day))?)
        } else {
            None
        };
        Ok(FourPillars::new(year, month, day, hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganji_base::DayBoundaryRule;

    fn resolver(cache: &SolarTermCache) -> PillarResolver<'_> {
        PillarResolver::new(cache, ChartOptions::default()).unwrap()
    }

    #[test]
    fn known_chart_1990() {
        // 1990-05-20 14:30 KST: 경오년 신사월 을유일 계미시.
        let cache = SolarTermCache::default();
        let r = resolver(&cache);
        let t = CivilTime::new(1990, 5, 20, 14, 30, 0.0);
        let info = r.chart(&t, true).unwrap();
        assert_eq!(info.pillars.year.to_string(), "경오");
        assert_eq!(info.pillars.month.to_string(), "신사");
        assert_eq!(info.pillars.day.to_string(), "을유");
        assert_eq!(info.pillars.hour.map(|h| h.to_string()), Some("계미".to_string()));
        assert_eq!(info.month.month_index, 4);
        assert!(info.month.start_jd <= info.birth_jd && info.birth_jd < info.month.end_jd);
    }

    #[test]
    fn january_belongs_to_previous_year() {
        let cache = SolarTermCache::default();
        let r = resolver(&cache);
        let t = CivilTime::new(2024, 1, 20, 12, 0, 0.0);
        let y = r.year_info(&t).unwrap();
        assert_eq!(y.effective_year, 2023);
        assert_eq!(y.ganzhi.to_string(), "계묘");
        let m = r.month_info(&t).unwrap();
        assert_eq!(m.month_index, 12);
        assert_eq!(m.ganzhi.to_string(), "을축");
    }

    #[test]
    fn month_and_year_flip_together_at_li_chun() {
        let cache = SolarTermCache::default();
        let r = resolver(&cache);
        let li = cache.li_chun(2024, 127.5).unwrap();
        let before = r.to_civil(li - 1.0 / 86_400.0);
        let after = r.to_civil(li + 1.0 / 86_400.0);
        assert_eq!(r.year_pillar(&before).unwrap().to_string(), "계묘");
        assert_eq!(r.month_pillar(&before).unwrap().to_string(), "을축");
        assert_eq!(r.year_pillar(&after).unwrap().to_string(), "갑진");
        assert_eq!(r.month_pillar(&after).unwrap().to_string(), "병인");
    }

    #[test]
    fn unknown_hour_leaves_slot_empty() {
        let cache = SolarTermCache::default();
        let r = resolver(&cache);
        let p = r
            .four_pillars(&CivilTime::new(2000, 1, 1, 12, 0, 0.0), false)
            .unwrap();
        assert_eq!(p.hour, None);
        assert_eq!(p.day.to_string(), "무오");
        assert_eq!(p.year.to_string(), "기묘");
    }

    #[test]
    fn local_mean_time_moves_hour_boundary() {
        let cache = SolarTermCache::default();
        let opts = ChartOptions {
            local_mean_time: true,
            day_boundary: DayBoundaryRule::JojaYaja,
            ..ChartOptions::default()
        };
        let lmt = PillarResolver::new(&cache, opts).unwrap();
        let std = resolver(&cache);
        // 13:15 KST is 12:45 LMT at 127.5E: 오 slot under LMT, 미 slot on the clock.
        let t = CivilTime::new(2000, 1, 1, 13, 15, 0.0);
        assert_eq!(lmt.hour_pillar(&t, None).unwrap().branch, ganji_base::Branch::O);
        assert_eq!(std.hour_pillar(&t, None).unwrap().branch, ganji_base::Branch::Mi);
    }

    #[test]
    fn invalid_inputs() {
        let cache = SolarTermCache::default();
        let bad = ChartOptions {
            observer_longitude_deg: 200.0,
            ..ChartOptions::default()
        };
        assert!(matches!(
            PillarResolver::new(&cache, bad),
            Err(SearchError::InvalidConfig(_))
        ));
        let r = resolver(&cache);
        assert!(matches!(
            r.year_pillar(&CivilTime::new(2023, 2, 29, 0, 0, 0.0)),
            Err(SearchError::Time(_))
        ));
    }

    #[test]
    fn oracle_miss_surfaces() {
        let cache = SolarTermCache::new(crate::oracle::MeanSunOracle::new(1950, 2050));
        let r = resolver(&cache);
        let err = r.year_pillar(&CivilTime::new(1900, 6, 1, 12, 0, 0.0));
        assert!(matches!(err, Err(SearchError::OracleMiss { year: 1900, .. })));
    }
}
