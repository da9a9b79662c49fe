//! Memoizing solar-term cache in front of a [`SolarTermOracle`].
//!
//! Entries are keyed by (year, term longitude, observer longitude) and only
//! ever inserted. Two threads racing on the same key both ask the oracle and
//! store the same value.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use ganji_time::CivilTime;
use tracing::debug;

use crate::error::SearchError;
use crate::oracle::{MeanSunOracle, SolarTermOracle, normalize_360};
use crate::solar_term_types::{ALL_SOLAR_TERMS, MONTH_START_TERMS, SolarTerm, SolarTermEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TermKey {
    year: i32,
    longitude_bits: u64,
    observer_bits: u64,
}

impl TermKey {
    fn new(year: i32, longitude_deg: f64, observer_longitude_deg: f64) -> Self {
        Self {
            year,
            longitude_bits: normalize_360(longitude_deg).to_bits(),
            observer_bits: observer_longitude_deg.to_bits(),
        }
    }
}

/// Cached solar-term lookups.
pub struct SolarTermCache {
    oracle: Box<dyn SolarTermOracle>,
    entries: RwLock<HashMap<TermKey, f64>>,
}

impl std::fmt::Debug for SolarTermCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolarTermCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for SolarTermCache {
    fn default() -> Self {
        Self::new(MeanSunOracle::default())
    }
}

impl SolarTermCache {
    pub fn new(oracle: impl SolarTermOracle + 'static) -> Self {
        Self {
            oracle: Box::new(oracle),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Instant the Sun reaches `longitude_deg` during `year` (JD UT).
    pub fn find(
        &self,
        year: i32,
        longitude_deg: f64,
        observer_longitude_deg: f64,
    ) -> Result<f64, SearchError> {
        let key = TermKey::new(year, longitude_deg, observer_longitude_deg);
        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();
        if let Some(jd) = cached {
            return Ok(jd);
        }

        let jd = self
            .oracle
            .find(year, normalize_360(longitude_deg), observer_longitude_deg)
            .filter(|jd| jd.is_finite())
            .ok_or(SearchError::OracleMiss {
                year,
                longitude_deg,
            })?;
        debug!(year, longitude_deg, jd, "solar term cache miss");
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, jd);
        Ok(jd)
    }

    /// One named term of a Gregorian year.
    pub fn term(
        &self,
        year: i32,
        term: SolarTerm,
        observer_longitude_deg: f64,
    ) -> Result<SolarTermEvent, SearchError> {
        let jd = self.find(year, term.longitude_deg(), observer_longitude_deg)?;
        Ok(SolarTermEvent { term, year, jd })
    }

    /// 입춘 of `year` (JD UT).
    pub fn li_chun(&self, year: i32, observer_longitude_deg: f64) -> Result<f64, SearchError> {
        self.find(year, SolarTerm::Ipchun.longitude_deg(), observer_longitude_deg)
    }

    /// The twelve month-opening terms of the sexagenary year that starts at
    /// 입춘 of `year`; the last one (소한) falls in January of `year + 1`.
    pub fn month_boundaries(
        &self,
        year: i32,
        observer_longitude_deg: f64,
    ) -> Result<[SolarTermEvent; 12], SearchError> {
        let mut out = [SolarTermEvent {
            term: SolarTerm::Ipchun,
            year,
            jd: 0.0,
        }; 12];
        for (slot, term) in out.iter_mut().zip(MONTH_START_TERMS) {
            let lookup_year = if term == SolarTerm::Sohan { year + 1 } else { year };
            *slot = self.term(lookup_year, term, observer_longitude_deg)?;
        }
        Ok(out)
    }

    /// All 24 terms of a Gregorian year in calendar order.
    pub fn terms_in_year(
        &self,
        year: i32,
        observer_longitude_deg: f64,
    ) -> Result<Vec<SolarTermEvent>, SearchError> {
        ALL_SOLAR_TERMS
            .into_iter()
            .map(|t| self.term(year, t, observer_longitude_deg))
            .collect()
    }

    fn month_terms_around(
        &self,
        jd: f64,
        observer_longitude_deg: f64,
    ) -> Result<Vec<SolarTermEvent>, SearchError> {
        let year = CivilTime::from_ut_jd(jd, 0).year;
        let mut events = Vec::with_capacity(36);
        for y in year - 1..=year + 1 {
            events.extend(self.month_boundaries(y, observer_longitude_deg)?);
        }
        events.sort_by(|a, b| a.jd.total_cmp(&b.jd));
        Ok(events)
    }

    /// First month-opening term strictly after `jd`.
    pub fn next_month_term(
        &self,
        jd: f64,
        observer_longitude_deg: f64,
    ) -> Result<SolarTermEvent, SearchError> {
        let events = self.month_terms_around(jd, observer_longitude_deg)?;
        let idx = events.partition_point(|e| e.jd <= jd);
        events.get(idx).copied().ok_or(SearchError::OracleMiss {
            year: CivilTime::from_ut_jd(jd, 0).year + 1,
            longitude_deg: SolarTerm::Ipchun.longitude_deg(),
        })
    }

    /// Last month-opening term at or before `jd`.
    pub fn prev_month_term(
        &self,
        jd: f64,
        observer_longitude_deg: f64,
    ) -> Result<SolarTermEvent, SearchError> {
        let events = self.month_terms_around(jd, observer_longitude_deg)?;
        let idx = events.partition_point(|e| e.jd <= jd);
        idx.checked_sub(1)
            .and_then(|i| events.get(i).copied())
            .ok_or(SearchError::OracleMiss {
                year: CivilTime::from_ut_jd(jd, 0).year - 1,
                longitude_deg: SolarTerm::Ipchun.longitude_deg(),
            })
    }

    /// Number of cached instants.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
