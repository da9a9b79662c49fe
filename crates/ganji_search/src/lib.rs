//! Solar-term driven chart resolution and luck cycles.
//!
//! This crate provides:
//! - The `SolarTermOracle` seam, a memoizing `SolarTermCache` and two
//!   in-process oracles (analytic mean Sun, fixed table)
//! - The 24 solar terms and per-year month boundaries
//! - `PillarResolver`: year (입춘), month (절), day and hour pillars
//! - `LuckCycleBuilder`: standard and precision decade pillars, stepping at
//!   any period, and independently resolved year/month/day/two-hour lists

pub mod chart;
pub mod chart_types;
pub mod error;
pub mod luck;
pub mod luck_types;
pub mod oracle;
pub mod solar_term;
pub mod solar_term_types;

pub use chart::PillarResolver;
pub use chart_types::{
    ChartInfo, ChartOptions, DEFAULT_OBSERVER_LONGITUDE_DEG, DEFAULT_UTC_OFFSET_MINUTES,
    MonthInfo, YearInfo,
};
pub use error::SearchError;
pub use luck::{DAYS_PER_LUCK_YEAR, LuckCycleBuilder, PRECISION_SCALE};
pub use luck_types::{LuckCycle, LuckMethod, LuckOptions, LuckStart, MAX_UNTIL_YEARS};
pub use oracle::{MeanSunOracle, SolarTermOracle, TableOracle, apparent_solar_longitude_deg};
pub use solar_term::SolarTermCache;
pub use solar_term_types::{ALL_SOLAR_TERMS, MONTH_START_TERMS, SolarTerm, SolarTermEvent};
