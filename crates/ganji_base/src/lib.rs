//! Stem-branch primitives for four-pillar charts.
//!
//! This crate provides:
//! - Closed enums for the five elements, ten stems and twelve branches
//!   (with Hangul/Hanja notation and hidden-stem tables)
//! - The 60-term sexagenary cycle and the year/month/day/hour cycle arithmetic
//! - Day-boundary rules and the pure day and hour pillar resolvers
//! - Ten-god classification relative to a day stem
//! - Element strength scoring, layer blending and Hamilton apportionment
//! - The luck-pillar stepping primitive and active-event lookup
//!
//! Nothing here needs solar-term instants; resolvers that do live in
//! `ganji_search`.

pub mod boundary;
pub mod branch;
pub mod cycle;
pub mod day_pillar;
pub mod element;
pub mod error;
pub mod ganzhi;
pub mod hour_pillar;
pub mod luck;
pub mod pillars;
pub mod stem;
pub mod strength;
pub mod ten_god;

pub use boundary::{ALL_DAY_BOUNDARY_RULES, DayBoundaryRule};
pub use branch::{ALL_BRANCHES, Branch, HiddenStem};
pub use cycle::{
    DAY_ANCHOR_INDEX, DAY_ANCHOR_JDN, FIRST_MONTH_BRANCH, FIRST_MONTH_STEM_BY_YEAR_STEM,
    YEAR_ANCHOR, cycle_index_for_jd, day_cycle_index, day_ganzhi_for_jdn, month_ganzhi,
    year_ganzhi,
};
pub use day_pillar::{day_pillar, effective_day};
pub use element::{ALL_ELEMENTS, Element, Polarity, Relation};
pub use error::BaseError;
pub use ganzhi::{CYCLE_LEN, GanZhi, SEXAGENARY_CYCLE};
pub use hour_pillar::{HOUR_SLOTS, HourSlot, base_hour_stem, hour_pillar, hour_slot};
pub use luck::{
    Direction, Gender, LuckEvent, LuckPeriod, LuckSteps, MAX_LUCK_EVENTS, active_event, age_at,
    step_luck,
};
pub use pillars::FourPillars;
pub use stem::{ALL_STEMS, Stem};
pub use strength::{
    ALL_LAYERS, BlendTable, BranchScoring, CombinationBonus, ElementPercent, ElementScores,
    Harmony, HarmonyKind, Layer, LayerValue, LayerWeights, StrengthLayers, StrengthPolicy,
    TenGodPercent, apportion, blend, blend_tab, chart_scores, detect_harmonies, ganzhi_scores,
    ten_god_percent,
};
pub use ten_god::{ALL_TEN_GODS, TenGod, TenGodGroup, TenGodTarget, classify, classify_stem};
