//! Cycle indexing: Julian Day Numbers and years onto the 60-term cycle,
//! plus the closed-form month stem.

use ganji_time::jd_to_jdn;

use crate::branch::Branch;
use crate::error::BaseError;
use crate::ganzhi::{CYCLE_LEN, GanZhi};
use crate::stem::Stem;

/// 1999-11-08, a 갑자 day.
pub const DAY_ANCHOR_JDN: i64 = 2_451_491;
/// Cycle position of [`DAY_ANCHOR_JDN`].
pub const DAY_ANCHOR_INDEX: i64 = 0;

/// Year 4 CE opens a 갑자 year, so `(year − 4) mod 60` is the year position.
pub const YEAR_ANCHOR: i32 = 4;

/// Stem of the first (인) month, keyed by the year stem index.
///
/// 갑/기 → 병, 을/경 → 무, 병/신 → 경, 정/임 → 임, 무/계 → 갑.
pub const FIRST_MONTH_STEM_BY_YEAR_STEM: [Stem; 10] = [
    Stem::Byeong,
    Stem::Mu,
    Stem::Gyeong,
    Stem::Im,
    Stem::Gap,
    Stem::Byeong,
    Stem::Mu,
    Stem::Gyeong,
    Stem::Im,
    Stem::Gap,
];

/// Branch index of the first solar month (인, Tiger).
pub const FIRST_MONTH_BRANCH: i64 = 2;

/// Cycle position of a Julian Day Number.
pub fn day_cycle_index(jdn: i64) -> Result<u8, BaseError> {
    let index = (jdn - DAY_ANCHOR_JDN + DAY_ANCHOR_INDEX).rem_euclid(CYCLE_LEN);
    GanZhi::try_from_cycle_index(index).map(GanZhi::cycle_index)
}

/// Cycle position of the day containing a Julian Date (`⌊JD + 0.5⌋`).
pub fn cycle_index_for_jd(jd: f64) -> Result<u8, BaseError> {
    day_cycle_index(jd_to_jdn(jd))
}

/// Day pillar of a Julian Day Number.
pub fn day_ganzhi_for_jdn(jdn: i64) -> Result<GanZhi, BaseError> {
    day_cycle_index(jdn).map(|i| GanZhi::from_cycle_index(i as i64))
}

/// Year pillar of an effective (Li-Chun based) year.
pub fn year_ganzhi(effective_year: i32) -> Result<GanZhi, BaseError> {
    let index = (effective_year as i64 - YEAR_ANCHOR as i64).rem_euclid(CYCLE_LEN);
    GanZhi::try_from_cycle_index(index)
}

/// Month pillar for solar month `month_index` (1 = 인 month .. 12 = 축 month).
pub fn month_ganzhi(year_stem: Stem, month_index: u8) -> Result<GanZhi, BaseError> {
    if !(1..=12).contains(&month_index) {
        return Err(BaseError::InvalidMonthIndex(month_index));
    }
    let step = month_index as i64 - 1;
    let stem = FIRST_MONTH_STEM_BY_YEAR_STEM[year_stem.index() as usize].offset(step);
    let branch = Branch::from_index(FIRST_MONTH_BRANCH + step);
    GanZhi::new(stem, branch)
}
