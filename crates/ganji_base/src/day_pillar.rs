//! Day pillar from a local civil instant.

use ganji_time::CivilTime;
use tracing::trace;

use crate::boundary::DayBoundaryRule;
use crate::cycle::cycle_index_for_jd;
use crate::error::BaseError;
use crate::ganzhi::GanZhi;

/// Civil date whose day pillar governs `civil` under `rule`.
pub fn effective_day(civil: &CivilTime, rule: DayBoundaryRule) -> CivilTime {
    let shift = rule.day_shift(civil.minute_of_day());
    if shift == 0 {
        *civil
    } else {
        civil.add_days(shift)
    }
}

/// Day pillar of a civil instant under a day-boundary rule.
///
/// The (possibly shifted) date keeps its own clock time; the JD is taken
/// through the float calendar formula and floored to a JDN.
pub fn day_pillar(civil: &CivilTime, rule: DayBoundaryRule) -> Result<GanZhi, BaseError> {
    civil.validate()?;
    let day = effective_day(civil, rule);
    let jd = day.to_jd();
    let index = cycle_index_for_jd(jd)?;
    trace!(%civil, rule = rule.label(), jd, index, "day pillar");
    Ok(GanZhi::from_cycle_index(index as i64))
}
