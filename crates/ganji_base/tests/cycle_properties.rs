//! Property tests for cycle indexing and the pure day/hour resolvers.
//!
//! Pure arithmetic; no solar-term oracle is involved.

use ganji_base::{
    ALL_DAY_BOUNDARY_RULES, DayBoundaryRule, GanZhi, SEXAGENARY_CYCLE, day_cycle_index,
    day_pillar, hour_pillar, year_ganzhi,
};
use ganji_time::{CivilTime, calendar_to_jdn, days_in_month};
use proptest::prelude::*;

fn civil() -> impl Strategy<Value = CivilTime> {
    (1600i32..2400, 1u32..=12, 1u32..=31, 0u32..24, 0u32..60).prop_map(|(y, m, d, h, mi)| {
        CivilTime::new(y, m, d.min(days_in_month(y, m)), h, mi, 0.0)
    })
}

proptest! {
    #[test]
    fn day_index_in_range_and_round_trips(jdn in 2_000_000i64..2_600_000) {
        let i = day_cycle_index(jdn).unwrap();
        prop_assert!(i < 60);
        let gz = GanZhi::from_cycle_index(i as i64);
        prop_assert_eq!(gz.cycle_index(), i);
        prop_assert_eq!(SEXAGENARY_CYCLE[i as usize], gz);
    }

    #[test]
    fn consecutive_days_step_once(y in 1600i32..2400, m in 1u32..=12, d in 1u32..=28) {
        let a = day_cycle_index(calendar_to_jdn(y, m, d)).unwrap() as i64;
        let b = day_cycle_index(calendar_to_jdn(y, m, d) + 1).unwrap() as i64;
        prop_assert_eq!((a + 1) % 60, b);
    }

    #[test]
    fn years_sixty_apart_share_a_pillar(y in -2000i32..4000) {
        prop_assert_eq!(year_ganzhi(y).unwrap(), year_ganzhi(y + 60).unwrap());
    }

    #[test]
    fn hour_pillar_is_rule_independent(t in civil()) {
        let reference = hour_pillar(&t, DayBoundaryRule::Jasi, None).unwrap();
        for rule in ALL_DAY_BOUNDARY_RULES {
            prop_assert_eq!(hour_pillar(&t, rule, None).unwrap(), reference);
        }
    }

    #[test]
    fn rules_differ_by_at_most_one_day(t in civil()) {
        let joja = day_pillar(&t, DayBoundaryRule::JojaYaja).unwrap().cycle_index() as i64;
        for rule in ALL_DAY_BOUNDARY_RULES {
            let other = day_pillar(&t, rule).unwrap().cycle_index() as i64;
            let diff = (other - joja).rem_euclid(60);
            prop_assert!(diff == 0 || diff == 1 || diff == 59);
        }
    }
}

#[test]
fn insi_boundary_one_position_apart() {
    let before = CivilTime::new(1990, 5, 20, 2, 59, 0.0);
    let after = CivilTime::new(1990, 5, 20, 3, 1, 0.0);
    let a = day_pillar(&before, DayBoundaryRule::Insi).unwrap();
    let b = day_pillar(&after, DayBoundaryRule::Insi).unwrap();
    assert_eq!(a.step(1), b);
}

#[test]
fn known_year_pillars() {
    for (year, name) in [(1984, "갑자"), (1990, "경오"), (2000, "경진"), (2024, "갑진")] {
        assert_eq!(year_ganzhi(year).unwrap().to_string(), name, "{year}");
    }
}
