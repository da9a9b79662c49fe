//! Property tests for apportionment and layer blending.

use ganji_base::{
    BlendTable, BranchScoring, ElementScores, GanZhi, Layer, StrengthLayers, StrengthPolicy,
    apportion, blend_tab, ganzhi_scores,
};
use proptest::prelude::*;

fn pillar() -> impl Strategy<Value = GanZhi> {
    (0i64..60).prop_map(GanZhi::from_cycle_index)
}

fn layer() -> impl Strategy<Value = Layer> {
    prop_oneof![
        Just(Layer::Natal),
        Just(Layer::Decade),
        Just(Layer::Year),
        Just(Layer::Month),
        Just(Layer::Day),
    ]
}

proptest! {
    #[test]
    fn apportion_sums_to_hundred(values in prop::array::uniform5(0.0f64..1e6)) {
        let out = apportion(&values);
        let total: u32 = out.iter().sum();
        if values.iter().any(|v| *v > 0.0) {
            prop_assert_eq!(total, 100);
        } else {
            prop_assert_eq!(total, 0);
        }
    }

    #[test]
    fn apportion_stays_within_one_of_exact(values in prop::array::uniform5(0.0f64..1e3)) {
        let sum: f64 = values.iter().sum();
        prop_assume!(sum > 0.0);
        let out = apportion(&values);
        for (v, p) in values.iter().zip(out) {
            let exact = v * 100.0 / sum;
            prop_assert!((p as f64 - exact).abs() < 1.0 + 1e-9);
        }
    }

    #[test]
    fn blend_sums_to_hundred(
        natal in pillar(),
        decade in pillar(),
        year in pillar(),
        tab in layer(),
    ) {
        let layers = StrengthLayers::default()
            .with(Layer::Natal, natal)
            .with(Layer::Decade, decade)
            .with(Layer::Year, year);
        let p = blend_tab(&layers, &BlendTable::default(), tab, &StrengthPolicy::default());
        prop_assert_eq!(p.sum(), 100);
    }

    #[test]
    fn natal_tab_ignores_other_layers(natal in pillar(), other in pillar(), l in layer()) {
        let table = BlendTable::default();
        let policy = StrengthPolicy::default();
        let alone = StrengthLayers::default().with(Layer::Natal, natal);
        let crowded = alone.with(if l == Layer::Natal { Layer::Day } else { l }, other);
        prop_assert_eq!(
            blend_tab(&alone, &table, Layer::Natal, &policy),
            blend_tab(&crowded, &table, Layer::Natal, &policy)
        );
    }

    #[test]
    fn pillar_scores_total_hundred(gz in pillar(), hidden in any::<bool>()) {
        let mode = if hidden { BranchScoring::HiddenStems } else { BranchScoring::Primary };
        prop_assert!((ganzhi_scores(gz, mode).total() - 100.0).abs() < 1e-9);
    }
}

#[test]
fn gapja_percent() {
    let gz: GanZhi = "갑자".parse().unwrap();
    let p = ganzhi_scores(gz, BranchScoring::Primary).to_percent();
    assert_eq!(p.to_array(), [50, 0, 0, 0, 50]);
}

#[test]
fn all_equal_and_all_zero() {
    assert_eq!(ElementScores::from_array([1.0; 5]).to_percent().to_array(), [20; 5]);
    assert_eq!(ElementScores::ZERO.to_percent().to_array(), [0; 5]);
}
