use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ganji_base::{
    BlendTable, DayBoundaryRule, FourPillars, GanZhi, Layer, StrengthLayers, StrengthPolicy,
    Stem, apportion, blend_tab, chart_scores, classify, day_ganzhi_for_jdn, hour_pillar,
    ten_god_percent,
};
use ganji_time::CivilTime;

fn cycle_bench(c: &mut Criterion) {
    let t = CivilTime::new(2024, 2, 10, 23, 30, 0.0);

    let mut group = c.benchmark_group("cycle");
    group.bench_function("day_ganzhi_for_jdn", |b| {
        b.iter(|| day_ganzhi_for_jdn(black_box(2_460_351)))
    });
    group.bench_function("hour_pillar_insi", |b| {
        b.iter(|| hour_pillar(black_box(&t), DayBoundaryRule::Insi, None))
    });
    group.bench_function("parse_ganzhi", |b| {
        b.iter(|| black_box("庚午").parse::<GanZhi>())
    });
    group.finish();
}

fn strength_bench(c: &mut Criterion) {
    let chart = FourPillars::from_strings("경오", "신사", "무오", Some("무오")).ok();
    let Some(chart) = chart else { return };
    let policy = StrengthPolicy::default();
    let table = BlendTable::default();
    let layers = StrengthLayers::natal(chart)
        .with(Layer::Decade, GanZhi::from_cycle_index(20))
        .with(Layer::Year, GanZhi::from_cycle_index(40))
        .with(Layer::Month, GanZhi::from_cycle_index(2))
        .with(Layer::Day, GanZhi::from_cycle_index(54));

    let mut group = c.benchmark_group("strength");
    group.bench_function("apportion_5", |b| {
        b.iter(|| apportion(black_box(&[12.5, 33.1, 7.0, 20.2, 27.2])))
    });
    group.bench_function("chart_scores", |b| {
        b.iter(|| chart_scores(black_box(&chart), &policy))
    });
    group.bench_function("blend_day_tab", |b| {
        b.iter(|| blend_tab(black_box(&layers), &table, Layer::Day, &policy))
    });
    group.bench_function("ten_god_percent", |b| {
        b.iter(|| ten_god_percent(black_box(&chart)))
    });
    group.bench_function("classify", |b| {
        b.iter(|| classify(black_box(Stem::Mu), black_box(Stem::Gye)))
    });
    group.finish();
}

criterion_group!(benches, cycle_bench, strength_bench);
criterion_main!(benches);
