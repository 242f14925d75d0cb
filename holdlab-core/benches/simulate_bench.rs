//! Criterion benchmarks for HoldLab hot paths.
//!
//! Benchmarks:
//! 1. Simulator over dense signal series of increasing length
//! 2. Signal generation for each built-in source
//! 3. Consensus combination

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use holdlab_core::data::SyntheticProvider;
use holdlab_core::domain::{PriceSeries, SignalSeries};
use holdlab_core::engine::{simulate, SimulationConfig};
use holdlab_core::signals::{
    combine_signals, Breakout52Week, MaCrossover, Macd, RsiReversal, SignalSource, VolumeSpike,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_prices(years: i32) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2000 + years, 1, 1).unwrap();
    let bars = SyntheticProvider::default().bars("BENCH", start, end);
    PriceSeries::new("BENCH", bars).unwrap()
}

/// A signal on every third bar, alternating direction.
fn dense_signals(prices: &PriceSeries) -> SignalSeries {
    prices
        .dates()
        .enumerate()
        .map(|(i, d)| {
            let v = match i % 6 {
                0 => 1,
                3 => -1,
                _ => 0,
            };
            (d, v)
        })
        .collect()
}

// ── 1. Simulator ─────────────────────────────────────────────────────

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let config = SimulationConfig::new(2, 100_000.0);
    for years in [1, 5, 20] {
        let prices = make_prices(years);
        let signals = dense_signals(&prices);
        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, _| {
            b.iter(|| simulate(black_box(&prices), black_box(&signals), &config))
        });
    }
    group.finish();
}

// ── 2. Sources ───────────────────────────────────────────────────────

fn bench_sources(c: &mut Criterion) {
    let prices = make_prices(10);
    let sources: Vec<Box<dyn SignalSource>> = vec![
        Box::new(Breakout52Week::default_params()),
        Box::new(MaCrossover::default_params()),
        Box::new(RsiReversal::default_params()),
        Box::new(VolumeSpike::default_params()),
        Box::new(Macd::default_params()),
    ];
    let mut group = c.benchmark_group("generate");
    for source in &sources {
        group.bench_function(source.name(), |b| {
            b.iter(|| source.generate(black_box(&prices)))
        });
    }
    group.finish();
}

// ── 3. Consensus ─────────────────────────────────────────────────────

fn bench_combine(c: &mut Criterion) {
    let prices = make_prices(10);
    let votes = vec![
        RsiReversal::default_params().generate(&prices),
        Macd::default_params().generate(&prices),
        VolumeSpike::default_params().generate(&prices),
    ];
    c.bench_function("combine_signals", |b| {
        b.iter(|| combine_signals(black_box(&votes)))
    });
}

criterion_group!(benches, bench_simulate, bench_sources, bench_combine);
criterion_main!(benches);
