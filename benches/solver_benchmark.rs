//! Solver benchmarks
//!
//! Benchmarks the adaptive integration driver on the damped oscillator
//! at different tolerance levels and sampling densities.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mechsim::{solve_ivp, IvpOptions, Oscillator};

fn linspace(end: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| end * i as f64 / (n - 1) as f64).collect()
}

/// Benchmark solve_ivp at different tolerance levels
fn bench_tolerance_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_ivp tolerance");
    let oscillator = Oscillator::new(1.0, 10.0, 0.5).unwrap();
    let t_eval = linspace(10.0, 500);

    for rtol in [1e-3, 1e-6, 1e-9] {
        let options = IvpOptions::with_tolerances(rtol, rtol * 1e-3);
        group.bench_with_input(BenchmarkId::new("rtol", rtol), &options, |b, options| {
            b.iter(|| {
                solve_ivp(
                    |t, y| oscillator.derivative(t, y),
                    (0.0, 10.0),
                    black_box(oscillator.initial_state()),
                    &t_eval,
                    options,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark the per-model simulate entry points
fn bench_model_simulate(c: &mut Criterion) {
    let oscillator = Oscillator::new(1.0, 10.0, 0.5).unwrap();

    for num_points in [100, 500, 2000] {
        c.bench_function(&format!("oscillator simulate n={num_points}"), |b| {
            b.iter(|| oscillator.simulate(black_box(10.0), num_points).unwrap());
        });
    }
}

criterion_group!(benches, bench_tolerance_levels, bench_model_simulate);
criterion_main!(benches);
