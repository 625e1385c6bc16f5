//! Benchmarks for Mandelbrot evaluation at the explorer's resolution steps.
//!
//! Run with: cargo bench --bench evaluate

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mandel_explorer::MandelbrotParams;
use mandel_explorer::core::data::complex::Complex;
use mandel_explorer::evaluate;

const CENTER: Complex = Complex {
    real: -0.5,
    imag: 0.0,
};

/// A 900x900 window divided by each resolution divisor.
fn bench_resolutions(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_initial_view");

    for divisor in [8u32, 6, 4] {
        let side = 900 / divisor;
        let params = MandelbrotParams::new(side, side, 1000, 1.0, CENTER).unwrap();

        group.throughput(Throughput::Elements(u64::from(side) * u64::from(side)));
        group.bench_with_input(BenchmarkId::from_parameter(side), &params, |b, params| {
            b.iter(|| evaluate(black_box(params)))
        });
    }

    group.finish();
}

/// Deep zoom on the boundary, where most pixels run close to the iteration cap.
fn bench_boundary_zoom(c: &mut Criterion) {
    let center = Complex {
        real: -0.743_643_887,
        imag: 0.131_825_904,
    };
    let params = MandelbrotParams::new(112, 112, 1000, 5_000.0, center).unwrap();

    c.bench_function("evaluate_boundary_zoom_112", |b| {
        b.iter(|| evaluate(black_box(&params)))
    });
}

criterion_group!(benches, bench_resolutions, bench_boundary_zoom);
criterion_main!(benches);
