use crate::histogram::generate_samples;
use criterion::{black_box, Criterion};
use efficiency_plots::analysis::{BinEdges, EfficiencyEstimate};

pub fn bench_estimate_efficiency(c: &mut Criterion) {
    let edges = BinEdges::linspace(-2.0, 6.0, 50).unwrap();
    let f_samples = generate_samples(50_000);
    let g_samples = generate_samples(50_000);
    let approx_samples = generate_samples(200_000);
    let true_sets: [&[f64]; 2] = [&f_samples, &g_samples];

    c.bench_function("estimate_efficiency", |b| {
        b.iter(|| {
            EfficiencyEstimate::estimate(
                black_box(&true_sets[..]),
                black_box(&approx_samples),
                black_box(&edges),
            )
        })
    });
}
