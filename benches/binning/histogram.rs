use criterion::{black_box, Criterion, Throughput};
use efficiency_plots::analysis::{BinEdges, Histogram};

/// Evenly spread values covering the default range plus some overflow.
pub fn generate_samples(count: usize) -> Vec<f64> {
    (0..count)
        .map(|x| -3.0 + 10.0 * (x as f64 / count as f64))
        .collect()
}

pub fn bench_bin_index(c: &mut Criterion) {
    let edges = BinEdges::linspace(-2.0, 6.0, 50).unwrap();
    let samples = generate_samples(1000);

    c.bench_function("bin_index", |b| {
        b.iter(|| {
            for &value in &samples {
                black_box(edges.bin_index(black_box(value)));
            }
        })
    });
}

pub fn bench_fill_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_histogram");

    for count in [1_000, 100_000] {
        let samples = generate_samples(count);
        group.throughput(Throughput::Elements(count as u64));

        for edge_count in [50, 1_000] {
            let edges = BinEdges::linspace(-2.0, 6.0, edge_count).unwrap();
            group.bench_function(format!("{}_samples_{}_edges", count, edge_count), |b| {
                b.iter(|| Histogram::new(black_box(&samples), black_box(&edges)))
            });
        }
    }

    group.finish();
}
