mod efficiency;
mod histogram;

use criterion::{criterion_group, criterion_main, Criterion};
use efficiency::bench_estimate_efficiency;
use histogram::{bench_bin_index, bench_fill_histogram};

#[cfg(not(target_os = "windows"))]
use pprof::criterion::{Output, PProfProfiler};

fn criterion_benchmark(c: &mut Criterion) {
    bench_bin_index(c);
    bench_fill_histogram(c);
    bench_estimate_efficiency(c);
}

#[cfg(not(target_os = "windows"))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(target_os = "windows")]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
