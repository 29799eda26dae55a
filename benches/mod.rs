use criterion::{criterion_group, criterion_main};


use queue::register_benchmarks as register_queue_benchmarks;
use tracker::register_benchmarks as register_tracker_benchmarks;

// Define the benchmark groups
criterion_group!(
    benches,
    register_queue_benchmarks,
    register_tracker_benchmarks,
);

criterion_main!(benches);
