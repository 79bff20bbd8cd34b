use criterion::{criterion_group, criterion_main, Criterion};

use aoc2021::{default_input, ALL_SOLUTIONS};

pub fn criterion_benchmark(c: &mut Criterion) {
    for (i, day) in ALL_SOLUTIONS.iter().enumerate() {
        // Days without an input file are skipped.
        let Ok(input) = default_input(i + 1) else {
            continue;
        };
        c.bench_function(&format!("day{}", i + 1), |b| b.iter(|| day(input.as_str())));
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
