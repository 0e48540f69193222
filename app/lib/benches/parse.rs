use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use formcsv::parse;
use std::hint::black_box;

fn build_input(rows: usize) -> String {
    let mut input = String::new();
    for i in 0..rows {
        input.push_str(&format!(
            "{}, Name_{}, \"Street {}, Apt \"\"B\"\"\",{}\n",
            i,
            i,
            i,
            i * 100
        ));
    }
    input
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 1000, 100000].iter() {
        let input = build_input(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| black_box(parse(black_box(input))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse);
criterion_main!(benches);
