use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazyseq::{build_even_query, Sequence};

fn bench_even_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("even_query");

    for size in [1_000usize, 100_000] {
        let seq: Sequence = (0..size as i64).collect();
        let query = build_even_query(Some(&seq)).unwrap();

        group.bench_with_input(BenchmarkId::new("build", size), &seq, |b, seq| {
            b.iter(|| build_even_query(Some(black_box(seq))).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("first_pull", size), &query, |b, query| {
            b.iter(|| black_box(query.execute().try_next().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("collect", size), &query, |b, query| {
            b.iter(|| black_box(query.collect_results().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_even_query);
criterion_main!(benches);
