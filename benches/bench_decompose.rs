use criterion::{Criterion, criterion_group, criterion_main};
use sqlclauses::{
    QueryDecomposer,
    test_utils::{DECOMPOSER_TESTS_FILE, TestDecompositionData},
};
use std::hint::black_box;

fn bench_decompose(sqls: &[&String]) {
    for sql in sqls {
        if let Ok(decomposer) = QueryDecomposer::new(sql) {
            let _ = decomposer.decompose();
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let decomposer_test_file =
        std::fs::read_to_string(DECOMPOSER_TESTS_FILE).expect("Cannot open decomposer test cases");
    let test_data: TestDecompositionData =
        toml::from_str(&decomposer_test_file).expect("Cannot parse test cases defined in toml");

    let sqls = test_data.tests.iter().map(|t| &t.sql).collect::<Vec<_>>();

    c.bench_function("bench decomposer tests", |b| {
        b.iter(|| bench_decompose(black_box(&sqls)))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(1000);
    targets = criterion_benchmark
);
criterion_main!(benches);
