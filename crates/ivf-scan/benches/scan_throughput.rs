use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ivf_scan::{
    decode, evaluate, search_range, NeverStop, NoProgress, ScanConfig, ScanPlan, SelectionVector,
};

fn bench_decode_evaluate(c: &mut Criterion) {
    let vector = SelectionVector::from_index(12, 93_444_724);
    c.bench_function("decode_evaluate", |b| {
        b.iter(|| {
            let ordering = decode(black_box(&vector));
            black_box(evaluate(&ordering))
        })
    });
}

fn bench_window(c: &mut Criterion) {
    let plan = ScanPlan::from_config(&ScanConfig::default());
    c.bench_function("chromatic_window_10k", |b| {
        b.iter(|| {
            let outcome = search_range(
                &plan,
                93_440_000,
                93_450_000,
                &mut NoProgress,
                &NeverStop,
            );
            black_box(outcome.solutions.len())
        })
    });
}

criterion_group!(benches, bench_decode_evaluate, bench_window);
criterion_main!(benches);
