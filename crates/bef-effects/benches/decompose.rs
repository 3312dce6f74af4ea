use bef_effects::{decompose, effect_value, EffectKind, ValidationPolicy};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_decompose(c: &mut Criterion) {
    let m = [10.0, 6.0];
    let yo = [14.0, 2.2];
    let rye = [0.6, 0.4];
    c.bench_function("decompose_two_species", |b| {
        b.iter(|| {
            let _ = decompose(black_box(&m), black_box(&yo), black_box(&rye)).unwrap();
        });
    });

    let m10: Vec<f64> = (1..=10).map(|i| i as f64 * 3.0).collect();
    let yo10: Vec<f64> = (1..=10).map(|i| i as f64 * 0.7).collect();
    let rye10 = vec![0.1; 10];
    let policy = ValidationPolicy::default();
    c.bench_function("dominance_ten_species", |b| {
        b.iter(|| {
            let _ = effect_value(EffectKind::Dominance, &m10, &yo10, &rye10, &policy).unwrap();
        });
    });
}

criterion_group!(benches, bench_decompose);
criterion_main!(benches);
