use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minic_util::Interner;

fn bench_intern_hit(c: &mut Criterion) {
    let mut interner = Interner::new();
    interner.intern_str("repeated_identifier");
    c.bench_function("intern_hit", |b| {
        b.iter(|| interner.intern_str(black_box("repeated_identifier")))
    });
}

fn bench_intern_miss(c: &mut Criterion) {
    c.bench_function("intern_miss", |b| {
        b.iter(|| {
            let mut interner = Interner::new();
            for i in 0..64 {
                interner.intern_str(&format!("ident_{i}"));
            }
            black_box(&interner);
        })
    });
}

criterion_group!(benches, bench_intern_hit, bench_intern_miss);
criterion_main!(benches);
