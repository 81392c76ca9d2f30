use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mutuals_core::contacts::RawIdentifier;
use mutuals_core::hashing::{build_hash_set, build_hash_set_concurrent, IdentifierHasher};
use mutuals_core::matching::match_hashes;

fn address_book(size: usize) -> Vec<RawIdentifier> {
    (0..size)
        .flat_map(|i| {
            [
                RawIdentifier::phone(format!("+1 (555) {:03}-{:04}", i % 1000, i)),
                RawIdentifier::email(format!("  Contact{}@Example.com ", i)),
            ]
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let hasher = IdentifierHasher::default();
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();
    let mut group = c.benchmark_group("hashing");

    for size in [100usize, 1_000, 10_000] {
        let ids = address_book(size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &ids, |b, ids| {
            b.iter(|| build_hash_set(&hasher, ids))
        });

        group.bench_with_input(BenchmarkId::new("concurrent", size), &ids, |b, ids| {
            b.iter(|| rt.block_on(build_hash_set_concurrent(&hasher, ids.clone(), 4)))
        });
    }
    group.finish();

    let local = build_hash_set(&hasher, &address_book(10_000));
    let remote = build_hash_set(&hasher, &address_book(5_000)).to_text();
    c.bench_function("match_10k_against_5k", |b| {
        b.iter(|| match_hashes(&local, &remote))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
