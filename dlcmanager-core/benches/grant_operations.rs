use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dlcmanager_core::{BlueprintId, CatalogEntry, CatalogFilter, UnlockReconciler};
use std::collections::HashSet;

// Roughly the size of a live game catalog
fn catalog(size: i32) -> Vec<CatalogEntry> {
    (0..size)
        .map(|i| CatalogEntry::new(i, format!("item.{}", i), i % 3 != 0, i % 2 == 0))
        .collect()
}

fn bench_catalog_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_filter");
    let blacklist: HashSet<String> = (0..50).map(|i| format!("item.{}", i * 7)).collect();
    let defaults: HashSet<String> = (0..20).map(|i| format!("item.{}", i * 11)).collect();

    for size in [100, 1_000, 5_000].iter() {
        let entries = catalog(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &entries, |b, entries| {
            b.iter(|| black_box(CatalogFilter::build(entries, &blacklist, &defaults)));
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for size in [100, 1_000, 5_000].iter() {
        let entitlement: HashSet<BlueprintId> = (0..*size).map(BlueprintId).collect();
        let half: HashSet<BlueprintId> = (0..*size / 2).map(BlueprintId).collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("fresh_player", size), &entitlement, |b, e| {
            b.iter(|| black_box(UnlockReconciler::reconcile(&HashSet::new(), e)));
        });
        group.bench_with_input(BenchmarkId::new("half_unlocked", size), &entitlement, |b, e| {
            b.iter(|| black_box(UnlockReconciler::reconcile(&half, e)));
        });
        group.bench_with_input(BenchmarkId::new("rejoin", size), &entitlement, |b, e| {
            b.iter(|| black_box(UnlockReconciler::reconcile(e, e)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_catalog_filter, bench_reconcile);
criterion_main!(benches);
