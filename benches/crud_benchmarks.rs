use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use osrb_tree::OSRBTree;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("OSRBTree", N), |b| {
        b.iter(|| {
            let mut tree = OSRBTree::new();
            for &k in keys {
                tree.insert(k);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "insert_ordered", &ordered_keys(N));
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert(c, "insert_random", &random_keys(N));
}

// ─── Find ───────────────────────────────────────────────────────────────────

fn bench_find_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: OSRBTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("find_random");

    group.bench_function(BenchmarkId::new("OSRBTree", N), |b| {
        b.iter(|| keys.iter().filter(|k| tree.find(k).is_some()).count());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().filter(|k| set.contains(k)).count());
    });

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("OSRBTree", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<OSRBTree<i64>>(),
            |mut tree| {
                for &k in &keys {
                    tree.remove(&k);
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for &k in &keys {
                    set.remove(&k);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Order statistics ───────────────────────────────────────────────────────

fn bench_rank_select(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: OSRBTree<i64> = keys.iter().copied().collect();
    let sorted: Vec<i64> = tree.iter().copied().collect();

    let mut group = c.benchmark_group("order_statistics");

    group.bench_function(BenchmarkId::new("rank_less", N), |b| {
        b.iter(|| keys.iter().map(|k| tree.rank_less(k)).sum::<usize>());
    });

    group.bench_function(BenchmarkId::new("select", N), |b| {
        b.iter(|| (0..tree.len()).map(|i| *tree.key(tree.select(i))).fold(0i64, i64::wrapping_add));
    });

    // A sorted Vec answers rank by binary search; the baseline for rank_less.
    group.bench_function(BenchmarkId::new("Vec::partition_point", N), |b| {
        b.iter(|| keys.iter().map(|k| sorted.partition_point(|x| x < k)).sum::<usize>());
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_random);

criterion_group!(lookup_benches, bench_find_random, bench_rank_select);

criterion_group!(remove_benches, bench_remove_random);

criterion_main!(insert_benches, lookup_benches, remove_benches);
