//! Criterion benchmarks for the core tree operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ranktree::BTree;

const N: u64 = 10_000;

/// Keys in a fixed pseudo-random order, so runs are comparable.
fn scrambled_keys() -> Vec<u64> {
    (0..N).map(|i| i.wrapping_mul(2654435761) % N).collect()
}

fn populated_tree() -> BTree<u64, u64> {
    let mut tree = BTree::new();
    for key in scrambled_keys() {
        tree.insert(key, key);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let keys = scrambled_keys();
    c.bench_function("insert_10k_scrambled", |b| {
        b.iter(|| {
            let mut tree = BTree::new();
            for &key in &keys {
                tree.insert(black_box(key), key);
            }
            tree
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let tree = populated_tree();
    c.bench_function("search_10k", |b| {
        b.iter(|| {
            for key in 0..N {
                black_box(tree.search(black_box(&key)));
            }
        })
    });
}

fn bench_rank_access(c: &mut Criterion) {
    let tree = populated_tree();
    c.bench_function("get_rank_10k", |b| {
        b.iter(|| {
            for rank in 0..tree.size() {
                black_box(tree.get(black_box(rank)).unwrap());
            }
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    let tree = populated_tree();
    c.bench_function("iterate_10k", |b| {
        b.iter(|| tree.iter().map(|item| item.key).sum::<u64>())
    });
}

fn bench_delete(c: &mut Criterion) {
    let keys = scrambled_keys();
    c.bench_function("delete_10k_scrambled", |b| {
        b.iter_batched(
            populated_tree,
            |mut tree| {
                for &key in &keys {
                    black_box(tree.delete(&key));
                }
                tree
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_search,
    bench_rank_access,
    bench_iterate,
    bench_delete
);
criterion_main!(benches);
