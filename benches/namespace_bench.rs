use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use simplefs::{Namespace, NodeKind, MAX_NODES};
use std::time::Duration;

// 16 top-level directories, each with 16 subdirectories holding files f0..f7.
fn build_tree() -> Namespace {
    let mut ns = Namespace::new();
    for a in 0..16 {
        let da = ns.create(ns.root(), &format!("a{a}"), NodeKind::Directory).unwrap();
        for b in 0..16 {
            let db = ns.create(da, &format!("b{b}"), NodeKind::Directory).unwrap();
            for f in 0..8 {
                ns.create(db, &format!("f{f}"), NodeKind::File).unwrap();
            }
        }
    }
    ns
}

fn bench_create_full_directory(c: &mut Criterion) {
    c.bench_function("ns::create_full_directory", |b| {
        let names: Vec<String> = (0..MAX_NODES).map(|i| format!("n{i}")).collect();
        b.iter_batched(
            Namespace::new,
            |mut ns| {
                let root = ns.root();
                for n in &names {
                    ns.create(root, n, NodeKind::File).unwrap();
                }
                black_box(ns)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lookup_deep(c: &mut Criterion) {
    c.bench_function("ns::lookup_3_levels_x_2k", |b| {
        let ns = build_tree();
        let paths: Vec<String> = (0..2_000)
            .map(|i| format!("/a{}/b{}/f{}", i % 16, (i / 16) % 16, i % 8))
            .collect();
        b.iter(|| {
            for p in &paths {
                black_box(ns.lookup(p).ok());
            }
        })
    });
}

fn bench_find_by_name(c: &mut Criterion) {
    c.bench_function("ns::find_sorted_over_2k_nodes", |b| {
        let ns = build_tree();
        b.iter(|| black_box(ns.find_sorted("f3")))
    });
}

fn bench_delete_recursive(c: &mut Criterion) {
    c.bench_function("ns::delete_recursive_2k_nodes", |b| {
        b.iter_batched(
            build_tree,
            |mut ns| {
                for a in 0..16 {
                    ns.delete_path(&format!("/a{a}"), true).unwrap();
                }
                black_box(ns)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_ns;
    config = bench_config();
    targets = bench_create_full_directory,
              bench_lookup_deep,
              bench_find_by_name,
              bench_delete_recursive
}
criterion_main!(benches_ns);
