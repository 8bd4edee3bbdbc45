use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rdf_termstore::datatypes::xsd;
use rdf_termstore::{Iri, Literal, Node, NodeStorage};

/// Benchmark fresh IRI interning throughput
fn bench_iri_interning(c: &mut Criterion) {
    let mut group = c.benchmark_group("iri_interning");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let storage = NodeStorage::new();
                for i in 0..size {
                    storage.get_iri(&format!("http://example.org/resource/{}", i));
                }
            });
        });
    }
    group.finish();
}

/// Benchmark lookups of content that is already interned
fn bench_dedup_hits(c: &mut Criterion) {
    let storage = NodeStorage::new();
    let iris: Vec<String> = (0..1000)
        .map(|i| format!("http://example.org/resource/{}", i))
        .collect();
    for iri in &iris {
        storage.get_iri(iri);
    }

    c.bench_function("dedup_hits_1000", |b| {
        b.iter(|| {
            for iri in &iris {
                storage.get_iri(iri);
            }
        });
    });
}

/// Benchmark typed literal interning plus rendering through the registry
fn bench_typed_literals(c: &mut Criterion) {
    c.bench_function("typed_literal_render_1000", |b| {
        b.iter(|| {
            let storage = NodeStorage::new();
            for i in 0..1000 {
                let (record, _) = storage
                    .get_typed_literal(&format!("+{:04}", i), xsd::XSD_INTEGER)
                    .unwrap();
                criterion::black_box(storage.render_literal(&record));
            }
        });
    });
}

/// Benchmark migrating and sorting mixed terms across storages
fn bench_migration_and_sort(c: &mut Criterion) {
    let source = NodeStorage::new();
    let terms: Vec<Node> = (0..1000)
        .map(|i| {
            if i % 2 == 0 {
                Iri::new_in(&format!("http://example.org/{}", i), &source).into()
            } else {
                Literal::new_lang_in(&format!("label {}", i), "en", &source).into()
            }
        })
        .collect();

    c.bench_function("migrate_and_sort_1000", |b| {
        b.iter(|| {
            let target = NodeStorage::new();
            let mut moved: Vec<Node> = terms.iter().map(|t| t.to_node_storage(&target)).collect();
            moved.sort();
            moved
        });
    });
}

criterion_group!(
    benches,
    bench_iri_interning,
    bench_dedup_hits,
    bench_typed_literals,
    bench_migration_and_sort
);
criterion_main!(benches);
