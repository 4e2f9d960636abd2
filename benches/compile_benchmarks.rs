use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cypher_entity::graph::{Direction, Edge, EdgeId, NodeId};
use cypher_entity::query::{compile_batch_create, compile_create, compile_update, CompileOptions};

fn edge_with_properties(i: u64, properties: usize) -> Edge {
    let mut edge = Edge::new(NodeId::new(i), NodeId::new(i + 1), "KNOWS", Direction::Forward);
    for p in 0..properties {
        edge.set_property(format!("prop{}", p), (p as i64) * 10);
    }
    edge
}

/// Benchmark single create compilation by property count
fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_create");
    let options = CompileOptions::default();

    for size in [1usize, 10, 100].iter() {
        let edge = edge_with_properties(1, *size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let statement = compile_create(&edge, &options);
                criterion::black_box(statement.text.len());
            });
        });
    }
    group.finish();
}

/// Benchmark update compilation over a dirty overlay
fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_update");
    let options = CompileOptions::default();

    for size in [1usize, 10, 100].iter() {
        let mut edge = edge_with_properties(1, *size);
        edge.assign_id(EdgeId::new(7)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let statement = compile_update(&edge, &options).unwrap();
                criterion::black_box(statement.params.len());
            });
        });
    }
    group.finish();
}

/// Benchmark batched create by batch size
fn bench_batch_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_batch_create");

    for size in [10u64, 100, 1000].iter() {
        let edges: Vec<Edge> = (0..*size).map(|i| edge_with_properties(i, 3)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let statement = compile_batch_create(&edges, true).unwrap();
                criterion::black_box(statement.params.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_create, bench_update, bench_batch_create);
criterion_main!(benches);
