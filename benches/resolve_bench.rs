use criterion::{Criterion, criterion_group, criterion_main};
use graph_lease::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Synthetic Erdos-Renyi graph, fixed seed for reproducible runs.
fn random_graph(n: usize, p: f64, seed: u64) -> GraphHandle {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for u in 0..n {
        for w in (u + 1)..n {
            if rng.r#gen::<f64>() < p {
                edges.push((VertexId::new(u), VertexId::new(w)));
            }
        }
    }
    GraphHandle::from_edges(n, false, edges).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let g = random_graph(1_000, 0.01, 42);
    let vs = g.vertices().unwrap();
    c.bench_function("vertex_seq_resolve_all", |b| {
        b.iter(|| vs.resolve().unwrap().len())
    });

    let filtered = g
        .vertices()
        .unwrap()
        .filter(|probe| probe.degree(Direction::All) > 10);
    c.bench_function("vertex_seq_resolve_degree_filter", |b| {
        b.iter(|| filtered.resolve().unwrap().len())
    });

    let vertex = g.vertex(VertexId::new(0)).unwrap();
    c.bench_function("vertex_view_resolve", |b| b.iter(|| vertex.resolve()));
}

fn bench_view_creation(c: &mut Criterion) {
    let g = random_graph(1_000, 0.01, 42);
    c.bench_function("canonical_vertices_reuse", |b| {
        b.iter(|| g.vertices().unwrap())
    });
}

criterion_group!(benches, bench_resolve, bench_view_creation);
criterion_main!(benches);
