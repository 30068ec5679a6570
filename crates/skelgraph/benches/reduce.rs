use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use skelgraph::graph::geometry::distance;
use skelgraph::graph::{NodeId, SpatialEdge, SpatialGraph, SpatialNode};
use skelgraph::{reduce_spatial_graph, remove_extra_edges};
use std::hint::black_box;
use std::time::Duration;

/// Raw lattice graph of `arms` straight filaments of `length` voxels radiating from a shared
/// centre, with a 26-adjacency diagonal at every junction.
fn build_star_skeleton(arms: usize, length: usize) -> SpatialGraph {
    let mut g = SpatialGraph::new();
    let centre = g.add_node(SpatialNode::default());
    let directions: [(f64, f64, f64); 6] = [
        (1.0, 0.0, 0.0),
        (-1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, -1.0, 0.0),
        (0.0, 0.0, 1.0),
        (0.0, 0.0, -1.0),
    ];
    let mut first_voxels: Vec<NodeId> = Vec::new();
    for &(dx, dy, dz) in directions.iter().cycle().take(arms) {
        let mut prev = centre;
        for k in 1..=length {
            let s = k as f64;
            let v = g.add_node(SpatialNode::at(dx * s, dy * s, dz * s));
            let _ = g.add_edge(prev, v, SpatialEdge::default());
            if k == 1 {
                first_voxels.push(v);
            }
            prev = v;
        }
    }
    // Diagonals between the first voxels of orthogonal arms.
    for pair in first_voxels.windows(2) {
        if let (Some(p), Some(q)) = (g.position(pair[0]), g.position(pair[1])) {
            if distance(&p, &q) < 1.5 {
                let _ = g.add_edge(pair[0], pair[1], SpatialEdge::default());
            }
        }
    }
    g
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("star_4x50", 4usize, 50usize),
        ("star_6x500", 6usize, 500usize),
        ("star_6x5000", 6usize, 5000usize),
    ];

    for (name, arms, length) in cases {
        let raw = build_star_skeleton(arms, length);
        group.bench_with_input(
            BenchmarkId::new("remove_extra_edges+reduce", name),
            &raw,
            |b, raw| {
                b.iter_batched(
                    || raw.clone(),
                    |mut g| {
                        remove_extra_edges(black_box(&mut g));
                        let reduced = reduce_spatial_graph(black_box(&g));
                        black_box(reduced.edge_count());
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
