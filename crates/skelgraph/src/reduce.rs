//! Depth-first reduction of a raw adjacency graph.
//!
//! In the raw graph every foreground voxel is a vertex. Only vertices whose degree is not 2
//! (end points, junctions, isolated voxels) are worth keeping; runs of degree-2 "chain" vertices
//! between them become a single edge whose `points` record the run in traversal order.
//!
//! Components made only of chain vertices (closed loops) have no such vertex to anchor on; each
//! one is reduced to a single vertex carrying a self-loop.

use crate::graph::geometry::Point;
use crate::graph::{EdgeId, NodeId, SpatialEdge, SpatialGraph};

struct Reducer<'a> {
    raw: &'a SpatialGraph,
    reduced: SpatialGraph,
    /// Raw vertex id -> reduced vertex id, for the vertices that survive.
    mapped: Vec<Option<NodeId>>,
    visited_edges: Vec<bool>,
    discovered: Vec<bool>,
}

/// Collapses every chain of degree-2 vertices of `raw` into a curve-bearing edge.
///
/// Surviving vertices keep their payload (position and label) and are numbered in ascending
/// raw-id order. Parallel edges between the same pair of surviving vertices are kept apart.
/// Each raw edge is walked exactly once.
pub fn reduce_spatial_graph(raw: &SpatialGraph) -> SpatialGraph {
    let mut r = Reducer {
        raw,
        reduced: SpatialGraph::with_capacity(raw.node_count(), raw.edge_count()),
        mapped: vec![None; raw.node_bound()],
        visited_edges: vec![false; raw.edge_bound()],
        discovered: vec![false; raw.node_bound()],
    };

    for (v, node) in raw.nodes() {
        if !r.is_chain_node(v) {
            r.mapped[v.index()] = Some(r.reduced.add_node(node.clone()));
        }
    }

    let roots: Vec<NodeId> = raw.node_ids().filter(|&v| !r.is_chain_node(v)).collect();
    for root in roots {
        r.dfs_from(root);
    }
    r.reduce_isolated_cycles();

    tracing::debug!(
        raw_nodes = raw.node_count(),
        raw_edges = raw.edge_count(),
        nodes = r.reduced.node_count(),
        edges = r.reduced.edge_count(),
        "reduced spatial graph"
    );
    r.reduced
}

impl Reducer<'_> {
    fn is_chain_node(&self, v: NodeId) -> bool {
        self.raw.degree(v) == 2
    }

    fn dfs_from(&mut self, root: NodeId) {
        if self.discovered[root.index()] {
            return;
        }
        self.discovered[root.index()] = true;
        let raw = self.raw;
        let mut stack: Vec<NodeId> = vec![root];

        while let Some(v) = stack.pop() {
            for &e in raw.incident_edges(v) {
                if self.visited_edges[e.index()] {
                    continue;
                }
                let (w, points) = self.walk_chain(v, e);
                self.emit(v, w, points);
                if !self.discovered[w.index()] {
                    self.discovered[w.index()] = true;
                    stack.push(w);
                }
            }
        }
    }

    /// Every edge left unvisited after the depth-first pass belongs to a component with no
    /// anchor vertex: a closed run of chain vertices, possibly a lone vertex with a self-loop.
    fn reduce_isolated_cycles(&mut self) {
        let leftover: Vec<EdgeId> = self.raw.edge_ids().collect();
        for e in leftover {
            if self.visited_edges[e.index()] {
                continue;
            }
            let Some(key) = self.raw.endpoints(e) else {
                continue;
            };
            let start = key.source;
            let Some(node) = self.raw.node(start).cloned() else {
                continue;
            };
            self.mapped[start.index()] = Some(self.reduced.add_node(node));
            let (end, points) = self.walk_chain(start, e);
            debug_assert_eq!(end, start, "isolated cycle must close on its start vertex");
            self.emit(start, end, points);
        }
    }

    /// Follows `first` away from `start` through chain vertices and returns the vertex the run
    /// ends on together with the interior points, ordered from `start`.
    fn walk_chain(&mut self, start: NodeId, first: EdgeId) -> (NodeId, Vec<Point>) {
        let mut points: Vec<Point> = Vec::new();
        let mut from = start;
        let mut e = first;
        loop {
            self.visited_edges[e.index()] = true;
            let Some(next) = self.raw.opposite(e, from) else {
                debug_assert!(false, "walked edge is not incident to its vertex");
                return (from, points);
            };
            self.extend_with_edge_points(&mut points, e, from);
            if next == start || !self.is_chain_node(next) {
                return (next, points);
            }
            if let Some(p) = self.raw.position(next) {
                points.push(p);
            }
            let Some(&other) = self.raw.incident_edges(next).iter().find(|&&x| x != e) else {
                return (next, points);
            };
            from = next;
            e = other;
        }
    }

    /// Appends the points already stored on raw edge `e`, oriented as seen from `from`.
    fn extend_with_edge_points(&self, points: &mut Vec<Point>, e: EdgeId, from: NodeId) {
        let (Some(key), Some(edge)) = (self.raw.endpoints(e), self.raw.edge(e)) else {
            return;
        };
        if key.source == from {
            points.extend(edge.points.iter().copied());
        } else {
            points.extend(edge.points.iter().rev().copied());
        }
    }

    fn emit(&mut self, v: NodeId, w: NodeId, points: Vec<Point>) {
        let (Some(a), Some(b)) = (self.mapped[v.index()], self.mapped[w.index()]) else {
            debug_assert!(false, "chain ends on an unmapped vertex");
            return;
        };
        if self.reduced.add_edge(a, b, SpatialEdge::new(points)).is_err() {
            debug_assert!(false, "reduced endpoints must exist");
        }
    }
}
