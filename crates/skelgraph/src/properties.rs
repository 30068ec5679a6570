//! Per-vertex and per-edge statistics of a spatial graph.
//!
//! Every function returns samples in ascending id order (vertices for degrees and angles, edges
//! for distances and lengths).

use crate::graph::edge_points::{contour_length, end_to_end_distance};
use crate::graph::geometry::{angle, minus};
use crate::graph::{EdgeId, NodeId, SpatialGraph};

/// Incident edge ends per vertex; self-loops count twice.
pub fn compute_degrees(g: &SpatialGraph) -> Vec<usize> {
    g.node_ids().map(|v| g.degree(v)).collect()
}

pub fn compute_end_to_end_distances(g: &SpatialGraph) -> Vec<f64> {
    g.edge_ids()
        .filter_map(|e| end_to_end_distance(g, e))
        .collect()
}

pub fn compute_contour_lengths(g: &SpatialGraph) -> Vec<f64> {
    g.edge_ids().filter_map(|e| contour_length(g, e)).collect()
}

/// Angles between every unordered pair of edges incident to the same vertex, measured between
/// the vectors from the vertex to each far endpoint.
///
/// With `ignore_parallel_edges`, pairs sharing their far endpoint are skipped; otherwise they
/// contribute an angle of `0.0`. Pairs involving a self-loop, or a far endpoint at the vertex's
/// own position, have no direction and are always skipped.
pub fn compute_angles(g: &SpatialGraph, ignore_parallel_edges: bool) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for v in g.node_ids() {
        angles_at(g, v, ignore_parallel_edges, &mut out);
    }
    out
}

pub fn compute_cosines(angles: &[f64]) -> Vec<f64> {
    angles.iter().map(|a| a.cos()).collect()
}

fn angles_at(g: &SpatialGraph, v: NodeId, ignore_parallel_edges: bool, out: &mut Vec<f64>) {
    let Some(origin) = g.position(v) else {
        return;
    };
    let incident = g.incident_edges(v);
    for (i, &e1) in incident.iter().enumerate() {
        let Some(t1) = g.opposite(e1, v) else {
            continue;
        };
        let Some(p1) = g.position(t1) else {
            continue;
        };
        for &e2 in &incident[i + 1..] {
            let Some(t2) = g.opposite(e2, v) else {
                continue;
            };
            if ignore_parallel_edges && t1 == t2 {
                continue;
            }
            let Some(p2) = g.position(t2) else {
                continue;
            };
            if let Some(a) = angle(&minus(&p1, &origin), &minus(&p2, &origin)) {
                out.push(a);
            }
        }
    }
}

/// Cosines between the direction `vertex -> partner` and every other edge at `vertex`, skipping
/// `exclude` and edges whose far endpoint is `partner` (parallel edges).
///
/// This is the slice of `compute_cosines(&compute_angles(g, true))` contributed by one edge
/// `vertex - partner`, whether or not that edge is currently in the graph; the edge-swap step
/// uses it to update its histograms without rescanning the graph.
pub(crate) fn cosines_against(
    g: &SpatialGraph,
    vertex: NodeId,
    partner: NodeId,
    exclude: EdgeId,
    out: &mut Vec<f64>,
) {
    let (Some(origin), Some(p)) = (g.position(vertex), g.position(partner)) else {
        return;
    };
    let dir = minus(&p, &origin);
    for &e in g.incident_edges(vertex) {
        if e == exclude {
            continue;
        }
        let Some(t) = g.opposite(e, vertex) else {
            continue;
        };
        if t == partner {
            continue;
        }
        let Some(pt) = g.position(t) else {
            continue;
        };
        if let Some(a) = angle(&dir, &minus(&pt, &origin)) {
            out.push(a.cos());
        }
    }
}
