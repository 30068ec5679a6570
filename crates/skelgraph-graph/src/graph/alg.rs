//! Traversal helpers over [`SpatialGraph`](super::SpatialGraph).

use super::{EdgeId, NodeId, SpatialGraph};
use std::collections::VecDeque;

/// Connected components, each listed in breadth-first order from its lowest id. Components
/// are ordered by their lowest id.
pub fn components(g: &SpatialGraph) -> Vec<Vec<NodeId>> {
    let mut seen: Vec<bool> = vec![false; g.node_bound()];
    let mut out: Vec<Vec<NodeId>> = Vec::new();

    for start in g.node_ids() {
        if seen[start.index()] {
            continue;
        }
        seen[start.index()] = true;
        let mut comp: Vec<NodeId> = Vec::new();
        let mut q: VecDeque<NodeId> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for &e in g.incident_edges(v) {
                let Some(w) = g.opposite(e, v) else {
                    continue;
                };
                if !seen[w.index()] {
                    seen[w.index()] = true;
                    q.push_back(w);
                }
            }
        }
        out.push(comp);
    }

    out
}

/// Breadth-first reachability from `from` to `to`, optionally pretending `skip_edge` is absent.
pub fn is_reachable(g: &SpatialGraph, from: NodeId, to: NodeId, skip_edge: Option<EdgeId>) -> bool {
    if !g.has_node(from) || !g.has_node(to) {
        return false;
    }
    if from == to {
        return true;
    }
    let mut seen: Vec<bool> = vec![false; g.node_bound()];
    seen[from.index()] = true;
    let mut q: VecDeque<NodeId> = VecDeque::new();
    q.push_back(from);
    while let Some(v) = q.pop_front() {
        for &e in g.incident_edges(v) {
            if Some(e) == skip_edge {
                continue;
            }
            let Some(w) = g.opposite(e, v) else {
                continue;
            };
            if w == to {
                return true;
            }
            if !seen[w.index()] {
                seen[w.index()] = true;
                q.push_back(w);
            }
        }
    }
    false
}
