//! Removal of diagonal edges introduced by dense lattice adjacency.
//!
//! With 26-connectivity, three mutually adjacent voxels form a triangle whose longest side is a
//! diagonal shortcut. Keeping it turns a clean junction into a cluster of degree-3 vertices:
//!
//! ```text
//! o                  o
//! |\                 |
//! o-o      ----->    o-o
//! |/                 |
//! o                  o
//! ```
//!
//! The diagonals go; the centre vertex remains the only junction.

use crate::graph::geometry::distance;
use crate::graph::{EdgeId, SpatialGraph};

/// Runs [`remove_extra_edges_pass`] until a pass removes nothing.
///
/// Returns whether any edge was removed. Running it again on its own output is a no-op.
pub fn remove_extra_edges(g: &mut SpatialGraph) -> bool {
    let mut passes: usize = 0;
    while remove_extra_edges_pass(g) {
        passes += 1;
    }
    tracing::debug!(removed = passes, "removed extra edges iteratively");
    passes > 0
}

/// Removes the first extra edge in edge-id order, if any. Returns whether an edge was removed.
pub fn remove_extra_edges_pass(g: &mut SpatialGraph) -> bool {
    let Some(e) = find_extra_edge(g) else {
        return false;
    };
    tracing::trace!(edge = %e, "removing extra edge");
    g.remove_edge(e).is_some()
}

pub fn find_extra_edge(g: &SpatialGraph) -> Option<EdgeId> {
    g.edge_ids().find(|&e| is_extra_edge(g, e))
}

/// An edge `(u, v)` is extra when:
/// - it is neither a self-loop nor one of several parallel edges,
/// - `u` or `v` is a junction (degree >= 3), so removing it lowers a junction degree,
/// - some third vertex `w` is adjacent to both `u` and `v`, keeping them connected, and
/// - `(u, v)` is strictly the longest side of the triangle `u, v, w`.
pub fn is_extra_edge(g: &SpatialGraph, e: EdgeId) -> bool {
    let Some(key) = g.endpoints(e) else {
        return false;
    };
    let (u, v) = (key.source, key.target);
    if key.is_loop() || g.edges_between(u, v).len() > 1 {
        return false;
    }
    if g.degree(u) < 3 && g.degree(v) < 3 {
        return false;
    }
    let (Some(pu), Some(pv)) = (g.position(u), g.position(v)) else {
        return false;
    };
    let d_uv = distance(&pu, &pv);

    g.neighbors(u).into_iter().any(|w| {
        if w == u || w == v || !g.has_edge_between(v, w) {
            return false;
        }
        let Some(pw) = g.position(w) else {
            return false;
        };
        d_uv > distance(&pu, &pw) && d_uv > distance(&pv, &pw)
    })
}
