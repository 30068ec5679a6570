//! Internal storage entries for [`SpatialGraph`](super::SpatialGraph).

use super::EdgeKey;
use crate::spatial::{SpatialEdge, SpatialNode};

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry {
    pub(in crate::graph) node: SpatialNode,
    /// Incident edges in insertion order. A self-loop appears once.
    pub(in crate::graph) incident: Vec<super::EdgeId>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry {
    pub(in crate::graph) key: EdgeKey,
    pub(in crate::graph) edge: SpatialEdge,
}
