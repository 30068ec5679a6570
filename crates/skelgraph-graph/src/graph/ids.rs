//! Identifier types.
//!
//! Ids are slot indices into the graph storage. They stay valid until the element they name is
//! removed; removal never renumbers other elements.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Endpoints of an edge.
///
/// Edges are undirected, but `source`/`target` keep the order given at insertion because the
/// edge's `points` run from `source` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeKey {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn touches(&self, v: NodeId) -> bool {
        self.source == v || self.target == v
    }

    /// The endpoint across from `v`, or `None` when `v` is not an endpoint.
    pub fn opposite(&self, v: NodeId) -> Option<NodeId> {
        if self.source == v {
            Some(self.target)
        } else if self.target == v {
            Some(self.source)
        } else {
            None
        }
    }

    /// True when both keys join the same unordered pair of vertices.
    pub fn same_pair(&self, other: &EdgeKey) -> bool {
        (self.source == other.source && self.target == other.target)
            || (self.source == other.target && self.target == other.source)
    }

    pub fn shares_endpoint(&self, other: &EdgeKey) -> bool {
        self.touches(other.source) || self.touches(other.target)
    }
}
