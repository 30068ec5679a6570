//! The spatial multigraph container.
//!
//! Vertices and edges live in slot vectors so ids stay stable across removals. Each vertex keeps
//! its incidence list, which makes degree, neighbourhood and chain walks O(degree) instead of a
//! scan over every edge.

pub mod alg;
mod entries;
mod ids;

pub use ids::{EdgeId, EdgeKey, NodeId};

use crate::error::{GraphError, Result};
use crate::geometry::Point;
use crate::spatial::{SpatialEdge, SpatialNode};
use entries::{EdgeEntry, NodeEntry};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Undirected multigraph whose vertices carry a position and whose edges carry a point curve.
///
/// Parallel edges and self-loops are allowed; they encode distinct physical strands.
#[derive(Debug, Clone, Default)]
pub struct SpatialGraph {
    nodes: Vec<Option<NodeEntry>>,
    edges: Vec<Option<EdgeEntry>>,
    node_count: usize,
    edge_count: usize,
    label_index: HashMap<String, NodeId>,
}

impl SpatialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            ..Default::default()
        }
    }

    fn entry(&self, v: NodeId) -> Option<&NodeEntry> {
        self.nodes.get(v.0).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, v: NodeId) -> Option<&mut NodeEntry> {
        self.nodes.get_mut(v.0).and_then(Option::as_mut)
    }

    fn edge_entry(&self, e: EdgeId) -> Option<&EdgeEntry> {
        self.edges.get(e.0).and_then(Option::as_ref)
    }

    fn index_label(&mut self, id: NodeId, node: &SpatialNode) {
        if let Some(label) = &node.label {
            self.label_index.insert(label.clone(), id);
        }
    }

    fn unindex_label(&mut self, id: NodeId, node: &SpatialNode) {
        if let Some(label) = &node.label {
            if self.label_index.get(label) == Some(&id) {
                self.label_index.remove(label);
            }
        }
    }

    // ---- nodes ----

    pub fn add_node(&mut self, node: SpatialNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index_label(id, &node);
        self.nodes.push(Some(NodeEntry {
            node,
            incident: Vec::new(),
        }));
        self.node_count += 1;
        id
    }

    /// Inserts `node` at an explicit id, growing the slot vector as needed.
    pub fn insert_node_at(&mut self, id: NodeId, node: SpatialNode) -> Result<()> {
        if self.has_node(id) {
            return Err(GraphError::NodeOccupied { node: id });
        }
        let Some(len) = id.0.checked_add(1) else {
            return Err(GraphError::InvalidNodeId { node: id });
        };
        if self.nodes.len() < len {
            self.nodes.resize_with(len, || None);
        }
        self.index_label(id, &node);
        self.nodes[id.0] = Some(NodeEntry {
            node,
            incident: Vec::new(),
        });
        self.node_count += 1;
        Ok(())
    }

    /// Removes a vertex together with every incident edge.
    pub fn remove_node(&mut self, v: NodeId) -> Option<SpatialNode> {
        let incident = self.entry(v)?.incident.clone();
        for e in incident {
            let removed = self.remove_edge(e);
            debug_assert!(removed.is_some(), "incidence list holds a dead edge");
        }
        let entry = self.nodes.get_mut(v.0)?.take()?;
        self.node_count -= 1;
        self.unindex_label(v, &entry.node);
        Some(entry.node)
    }

    pub fn has_node(&self, v: NodeId) -> bool {
        self.entry(v).is_some()
    }

    pub fn node(&self, v: NodeId) -> Option<&SpatialNode> {
        self.entry(v).map(|n| &n.node)
    }

    /// Mutable access to a vertex payload. Relabelling through this handle does not update
    /// the label index; use [`SpatialGraph::set_label`] for that.
    pub fn node_mut(&mut self, v: NodeId) -> Option<&mut SpatialNode> {
        self.entry_mut(v).map(|n| &mut n.node)
    }

    pub fn set_label(&mut self, v: NodeId, label: Option<String>) -> bool {
        let Some(old) = self.node(v).cloned() else {
            return false;
        };
        self.unindex_label(v, &old);
        let updated = SpatialNode { label, ..old };
        self.index_label(v, &updated);
        if let Some(n) = self.node_mut(v) {
            *n = updated;
        }
        true
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.label_index.get(label).copied()
    }

    pub fn position(&self, v: NodeId) -> Option<Point> {
        self.node(v).map(|n| n.position)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Ids of live vertices, ascending.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeId(i))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SpatialNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), &n.node)))
    }

    /// Upper bound (exclusive) of node ids; useful for id-indexed side tables.
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    // ---- edges ----

    /// Inserts an edge and returns its id. `is_loop_or_parallel` on the stored payload is
    /// recomputed from the current topology.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        mut edge: SpatialEdge,
    ) -> Result<EdgeId> {
        for v in [source, target] {
            if !self.has_node(v) {
                return Err(GraphError::MissingEndpoint { node: v });
            }
        }
        edge.is_loop_or_parallel = source == target || self.has_edge_between(source, target);
        let id = EdgeId(self.edges.len());
        self.edges.push(None);
        self.link_edge(id, EdgeKey::new(source, target), edge);
        Ok(id)
    }

    /// Inserts an edge into the vacant slot `id`, as [`SpatialGraph::add_edge`] would. Lets a
    /// caller recycle the id of an edge it just removed.
    pub fn add_edge_at(
        &mut self,
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        mut edge: SpatialEdge,
    ) -> Result<()> {
        for v in [source, target] {
            if !self.has_node(v) {
                return Err(GraphError::MissingEndpoint { node: v });
            }
        }
        if !matches!(self.edges.get(id.0), Some(None)) {
            return Err(GraphError::EdgeOccupied { edge: id });
        }
        edge.is_loop_or_parallel = source == target || self.has_edge_between(source, target);
        self.link_edge(id, EdgeKey::new(source, target), edge);
        Ok(())
    }

    /// Puts a previously removed edge back into its vacated slot, payload untouched.
    pub fn restore_edge(&mut self, id: EdgeId, key: EdgeKey, edge: SpatialEdge) -> Result<()> {
        for v in [key.source, key.target] {
            if !self.has_node(v) {
                return Err(GraphError::MissingEndpoint { node: v });
            }
        }
        if !matches!(self.edges.get(id.0), Some(None)) {
            return Err(GraphError::EdgeOccupied { edge: id });
        }
        self.link_edge(id, key, edge);
        Ok(())
    }

    fn link_edge(&mut self, id: EdgeId, key: EdgeKey, edge: SpatialEdge) {
        if let Some(n) = self.entry_mut(key.source) {
            n.incident.push(id);
        }
        if !key.is_loop() {
            if let Some(n) = self.entry_mut(key.target) {
                n.incident.push(id);
            }
        }
        self.edges[id.0] = Some(EdgeEntry { key, edge });
        self.edge_count += 1;
    }

    pub fn remove_edge(&mut self, e: EdgeId) -> Option<(EdgeKey, SpatialEdge)> {
        let entry = self.edges.get_mut(e.0)?.take()?;
        self.edge_count -= 1;
        for v in [entry.key.source, entry.key.target] {
            if let Some(n) = self.entry_mut(v) {
                n.incident.retain(|&x| x != e);
            }
        }
        Some((entry.key, entry.edge))
    }

    pub fn has_edge(&self, e: EdgeId) -> bool {
        self.edge_entry(e).is_some()
    }

    pub fn edge(&self, e: EdgeId) -> Option<&SpatialEdge> {
        self.edge_entry(e).map(|x| &x.edge)
    }

    pub fn edge_mut(&mut self, e: EdgeId) -> Option<&mut SpatialEdge> {
        self.edges
            .get_mut(e.0)
            .and_then(Option::as_mut)
            .map(|x| &mut x.edge)
    }

    pub fn endpoints(&self, e: EdgeId) -> Option<EdgeKey> {
        self.edge_entry(e).map(|x| x.key)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Ids of live edges, ascending.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeId(i))
    }

    /// Upper bound (exclusive) of edge ids; useful for id-indexed side tables.
    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, EdgeKey, &SpatialEdge)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeId(i), e.key, &e.edge)))
    }

    pub fn for_each_edge_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(EdgeId, EdgeKey, &mut SpatialEdge),
    {
        for (i, e) in self.edges.iter_mut().enumerate() {
            if let Some(e) = e {
                f(EdgeId(i), e.key, &mut e.edge);
            }
        }
    }

    // ---- adjacency ----

    /// Incident edges of `v` in insertion order; a self-loop is listed once.
    pub fn incident_edges(&self, v: NodeId) -> &[EdgeId] {
        self.entry(v).map(|n| n.incident.as_slice()).unwrap_or(&[])
    }

    /// Number of edge ends at `v`; self-loops count twice.
    pub fn degree(&self, v: NodeId) -> usize {
        self.incident_edges(v)
            .iter()
            .map(|&e| match self.endpoints(e) {
                Some(k) if k.is_loop() => 2,
                Some(_) => 1,
                None => 0,
            })
            .sum()
    }

    /// Far endpoint of `e` seen from `v`.
    pub fn opposite(&self, e: EdgeId, v: NodeId) -> Option<NodeId> {
        self.endpoints(e)?.opposite(v)
    }

    /// Distinct adjacent vertices of `v`, in incidence order. A self-loop makes `v` its own
    /// neighbour.
    pub fn neighbors(&self, v: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::new();
        for &e in self.incident_edges(v) {
            let Some(w) = self.opposite(e, v) else {
                continue;
            };
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    pub fn edges_between(&self, u: NodeId, v: NodeId) -> Vec<EdgeId> {
        self.incident_edges(u)
            .iter()
            .copied()
            .filter(|&e| self.opposite(e, u) == Some(v))
            .collect()
    }

    pub fn has_edge_between(&self, u: NodeId, v: NodeId) -> bool {
        self.incident_edges(u)
            .iter()
            .any(|&e| self.opposite(e, u) == Some(v))
    }
}
