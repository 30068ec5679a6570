//! Serializable snapshot of a [`SpatialGraph`].
//!
//! The document keeps, per vertex, its id, optional label and position; per edge, its endpoint
//! ids and ordered points. Concrete file formats are left to the caller (any serde format
//! works).

use crate::error::{GraphError, Result};
use crate::geometry::Point;
use crate::graph::{NodeId, SpatialGraph};
use crate::spatial::{SpatialEdge, SpatialNode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl From<&SpatialGraph> for GraphDocument {
    fn from(g: &SpatialGraph) -> Self {
        let nodes = g
            .nodes()
            .map(|(id, n)| NodeRecord {
                id,
                label: n.label.clone(),
                position: n.position,
            })
            .collect();
        let edges = g
            .edges()
            .map(|(_, key, e)| EdgeRecord {
                source: key.source,
                target: key.target,
                points: e.points.clone(),
            })
            .collect();
        Self { nodes, edges }
    }
}

/// Largest node id accepted when loading a document with `nodes` records. Ids index a slot
/// vector, so a few vacant slots per record are tolerated but not an arbitrary gap.
pub fn max_node_id(nodes: usize) -> usize {
    nodes.saturating_mul(4).saturating_add(1024)
}

impl TryFrom<GraphDocument> for SpatialGraph {
    type Error = GraphError;

    fn try_from(doc: GraphDocument) -> Result<Self> {
        let limit = max_node_id(doc.nodes.len());
        if let Some(n) = doc.nodes.iter().find(|n| n.id.0 > limit) {
            return Err(GraphError::InvalidNodeId { node: n.id });
        }
        let mut g = SpatialGraph::with_capacity(doc.nodes.len(), doc.edges.len());
        for n in doc.nodes {
            g.insert_node_at(
                n.id,
                SpatialNode {
                    position: n.position,
                    label: n.label,
                },
            )?;
        }
        for e in doc.edges {
            g.add_edge(e.source, e.target, SpatialEdge::new(e.points))?;
        }
        Ok(g)
    }
}
