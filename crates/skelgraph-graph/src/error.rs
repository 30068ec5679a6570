use crate::graph::{EdgeId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("edge references a missing endpoint: {node}")]
    MissingEndpoint { node: NodeId },
    #[error("node id {node} is already in use")]
    NodeOccupied { node: NodeId },
    #[error("node id {node} is out of range")]
    InvalidNodeId { node: NodeId },
    #[error("edge id {edge} is already in use or was never allocated")]
    EdgeOccupied { edge: EdgeId },
}

pub type Result<T> = std::result::Result<T, GraphError>;
