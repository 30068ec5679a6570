use crate::graph::{EdgeId, GraphError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("no swappable edge pair found after {attempts} attempts")]
    NoSwappableEdges { attempts: usize },
    #[error("invalid state: update_graph() has to be called after perform(), not before")]
    UpdateBeforePerform,
    #[error("invalid state: undo() called without a pending perform()")]
    NothingToUndo,
    #[error("edge {edge} has non-contiguous points at index {index}")]
    NonContiguousEdge { edge: EdgeId, index: usize },
    #[error("histograms have different bin layouts")]
    HistogramMismatch,
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl Error {
    /// Search exhaustion can be retried with a fresh random draw; everything else is misuse or
    /// malformed input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NoSwappableEdges { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
