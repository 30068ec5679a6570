#![forbid(unsafe_code)]

//! Spatial graph container used by `skelgraph`.
//!
//! A spatial graph is an undirected multigraph embedded in 3-D space: every vertex has a
//! position and every edge carries the ordered curve of points it was collapsed from. This crate
//! holds the data model, the geometry it relies on, and the curve utilities; the extraction and
//! rewiring algorithms live in `skelgraph`.

pub mod document;
pub mod edge_points;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod locator;
pub mod spatial;

pub use document::{EdgeRecord, GraphDocument, NodeRecord};
pub use error::{GraphError, Result};
pub use geometry::{Point, Vector};
pub use graph::{EdgeId, EdgeKey, NodeId, SpatialGraph, alg};
pub use locator::{GraphElement, GraphPointsLocator, LocatedElement};
pub use spatial::{SpatialEdge, SpatialNode};
