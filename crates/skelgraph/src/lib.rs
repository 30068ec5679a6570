#![forbid(unsafe_code)]

//! Spatial graph extraction and statistical rewiring.
//!
//! The extraction side turns a raw voxel-adjacency graph into a compact [`graph::SpatialGraph`]:
//! [`remove_extra_edges`] strips the diagonal shortcuts dense lattice connectivity introduces,
//! then [`reduce::reduce_spatial_graph`] collapses chains of degree-2 vertices into curve-bearing
//! edges. [`properties`] and [`histogram`] summarize the result, and [`generate`] rewires a graph
//! until its statistics approach target histograms while keeping the degree sequence fixed.

pub use skelgraph_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod generate;
pub mod histogram;
pub mod properties;
pub mod reduce;
pub mod remove_extra_edges;

pub use error::{Error, Result};
pub use histogram::{Bins, Histogram};
pub use reduce::reduce_spatial_graph;
pub use remove_extra_edges::remove_extra_edges;

use graph::SpatialGraph;
use graph::edge_points::first_non_contiguous;

/// Fails on the first edge whose points are not a contiguous lattice chain.
///
/// Only meaningful for graphs in index space (unit spacing).
pub fn validate_contiguous(g: &SpatialGraph) -> Result<()> {
    for (id, _, edge) in g.edges() {
        if let Some(index) = first_non_contiguous(&edge.points) {
            return Err(Error::NonContiguousEdge { edge: id, index });
        }
    }
    Ok(())
}
