//! Vertex and edge payloads of a [`SpatialGraph`](crate::SpatialGraph).

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialNode {
    pub position: Point,
    /// Identifier carried through I/O round-trips; never interpreted by the algorithms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SpatialNode {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            label: None,
        }
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point::new(x, y, z))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for SpatialNode {
    fn default() -> Self {
        Self::new(Point::origin())
    }
}

/// Geometric curve between the two endpoints of an edge.
///
/// `points` excludes the endpoint vertices themselves and is ordered from the edge source to
/// the edge target, consecutive points being neighbours in the originating lattice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialEdge {
    pub points: Vec<Point>,
    /// Set by the graph when the edge is inserted: the edge is a self-loop or duplicates an
    /// existing connection between the same pair of vertices.
    #[serde(default)]
    pub is_loop_or_parallel: bool,
}

impl SpatialEdge {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            is_loop_or_parallel: false,
        }
    }
}
