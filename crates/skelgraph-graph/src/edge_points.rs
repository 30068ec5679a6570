//! Utilities over the ordered point curve of an edge.
//!
//! Every function here assumes `points` is ordered by connectivity: consecutive points are
//! neighbours in the originating lattice, which is how the reduction emits them.

use crate::geometry::{Point, are_lattice_adjacent, distance};
use crate::graph::{EdgeId, SpatialGraph};
use crate::spatial::SpatialEdge;

/// Inserts `new_point` at whichever end of `points` it is closer to. Ties go to the tail.
pub fn insert_point_preserving_order(points: &mut Vec<Point>, new_point: Point) {
    if points.is_empty() {
        points.push(new_point);
        return;
    }
    let to_first = distance(&new_point, &points[0]);
    let to_last = distance(&new_point, &points[points.len() - 1]);
    if to_first < to_last {
        points.insert(0, new_point);
    } else {
        points.push(new_point);
    }
}

/// Like [`insert_point_preserving_order`], but leaves `points` untouched when `new_point` is
/// already present. Returns whether the point was inserted.
pub fn insert_unique_point_preserving_order(points: &mut Vec<Point>, new_point: Point) -> bool {
    if points.contains(&new_point) {
        return false;
    }
    insert_point_preserving_order(points, new_point);
    true
}

/// Sum of distances between consecutive points. Zero for fewer than two points.
pub fn curve_length(edge: &SpatialEdge) -> f64 {
    edge.points
        .windows(2)
        .map(|pair| distance(&pair[0], &pair[1]))
        .sum()
}

/// Curve length plus the stubs joining the curve to the source and target vertices.
///
/// With no points this is the straight vertex-to-vertex distance.
pub fn contour_length(g: &SpatialGraph, e: EdgeId) -> Option<f64> {
    let key = g.endpoints(e)?;
    let edge = g.edge(e)?;
    let source = g.position(key.source)?;
    let target = g.position(key.target)?;
    let (Some(first), Some(last)) = (edge.points.first(), edge.points.last()) else {
        return Some(distance(&source, &target));
    };
    Some(curve_length(edge) + distance(&source, first) + distance(last, &target))
}

/// Straight distance between the endpoint vertices, ignoring the curve.
pub fn end_to_end_distance(g: &SpatialGraph, e: EdgeId) -> Option<f64> {
    let key = g.endpoints(e)?;
    Some(distance(&g.position(key.source)?, &g.position(key.target)?))
}

/// Index `i` of the first pair `(points[i], points[i + 1])` that is not lattice-adjacent.
pub fn first_non_contiguous(points: &[Point]) -> Option<usize> {
    points
        .windows(2)
        .position(|pair| !are_lattice_adjacent(&pair[0], &pair[1]))
}

/// True when every consecutive pair of points is lattice-adjacent.
///
/// Only meaningful in index space (unit spacing). Intended as a diagnostic.
pub fn check_contiguous(points: &[Point]) -> bool {
    match first_non_contiguous(points) {
        None => true,
        Some(i) => {
            tracing::debug!(
                index = i,
                a = ?points[i],
                b = ?points[i + 1],
                "edge points are not contiguous"
            );
            false
        }
    }
}
