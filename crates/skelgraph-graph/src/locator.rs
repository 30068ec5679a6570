//! Spatial lookup of graph elements across one or more graphs.
//!
//! Every vertex position and every edge point of the input graphs is merged into one set of
//! unique points (exact coordinate match) indexed by an R-tree. Each unique point records, per
//! input graph, which element of that graph sits there, if any. Comparing two extractions of the
//! same structure then reduces to nearest-point queries.

use crate::geometry::{Point, distance};
use crate::graph::{EdgeId, NodeId, SpatialGraph};
use rstar::RTree;
use rstar::primitives::GeomWithData;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// What a graph has at a located point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphElement {
    Vertex(NodeId),
    /// `points[index]` of `edge`.
    EdgePoint { edge: EdgeId, index: usize },
}

impl GraphElement {
    pub fn is_vertex(&self) -> bool {
        matches!(self, GraphElement::Vertex(_))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, GraphElement::EdgePoint { .. })
    }
}

/// A graph element found by a query, with the point it was found at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedElement {
    pub point_id: usize,
    pub element: GraphElement,
    pub distance: f64,
}

#[derive(Debug, Clone)]
pub struct GraphPointsLocator {
    tree: RTree<IndexedPoint>,
    points: Vec<Point>,
    /// `elements[point_id][graph]`.
    elements: Vec<Vec<Option<GraphElement>>>,
    graph_count: usize,
}

/// Bit pattern of a point with `-0.0` folded into `0.0`, used to merge equal coordinates.
fn point_key(p: &Point) -> [u64; 3] {
    [
        (p.x + 0.0).to_bits(),
        (p.y + 0.0).to_bits(),
        (p.z + 0.0).to_bits(),
    ]
}

impl GraphPointsLocator {
    pub fn from_graph(g: &SpatialGraph) -> Self {
        Self::new(&[g])
    }

    /// Merges the points of `graphs`, in order. Point ids are assigned on first sight: per graph,
    /// vertices in id order, then edge points in edge order. When one graph has several elements
    /// at the same position, the first one seen (a vertex before any edge point) is recorded.
    pub fn new(graphs: &[&SpatialGraph]) -> Self {
        let graph_count = graphs.len();
        let mut points: Vec<Point> = Vec::new();
        let mut elements: Vec<Vec<Option<GraphElement>>> = Vec::new();
        let mut ids: HashMap<[u64; 3], usize> = HashMap::default();

        let mut record = |p: Point, gi: usize, element: GraphElement| {
            let id = *ids.entry(point_key(&p)).or_insert_with(|| {
                points.push(p);
                elements.push(vec![None; graph_count]);
                points.len() - 1
            });
            let slot = &mut elements[id][gi];
            if slot.is_none() {
                *slot = Some(element);
            }
        };

        for (gi, g) in graphs.iter().enumerate() {
            for (v, node) in g.nodes() {
                record(node.position, gi, GraphElement::Vertex(v));
            }
            for (e, _, edge) in g.edges() {
                for (index, &p) in edge.points.iter().enumerate() {
                    record(p, gi, GraphElement::EdgePoint { edge: e, index });
                }
            }
        }

        let indexed: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(id, p)| GeomWithData::new([p.x, p.y, p.z], id))
            .collect();
        tracing::debug!(
            graphs = graph_count,
            points = points.len(),
            "built graph points locator"
        );
        Self {
            tree: RTree::bulk_load(indexed),
            points,
            elements,
            graph_count,
        }
    }

    /// Number of unique points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn graph_count(&self) -> usize {
        self.graph_count
    }

    pub fn point(&self, point_id: usize) -> Option<Point> {
        self.points.get(point_id).copied()
    }

    /// Per input graph, the element at `point_id`.
    pub fn elements(&self, point_id: usize) -> &[Option<GraphElement>] {
        self.elements
            .get(point_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Id of the unique point nearest to `query`.
    pub fn closest_point(&self, query: &Point) -> Option<usize> {
        self.tree
            .nearest_neighbor(&[query.x, query.y, query.z])
            .map(|p| p.data)
    }

    /// For every input graph, its element nearest to `query`. `None` only for graphs with no
    /// points at all.
    pub fn closest_elements(&self, query: &Point) -> Vec<Option<LocatedElement>> {
        let candidates = self
            .tree
            .nearest_neighbor_iter(&[query.x, query.y, query.z])
            .map(|p| p.data);
        self.first_per_graph(query, candidates)
    }

    /// Like [`GraphPointsLocator::closest_elements`], restricted to points within `radius` of
    /// `query`.
    pub fn closest_elements_within(
        &self,
        query: &Point,
        radius: f64,
    ) -> Vec<Option<LocatedElement>> {
        let mut within: Vec<(f64, usize)> = self
            .tree
            .locate_within_distance([query.x, query.y, query.z], radius * radius)
            .map(|p| (distance(query, &self.points[p.data]), p.data))
            .collect();
        within.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        self.first_per_graph(query, within.into_iter().map(|(_, id)| id))
    }

    fn first_per_graph(
        &self,
        query: &Point,
        candidates: impl Iterator<Item = usize>,
    ) -> Vec<Option<LocatedElement>> {
        let mut out: Vec<Option<LocatedElement>> = vec![None; self.graph_count];
        let mut missing = self.graph_count;
        for point_id in candidates {
            if missing == 0 {
                break;
            }
            for (gi, element) in self.elements[point_id].iter().enumerate() {
                let (Some(element), None) = (element, &out[gi]) else {
                    continue;
                };
                out[gi] = Some(LocatedElement {
                    point_id,
                    element: *element,
                    distance: distance(query, &self.points[point_id]),
                });
                missing -= 1;
            }
        }
        out
    }
}
