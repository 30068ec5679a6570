use skelgraph_graph::document::max_node_id;
use skelgraph_graph::{
    EdgeRecord, GraphDocument, GraphError, NodeId, NodeRecord, Point, SpatialEdge, SpatialGraph,
    SpatialNode,
};

#[test]
fn document_round_trip_preserves_ids_labels_and_point_order() {
    let mut g = SpatialGraph::new();
    let a = g.add_node(SpatialNode::at(0.0, 0.0, 0.0).with_label("a"));
    let gone = g.add_node(SpatialNode::at(9.0, 9.0, 9.0));
    let b = g.add_node(SpatialNode::at(3.0, 0.0, 0.0).with_label("b"));
    g.add_edge(
        b,
        a,
        SpatialEdge::new(vec![Point::new(2.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)]),
    )
    .unwrap();
    g.add_edge(a, a, SpatialEdge::default()).unwrap();
    g.remove_node(gone);

    let json = serde_json::to_string(&GraphDocument::from(&g)).unwrap();
    let doc: GraphDocument = serde_json::from_str(&json).unwrap();
    let loaded = SpatialGraph::try_from(doc).unwrap();

    assert_eq!(loaded.node_ids().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(loaded.node_by_label("b"), Some(b));
    assert_eq!(loaded.position(b), Some(Point::new(3.0, 0.0, 0.0)));
    assert_eq!(loaded.edge_count(), 2);
    let e = loaded.edges_between(b, a)[0];
    assert_eq!(loaded.endpoints(e).unwrap().source, b);
    assert_eq!(
        loaded.edge(e).unwrap().points,
        vec![Point::new(2.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)]
    );
    assert_eq!(GraphDocument::from(&loaded), GraphDocument::from(&g));
}

#[test]
fn document_with_unknown_endpoint_is_rejected() {
    let doc = GraphDocument {
        nodes: vec![NodeRecord {
            id: NodeId(0),
            label: None,
            position: Point::origin(),
        }],
        edges: vec![EdgeRecord {
            source: NodeId(0),
            target: NodeId(3),
            points: Vec::new(),
        }],
    };
    assert_eq!(
        SpatialGraph::try_from(doc).unwrap_err(),
        GraphError::MissingEndpoint { node: NodeId(3) }
    );
}

#[test]
fn document_with_duplicate_ids_is_rejected() {
    let record = NodeRecord {
        id: NodeId(2),
        label: None,
        position: Point::origin(),
    };
    let doc = GraphDocument {
        nodes: vec![record.clone(), record],
        edges: Vec::new(),
    };
    assert_eq!(
        SpatialGraph::try_from(doc).unwrap_err(),
        GraphError::NodeOccupied { node: NodeId(2) }
    );
}

#[test]
fn document_with_out_of_range_ids_is_rejected() {
    for id in [usize::MAX, 1 << 40] {
        let doc = GraphDocument {
            nodes: vec![NodeRecord {
                id: NodeId(id),
                label: None,
                position: Point::origin(),
            }],
            edges: Vec::new(),
        };
        assert_eq!(
            SpatialGraph::try_from(doc).unwrap_err(),
            GraphError::InvalidNodeId { node: NodeId(id) }
        );
    }
}

#[test]
fn sparse_but_bounded_ids_still_load() {
    let doc = GraphDocument {
        nodes: vec![NodeRecord {
            id: NodeId(max_node_id(1)),
            label: None,
            position: Point::origin(),
        }],
        edges: Vec::new(),
    };
    let g = SpatialGraph::try_from(doc).unwrap();
    assert_eq!(g.node_count(), 1);
    assert!(g.has_node(NodeId(max_node_id(1))));
}
