use skelgraph_graph::{
    EdgeId, GraphElement, GraphPointsLocator, NodeId, Point, SpatialEdge, SpatialGraph,
    SpatialNode,
};

/// Three collinear vertices joined by two edges, each edge holding its midpoint.
fn line3() -> SpatialGraph {
    let mut g = SpatialGraph::new();
    let a = g.add_node(SpatialNode::at(0.0, 0.0, 0.0));
    let b = g.add_node(SpatialNode::at(1.0, 0.0, 0.0));
    let c = g.add_node(SpatialNode::at(2.0, 0.0, 0.0));
    g.add_edge(a, b, SpatialEdge::new(vec![Point::new(0.5, 0.0, 0.0)]))
        .unwrap();
    g.add_edge(b, c, SpatialEdge::new(vec![Point::new(1.5, 0.0, 0.0)]))
        .unwrap();
    g
}

/// `line3` extended by one more vertex and edge.
fn line4() -> SpatialGraph {
    let mut g = line3();
    let d = g.add_node(SpatialNode::at(3.0, 0.0, 0.0));
    g.add_edge(
        NodeId(2),
        d,
        SpatialEdge::new(vec![Point::new(2.5, 0.0, 0.0)]),
    )
    .unwrap();
    g
}

#[test]
fn single_graph_points_are_vertices_then_edge_points() {
    let g = line3();
    let locator = GraphPointsLocator::from_graph(&g);
    assert_eq!(locator.len(), 5);
    assert_eq!(locator.graph_count(), 1);

    assert_eq!(locator.point(2), Some(Point::new(2.0, 0.0, 0.0)));
    assert_eq!(locator.elements(2), &[Some(GraphElement::Vertex(NodeId(2)))]);
    assert_eq!(locator.point(4), Some(Point::new(1.5, 0.0, 0.0)));
    let element = locator.elements(4)[0].unwrap();
    assert!(element.is_edge());
    assert_eq!(
        element,
        GraphElement::EdgePoint {
            edge: EdgeId(1),
            index: 0
        }
    );
    assert_eq!(locator.point(5), None);
    assert!(locator.elements(5).is_empty());
}

#[test]
fn shared_points_are_merged_across_graphs() {
    let (g0, g1) = (line3(), line4());
    let locator = GraphPointsLocator::new(&[&g0, &g1]);
    assert_eq!(locator.len(), 7);
    assert_eq!(locator.graph_count(), 2);

    assert_eq!(
        locator.elements(0),
        &[
            Some(GraphElement::Vertex(NodeId(0))),
            Some(GraphElement::Vertex(NodeId(0)))
        ]
    );

    let far = Point::new(3.0, 0.0, 0.0);
    let id = locator.closest_point(&far).unwrap();
    assert_eq!(id, 5);
    assert_eq!(
        locator.elements(id),
        &[None, Some(GraphElement::Vertex(NodeId(3)))]
    );
    assert_eq!(
        locator.elements(6),
        &[
            None,
            Some(GraphElement::EdgePoint {
                edge: EdgeId(2),
                index: 0
            })
        ]
    );
}

#[test]
fn closest_elements_reports_each_graph_separately() {
    let (g0, g1) = (line3(), line4());
    let locator = GraphPointsLocator::new(&[&g0, &g1]);
    let far = Point::new(3.0, 0.0, 0.0);

    let found = locator.closest_elements(&far);
    assert_eq!(found.len(), 2);
    let in_g0 = found[0].unwrap();
    let in_g1 = found[1].unwrap();
    assert_eq!(in_g0.element, GraphElement::Vertex(NodeId(2)));
    assert_eq!(in_g0.point_id, 2);
    assert!((in_g0.distance - 1.0).abs() < 1e-12);
    assert_eq!(in_g1.element, GraphElement::Vertex(NodeId(3)));
    assert_eq!(in_g1.distance, 0.0);

    for radius in [10.0, 2.0] {
        let within = locator.closest_elements_within(&far, radius);
        assert_eq!(within, found, "radius {radius}");
    }

    let near = locator.closest_elements_within(&far, 0.5);
    assert_eq!(near[0], None);
    assert_eq!(near[1].unwrap().element, GraphElement::Vertex(NodeId(3)));
}

#[test]
fn identical_graphs_share_every_point() {
    let g = line3();
    let locator = GraphPointsLocator::new(&[&g, &g]);
    assert_eq!(locator.len(), 5);

    let id = locator.closest_point(&Point::new(2.0, 0.1, 0.0)).unwrap();
    assert_eq!(id, 2);
    assert_eq!(
        locator.elements(id),
        &[
            Some(GraphElement::Vertex(NodeId(2))),
            Some(GraphElement::Vertex(NodeId(2)))
        ]
    );
}

#[test]
fn a_vertex_wins_over_an_edge_point_at_the_same_position() {
    let mut g = SpatialGraph::new();
    let a = g.add_node(SpatialNode::at(0.0, 0.0, 0.0));
    let b = g.add_node(SpatialNode::at(1.0, 0.0, 0.0));
    g.add_edge(
        a,
        b,
        SpatialEdge::new(vec![Point::new(-0.0, 0.0, 0.0), Point::new(0.5, 0.0, 0.0)]),
    )
    .unwrap();

    let locator = GraphPointsLocator::from_graph(&g);
    assert_eq!(locator.len(), 3);
    assert_eq!(locator.elements(0), &[Some(GraphElement::Vertex(a))]);
    assert!(locator.elements(0)[0].unwrap().is_vertex());
}

#[test]
fn empty_input_finds_nothing() {
    let g = SpatialGraph::new();
    let locator = GraphPointsLocator::from_graph(&g);
    assert!(locator.is_empty());
    let origin = Point::origin();
    assert_eq!(locator.closest_point(&origin), None);
    assert_eq!(locator.closest_elements(&origin), vec![None]);
    assert_eq!(locator.closest_elements_within(&origin, 1.0), vec![None]);
}
