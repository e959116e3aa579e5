//! Known-topology regression tests for route queries.
//!
//! Each test builds a small hand-crafted building and checks exact routes,
//! costs, and error/no-path classification through the public API.

use std::sync::Arc;

use wayfinder_core::{
    Algorithm, EdgeRecord, Floor, Graph, GraphStore, LocationAssignment, LocationName, NodeId,
    NodeRecord, Path, PathOutcome, PathResolver, RouteError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn loc(name: &str) -> LocationName {
    LocationName::new(name, name)
}

fn resolver(nodes: &[NodeRecord], edges: &[EdgeRecord], names: &[(u32, &str)]) -> PathResolver {
    let locations: Vec<LocationAssignment> = names
        .iter()
        .map(|&(id, name)| LocationAssignment::new(id, loc(name)))
        .collect();
    let graph = Graph::build_with_locations(nodes, edges, &locations).expect("valid graph");
    PathResolver::new(Arc::new(graph))
}

fn ids(raw: &[u32]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId).collect()
}

fn route(resolver: &PathResolver, from: &str, to: &str, algorithm: Algorithm) -> PathOutcome {
    resolver
        .find_path(from, to, algorithm)
        .unwrap_or_else(|e| panic!("{algorithm} {from}->{to} failed: {e}"))
}

// ===========================================================================
// Topology 1: two floors joined by one elevator
//
//   floor 1:  A(0,0) --10-- B(10,0)
//                              |  connector, cost 5
//   floor 2:                 C(10,0)
// ===========================================================================

fn elevator_nodes() -> Vec<NodeRecord> {
    vec![
        NodeRecord::new(1, Floor::One, 0.0, 0.0),
        NodeRecord::new(2, Floor::One, 10.0, 0.0),
        NodeRecord::new(3, Floor::Two, 10.0, 0.0),
    ]
}

fn elevator_names() -> [(u32, &'static str); 3] {
    [(1, "A"), (2, "B"), (3, "C")]
}

#[test]
fn elevator_dijkstra_route_and_cost() {
    let edges = [
        EdgeRecord::hallway(1, 2).with_cost(10.0),
        EdgeRecord::connector(2, 3).with_cost(5.0),
    ];
    let r = resolver(&elevator_nodes(), &edges, &elevator_names());

    let path = route(&r, "A", "C", Algorithm::Dijkstra)
        .into_path()
        .expect("connected");
    assert_eq!(path.node_ids(), ids(&[1, 2, 3]));
    assert!((path.cost() - 15.0).abs() < 1e-12);
    assert_eq!(path.connector_count(), 1);
    assert_eq!(path.floors(), vec![Floor::One, Floor::Two]);
}

#[test]
fn elevator_every_algorithm_finds_the_only_route() {
    let edges = [
        EdgeRecord::hallway(1, 2).with_cost(10.0),
        EdgeRecord::connector(2, 3).with_cost(5.0),
    ];
    let r = resolver(&elevator_nodes(), &edges, &elevator_names());

    for algorithm in Algorithm::ALL {
        let path = route(&r, "A", "C", algorithm)
            .into_path()
            .expect("connected");
        assert_eq!(path.node_ids(), ids(&[1, 2, 3]), "{algorithm}");
        assert_eq!(path.hop_count(), 2, "{algorithm}");
    }
}

#[test]
fn elevator_removed_means_no_path_for_every_algorithm() {
    let edges = [EdgeRecord::hallway(1, 2).with_cost(10.0)];
    let r = resolver(&elevator_nodes(), &edges, &elevator_names());

    for algorithm in Algorithm::ALL {
        assert_eq!(route(&r, "A", "C", algorithm), PathOutcome::NoPath, "{algorithm}");
    }
}

#[test]
fn same_location_route_is_single_node_with_zero_cost() {
    let edges = [
        EdgeRecord::hallway(1, 2).with_cost(10.0),
        EdgeRecord::connector(2, 3).with_cost(5.0),
    ];
    let r = resolver(&elevator_nodes(), &edges, &elevator_names());

    for algorithm in Algorithm::ALL {
        for name in ["A", "B", "C"] {
            let path = route(&r, name, name, algorithm)
                .into_path()
                .expect("self route");
            assert_eq!(path.len(), 1);
            assert!(path.cost().abs() < f64::EPSILON);
        }
    }
}

#[test]
fn isolated_node_routes_to_itself() {
    let r = resolver(&elevator_nodes(), &[], &elevator_names());
    let path = route(&r, "C", "C", Algorithm::AStar)
        .into_path()
        .expect("self route");
    assert_eq!(path.node_ids(), ids(&[3]));
}

// ===========================================================================
// Topology 2: one location spanning two nodes
//
//   Auditorium doors at nodes 3 and 7; the hallway reaches 7 more cheaply,
//   but the resolver always picks the lower id.
// ===========================================================================

#[test]
fn multi_node_location_resolves_to_lowest_id() {
    let nodes = [
        NodeRecord::new(1, Floor::One, 0.0, 0.0),
        NodeRecord::new(3, Floor::One, 30.0, 0.0),
        NodeRecord::new(7, Floor::One, 5.0, 0.0),
    ];
    let edges = [EdgeRecord::hallway(1, 7), EdgeRecord::hallway(7, 3)];
    // Assign the higher id first to make sure order of records does not matter.
    let r = resolver(&nodes, &edges, &[(7, "Auditorium"), (3, "Auditorium"), (1, "Lobby")]);

    for _ in 0..10 {
        assert_eq!(r.resolve_location("Auditorium"), Ok(NodeId(3)));
    }
    let path = route(&r, "Lobby", "Auditorium", Algorithm::Dijkstra)
        .into_path()
        .expect("connected");
    assert_eq!(path.end().id, NodeId(3));
    assert_eq!(path.node_ids(), ids(&[1, 7, 3]));
}

// ===========================================================================
// Topology 3: raw sequences are not collapsed
//
//   Two consecutive nodes share the "Corridor" name; both are reported.
// ===========================================================================

#[test]
fn consecutive_same_location_nodes_are_kept() {
    let nodes: Vec<NodeRecord> = (1..=4)
        .map(|i| NodeRecord::new(i, Floor::L1, f64::from(i), 0.0))
        .collect();
    let edges = [
        EdgeRecord::hallway(1, 2),
        EdgeRecord::hallway(2, 3),
        EdgeRecord::hallway(3, 4),
    ];
    let r = resolver(
        &nodes,
        &edges,
        &[(1, "Start"), (2, "Corridor"), (3, "Corridor"), (4, "End")],
    );
    let path = route(&r, "Start", "End", Algorithm::Bfs)
        .into_path()
        .expect("connected");
    assert_eq!(path.node_ids(), ids(&[1, 2, 3, 4]));
}

// ===========================================================================
// Topology 4: error classification
// ===========================================================================

#[test]
fn unknown_location_name_is_lookup_error() {
    let r = resolver(&elevator_nodes(), &[], &elevator_names());
    for algorithm in Algorithm::ALL {
        let err = r.find_path("A", "Z", algorithm).expect_err("missing name");
        assert_eq!(err, RouteError::LocationNotFound("Z".into()));
        assert!(!err.is_integrity_error());
    }
}

#[test]
fn unknown_node_id_is_integrity_error() {
    let r = resolver(&elevator_nodes(), &[], &elevator_names());
    for algorithm in Algorithm::ALL {
        let err = r
            .find_path_between(NodeId(99), NodeId(1), algorithm)
            .expect_err("unknown node");
        assert_eq!(err, RouteError::UnknownNode(NodeId(99)));
    }
}

#[test]
fn dangling_edge_fails_the_build() {
    let edges = [EdgeRecord::hallway(1, 42)];
    let err = Graph::build(&elevator_nodes(), &edges).expect_err("dangling");
    assert!(matches!(err, RouteError::MalformedGraph(_)));
}

// ===========================================================================
// Topology 5: three floors, two elevator banks
//
//   Bank West (x=0) is slow (100 per level), bank East (x=50) fast (5 per
//   level). Walking 50 to the East bank and back is cheaper than riding West.
// ===========================================================================

fn tower() -> Vec<NodeRecord> {
    let mut nodes = Vec::new();
    for (offset, floor) in [(10, Floor::One), (20, Floor::Two), (30, Floor::Three)] {
        nodes.push(NodeRecord::new(offset + 1, floor, 0.0, 0.0));
        nodes.push(NodeRecord::new(offset + 2, floor, 50.0, 0.0));
    }
    nodes
}

fn tower_edges() -> Vec<EdgeRecord> {
    vec![
        EdgeRecord::hallway(11, 12),
        EdgeRecord::hallway(21, 22),
        EdgeRecord::hallway(31, 32),
        EdgeRecord::connector(11, 21).with_cost(100.0),
        EdgeRecord::connector(21, 31).with_cost(100.0),
        EdgeRecord::connector(12, 22).with_cost(5.0),
        EdgeRecord::connector(22, 32).with_cost(5.0),
    ]
}

#[test]
fn tower_weighted_searches_agree_on_fast_bank() {
    let r = resolver(&tower(), &tower_edges(), &[(11, "West Entry"), (31, "Roof West")]);

    let dijkstra = route(&r, "West Entry", "Roof West", Algorithm::Dijkstra);
    let astar = route(&r, "West Entry", "Roof West", Algorithm::AStar);
    let expected = ids(&[11, 12, 22, 32, 31]);

    assert_eq!(dijkstra.path().map(Path::node_ids), Some(expected.clone()));
    assert_eq!(astar.path().map(Path::node_ids), Some(expected));
    assert!((dijkstra.cost().expect("cost") - 110.0).abs() < 1e-9);
    assert!((astar.cost().expect("cost") - 110.0).abs() < 1e-9);
}

#[test]
fn tower_bfs_takes_fewest_hops() {
    let r = resolver(&tower(), &tower_edges(), &[(11, "West Entry"), (31, "Roof West")]);
    let bfs = route(&r, "West Entry", "Roof West", Algorithm::Bfs)
        .into_path()
        .expect("connected");
    assert_eq!(bfs.node_ids(), ids(&[11, 21, 31]));
    assert!((bfs.cost() - 200.0).abs() < 1e-9);

    let segments = bfs.segments();
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|s| s.nodes.len() == 1));
}

#[test]
fn store_resolver_sees_rebuilt_graph() {
    let nodes = elevator_nodes();
    let names: Vec<LocationAssignment> = elevator_names()
        .iter()
        .map(|&(id, name)| LocationAssignment::new(id, loc(name)))
        .collect();
    let disconnected = Graph::build_with_locations(&nodes, &[], &names).expect("build");
    let store = GraphStore::new(disconnected);

    assert_eq!(
        store.resolver().find_path("A", "C", Algorithm::Dijkstra),
        Ok(PathOutcome::NoPath)
    );

    let edges = [EdgeRecord::hallway(1, 2), EdgeRecord::connector(2, 3).with_cost(5.0)];
    store.replace(Graph::build_with_locations(&nodes, &edges, &names).expect("build"));

    let outcome = store
        .resolver()
        .find_path("A", "C", Algorithm::Dijkstra)
        .expect("route");
    assert!(outcome.is_found());
}
