#![no_main]

use libfuzzer_sys::fuzz_target;
use serde::Deserialize;
use wayfinder_core::{EdgeRecord, Graph, LocationAssignment, NodeRecord};

#[derive(Deserialize)]
struct Records {
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
    #[serde(default)]
    locations: Vec<LocationAssignment>,
}

// Arbitrary snapshot JSON must either build or fail with MalformedGraph.
fuzz_target!(|data: &[u8]| {
    let Ok(records) = serde_json::from_slice::<Records>(data) else {
        return;
    };
    if let Ok(graph) = Graph::build_with_locations(&records.nodes, &records.edges, &records.locations) {
        assert!(graph.node_count() <= records.nodes.len());
        assert!(graph.edge_count() <= records.edges.len());
        for name in graph.location_names() {
            assert!(!graph.nodes_for_location(name).is_empty());
        }
    }
});
