#![no_main]

use libfuzzer_sys::fuzz_target;
use wayfinder_core::{Algorithm, EdgeRecord, Floor, Graph, NodeId, NodeRecord};

// Bytes drive a small building: 4 bytes per node, 3 per edge.
fuzz_target!(|data: &[u8]| {
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let count = usize::from(count % 12) + 2;
    if rest.len() < count * 4 {
        return;
    }
    let (node_bytes, edge_bytes) = rest.split_at(count * 4);

    let nodes: Vec<NodeRecord> = node_bytes
        .chunks_exact(4)
        .zip(1u32..)
        .map(|(b, id)| {
            let floor = Floor::ALL[usize::from(b[0]) % Floor::ALL.len()];
            NodeRecord::new(id, floor, f64::from(b[1]), f64::from(b[2]))
        })
        .collect();

    let edges: Vec<EdgeRecord> = edge_bytes
        .chunks_exact(3)
        .filter_map(|b| {
            let a = &nodes[usize::from(b[0]) % nodes.len()];
            let z = &nodes[usize::from(b[1]) % nodes.len()];
            if a.id == z.id {
                return None;
            }
            let edge = if a.floor == z.floor {
                EdgeRecord::hallway(a.id, z.id)
            } else {
                EdgeRecord::connector(a.id, z.id)
            };
            Some(edge.with_cost(f64::from(b[2])))
        })
        .collect();

    let Ok(graph) = Graph::build(&nodes, &edges) else {
        return;
    };
    let (start, end) = (NodeId(1), nodes[nodes.len() - 1].id);

    let cost = |algorithm: Algorithm| {
        algorithm
            .search(&graph, start, end)
            .ok()
            .flatten()
            .map(|ids| {
                ids.windows(2)
                    .filter_map(|w| graph.edge_between(w[0], w[1]))
                    .map(|e| e.cost)
                    .sum::<f64>()
            })
    };

    let dijkstra = cost(Algorithm::Dijkstra);
    let astar = cost(Algorithm::AStar);
    let bfs = cost(Algorithm::Bfs);
    assert_eq!(dijkstra.is_some(), bfs.is_some());
    if let (Some(d), Some(a), Some(b)) = (dijkstra, astar, bfs) {
        assert!((d - a).abs() < 1e-9, "dijkstra {d} vs astar {a}");
        assert!(d <= b + 1e-9);
    }
});
