use std::collections::BinaryHeap;

use petgraph::graph::NodeIndex;
use tracing::trace;

use super::{Frontier, PathSearch, reconstruct};
use crate::graph::Graph;

/// Dijkstra's algorithm: lowest total cost.
///
/// The frontier is keyed by accumulated cost. A node's parent only changes on
/// a strictly cheaper route, and equal-cost frontier entries pop in insertion
/// order, so the first route discovered at a given cost wins. The search stops
/// as soon as the goal is popped with its final cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl PathSearch for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn search_indices(
        &self,
        graph: &Graph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut settled = vec![false; n];
        let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
        let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
        let mut seq: u64 = 0;

        dist[start.index()] = 0.0;
        open.push(Frontier {
            priority: 0.0,
            seq,
            index: start,
            cost: 0.0,
        });

        while let Some(current) = open.pop() {
            let ci = current.index.index();
            if settled[ci] {
                continue;
            }
            settled[ci] = true;

            if current.index == goal {
                trace!(cost = current.cost, "dijkstra reached goal");
                return Some(reconstruct(&parent, goal));
            }

            for adj in graph.adjacent(current.index) {
                let ni = adj.index.index();
                if settled[ni] {
                    continue;
                }
                let tentative = current.cost + adj.cost;
                if tentative < dist[ni] {
                    dist[ni] = tentative;
                    parent[ni] = Some(current.index);
                    seq += 1;
                    open.push(Frontier {
                        priority: tentative,
                        seq,
                        index: adj.index,
                        cost: tentative,
                    });
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::Floor;
    use crate::model::{EdgeRecord, NodeId, NodeRecord};

    fn line(count: u32) -> Vec<NodeRecord> {
        (1..=count)
            .map(|i| NodeRecord::new(i, Floor::One, f64::from(i), 0.0))
            .collect()
    }

    #[test]
    fn prefers_cheaper_route_over_fewer_hops() {
        let edges = [
            EdgeRecord::hallway(1, 4).with_cost(100.0),
            EdgeRecord::hallway(1, 2).with_cost(1.0),
            EdgeRecord::hallway(2, 3).with_cost(1.0),
            EdgeRecord::hallway(3, 4).with_cost(1.0),
        ];
        let graph = Graph::build(&line(4), &edges).expect("build");
        let path = Dijkstra
            .search(&graph, NodeId(1), NodeId(4))
            .expect("search")
            .expect("path");
        assert_eq!(path, vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn equal_cost_ties_keep_first_discovered_route() {
        // 1 → 3 → 4 and 1 → 2 → 4 both cost 2. Node 2 is discovered first
        // (lower id), so it is settled first and claims node 4.
        let edges = [
            EdgeRecord::hallway(1, 3).with_cost(1.0),
            EdgeRecord::hallway(1, 2).with_cost(1.0),
            EdgeRecord::hallway(3, 4).with_cost(1.0),
            EdgeRecord::hallway(2, 4).with_cost(1.0),
        ];
        let graph = Graph::build(&line(4), &edges).expect("build");
        for _ in 0..5 {
            let path = Dijkstra
                .search(&graph, NodeId(1), NodeId(4))
                .expect("search")
                .expect("path");
            assert_eq!(path, vec![NodeId(1), NodeId(2), NodeId(4)]);
        }
    }

    #[test]
    fn zero_cost_edges_are_allowed() {
        let edges = [
            EdgeRecord::hallway(1, 2).with_cost(0.0),
            EdgeRecord::hallway(2, 3).with_cost(0.0),
        ];
        let graph = Graph::build(&line(3), &edges).expect("build");
        let path = Dijkstra
            .search(&graph, NodeId(1), NodeId(3))
            .expect("search")
            .expect("path");
        assert_eq!(path.len(), 3);
    }
}
