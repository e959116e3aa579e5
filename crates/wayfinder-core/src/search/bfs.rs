use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use tracing::trace;

use super::{PathSearch, reconstruct};
use crate::graph::Graph;

/// Breadth-first search: fewest hops, edge costs ignored.
///
/// Nodes are marked visited when enqueued; the path is read back from parent
/// pointers the first time the goal is dequeued.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl PathSearch for BreadthFirst {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn search_indices(
        &self,
        graph: &Graph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        let n = graph.node_count();
        let mut visited = vec![false; n];
        let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();

        visited[start.index()] = true;
        queue.push_back(start);
        let mut expanded = 0usize;

        while let Some(current) = queue.pop_front() {
            if current == goal {
                trace!(expanded, "bfs reached goal");
                return Some(reconstruct(&parent, goal));
            }
            expanded += 1;

            for adj in graph.adjacent(current) {
                let ni = adj.index.index();
                if visited[ni] {
                    continue;
                }
                visited[ni] = true;
                parent[ni] = Some(current);
                queue.push_back(adj.index);
            }
        }

        trace!(expanded, "bfs exhausted frontier");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::Floor;
    use crate::model::{EdgeRecord, NodeId, NodeRecord};

    fn ids(path: Option<Vec<NodeId>>) -> Option<Vec<u32>> {
        path.map(|p| p.into_iter().map(|id| id.0).collect())
    }

    #[test]
    fn prefers_fewer_hops_over_lower_cost() {
        // 1 -(100)- 4 direct, or 1 - 2 - 3 - 4 at cost 1 each
        let nodes: Vec<NodeRecord> = (1..=4)
            .map(|i| NodeRecord::new(i, Floor::One, f64::from(i), 0.0))
            .collect();
        let edges = [
            EdgeRecord::hallway(1, 4).with_cost(100.0),
            EdgeRecord::hallway(1, 2).with_cost(1.0),
            EdgeRecord::hallway(2, 3).with_cost(1.0),
            EdgeRecord::hallway(3, 4).with_cost(1.0),
        ];
        let graph = Graph::build(&nodes, &edges).expect("build");
        let path = BreadthFirst.search(&graph, NodeId(1), NodeId(4)).expect("search");
        assert_eq!(ids(path), Some(vec![1, 4]));
    }

    #[test]
    fn equal_hop_routes_take_lowest_id_branch() {
        // diamond 1 - {2, 3} - 4
        let nodes: Vec<NodeRecord> = (1..=4)
            .map(|i| NodeRecord::new(i, Floor::One, 0.0, f64::from(i)))
            .collect();
        let edges = [
            EdgeRecord::hallway(1, 3),
            EdgeRecord::hallway(1, 2),
            EdgeRecord::hallway(3, 4),
            EdgeRecord::hallway(2, 4),
        ];
        let graph = Graph::build(&nodes, &edges).expect("build");
        let path = BreadthFirst.search(&graph, NodeId(1), NodeId(4)).expect("search");
        assert_eq!(ids(path), Some(vec![1, 2, 4]));
    }
}
