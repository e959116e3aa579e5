use std::collections::BinaryHeap;

use petgraph::graph::NodeIndex;
use tracing::trace;

use super::{Frontier, PathSearch, reconstruct};
use crate::graph::Graph;

/// A\* search: Dijkstra guided by an admissible floor-aware estimate.
///
/// The estimate is straight-line distance on one floor and, across floors,
/// the walk to the nearest connector plus a per-level lower bound (see
/// `graph::heuristic`). A node is re-opened whenever a cheaper route to it
/// turns up, so admissibility alone keeps the result optimal. Nodes whose
/// estimate is infinite cannot reach the goal and are never queued.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl PathSearch for AStar {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn search_indices(
        &self,
        graph: &Graph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        let n = graph.node_count();
        let mut g = vec![f64::INFINITY; n];
        let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
        let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
        let mut seq: u64 = 0;
        let mut expanded = 0usize;

        let h0 = graph.estimate(start, goal);
        if h0.is_infinite() {
            return None;
        }
        g[start.index()] = 0.0;
        open.push(Frontier {
            priority: h0,
            seq,
            index: start,
            cost: 0.0,
        });

        while let Some(current) = open.pop() {
            let ci = current.index.index();
            // Stale entry: a cheaper route was queued after this one.
            if current.cost > g[ci] {
                continue;
            }

            if current.index == goal {
                trace!(expanded, cost = current.cost, "astar reached goal");
                return Some(reconstruct(&parent, goal));
            }
            expanded += 1;

            for adj in graph.adjacent(current.index) {
                let ni = adj.index.index();
                let tentative = current.cost + adj.cost;
                if tentative >= g[ni] {
                    continue;
                }
                let h = graph.estimate(adj.index, goal);
                if h.is_infinite() {
                    continue;
                }
                g[ni] = tentative;
                parent[ni] = Some(current.index);
                seq += 1;
                open.push(Frontier {
                    priority: tentative + h,
                    seq,
                    index: adj.index,
                    cost: tentative,
                });
            }
        }

        trace!(expanded, "astar exhausted frontier");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::Floor;
    use crate::model::{EdgeRecord, NodeId, NodeRecord};
    use crate::search::Dijkstra;

    #[test]
    fn routes_through_elevator_to_upper_floor() {
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 10.0, 0.0),
            NodeRecord::new(3, Floor::Two, 10.0, 0.0),
            NodeRecord::new(4, Floor::Two, 0.0, 0.0),
        ];
        let edges = [
            EdgeRecord::hallway(1, 2),
            EdgeRecord::connector(2, 3).with_cost(5.0),
            EdgeRecord::hallway(3, 4),
        ];
        let graph = Graph::build(&nodes, &edges).expect("build");
        let path = AStar
            .search(&graph, NodeId(1), NodeId(4))
            .expect("search")
            .expect("path");
        assert_eq!(path, vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn picks_cheaper_of_two_elevators() {
        // Elevator A at x=0 costs 50, elevator B at x=20 costs 5.
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 20.0, 0.0),
            NodeRecord::new(3, Floor::Two, 0.0, 0.0),
            NodeRecord::new(4, Floor::Two, 20.0, 0.0),
        ];
        let edges = [
            EdgeRecord::hallway(1, 2),
            EdgeRecord::connector(1, 3).with_cost(50.0),
            EdgeRecord::connector(2, 4).with_cost(5.0),
            EdgeRecord::hallway(3, 4),
        ];
        let graph = Graph::build(&nodes, &edges).expect("build");
        let astar = AStar
            .search(&graph, NodeId(1), NodeId(3))
            .expect("search")
            .expect("path");
        let dijkstra = Dijkstra
            .search(&graph, NodeId(1), NodeId(3))
            .expect("search")
            .expect("path");
        assert_eq!(astar, vec![NodeId(1), NodeId(2), NodeId(4), NodeId(3)]);
        assert_eq!(astar, dijkstra);
    }

    #[test]
    fn unreachable_floor_short_circuits() {
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 1.0, 0.0),
            NodeRecord::new(3, Floor::Three, 0.0, 0.0),
        ];
        let graph = Graph::build(&nodes, &[EdgeRecord::hallway(1, 2)]).expect("build");
        assert_eq!(AStar.search(&graph, NodeId(1), NodeId(3)), Ok(None));
    }
}
