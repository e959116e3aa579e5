//! Lower bounds backing the A\* heuristic.
//!
//! # Admissibility
//!
//! Every estimate is a lower bound on the true remaining cost:
//!
//! - `scale` is the smallest cost/length ratio over same-floor edges with
//!   non-zero length, capped at 1, so any same-floor walk from `a` to `b`
//!   costs at least `scale · dist(a, b)`.
//! - `per_level` is the smallest connector cost per level changed, so a route
//!   crossing `k` levels pays at least `k · per_level` on connectors.
//! - `nearest[n]` is `scale ·` the planar distance from `n` to the closest
//!   connector endpoint on `n`'s floor. A route that leaves `n`'s floor walks
//!   at least that far before its first connector, and a route arriving on the
//!   goal floor walks at least `nearest[goal]` after its last one.
//!
//! Connector endpoints may sit anywhere in the plane, so even a same-floor
//! estimate is capped by the "leave the floor and come back" bound.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::EdgeInfo;
use crate::model::Node;

#[derive(Debug, Clone)]
pub(crate) struct HeuristicBounds {
    scale: f64,
    per_level: f64,
    nearest: Vec<f64>,
}

impl HeuristicBounds {
    pub(crate) fn compute(graph: &UnGraph<Node, EdgeInfo>) -> Self {
        let mut scale = f64::INFINITY;
        let mut per_level = f64::INFINITY;
        let mut endpoints: Vec<NodeIndex> = Vec::new();

        for edge in graph.edge_references() {
            let (a, b) = (&graph[edge.source()], &graph[edge.target()]);
            let info = edge.weight();
            if info.kind.is_connector() {
                #[allow(clippy::cast_precision_loss)]
                let levels = a.floor.levels_between(b.floor).max(1) as f64;
                per_level = per_level.min(info.cost / levels);
                endpoints.push(edge.source());
                endpoints.push(edge.target());
            } else {
                let length = a.planar_distance(b);
                if length > 0.0 {
                    scale = scale.min(info.cost / length);
                }
            }
        }

        if !scale.is_finite() {
            // No same-floor edge with length: planar distance never constrains cost.
            scale = 0.0;
        }
        scale = scale.min(1.0);

        endpoints.sort_unstable();
        endpoints.dedup();

        let nearest = graph
            .node_indices()
            .map(|idx| {
                let node = &graph[idx];
                endpoints
                    .iter()
                    .map(|&e| &graph[e])
                    .filter(|c| c.floor == node.floor)
                    .map(|c| node.planar_distance(c))
                    .min_by(f64::total_cmp)
                    .map_or(f64::INFINITY, |d| scale * d)
            })
            .collect();

        Self {
            scale,
            per_level,
            nearest,
        }
    }

    pub(crate) fn estimate(
        &self,
        graph: &UnGraph<Node, EdgeInfo>,
        from: NodeIndex,
        to: NodeIndex,
    ) -> f64 {
        let (a, b) = (&graph[from], &graph[to]);
        let via_connectors = |levels: usize| {
            #[allow(clippy::cast_precision_loss)]
            let levels = levels as f64;
            self.nearest[from.index()] + levels * self.per_level + self.nearest[to.index()]
        };

        if a.floor == b.floor {
            let direct = self.scale * a.planar_distance(b);
            direct.min(via_connectors(2))
        } else {
            via_connectors(a.floor.levels_between(b.floor))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::floor::Floor;
    use crate::graph::Graph;
    use crate::model::{EdgeRecord, NodeId, NodeRecord};

    fn estimate(graph: &Graph, a: u32, b: u32) -> f64 {
        let ia = graph.index_of(NodeId(a)).expect("a");
        let ib = graph.index_of(NodeId(b)).expect("b");
        graph.estimate(ia, ib)
    }

    #[test]
    fn same_floor_estimate_is_straight_line() {
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 3.0, 0.0),
            NodeRecord::new(3, Floor::One, 3.0, 4.0),
        ];
        let edges = [EdgeRecord::hallway(1, 2), EdgeRecord::hallway(2, 3)];
        let graph = Graph::build(&nodes, &edges).expect("build");
        assert!((estimate(&graph, 1, 3) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn cheap_edges_shrink_the_scale() {
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 10.0, 0.0),
        ];
        let edges = [EdgeRecord::hallway(1, 2).with_cost(2.0)];
        let graph = Graph::build(&nodes, &edges).expect("build");
        assert!((estimate(&graph, 1, 2) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn costly_edges_never_raise_the_scale_above_one() {
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 10.0, 0.0),
        ];
        let edges = [EdgeRecord::hallway(1, 2).with_cost(30.0)];
        let graph = Graph::build(&nodes, &edges).expect("build");
        assert!((estimate(&graph, 1, 2) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn cross_floor_estimate_counts_levels_and_walks() {
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 10.0, 0.0),
            NodeRecord::new(3, Floor::Three, 10.0, 0.0),
            NodeRecord::new(4, Floor::Three, 10.0, 6.0),
        ];
        let edges = [
            EdgeRecord::hallway(1, 2),
            EdgeRecord::connector(2, 3).with_cost(8.0),
            EdgeRecord::hallway(3, 4),
        ];
        let graph = Graph::build(&nodes, &edges).expect("build");
        // walk 10 to the elevator, 2 levels at 4 each, walk 6 from it
        assert!((estimate(&graph, 1, 4) - 24.0).abs() < 1e-12);
        // the estimate equals the true cost here, never more
        assert!(estimate(&graph, 1, 4) <= 10.0 + 8.0 + 6.0 + 1e-12);
    }

    #[test]
    fn floor_without_connectors_is_unreachable_across_floors() {
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::Two, 0.0, 0.0),
        ];
        let graph = Graph::build(&nodes, &[]).expect("build");
        assert!(estimate(&graph, 1, 2).is_infinite());
    }

    #[test]
    fn same_floor_estimate_respects_connector_shortcuts() {
        // Two far-apart points on floor 1, joined cheaply through floor 2.
        let nodes = [
            NodeRecord::new(1, Floor::One, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 100.0, 0.0),
            NodeRecord::new(3, Floor::Two, 0.0, 0.0),
            NodeRecord::new(4, Floor::Two, 0.0, 1.0),
            NodeRecord::new(5, Floor::One, 50.0, 0.0),
        ];
        let edges = [
            EdgeRecord::connector(1, 3).with_cost(1.0),
            EdgeRecord::hallway(3, 4),
            EdgeRecord::connector(4, 2).with_cost(1.0),
            EdgeRecord::hallway(1, 5),
            EdgeRecord::hallway(5, 2),
        ];
        let graph = Graph::build(&nodes, &edges).expect("build");
        // true cost 1 + 1 + 1 = 3, far below the straight-line 100
        assert!(estimate(&graph, 1, 2) <= 3.0 + 1e-12);
    }
}
