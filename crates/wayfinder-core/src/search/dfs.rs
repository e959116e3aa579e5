use petgraph::graph::NodeIndex;
use tracing::trace;

use super::{PathSearch, reconstruct};
use crate::graph::Graph;

/// Depth-first search: follows one branch as far as it goes before
/// backtracking and returns the first path that reaches the goal.
///
/// No shortest-path guarantee. Lower-id neighbors are explored first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl PathSearch for DepthFirst {
    fn name(&self) -> &'static str {
        "dfs"
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
        let mut stack: Vec<(NodeIndex, Option<NodeIndex>)> = vec![(start, None)];
        let mut expanded = 0usize;

        while let Some((current, from)) = stack.pop() {
            let ci = current.index();
            if visited[ci] {
                continue;
            }
            visited[ci] = true;
            parent[ci] = from;

            if current == goal {
                trace!(expanded, "dfs reached goal");
                return Some(reconstruct(&parent, goal));
            }
            expanded += 1;

            // Reverse so the lowest id ends on top of the stack.
            for adj in graph.adjacent(current).into_iter().rev() {
                if !visited[adj.index.index()] {
                    stack.push((adj.index, Some(current)));
                }
            }
        }

        trace!(expanded, "dfs exhausted graph");
        None
    }
}
