//! Interchangeable search strategies over a [`Graph`].
//!
//! # Overview
//!
//! | Strategy        | Algorithm          | Optimal by      |
//! |-----------------|--------------------|-----------------|
//! | [`BreadthFirst`]| [`Algorithm::Bfs`] | hop count       |
//! | [`DepthFirst`]  | [`Algorithm::Dfs`] | nothing         |
//! | [`Dijkstra`]    | [`Algorithm::Dijkstra`] | total cost |
//! | [`AStar`]       | [`Algorithm::AStar`] | total cost    |
//!
//! Every strategy implements [`PathSearch`]. The provided
//! [`PathSearch::search`] method handles the shared contract:
//!
//! - unknown start or end id → [`RouteError::UnknownNode`];
//! - start == end → a single-node path;
//! - disconnected → `Ok(None)`.
//!
//! Strategies only implement [`PathSearch::search_indices`] for two distinct,
//! valid nodes. Neighbors are always expanded in ascending id order, so every
//! strategy is deterministic.

mod astar;
mod bfs;
mod dfs;
mod dijkstra;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Result, RouteError};
use crate::graph::Graph;
use crate::model::NodeId;

pub use astar::AStar;
pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;
pub use dijkstra::Dijkstra;

/// Common interface of all search strategies.
pub trait PathSearch {
    /// Canonical strategy name.
    fn name(&self) -> &'static str;

    /// Search between two distinct nodes of `graph`.
    ///
    /// Returns the node indices from `start` to `goal` inclusive, or `None`
    /// when `goal` is unreachable.
    fn search_indices(&self, graph: &Graph, start: NodeIndex, goal: NodeIndex)
    -> Option<Vec<NodeIndex>>;

    /// Search between two node ids.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownNode`] if either id is not in `graph`.
    #[instrument(skip_all, fields(strategy = self.name(), %start, %end))]
    fn search(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<Option<Vec<NodeId>>> {
        let start_idx = graph.index_of(start).ok_or(RouteError::UnknownNode(start))?;
        let end_idx = graph.index_of(end).ok_or(RouteError::UnknownNode(end))?;

        if start_idx == end_idx {
            return Ok(Some(vec![start]));
        }

        let path = self.search_indices(graph, start_idx, end_idx);
        debug!(found = path.is_some(), hops = path.as_ref().map_or(0, |p| p.len() - 1), "search finished");

        Ok(path.map(|indices| {
            indices
                .into_iter()
                .map(|idx| graph.node_at(idx).id)
                .collect()
        }))
    }
}

// ---------------------------------------------------------------------------
// Algorithm selector
// ---------------------------------------------------------------------------

/// Runtime choice of search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[serde(alias = "breadth-first")]
    Bfs,
    #[serde(alias = "depth-first")]
    Dfs,
    #[default]
    Dijkstra,
    #[serde(alias = "a*", alias = "a-star")]
    AStar,
}

impl Algorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Self; 4] = [Self::Bfs, Self::Dfs, Self::Dijkstra, Self::AStar];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
        }
    }

    /// Whether the algorithm minimises total edge cost.
    #[must_use]
    pub const fn is_cost_optimal(self) -> bool {
        matches!(self, Self::Dijkstra | Self::AStar)
    }

    /// The strategy implementing this algorithm.
    #[must_use]
    pub fn strategy(self) -> &'static dyn PathSearch {
        match self {
            Self::Bfs => &BreadthFirst,
            Self::Dfs => &DepthFirst,
            Self::Dijkstra => &Dijkstra,
            Self::AStar => &AStar,
        }
    }

    /// Run this algorithm between two node ids.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownNode`] if either id is not in `graph`.
    pub fn search(self, graph: &Graph, start: NodeId, end: NodeId) -> Result<Option<Vec<NodeId>>> {
        self.strategy().search(graph, start, end)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?}: expected one of bfs, dfs, dijkstra, astar")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            "dfs" | "depth-first" => Ok(Self::Dfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Walk parent pointers back from `goal` and return the path start-first.
pub(crate) fn reconstruct(parent: &[Option<NodeIndex>], goal: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = parent[current.index()] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Priority-queue entry for the weighted searches.
///
/// Ordered so `BinaryHeap` (a max-heap) pops the lowest `priority` first and,
/// among equal priorities, the entry pushed first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frontier {
    pub(crate) priority: f64,
    pub(crate) seq: u64,
    pub(crate) index: NodeIndex,
    pub(crate) cost: f64,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}
