//! Building graph model.
//!
//! # Overview
//!
//! A [`Graph`] is an immutable, undirected, weighted snapshot of the building
//! built from the records the map editor exports. It owns no persistence
//! logic: callers hand it complete node, edge, and location sets and get back
//! either a graph or a [`RouteError::MalformedGraph`] describing the first
//! inconsistency found.
//!
//! ## Pipeline
//!
//! ```text
//! NodeRecord / EdgeRecord / LocationAssignment
//!        ↓  build::Graph::build_with_config()
//! Graph
//!   ├─ petgraph UnGraph<Node, EdgeInfo> (node index order == id order)
//!   ├─ id → NodeIndex map
//!   ├─ long/short location name → node ids
//!   ├─ A* bounds (heuristic::HeuristicBounds)
//!   └─ BLAKE3 content hash
//! ```
//!
//! Floors are plain node attributes. Connector edges (elevators, stairs) are
//! ordinary weighted edges, so multi-floor routes come out of the same
//! searches as single-floor ones.
//!
//! ## Typical Usage
//!
//! ```rust
//! use wayfinder_core::{EdgeRecord, Floor, Graph, NodeId, NodeRecord};
//!
//! let nodes = [
//!     NodeRecord::new(1, Floor::One, 0.0, 0.0),
//!     NodeRecord::new(2, Floor::One, 10.0, 0.0),
//!     NodeRecord::new(3, Floor::Two, 10.0, 0.0),
//! ];
//! let edges = [
//!     EdgeRecord::hallway(1, 2),
//!     EdgeRecord::connector(2, 3).with_cost(5.0),
//! ];
//! let graph = Graph::build(&nodes, &edges)?;
//! assert_eq!(graph.neighbors(NodeId(2))?.len(), 2);
//! # Ok::<(), wayfinder_core::RouteError>(())
//! ```

pub mod build;
pub(crate) mod heuristic;

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::error::{Result, RouteError};
use crate::floor::Floor;
use crate::model::{EdgeKind, Node, NodeId};

use heuristic::HeuristicBounds;

/// Weight stored on every graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeInfo {
    pub cost: f64,
    pub kind: EdgeKind,
}

/// One entry of a node's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub id: NodeId,
    pub cost: f64,
    pub kind: EdgeKind,
}

/// Adjacency entry in index space, used by the search strategies.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Adjacent {
    pub(crate) index: NodeIndex,
    pub(crate) cost: f64,
}

/// Summary counts for a built graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub connector_count: usize,
    pub location_count: usize,
    pub floors: Vec<Floor>,
}

/// Immutable building graph.
///
/// Safe to share between threads; queries only read it. To change the
/// building, build a new graph and swap it in through
/// [`crate::resolver::GraphStore`].
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) graph: UnGraph<Node, EdgeInfo>,
    pub(crate) node_map: HashMap<NodeId, NodeIndex>,
    pub(crate) long_names: HashMap<String, Vec<NodeId>>,
    pub(crate) short_names: HashMap<String, Vec<NodeId>>,
    pub(crate) bounds: HeuristicBounds,
    pub(crate) content_hash: String,
}

impl Graph {
    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct undirected edges (parallel records collapsed).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `id` is part of the graph.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Adjacency list of `id`, ordered by ascending neighbor id.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownNode`] if `id` is not in the graph.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<Neighbor>> {
        let idx = self.index_of(id).ok_or(RouteError::UnknownNode(id))?;
        Ok(self
            .edges_of(idx)
            .map(|(other, info)| Neighbor {
                id: self.graph[other].id,
                cost: info.cost,
                kind: info.kind,
            })
            .collect())
    }

    /// The edge joining `a` and `b`, in either direction.
    #[must_use]
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeInfo> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        self.graph
            .find_edge(ia, ib)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Node ids currently associated with a location name, ascending.
    ///
    /// Long names are matched first; short names only when no long name
    /// matches. Returns an empty slice when nothing matches.
    #[must_use]
    pub fn nodes_for_location(&self, name: &str) -> &[NodeId] {
        let name = name.trim();
        self.long_names
            .get(name)
            .or_else(|| self.short_names.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Sorted, de-duplicated long names of every assigned location.
    #[must_use]
    pub fn location_names(&self) -> Vec<&str> {
        self.long_names
            .keys()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// BLAKE3 fingerprint of the graph contents (`blake3:<hex>`).
    ///
    /// Equal hashes mean a rebuild produced the same graph and the current
    /// snapshot can be kept.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Summary counts.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let connector_count = self
            .graph
            .edge_weights()
            .filter(|info| info.kind.is_connector())
            .count();
        let floors: BTreeSet<Floor> = self.graph.node_weights().map(|n| n.floor).collect();
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            connector_count,
            location_count: self.long_names.len(),
            floors: floors.into_iter().collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Index-space helpers for the search strategies
    // -----------------------------------------------------------------------

    pub(crate) fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_map.get(&id).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Neighbors of `idx` ordered by ascending index (equivalently, id).
    pub(crate) fn adjacent(&self, idx: NodeIndex) -> Vec<Adjacent> {
        self.edges_of(idx)
            .map(|(index, info)| Adjacent {
                index,
                cost: info.cost,
            })
            .collect()
    }

    /// Admissible A* estimate of the cost from `from` to `to`.
    pub(crate) fn estimate(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        self.bounds.estimate(&self.graph, from, to)
    }

    fn edges_of(&self, idx: NodeIndex) -> std::vec::IntoIter<(NodeIndex, EdgeInfo)> {
        let mut out: Vec<(NodeIndex, EdgeInfo)> = self
            .graph
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                (other, *e.weight())
            })
            .collect();
        out.sort_by_key(|(other, _)| *other);
        out.into_iter()
    }
}
