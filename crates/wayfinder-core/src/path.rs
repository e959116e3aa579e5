//! Route results handed back to callers.

use serde::Serialize;

use crate::error::{Result, RouteError};
use crate::floor::Floor;
use crate::graph::Graph;
use crate::model::{EdgeKind, Node, NodeId};

/// One traversed edge of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
    pub kind: EdgeKind,
}

/// A maximal run of consecutive route nodes on one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorSegment {
    pub floor: Floor,
    pub nodes: Vec<NodeId>,
}

/// An ordered route from the resolved start node to the resolved end node.
///
/// Never empty: a route from a node to itself holds that single node and has
/// zero cost. Nodes are reported exactly as traversed; consecutive nodes that
/// share a location are not merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    nodes: Vec<Node>,
    steps: Vec<Step>,
    cost: f64,
}

impl Path {
    /// Materialize a route from the node ids a strategy produced.
    pub(crate) fn from_ids(graph: &Graph, ids: &[NodeId]) -> Result<Self> {
        let nodes = ids
            .iter()
            .map(|&id| graph.node(id).cloned().ok_or(RouteError::UnknownNode(id)))
            .collect::<Result<Vec<_>>>()?;

        let steps = ids
            .windows(2)
            .map(|pair| {
                let (from, to) = (pair[0], pair[1]);
                graph
                    .edge_between(from, to)
                    .map(|info| Step {
                        from,
                        to,
                        cost: info.cost,
                        kind: info.kind,
                    })
                    .ok_or_else(|| {
                        RouteError::malformed(format!("route step {from}-{to} has no edge"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let cost = steps.iter().map(|s| s.cost).sum();
        Ok(Self { nodes, steps, cost })
    }

    /// Nodes in traversal order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node ids in traversal order.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    /// Edges in traversal order (one fewer than nodes).
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Sum of edge costs along the route.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of nodes on the route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the route has no nodes. A found route holds at least its start.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges traversed.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    /// First node of the route.
    #[must_use]
    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    /// Last node of the route.
    #[must_use]
    pub fn end(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of elevator/stair edges taken.
    #[must_use]
    pub fn connector_count(&self) -> usize {
        self.steps.iter().filter(|s| s.kind.is_connector()).count()
    }

    /// Floors visited, in order, with consecutive repeats removed.
    #[must_use]
    pub fn floors(&self) -> Vec<Floor> {
        let mut floors: Vec<Floor> = self.nodes.iter().map(|n| n.floor).collect();
        floors.dedup();
        floors
    }

    /// Split the route into per-floor runs, for drawing one floor at a time.
    #[must_use]
    pub fn segments(&self) -> Vec<FloorSegment> {
        let mut segments: Vec<FloorSegment> = Vec::new();
        for node in &self.nodes {
            match segments.last_mut() {
                Some(segment) if segment.floor == node.floor => segment.nodes.push(node.id),
                _ => segments.push(FloorSegment {
                    floor: node.floor,
                    nodes: vec![node.id],
                }),
            }
        }
        segments
    }
}

/// Result of a route query: a path, or the first-class "no path" value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Found(Path),
    /// The graph is disconnected between the endpoints.
    NoPath,
}

impl PathOutcome {
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[must_use]
    pub const fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NoPath => None,
        }
    }

    #[must_use]
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NoPath => None,
        }
    }

    /// Total cost, when a path exists.
    #[must_use]
    pub const fn cost(&self) -> Option<f64> {
        match self {
            Self::Found(path) => Some(path.cost()),
            Self::NoPath => None,
        }
    }
}
