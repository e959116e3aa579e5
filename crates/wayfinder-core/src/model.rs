//! Records supplied by the map editor / persistence collaborator, and the
//! resolved node type handed back to callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::floor::Floor;

/// Unique node identifier across the whole building.
///
/// Ordering is numeric; the resolver relies on it to pick a deterministic
/// representative when a location spans several nodes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A node as exported by the editor: id, floor, and position on that floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub floor: Floor,
    pub x: f64,
    pub y: f64,
}

impl NodeRecord {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, floor: Floor, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            floor,
            x,
            y,
        }
    }
}

/// Whether an edge stays on one floor or connects two floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    #[default]
    SameFloor,
    /// Elevator or stair link between floors.
    Connector,
}

impl EdgeKind {
    #[must_use]
    pub const fn is_connector(self) -> bool {
        matches!(self, Self::Connector)
    }
}

/// An undirected edge between two nodes.
///
/// `cost` overrides the derived traversal cost. Without it, a same-floor edge
/// costs the Euclidean distance between its endpoints and a connector costs
/// [`crate::config::RoutingConfig::connector_cost`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub a: NodeId,
    pub b: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default)]
    pub kind: EdgeKind,
}

impl EdgeRecord {
    /// Same-floor edge whose cost is derived from geometry.
    #[must_use]
    pub fn hallway(a: impl Into<NodeId>, b: impl Into<NodeId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            cost: None,
            kind: EdgeKind::SameFloor,
        }
    }

    /// Connector (elevator/stairs) edge with the default connector cost.
    #[must_use]
    pub fn connector(a: impl Into<NodeId>, b: impl Into<NodeId>) -> Self {
        Self {
            kind: EdgeKind::Connector,
            ..Self::hallway(a, b)
        }
    }

    /// Set an explicit traversal cost.
    #[must_use]
    pub const fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }
}

/// Human-readable label for a place in the building.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationName {
    pub short_name: String,
    pub long_name: String,
}

impl LocationName {
    #[must_use]
    pub fn new(short_name: impl Into<String>, long_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            long_name: long_name.into(),
        }
    }

    /// Whether `query` names this location (long name first, then short name).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.long_name == query || self.short_name == query
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.long_name)
    }
}

/// Current association of a location with a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAssignment {
    pub node: NodeId,
    #[serde(flatten)]
    pub location: LocationName,
}

impl LocationAssignment {
    #[must_use]
    pub fn new(node: impl Into<NodeId>, location: LocationName) -> Self {
        Self {
            node: node.into(),
            location,
        }
    }
}

/// A node of a built graph: the record plus its current location, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub floor: Floor,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationName>,
}

impl Node {
    pub(crate) fn from_record(record: &NodeRecord) -> Self {
        Self {
            id: record.id,
            floor: record.floor,
            x: record.x,
            y: record.y,
            location: None,
        }
    }

    /// Straight-line distance to `other`, ignoring floors.
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
