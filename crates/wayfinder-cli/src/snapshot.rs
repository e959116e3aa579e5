//! Graph snapshot files exported by the map editor.
//!
//! ```json
//! {
//!   "nodes":     [{"id": 1, "floor": "1", "x": 0.0, "y": 0.0}],
//!   "edges":     [{"a": 1, "b": 2, "kind": "connector", "cost": 5.0}],
//!   "locations": [{"node": 1, "short_name": "ENT", "long_name": "Entrance"}],
//!   "moves":     [{"node": 2, "short_name": "LAB", "long_name": "Lab", "date": "2024-01-02"}]
//! }
//! ```
//!
//! `locations` and `moves` are optional. A node named in both takes its name
//! from the move history, and a static location the move history has placed
//! elsewhere leaves its static node.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use serde::Deserialize;
use tracing::{debug, instrument};
use wayfinder_core::{
    EdgeRecord, Graph, LocationAssignment, Move, NodeId, NodeRecord, RouteError, RoutingConfig,
    current_assignments,
};

/// Where to read the graph from; shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Graph snapshot file (JSON).
    #[arg(long, short = 'g', value_name = "FILE")]
    pub graph: PathBuf,

    /// Resolve the move history as of this date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub locations: Vec<LocationAssignment>,
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl Snapshot {
    /// Location assignments in effect on `as_of`.
    pub fn assignments(&self, as_of: NaiveDate) -> Vec<LocationAssignment> {
        let moved = current_assignments(&self.moves, as_of);
        let relocated: BTreeSet<&str> = moved
            .iter()
            .map(|a| a.location.long_name.as_str())
            .collect();

        let mut by_node: BTreeMap<NodeId, LocationAssignment> = BTreeMap::new();
        for assignment in &self.locations {
            if !relocated.contains(assignment.location.long_name.as_str()) {
                by_node.insert(assignment.node, assignment.clone());
            }
        }
        for assignment in &moved {
            by_node.insert(assignment.node, assignment.clone());
        }
        by_node.into_values().collect()
    }

    /// Build the routing graph.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedGraph`] if the records are inconsistent.
    pub fn build(&self, as_of: NaiveDate, routing: &RoutingConfig) -> Result<Graph, RouteError> {
        let assignments = self.assignments(as_of);
        Graph::build_with_config(&self.nodes, &self.edges, &assignments, routing)
    }
}

/// Read and parse a snapshot file.
pub fn read_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse graph snapshot {}", path.display()))?;
    debug!(
        nodes = snapshot.nodes.len(),
        edges = snapshot.edges.len(),
        moves = snapshot.moves.len(),
        "snapshot read"
    );
    Ok(snapshot)
}

/// Read the snapshot named by `args` and build its graph.
///
/// Build failures come back as a [`RouteError`] inside the `anyhow` error so
/// callers can render its code.
#[instrument(skip_all, fields(path = %args.graph.display()))]
pub fn load_graph(args: &SnapshotArgs, routing: &RoutingConfig) -> anyhow::Result<Graph> {
    let snapshot = read_snapshot(&args.graph)?;
    let as_of = args
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    Ok(snapshot.build(as_of, routing)?)
}
