//! Graph construction from editor records.
//!
//! # Overview
//!
//! [`Graph::build_with_config`] validates the complete node, edge, and
//! location sets and assembles a [`petgraph`] undirected graph. Nothing is
//! silently dropped: a dangling edge or a contradictory record is a
//! data-integrity bug upstream and is reported as
//! [`RouteError::MalformedGraph`].
//!
//! ## Node Order
//!
//! Nodes are inserted in ascending id order, so petgraph `NodeIndex` order is
//! the same as `NodeId` order. Searches rely on this to expand neighbors in a
//! deterministic order without sorting by id.
//!
//! ## Edge Costs
//!
//! An explicit cost on the record wins. Otherwise a same-floor edge costs the
//! planar distance between its endpoints and a connector costs
//! [`RoutingConfig::connector_cost`]. Parallel records for the same pair
//! collapse to the cheapest.
//!
//! ## Cache Invalidation
//!
//! The content hash is BLAKE3 over the normalized nodes, edges, and location
//! assignments, so two builds from equivalent records produce equal hashes.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use super::heuristic::HeuristicBounds;
use super::{EdgeInfo, Graph};
use crate::config::RoutingConfig;
use crate::error::{Result, RouteError};
use crate::model::{EdgeKind, EdgeRecord, LocationAssignment, Node, NodeId, NodeRecord};

impl Graph {
    /// Build a graph without location names, using default routing settings.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedGraph`] if the records are inconsistent.
    pub fn build(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> Result<Self> {
        Self::build_with_config(nodes, edges, &[], &RoutingConfig::default())
    }

    /// Build a graph and attach the current location assignments.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedGraph`] if the records are inconsistent.
    pub fn build_with_locations(
        nodes: &[NodeRecord],
        edges: &[EdgeRecord],
        locations: &[LocationAssignment],
    ) -> Result<Self> {
        Self::build_with_config(nodes, edges, locations, &RoutingConfig::default())
    }

    /// Build a graph with explicit routing settings.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedGraph`] when:
    /// - two nodes share an id, or a coordinate is not finite;
    /// - an edge references a missing node, loops on one node, or has a
    ///   negative or non-finite cost;
    /// - a same-floor edge changes floor, or a connector does not;
    /// - a location assignment names a missing node, or a node is assigned
    ///   two different locations.
    #[instrument(
        skip_all,
        fields(nodes = nodes.len(), edges = edges.len(), locations = locations.len())
    )]
    pub fn build_with_config(
        nodes: &[NodeRecord],
        edges: &[EdgeRecord],
        locations: &[LocationAssignment],
        routing: &RoutingConfig,
    ) -> Result<Self> {
        let mut sorted: Vec<&NodeRecord> = nodes.iter().collect();
        sorted.sort_by_key(|n| n.id);

        let mut graph = UnGraph::<Node, EdgeInfo>::with_capacity(nodes.len(), edges.len());
        let mut node_map: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());

        for record in sorted {
            if !record.x.is_finite() || !record.y.is_finite() {
                return Err(RouteError::malformed(format!(
                    "node {} has a non-finite coordinate ({}, {})",
                    record.id, record.x, record.y
                )));
            }
            if node_map.contains_key(&record.id) {
                return Err(RouteError::malformed(format!(
                    "duplicate node id {}",
                    record.id
                )));
            }
            let idx = graph.add_node(Node::from_record(record));
            node_map.insert(record.id, idx);
        }

        for edge in edges {
            let (ia, ib, info) = resolve_edge(&graph, &node_map, edge, routing)?;

            // Parallel records collapse to the cheapest traversal.
            match graph.find_edge(ia, ib) {
                Some(existing) => {
                    if let Some(weight) = graph.edge_weight_mut(existing) {
                        if info.cost < weight.cost {
                            *weight = info;
                        }
                    }
                }
                None => {
                    graph.add_edge(ia, ib, info);
                }
            }
        }

        let (long_names, short_names) = attach_locations(&mut graph, &node_map, locations)?;
        let bounds = HeuristicBounds::compute(&graph);
        let content_hash = compute_content_hash(&graph);

        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            location_count = long_names.len(),
            %content_hash,
            "graph built"
        );

        Ok(Self {
            graph,
            node_map,
            long_names,
            short_names,
            bounds,
            content_hash,
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Validate one edge record and compute its weight.
fn resolve_edge(
    graph: &UnGraph<Node, EdgeInfo>,
    node_map: &HashMap<NodeId, NodeIndex>,
    edge: &EdgeRecord,
    routing: &RoutingConfig,
) -> Result<(NodeIndex, NodeIndex, EdgeInfo)> {
    let lookup = |id: NodeId| {
        node_map.get(&id).copied().ok_or_else(|| {
            RouteError::malformed(format!(
                "edge {}-{} references missing node {id}",
                edge.a, edge.b
            ))
        })
    };
    let ia = lookup(edge.a)?;
    let ib = lookup(edge.b)?;

    if ia == ib {
        return Err(RouteError::malformed(format!(
            "edge {}-{} connects a node to itself",
            edge.a, edge.b
        )));
    }

    let (a, b) = (&graph[ia], &graph[ib]);
    match (edge.kind, a.floor == b.floor) {
        (EdgeKind::SameFloor, false) => {
            return Err(RouteError::malformed(format!(
                "same-floor edge {}-{} joins floors {} and {}",
                edge.a, edge.b, a.floor, b.floor
            )));
        }
        (EdgeKind::Connector, true) => {
            return Err(RouteError::malformed(format!(
                "connector edge {}-{} stays on floor {}",
                edge.a, edge.b, a.floor
            )));
        }
        _ => {}
    }

    let cost = edge.cost.unwrap_or_else(|| match edge.kind {
        EdgeKind::SameFloor => a.planar_distance(b),
        EdgeKind::Connector => routing.connector_cost,
    });
    if !cost.is_finite() || cost < 0.0 {
        return Err(RouteError::malformed(format!(
            "edge {}-{} has invalid cost {cost}",
            edge.a, edge.b
        )));
    }

    Ok((
        ia,
        ib,
        EdgeInfo {
            cost,
            kind: edge.kind,
        },
    ))
}

type NameIndex = HashMap<String, Vec<NodeId>>;

/// Attach location names to nodes and index them by long and short name.
fn attach_locations(
    graph: &mut UnGraph<Node, EdgeInfo>,
    node_map: &HashMap<NodeId, NodeIndex>,
    locations: &[LocationAssignment],
) -> Result<(NameIndex, NameIndex)> {
    let mut long_names: NameIndex = HashMap::new();
    let mut short_names: NameIndex = HashMap::new();

    for assignment in locations {
        let idx = node_map.get(&assignment.node).copied().ok_or_else(|| {
            RouteError::malformed(format!(
                "location {:?} assigned to missing node {}",
                assignment.location.long_name, assignment.node
            ))
        })?;

        let node = &mut graph[idx];
        match &node.location {
            Some(existing) if *existing == assignment.location => continue,
            Some(existing) => {
                return Err(RouteError::malformed(format!(
                    "node {} assigned to both {:?} and {:?}",
                    assignment.node, existing.long_name, assignment.location.long_name
                )));
            }
            None => node.location = Some(assignment.location.clone()),
        }

        long_names
            .entry(assignment.location.long_name.clone())
            .or_default()
            .push(assignment.node);
        short_names
            .entry(assignment.location.short_name.clone())
            .or_default()
            .push(assignment.node);
    }

    for ids in long_names.values_mut().chain(short_names.values_mut()) {
        ids.sort_unstable();
        ids.dedup();
    }

    Ok((long_names, short_names))
}

/// BLAKE3 over nodes (id order), edges (sorted endpoint pairs), and locations.
fn compute_content_hash(graph: &UnGraph<Node, EdgeInfo>) -> String {
    let mut hasher = blake3::Hasher::new();

    for node in graph.node_weights() {
        hasher.update(&node.id.0.to_le_bytes());
        hasher.update(node.floor.label().as_bytes());
        hasher.update(&node.x.to_bits().to_le_bytes());
        hasher.update(&node.y.to_bits().to_le_bytes());
        if let Some(location) = &node.location {
            hasher.update(location.short_name.as_bytes());
            hasher.update(b"\x00");
            hasher.update(location.long_name.as_bytes());
        }
        hasher.update(b"\x00");
    }

    let mut edges: Vec<(NodeId, NodeId, u64, bool)> = graph
        .edge_references()
        .map(|e| {
            let (a, b) = (graph[e.source()].id, graph[e.target()].id);
            let info = e.weight();
            (a.min(b), a.max(b), info.cost.to_bits(), info.kind.is_connector())
        })
        .collect();
    edges.sort_unstable();

    for (a, b, cost, connector) in edges {
        hasher.update(&a.0.to_le_bytes());
        hasher.update(&b.0.to_le_bytes());
        hasher.update(&cost.to_le_bytes());
        hasher.update(&[u8::from(connector)]);
    }

    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
