//! Location-name routing façade and the graph snapshot store.
//!
//! # Overview
//!
//! [`PathResolver`] turns `(start name, end name, algorithm)` into a
//! [`PathOutcome`]:
//!
//! 1. Each name is resolved to a node. Long names are tried before short
//!    names. No match is [`RouteError::LocationNotFound`]; several matches
//!    (a large room with two doors) resolve to the **lowest node id**. The
//!    resolver does not search from every candidate for the cheapest route.
//! 2. The selected [`Algorithm`] runs between the two nodes.
//! 3. "No path" comes back as [`PathOutcome::NoPath`], not an error.
//!
//! # Snapshots
//!
//! A resolver holds an `Arc<Graph>` and never mutates it. [`GraphStore`]
//! publishes new graphs by swapping the `Arc`; resolvers created earlier keep
//! answering from the snapshot they were created with.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, instrument};

use crate::error::{Result, RouteError};
use crate::graph::Graph;
use crate::model::NodeId;
use crate::path::{Path, PathOutcome};
use crate::search::Algorithm;

/// Read-only route queries against one graph snapshot.
#[derive(Debug, Clone)]
pub struct PathResolver {
    graph: Arc<Graph>,
}

impl PathResolver {
    #[must_use]
    pub const fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// The snapshot this resolver answers from.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Resolve a location name to its representative node.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::LocationNotFound`] if no node carries `name`.
    pub fn resolve_location(&self, name: &str) -> Result<NodeId> {
        let candidates = self.graph.nodes_for_location(name);
        // Candidate lists are kept sorted, so the first is the lowest id.
        let chosen = candidates
            .first()
            .copied()
            .ok_or_else(|| RouteError::LocationNotFound(name.to_string()))?;
        if candidates.len() > 1 {
            debug!(name, candidates = candidates.len(), %chosen, "location spans several nodes");
        }
        Ok(chosen)
    }

    /// Route between two location names.
    ///
    /// # Errors
    ///
    /// - [`RouteError::LocationNotFound`] if either name resolves to no node
    ///   (the start name is checked first).
    /// - [`RouteError::UnknownNode`] / [`RouteError::MalformedGraph`] on
    ///   data-integrity failures.
    #[instrument(skip(self), fields(graph = %self.graph.content_hash()))]
    pub fn find_path(
        &self,
        start_name: &str,
        end_name: &str,
        algorithm: Algorithm,
    ) -> Result<PathOutcome> {
        let start = self.resolve_location(start_name)?;
        let end = self.resolve_location(end_name)?;
        self.find_path_between(start, end, algorithm)
    }

    /// Route between two node ids.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownNode`] if either id is not in the graph.
    pub fn find_path_between(
        &self,
        start: NodeId,
        end: NodeId,
        algorithm: Algorithm,
    ) -> Result<PathOutcome> {
        match algorithm.search(&self.graph, start, end)? {
            Some(ids) => Ok(PathOutcome::Found(Path::from_ids(&self.graph, &ids)?)),
            None => Ok(PathOutcome::NoPath),
        }
    }
}

/// Holder of the current graph snapshot.
///
/// The lock only guards the pointer swap; searches run on a cloned `Arc`
/// outside it.
#[derive(Debug)]
pub struct GraphStore {
    current: RwLock<Arc<Graph>>,
}

impl GraphStore {
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        Self {
            current: RwLock::new(Arc::new(graph)),
        }
    }

    /// The graph queries should currently use.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Graph> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publish `graph` and return the snapshot it replaced.
    ///
    /// In-flight queries holding the old snapshot are unaffected.
    pub fn replace(&self, graph: Graph) -> Arc<Graph> {
        let next = Arc::new(graph);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        debug!(
            previous = %guard.content_hash(),
            next = %next.content_hash(),
            "graph snapshot replaced"
        );
        std::mem::replace(&mut *guard, next)
    }

    /// A resolver bound to the current snapshot.
    #[must_use]
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.snapshot())
    }
}
