#![forbid(unsafe_code)]
//! wayfinder-core: multi-floor building pathfinding.
//!
//! Builds an immutable [`Graph`] from the node, edge, and location records the
//! map editor exports, then answers "how do I get from here to there" queries
//! with a selectable [`Algorithm`].
//!
//! ```rust
//! use std::sync::Arc;
//! use wayfinder_core::{
//!     Algorithm, EdgeRecord, Floor, Graph, LocationAssignment, LocationName, NodeId,
//!     NodeRecord, PathResolver,
//! };
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
//! let locations = [
//!     LocationAssignment::new(1, LocationName::new("ENT", "Entrance")),
//!     LocationAssignment::new(3, LocationName::new("LAB", "Lab")),
//! ];
//! let graph = Graph::build_with_locations(&nodes, &edges, &locations)?;
//! let resolver = PathResolver::new(Arc::new(graph));
//!
//! let outcome = resolver.find_path("Entrance", "Lab", Algorithm::Dijkstra)?;
//! let path = outcome.path().expect("connected");
//! assert_eq!(path.node_ids(), vec![NodeId(1), NodeId(2), NodeId(3)]);
//! assert_eq!(path.cost(), 15.0);
//! # Ok::<(), wayfinder_core::RouteError>(())
//! ```
//!
//! # Conventions
//!
//! - **Errors**: [`RouteError`] (`thiserror`) for routing; `anyhow::Result`
//!   for configuration loading.
//! - **Logging**: `tracing` spans and `debug!`/`trace!` events only. Results
//!   and errors are returned, never logged on the caller's behalf.

pub mod config;
pub mod error;
pub mod floor;
pub mod graph;
pub mod model;
pub mod moves;
pub mod path;
pub mod resolver;
pub mod search;

pub use config::{RouterConfig, RoutingConfig};
pub use error::{ErrorCode, Result, RouteError};
pub use floor::Floor;
pub use graph::{EdgeInfo, Graph, GraphStats, Neighbor};
pub use model::{EdgeKind, EdgeRecord, LocationAssignment, LocationName, Node, NodeId, NodeRecord};
pub use moves::{Move, current_assignments};
pub use path::{FloorSegment, Path, PathOutcome, Step};
pub use resolver::{GraphStore, PathResolver};
pub use search::{AStar, Algorithm, BreadthFirst, DepthFirst, Dijkstra, PathSearch};
