use std::fmt;

use crate::model::NodeId;

/// Crate-wide result alias for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors surfaced by graph construction, searches, and the path resolver.
///
/// A disconnected graph is *not* an error: searches report it as a
/// [`crate::path::PathOutcome::NoPath`] value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A location name matched no node in the current graph.
    #[error("location not found: {0:?}")]
    LocationNotFound(String),

    /// A node id handed to a search is not part of the graph.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The supplied node/edge/location records are inconsistent.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),
}

impl RouteError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::LocationNotFound(_) => ErrorCode::LocationNotFound,
            Self::UnknownNode(_) => ErrorCode::UnknownNode,
            Self::MalformedGraph(_) => ErrorCode::MalformedGraph,
        }
    }

    /// Returns `true` for data-integrity errors (as opposed to bad user input).
    #[must_use]
    pub const fn is_integrity_error(&self) -> bool {
        matches!(self, Self::UnknownNode(_) | Self::MalformedGraph(_))
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedGraph(detail.into())
    }
}

/// Stable error codes for callers that branch on error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    LocationNotFound,
    UnknownNode,
    MalformedGraph,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::LocationNotFound => "E2001",
            Self::UnknownNode => "E3001",
            Self::MalformedGraph => "E3002",
        }
    }

    /// Short human-facing summary.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LocationNotFound => "Location not found",
            Self::UnknownNode => "Unknown node",
            Self::MalformedGraph => "Malformed graph data",
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::LocationNotFound => Some("Check the spelling or list names with `wf locations`."),
            Self::UnknownNode => {
                Some("The node id is not in the current graph snapshot; rebuild the graph.")
            }
            Self::MalformedGraph => {
                Some("Fix the node/edge export upstream; dangling or invalid records are never dropped.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
