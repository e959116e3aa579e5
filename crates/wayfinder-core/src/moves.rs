//! Current location assignments from a dated move history.
//!
//! The editor records every time a location is (re)assigned to a node. Only
//! the latest assignment per node on or before the query date counts; later
//! moves are scheduled and ignored until their date arrives. A location that
//! has moved on leaves the nodes it was moved away from.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::model::{LocationAssignment, LocationName, NodeId};

/// One entry of the move history: `location` is at `node` from `date` on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub node: NodeId,
    #[serde(flatten)]
    pub location: LocationName,
    pub date: NaiveDate,
}

/// Resolve the assignment in effect for every node on `as_of`.
///
/// A node keeps its latest move only while that move is also the location's
/// latest placement, keyed by long name. Moves placing one location on several
/// nodes on the same day keep all of them. Same-day moves for one node resolve
/// to the entry that appears last in `moves`. Output is ordered by node id.
#[must_use]
#[instrument(skip(moves), fields(move_count = moves.len()))]
pub fn current_assignments(moves: &[Move], as_of: NaiveDate) -> Vec<LocationAssignment> {
    let mut latest: BTreeMap<NodeId, &Move> = BTreeMap::new();
    let mut placed_on: BTreeMap<&str, NaiveDate> = BTreeMap::new();

    for entry in moves.iter().filter(|m| m.date <= as_of) {
        match latest.get(&entry.node) {
            Some(existing) if existing.date > entry.date => {}
            _ => {
                latest.insert(entry.node, entry);
            }
        }
        placed_on
            .entry(entry.location.long_name.as_str())
            .and_modify(|date| *date = (*date).max(entry.date))
            .or_insert(entry.date);
    }

    latest
        .into_values()
        .filter(|m| placed_on.get(m.location.long_name.as_str()) == Some(&m.date))
        .map(|m| LocationAssignment::new(m.node, m.location.clone()))
        .collect()
}
