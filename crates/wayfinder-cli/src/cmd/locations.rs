//! `wf locations` — list routable location names.

use std::collections::BTreeSet;
use std::io::Write;

use clap::Args;
use serde::Serialize;
use wayfinder_core::{Floor, Graph, RouterConfig};

use crate::output::{OutputMode, pretty_section, render_mode};
use crate::snapshot::{SnapshotArgs, load_graph};

/// Arguments for `wf locations`.
#[derive(Args, Debug, Clone)]
pub struct LocationsArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Only list locations with a node on this floor (L2, L1, 1, 2, 3).
    #[arg(long, short = 'f')]
    pub floor: Option<Floor>,
}

#[derive(Debug, Serialize)]
struct LocationsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    floor: Option<Floor>,
    locations: Vec<String>,
}

/// Execute `wf locations`.
pub fn run_locations(
    args: &LocationsArgs,
    config: &RouterConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.snapshot, &config.routing)?;
    let payload = LocationsOutput {
        floor: args.floor,
        locations: location_names(&graph, args.floor),
    };

    render_mode(
        output,
        &payload,
        |report, w| {
            for name in &report.locations {
                writeln!(w, "{name}")?;
            }
            Ok(())
        },
        render_locations_pretty,
    )
}

/// Long names in alphabetical order, optionally limited to one floor.
fn location_names(graph: &Graph, floor: Option<Floor>) -> Vec<String> {
    match floor {
        None => graph
            .location_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        Some(floor) => graph
            .nodes()
            .filter(|node| node.floor == floor)
            .filter_map(|node| node.location.as_ref())
            .map(|location| location.long_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

fn render_locations_pretty(report: &LocationsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let heading = report.floor.map_or_else(
        || format!("Locations ({})", report.locations.len()),
        |floor| format!("Locations on floor {floor} ({})", report.locations.len()),
    );
    pretty_section(w, &heading)?;
    if report.locations.is_empty() {
        writeln!(w, "(none)")?;
    }
    for name in &report.locations {
        writeln!(w, "  {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::{LocationAssignment, LocationName, NodeRecord};

    fn graph() -> Graph {
        let nodes = [
            NodeRecord::new(1, Floor::L1, 0.0, 0.0),
            NodeRecord::new(2, Floor::One, 0.0, 0.0),
            NodeRecord::new(3, Floor::One, 5.0, 0.0),
            NodeRecord::new(4, Floor::One, 9.0, 0.0),
        ];
        let locations = [
            LocationAssignment::new(1, LocationName::new("PK", "Parking")),
            LocationAssignment::new(2, LocationName::new("CAF", "Cafeteria")),
            LocationAssignment::new(3, LocationName::new("ATR", "Atrium")),
            LocationAssignment::new(4, LocationName::new("CAF", "Cafeteria")),
        ];
        Graph::build_with_locations(&nodes, &[], &locations).expect("build")
    }

    #[test]
    fn all_names_sorted_and_unique() {
        assert_eq!(
            location_names(&graph(), None),
            vec!["Atrium", "Cafeteria", "Parking"]
        );
    }

    #[test]
    fn floor_filter_limits_names() {
        assert_eq!(
            location_names(&graph(), Some(Floor::One)),
            vec!["Atrium", "Cafeteria"]
        );
        assert!(location_names(&graph(), Some(Floor::Three)).is_empty());
    }
}
