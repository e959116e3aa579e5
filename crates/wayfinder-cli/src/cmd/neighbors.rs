//! `wf neighbors` — show the edges leaving one node.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use wayfinder_core::{Neighbor, NodeId, RouterConfig};

use crate::output::{OutputMode, format_cost, pretty_section, render_mode};
use crate::snapshot::{SnapshotArgs, load_graph};

/// Arguments for `wf neighbors`.
#[derive(Args, Debug, Clone)]
pub struct NeighborsArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Node id to inspect.
    pub node: u32,
}

#[derive(Debug, Serialize)]
struct NeighborsOutput {
    node: NodeId,
    neighbors: Vec<Neighbor>,
}

/// Execute `wf neighbors`.
pub fn run_neighbors(
    args: &NeighborsArgs,
    config: &RouterConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.snapshot, &config.routing)?;
    let node = NodeId(args.node);
    let payload = NeighborsOutput {
        node,
        neighbors: graph.neighbors(node)?,
    };

    render_mode(
        output,
        &payload,
        |report, w| {
            for n in &report.neighbors {
                writeln!(w, "{}\t{}\t{}", n.id, format_cost(n.cost), kind_label(n))?;
            }
            Ok(())
        },
        render_neighbors_pretty,
    )
}

const fn kind_label(neighbor: &Neighbor) -> &'static str {
    if neighbor.kind.is_connector() {
        "connector"
    } else {
        "hallway"
    }
}

fn render_neighbors_pretty(report: &NeighborsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Neighbors of node {}", report.node))?;
    if report.neighbors.is_empty() {
        writeln!(w, "(isolated)")?;
    }
    for n in &report.neighbors {
        writeln!(w, "  {:>6}  {:>10}  {}", n.id, format_cost(n.cost), kind_label(n))?;
    }
    Ok(())
}
