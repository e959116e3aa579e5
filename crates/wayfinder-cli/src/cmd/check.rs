//! `wf check` — validate a graph snapshot and summarize it.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use wayfinder_core::{GraphStats, RouterConfig};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::snapshot::{SnapshotArgs, load_graph};

/// Arguments for `wf check`.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    valid: bool,
    content_hash: String,
    #[serde(flatten)]
    stats: GraphStats,
}

/// Execute `wf check`. An invalid snapshot fails with the build error.
pub fn run_check(args: &CheckArgs, config: &RouterConfig, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.snapshot, &config.routing)?;
    let payload = CheckOutput {
        valid: true,
        content_hash: graph.content_hash().to_string(),
        stats: graph.stats(),
    };

    render_mode(output, &payload, render_check_text, render_check_pretty)
}

fn floor_list(stats: &GraphStats) -> String {
    stats
        .floors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn render_check_text(report: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let stats = &report.stats;
    writeln!(
        w,
        "ok nodes={} edges={} connectors={} locations={} floors={} hash={}",
        stats.node_count,
        stats.edge_count,
        stats.connector_count,
        stats.location_count,
        floor_list(stats),
        report.content_hash
    )
}

fn render_check_pretty(report: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let stats = &report.stats;
    pretty_section(w, "Graph snapshot OK")?;
    pretty_kv(w, "nodes", stats.node_count.to_string())?;
    pretty_kv(w, "edges", stats.edge_count.to_string())?;
    pretty_kv(w, "connectors", stats.connector_count.to_string())?;
    pretty_kv(w, "locations", stats.location_count.to_string())?;
    pretty_kv(w, "floors", floor_list(stats))?;
    pretty_kv(w, "hash", &report.content_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::Floor;

    #[test]
    fn text_summary_is_single_line() {
        let report = CheckOutput {
            valid: true,
            content_hash: "blake3:abc".into(),
            stats: GraphStats {
                node_count: 3,
                edge_count: 2,
                connector_count: 1,
                location_count: 2,
                floors: vec![Floor::One, Floor::Two],
            },
        };
        let mut buf = Vec::new();
        render_check_text(&report, &mut buf).expect("render");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "ok nodes=3 edges=2 connectors=1 locations=2 floors=1,2 hash=blake3:abc\n"
        );
    }
}
