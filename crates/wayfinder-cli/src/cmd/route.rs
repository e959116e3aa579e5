//! `wf route` — find a route between two locations.

use std::io::Write;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use wayfinder_core::{
    Algorithm, NodeId, Path, PathOutcome, PathResolver, RouterConfig, config::resolve_algorithm,
};

use crate::output::{OutputMode, format_cost, pretty_kv, pretty_rule, pretty_section, render_mode};
use crate::snapshot::{SnapshotArgs, load_graph};

/// Arguments for `wf route`.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Start location (long or short name).
    pub from: String,

    /// End location (long or short name).
    pub to: String,

    /// Search algorithm: bfs, dfs, dijkstra, or astar.
    #[arg(long, short = 'a')]
    pub algorithm: Option<Algorithm>,

    /// Treat FROM and TO as node ids instead of location names.
    #[arg(long)]
    pub by_id: bool,
}

#[derive(Debug, Serialize)]
struct RouteOutput {
    from: String,
    to: String,
    algorithm: Algorithm,
    graph: String,
    route: PathOutcome,
}

/// Execute `wf route`.
///
/// "No path" is a successful run; only lookup and data errors fail.
pub fn run_route(args: &RouteArgs, config: &RouterConfig, output: OutputMode) -> anyhow::Result<()> {
    let algorithm = resolve_algorithm(args.algorithm, config)?;
    let graph = load_graph(&args.snapshot, &config.routing)?;
    let resolver = PathResolver::new(Arc::new(graph));

    let route = if args.by_id {
        let start = parse_node_id(&args.from)?;
        let end = parse_node_id(&args.to)?;
        resolver.find_path_between(start, end, algorithm)?
    } else {
        resolver.find_path(&args.from, &args.to, algorithm)?
    };

    let payload = RouteOutput {
        from: args.from.clone(),
        to: args.to.clone(),
        algorithm,
        graph: resolver.graph().content_hash().to_string(),
        route,
    };

    render_mode(output, &payload, render_route_text, render_route_pretty)
}

fn parse_node_id(raw: &str) -> anyhow::Result<NodeId> {
    raw.trim()
        .parse::<u32>()
        .map(NodeId)
        .map_err(|_| anyhow::anyhow!("invalid node id {raw:?}: expected a non-negative integer"))
}

fn node_label(node: &wayfinder_core::Node) -> String {
    node.location
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string)
}

fn render_route_text(report: &RouteOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let Some(path) = report.route.path() else {
        return writeln!(w, "no path");
    };

    writeln!(
        w,
        "found cost={} hops={} connectors={}",
        format_cost(path.cost()),
        path.hop_count(),
        path.connector_count()
    )?;
    for node in path.nodes() {
        writeln!(w, "{}\t{}\t{}", node.id, node.floor, node_label(node))?;
    }
    Ok(())
}

fn render_route_pretty(report: &RouteOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Route: {} → {}", report.from, report.to))?;

    match report.route.path() {
        Some(path) => {
            render_floor_segments(path, w)?;
            pretty_rule(w)?;
            pretty_kv(w, "cost", format_cost(path.cost()))?;
            pretty_kv(w, "hops", path.hop_count().to_string())?;
            pretty_kv(w, "connectors", path.connector_count().to_string())?;
        }
        None => writeln!(w, "No path: the locations are not connected.")?,
    }

    pretty_kv(w, "algorithm", report.algorithm.name())
}

fn render_floor_segments(path: &Path, w: &mut dyn Write) -> std::io::Result<()> {
    let nodes = path.nodes();
    let mut offset = 0;
    for segment in path.segments() {
        writeln!(w, "Floor {}", segment.floor)?;
        let end = offset + segment.nodes.len();
        for node in &nodes[offset..end] {
            writeln!(w, "  {:>6}  {}", node.id, node_label(node))?;
        }
        offset = end;
    }
    Ok(())
}
