#![forbid(unsafe_code)]

mod cmd;
mod output;
mod snapshot;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use output::{OutputMode, render_error, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wayfinder_core::config::resolve_config;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "wayfinder: routes between locations in a multi-floor building",
    long_about = None
)]
struct Cli {
    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Router config file (default: <config dir>/wayfinder/config.toml).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Find a route between two locations",
        long_about = "Resolve two location names against a graph snapshot and print the route.\n\
                      Disconnected locations print \"no path\" and exit successfully.",
        after_help = "EXAMPLES:\n    # Shortest route by cost\n    wf route --graph building.json Entrance Pharmacy\n\n    # Fewest hops\n    wf route --graph building.json Entrance Pharmacy --algorithm bfs\n\n    # Route between raw node ids\n    wf route --graph building.json 12 48 --by-id --json"
    )]
    Route(cmd::route::RouteArgs),

    #[command(
        about = "List location names",
        after_help = "EXAMPLES:\n    # Every location, alphabetically\n    wf locations --graph building.json\n\n    # Only the second floor\n    wf locations --graph building.json --floor 2"
    )]
    Locations(cmd::locations::LocationsArgs),

    #[command(
        about = "Validate a graph snapshot",
        long_about = "Build the graph from a snapshot, reporting malformed records or a summary.",
        after_help = "EXAMPLES:\n    wf check --graph building.json\n    wf check --graph building.json --as-of 2024-03-01 --json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(about = "Show the edges leaving a node")]
    Neighbors(cmd::neighbors::NeighborsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("WAYFINDER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "wayfinder=debug,info"
        } else {
            "wayfinder=info,warn"
        })
    });

    let format = env::var("WAYFINDER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // Diagnostics go to stderr so stdout stays parseable.
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref())?;
    debug!(?config, "router config resolved");

    match &cli.command {
        Commands::Route(args) => cmd::route::run_route(args, &config, output),
        Commands::Locations(args) => cmd::locations::run_locations(args, &config, output),
        Commands::Check(args) => cmd::check::run_check(args, &config, output),
        Commands::Neighbors(args) => cmd::neighbors::run_neighbors(args, &config, output),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let output = cli.output_mode();

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if render_error(output, &cmd::cli_error(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
