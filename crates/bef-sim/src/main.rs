use std::error::Error;
use std::sync::Once;

use clap::{Parser, Subcommand};
use commands::{
    decompose::{self, DecomposeArgs},
    landscape::{self, LandscapeArgs},
    ler::{self, LerArgs},
    solve::{self, SolveArgs},
    sweep::{self, SweepArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

static LOGGING: Once = Once::new();

/// Installs the stderr subscriber. `BEF_LOG` takes `EnvFilter` directives
/// and falls back to `bef=info`.
fn init_logging() {
    LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_env("BEF_LOG").unwrap_or_else(|_| EnvFilter::new("bef=info"));
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}

#[derive(Parser, Debug)]
#[command(
    name = "bef-sim",
    about = "Biodiversity effect decomposition, LER landscapes and parameter sweeps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decompose one scenario into Loreau–Hector and tripartite terms.
    Decompose(DecomposeArgs),
    /// Land equivalent ratio of one scenario.
    Ler(LerArgs),
    /// Species-2 yield reaching a target LER, optionally with the full locus.
    #[command(name = "solve-y2")]
    SolveY2(SolveArgs),
    /// Evaluate one effect over the two-species yield plane.
    Landscape(LandscapeArgs),
    /// Run a sweep plan and render every panel.
    Sweep(SweepArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Decompose(args) => decompose::run(&args),
        Command::Ler(args) => ler::run(&args),
        Command::SolveY2(args) => solve::run(&args),
        Command::Landscape(args) => landscape::run(&args),
        Command::Sweep(args) => sweep::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
