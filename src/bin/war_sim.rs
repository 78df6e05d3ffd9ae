//! War strategy matrix binary.
//!
//! Usage:
//!   cargo run --release --bin war-sim -- [GAMES] [INDICES...] [OPTIONS]
//!
//! Arguments:
//!   [GAMES]              Games per pairing (0 = default of 1,000,000);
//!                        overrides `games` from --config when given
//!   [INDICES...]         Strategy ids to include (default: all)
//!
//! Options:
//!   --config <FILE>      Configuration JSON file (optional)
//!   --seed <N>           Master random seed (optional)
//!   --threads <N>        Number of threads (default: auto)
//!   --max-rounds <N>     Rounds before a game counts as a tie
//!   --markdown           Print a Markdown table instead of CSV
//!   --sort               Sort Markdown rows by S2 then P2
//!   --json <FILE>        Also write the report as JSON
//!   --quiet              Hide the progress bar
//!
//! Set `RUST_LOG=debug` for per-pairing timings.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use war_sim::sim::{ConfigError, SimulationConfig, SimulationError, Simulator};
use war_sim::war::Strategy;

#[derive(Parser, Debug)]
#[command(author, version, about = "Monte Carlo matrix of War reshuffle strategies", long_about = None)]
struct Args {
    /// Games per pairing (0 selects the built-in default)
    games: Option<usize>,

    /// Strategy ids to include (default: all)
    indices: Vec<usize>,

    /// Configuration JSON file; command line flags take precedence
    #[arg(long, short = 'c')]
    config: Option<String>,

    /// Master random seed for reproducible runs
    #[arg(long, short = 's')]
    seed: Option<u64>,

    /// Worker threads (default: all cores)
    #[arg(long, short = 't')]
    threads: Option<usize>,

    /// Rounds after which a game counts as a tie
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Print a Markdown table instead of comma-separated lines
    #[arg(long)]
    markdown: bool,

    /// Sort Markdown rows by player two's strategy, then player two's wins
    #[arg(long, requires = "markdown")]
    sort: bool,

    /// Also write the full report as JSON
    #[arg(long)]
    json: Option<String>,

    /// Hide the progress bar
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let simulator = match prepare(&args) {
        Ok(simulator) => simulator,
        Err(e) => {
            e.report();
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{} pairings queued", simulator.pairings().len());

    let report = match simulator.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.markdown {
        print!("{}", report.to_markdown(args.sort));
    } else {
        print!("{}", report);
    }

    if let Some(path) = &args.json {
        match report.save_json(path) {
            Ok(_) => log::info!("saved JSON report: {}", path),
            Err(e) => {
                eprintln!("Error saving JSON: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// User errors caught before any game is played.
#[derive(Debug)]
enum SetupError {
    /// The config file could not be loaded.
    Load(ConfigError),
    /// The merged configuration was rejected.
    Rejected(SimulationError),
}

impl SetupError {
    fn report(&self) {
        match self {
            SetupError::Load(e) => eprintln!("Error loading config: {}", e),
            SetupError::Rejected(e) => {
                eprintln!("{}", e);
                print_strategies();
            }
        }
    }
}

/// Merge the command line into a validated simulator.
fn prepare(args: &Args) -> Result<Simulator, SetupError> {
    let config = build_config(args).map_err(SetupError::Load)?;
    Simulator::new(config).map_err(SetupError::Rejected)
}

fn build_config(args: &Args) -> Result<SimulationConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("loading configuration from: {}", path);
            SimulationConfig::from_json_file(path)?
        }
        None => SimulationConfig::default(),
    };

    if let Some(games) = args.games {
        config.games = games;
    }
    if !args.indices.is_empty() {
        config.strategies = args.indices.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(threads) = args.threads {
        config.num_threads = Some(threads);
    }
    if let Some(max_rounds) = args.max_rounds {
        config.max_rounds = max_rounds;
    }
    config.progress = !args.quiet;
    Ok(config)
}

fn print_strategies() {
    eprintln!("\nAvailable strategies:");
    for strategy in Strategy::ALL.iter() {
        eprintln!("  {}: {}", strategy.id(), strategy);
    }
}
