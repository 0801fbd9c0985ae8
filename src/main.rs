use std::process::ExitCode;

use circuit_snake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GameConfig, GridSize, default_tick_limit,
};
use circuit_snake::simulation::{Outcome, Simulation, SimulationReport};
use clap::Parser;
use log::{LevelFilter, error, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Lets the circuit AI play Snake headlessly and reports how each game ended.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Seed for the first run; run `i` uses `seed + i`. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Stop a game after this many ticks.
    #[arg(long = "max-ticks")]
    max_ticks: Option<u64>,

    /// Print one JSON report per line instead of a text summary.
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let grid = GridSize::new(cli.width, cli.height);
    let tick_limit = cli.max_ticks.unwrap_or_else(|| default_tick_limit(grid));
    let first_seed = cli.seed.unwrap_or_else(rand::random);

    info!(
        "playing {} game(s) on {}x{}, tick limit {tick_limit}",
        cli.runs, grid.width, grid.height
    );

    let mut violations = 0u32;
    for run in 0..cli.runs {
        let config = GameConfig::seeded(grid, first_seed.wrapping_add(u64::from(run)));
        let mut simulation = match Simulation::new(config) {
            Ok(simulation) => simulation,
            Err(error) => {
                error!("{error}");
                return ExitCode::from(2);
            }
        };

        let report = simulation.run(tick_limit);
        if report.outcome == Outcome::RuleViolated {
            violations += 1;
        }

        if let Err(error) = print_report(&report, cli.json) {
            error!("failed to write report: {error}");
            return ExitCode::from(2);
        }
    }

    if violations > 0 {
        warn!("{violations} of {} game(s) ended in a rule violation", cli.runs);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if let Err(error) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {error}");
    }
}

fn print_report(report: &SimulationReport, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    let seed = report
        .seed
        .map_or_else(|| "-".to_string(), |seed| seed.to_string());
    println!(
        "seed {seed}: {:?} after {} ticks, length {}/{}, {} food, {} shortcuts",
        report.outcome,
        report.ticks,
        report.final_length,
        usize::from(report.width) * usize::from(report.height),
        report.food_eaten,
        report.shortcuts_taken,
    );
    Ok(())
}
