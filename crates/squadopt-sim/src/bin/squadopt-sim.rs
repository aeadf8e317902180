//! Squad selection demo
//!
//! Runs a generated scenario, or selects from FPL-shaped JSON files, and
//! prints the squad, starting eleven and fixture summary as JSON.

use clap::Parser;
use squadopt_lineup::LineupParams;
use squadopt_sim::{read_fixtures, read_players, ScenarioConfig, SimResult, SimRunner};
use squadopt_squad::{SelectionParams, SolverKind};
use squadopt_types::{Result, Round, SquadOptError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "squadopt-sim")]
#[command(about = "Select a fantasy squad and starting eleven", long_about = None)]
struct Args {
    /// Named scenario to generate and run
    #[arg(short, long, default_value = "default")]
    scenario: String,

    /// Player JSON (bare array or bootstrap-static document); replaces the scenario pool
    #[arg(short, long)]
    players: Option<PathBuf>,

    /// Fixture JSON array, used with --players
    #[arg(short, long)]
    fixtures: Option<PathBuf>,

    /// SelectionParams JSON file, used with --players
    #[arg(long)]
    params: Option<PathBuf>,

    /// Budget override
    #[arg(short, long)]
    budget: Option<f64>,

    /// Use the greedy heuristic instead of the exact solver
    #[arg(long)]
    heuristic: bool,

    /// Round to pick the starting eleven for
    #[arg(short, long)]
    round: Option<Round>,

    /// List the named scenarios and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.list {
        for scenario in ScenarioConfig::all() {
            println!("{:<16} {}", scenario.name, scenario.description);
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Failed to serialize result: {}", err);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<SimResult> {
    let runner = SimRunner::new();

    let Some(players_path) = &args.players else {
        let mut scenario = ScenarioConfig::by_name(&args.scenario).ok_or_else(|| {
            SquadOptError::Config(format!("Unknown scenario '{}'", args.scenario))
        })?;
        apply_overrides(&mut scenario.selection, args);
        if let Some(round) = args.round {
            scenario.lineup_round = round;
        }
        return runner.run_scenario(&scenario);
    };

    let players = read_players(players_path)?;
    let fixtures = args.fixtures.as_deref().map(read_fixtures).transpose()?;
    let mut selection = match &args.params {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|err| {
                SquadOptError::Config(format!("Cannot read {}: {}", path.display(), err))
            })?;
            serde_json::from_str(&text)?
        }
        None => SelectionParams::default(),
    };
    apply_overrides(&mut selection, args);
    let lineup = LineupParams::for_round(args.round.unwrap_or(selection.start_round));

    runner.run(
        &players_path.display().to_string(),
        &players,
        fixtures.as_ref(),
        &selection,
        &lineup,
        true,
    )
}

fn apply_overrides(selection: &mut SelectionParams, args: &Args) {
    if let Some(budget) = args.budget {
        selection.budget = budget;
    }
    if args.heuristic {
        selection.solver = SolverKind::Heuristic;
    }
}
