use serde::{Deserialize, Serialize};
use squadopt_lineup::{select_lineup, LineupParams, StartingElevenResult};
use squadopt_squad::{SelectionParams, SolverKind, SquadResult, SquadSelector};
use squadopt_types::{FixtureTable, PlayerRecord, Result};
use tracing::{info, warn};

use crate::generator::PoolGenerator;
use crate::scenario::ScenarioConfig;

/// Outcome of one solver on a pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverRun {
    pub solver: String,
    pub objective: f64,
    pub total_cost: f64,
    /// Share of the budget spent, 0..=1
    pub budget_utilisation: f64,
    pub nodes: usize,
    pub elapsed_ms: u64,
}

impl SolverRun {
    fn from_result(result: &SquadResult, budget: f64) -> Self {
        SolverRun {
            solver: result.diagnostics.solver.clone(),
            objective: result.total_points,
            total_cost: result.total_cost,
            budget_utilisation: result.total_cost / budget,
            nodes: result.diagnostics.nodes,
            elapsed_ms: result.diagnostics.elapsed_ms,
        }
    }
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimResult {
    pub scenario_name: String,
    pub pool_size: usize,
    /// Solver named in the selection parameters; its squad is reported
    pub primary: SolverRun,
    /// Greedy run alongside an exact primary
    pub heuristic: Option<SolverRun>,
    /// Why the heuristic produced no squad
    pub heuristic_error: Option<String>,
    /// Primary minus heuristic objective
    pub objective_gap: Option<f64>,
    pub squad: SquadResult,
    pub lineup: StartingElevenResult,
}

/// Runs scenarios end to end: pool, fixtures, squad, lineup
pub struct SimRunner {
    exact: SquadSelector,
    heuristic: SquadSelector,
}

impl SimRunner {
    pub fn new() -> Self {
        SimRunner {
            exact: SquadSelector::for_kind(SolverKind::Exact),
            heuristic: SquadSelector::for_kind(SolverKind::Heuristic),
        }
    }

    /// Generate the scenario's pool and fixtures, then run it
    pub fn run_scenario(&self, config: &ScenarioConfig) -> Result<SimResult> {
        let generator = PoolGenerator::with_seed(config.seed);
        let players = generator.generate_players(&config.pool);
        let window = config.selection.window()?;
        let fixtures = config
            .with_fixtures
            .then(|| generator.generate_fixtures(config.pool.clubs, window));

        info!(
            scenario = %config.name,
            players = players.len(),
            fixtures = fixtures.as_ref().map_or(0, |f| f.len()),
            "scenario generated"
        );

        self.run(
            &config.name,
            &players,
            fixtures.as_ref(),
            &config.selection,
            &LineupParams::for_round(config.lineup_round),
            config.compare_heuristic,
        )
    }

    /// Run on caller-supplied data
    pub fn run(
        &self,
        name: &str,
        players: &[PlayerRecord],
        fixtures: Option<&FixtureTable>,
        selection: &SelectionParams,
        lineup: &LineupParams,
        compare_heuristic: bool,
    ) -> Result<SimResult> {
        let selector = match selection.solver {
            SolverKind::Exact => &self.exact,
            SolverKind::Heuristic => &self.heuristic,
        };
        let squad = selector.select(players, fixtures, selection)?;
        let primary = SolverRun::from_result(&squad, selection.budget);

        let compare = compare_heuristic && selection.solver == SolverKind::Exact;
        let (heuristic, heuristic_error) = if compare {
            match self.heuristic.select(players, fixtures, selection) {
                Ok(result) => (Some(SolverRun::from_result(&result, selection.budget)), None),
                Err(err) if err.is_retryable() => {
                    warn!(scenario = name, %err, "heuristic found no squad");
                    (None, Some(err.to_string()))
                }
                Err(err) => return Err(err),
            }
        } else {
            (None, None)
        };
        let objective_gap = heuristic.as_ref().map(|h| primary.objective - h.objective);

        let lineup = select_lineup(&squad, lineup)?;
        info!(
            scenario = name,
            objective = primary.objective,
            gap = objective_gap.unwrap_or(0.0),
            formation = %lineup.formation_label,
            "scenario finished"
        );

        Ok(SimResult {
            scenario_name: name.to_string(),
            pool_size: players.len(),
            primary,
            heuristic,
            heuristic_error,
            objective_gap,
            squad,
            lineup,
        })
    }
}

impl Default for SimRunner {
    fn default() -> Self {
        Self::new()
    }
}
