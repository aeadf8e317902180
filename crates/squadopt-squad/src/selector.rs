use squadopt_fixtures::summarize_fixtures;
use squadopt_types::{
    validate_players, ClubId, Cost, FixtureTable, PlayerId, PlayerRecord, Position, Result,
    SquadOptError, SQUAD_SIZE,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::instance::SquadInstance;
use crate::params::{SelectionParams, SolverKind};
use crate::projection::{build_projection, ProjectionSource};
use crate::result::{Diagnostics, SelectedPlayer, SquadResult};
use crate::solvers::{ExactSolver, HeuristicSolver, SquadSelection, SquadSolver};

/// Pool size above which solves are expected to slow down
const LARGE_POOL: usize = 1000;

/// Squad selection engine around a pluggable solver
pub struct SquadSelector {
    solver: Arc<dyn SquadSolver>,
}

impl SquadSelector {
    /// Exact branch-and-bound selection (default)
    pub fn new() -> Self {
        Self::with_solver(Arc::new(ExactSolver::new()))
    }

    pub fn with_heuristic() -> Self {
        Self::with_solver(Arc::new(HeuristicSolver::new()))
    }

    /// Use a caller-provided strategy
    pub fn with_solver(solver: Arc<dyn SquadSolver>) -> Self {
        SquadSelector { solver }
    }

    pub fn for_kind(kind: SolverKind) -> Self {
        match kind {
            SolverKind::Exact => Self::new(),
            SolverKind::Heuristic => Self::with_heuristic(),
        }
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Validate inputs, project expected points, solve and assemble the result.
    ///
    /// `params.solver` is ignored here; the selector's own strategy is used.
    pub fn select(
        &self,
        players: &[PlayerRecord],
        fixtures: Option<&FixtureTable>,
        params: &SelectionParams,
    ) -> Result<SquadResult> {
        let players = validate_players(players)?;
        if players.len() > LARGE_POOL {
            warn!(
                players = players.len(),
                "large player pool, optimization may be slow"
            );
        }
        let window = params.window()?;
        let budget = Cost::from_budget(params.budget)?;

        let pool_ids: BTreeSet<PlayerId> = players.iter().map(|p| p.id).collect();
        params.constraints.validate(&pool_ids)?;

        let projection = build_projection(players, fixtures, window, params.ep_columns.as_deref())?;
        let source = projection.source;
        let inst = SquadInstance::new(projection.players, window, budget, params.constraints.clone());
        inst.check_supply()?;

        let started = Instant::now();
        let selection = self.solver.solve(&inst)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        check_selection(&inst, &selection)?;
        let result = assemble(&inst, fixtures, &selection, self.solver.name(), elapsed_ms, source);
        info!(
            solver = self.solver.name(),
            window = %window,
            total_cost = result.total_cost,
            total_points = result.total_points,
            elapsed_ms,
            "squad selected"
        );
        Ok(result)
    }
}

impl Default for SquadSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Select a squad with the strategy named in `params.solver`
pub fn select_squad(
    players: &[PlayerRecord],
    fixtures: Option<&FixtureTable>,
    params: &SelectionParams,
) -> Result<SquadResult> {
    SquadSelector::for_kind(params.solver).select(players, fixtures, params)
}

/// A selection must name 15 distinct players from the pool
fn check_selection(inst: &SquadInstance, selection: &SquadSelection) -> Result<()> {
    let distinct: BTreeSet<PlayerId> = selection.ids.iter().copied().collect();
    if selection.ids.len() != SQUAD_SIZE || distinct.len() != SQUAD_SIZE {
        return Err(SquadOptError::SolverConsistency(format!(
            "Expected {} distinct players, solver returned {} ({} distinct)",
            SQUAD_SIZE,
            selection.ids.len(),
            distinct.len()
        )));
    }
    let unknown: Vec<PlayerId> = distinct
        .iter()
        .filter(|id| inst.get(**id).is_none())
        .copied()
        .collect();
    if !unknown.is_empty() {
        return Err(SquadOptError::SolverConsistency(format!(
            "Solver returned players outside the pool: {:?}",
            unknown
        )));
    }
    Ok(())
}

fn assemble(
    inst: &SquadInstance,
    fixtures: Option<&FixtureTable>,
    selection: &SquadSelection,
    solver: &str,
    elapsed_ms: u64,
    projection: ProjectionSource,
) -> SquadResult {
    let mut players: Vec<SelectedPlayer> = selection
        .ids
        .iter()
        .filter_map(|id| inst.get(*id))
        .map(|p| SelectedPlayer {
            id: p.player.id,
            name: p.player.name.clone(),
            position: p.player.position,
            club: p.player.club,
            cost: p.player.cost,
            round_points: inst.window.rounds().zip(p.round_points.iter().copied()).collect(),
            window_points: p.window_points,
        })
        .collect();
    players.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then(b.window_points.total_cmp(&a.window_points))
            .then(a.id.cmp(&b.id))
    });

    let mut by_position: BTreeMap<Position, Vec<PlayerId>> =
        Position::all().iter().map(|&pos| (pos, Vec::new())).collect();
    let mut club_counts: BTreeMap<ClubId, usize> = BTreeMap::new();
    for p in &players {
        by_position.entry(p.position).or_default().push(p.id);
        *club_counts.entry(p.club).or_insert(0) += 1;
    }

    let total_cost: Cost = players.iter().map(|p| p.cost).sum();
    let total_points = players.iter().map(|p| p.window_points).sum();
    let fixture_summary = summarize_fixtures(club_counts.keys().copied(), fixtures, inst.window);

    SquadResult {
        window: inst.window,
        players,
        total_cost: total_cost.to_units(),
        total_points,
        by_position,
        club_counts,
        diagnostics: Diagnostics {
            solver: solver.to_string(),
            status: selection.status,
            objective_value: selection.objective,
            nodes: selection.nodes,
            elapsed_ms,
            projection,
        },
        fixture_summary,
    }
}
