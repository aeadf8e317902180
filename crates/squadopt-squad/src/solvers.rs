use serde::{Deserialize, Serialize};
use squadopt_solver::{ClarabelBranchAndBound, IpStatus, SolverBackend};
use squadopt_types::{
    ClubId, Cost, PlayerId, Position, Result, SquadOptError, MAX_PER_CLUB, SQUAD_SIZE,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};

use crate::instance::SquadInstance;
use crate::model_builder::ModelBuilder;
use crate::projection::ProjectedPlayer;

/// How far a solver got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal
    Optimal,
    /// Satisfies every constraint, optimality unknown
    Feasible,
}

/// Raw selection returned by a solver, checked by the selector before use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadSelection {
    pub ids: Vec<PlayerId>,
    pub status: SolveStatus,
    pub objective: f64,
    /// Search nodes explored, 0 for solvers without a search tree
    pub nodes: usize,
}

/// Squad solving strategy
pub trait SquadSolver: Send + Sync {
    fn name(&self) -> &str;

    fn solve(&self, inst: &SquadInstance) -> Result<SquadSelection>;
}

/// Exact selection through a binary-program backend
pub struct ExactSolver {
    backend: Arc<dyn SolverBackend>,
}

impl ExactSolver {
    /// Branch-and-bound over Clarabel relaxations
    pub fn new() -> Self {
        Self::with_backend(Arc::new(ClarabelBranchAndBound::new()))
    }

    pub fn with_backend(backend: Arc<dyn SolverBackend>) -> Self {
        ExactSolver { backend }
    }
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SquadSolver for ExactSolver {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn solve(&self, inst: &SquadInstance) -> Result<SquadSelection> {
        let model = ModelBuilder::build(inst)?;
        debug!(
            vars = model.num_vars(),
            rows = model.num_constraints(),
            "squad model built"
        );

        let solution = self.backend.solve_ip(&model)?;
        info!(
            backend = self.backend.name(),
            status = ?solution.status,
            nodes = solution.nodes,
            objective = solution.objective,
            "exact solve finished"
        );

        match solution.status {
            IpStatus::Optimal => {
                let selected = solution.selected();
                if selected.len() != SQUAD_SIZE {
                    return Err(SquadOptError::SolverConsistency(format!(
                        "Solver reported optimal but selected {} players",
                        selected.len()
                    )));
                }
                Ok(SquadSelection {
                    ids: selected.iter().map(|&i| inst.pool[i].player.id).collect(),
                    status: SolveStatus::Optimal,
                    objective: solution.objective,
                    nodes: solution.nodes,
                })
            }
            IpStatus::Infeasible => Err(SquadOptError::Infeasible(format!(
                "No squad satisfies budget {}, position quotas and the {}-per-club cap",
                inst.budget, MAX_PER_CLUB
            ))),
            IpStatus::NodeLimit | IpStatus::NumericalFailure => Err(SquadOptError::Solver(format!(
                "Solver failed: {:?} after {} nodes",
                solution.status, solution.nodes
            ))),
        }
    }
}

/// Greedy fill by points per cost, position by position
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSolver;

impl HeuristicSolver {
    pub fn new() -> Self {
        HeuristicSolver
    }
}

/// Running state of the greedy fill
struct Fill {
    picked: Vec<PlayerId>,
    picked_set: BTreeSet<PlayerId>,
    per_position: BTreeMap<Position, usize>,
    per_club: BTreeMap<ClubId, usize>,
    remaining: Cost,
}

impl Fill {
    fn new(budget: Cost) -> Self {
        Fill {
            picked: Vec::with_capacity(SQUAD_SIZE),
            picked_set: BTreeSet::new(),
            per_position: BTreeMap::new(),
            per_club: BTreeMap::new(),
            remaining: budget,
        }
    }

    fn count(&self, position: Position) -> usize {
        self.per_position.get(&position).copied().unwrap_or(0)
    }

    fn fits(&self, p: &ProjectedPlayer) -> bool {
        !self.picked_set.contains(&p.player.id)
            && self.per_club.get(&p.player.club).copied().unwrap_or(0) < MAX_PER_CLUB
            && p.player.cost <= self.remaining
    }

    fn take(&mut self, p: &ProjectedPlayer) {
        self.picked.push(p.player.id);
        self.picked_set.insert(p.player.id);
        *self.per_position.entry(p.player.position).or_insert(0) += 1;
        *self.per_club.entry(p.player.club).or_insert(0) += 1;
        self.remaining = self.remaining - p.player.cost;
    }
}

impl SquadSolver for HeuristicSolver {
    fn name(&self) -> &str {
        "greedy"
    }

    fn solve(&self, inst: &SquadInstance) -> Result<SquadSelection> {
        let mut fill = Fill::new(inst.budget);

        // Forced players go in first
        for &id in &inst.constraints.include {
            let Some(p) = inst.get(id) else { continue };
            if fill.picked_set.contains(&id) {
                continue;
            }
            if fill.count(p.player.position) >= p.player.position.squad_quota() {
                return Err(SquadOptError::Infeasible(format!(
                    "Too many included {} players",
                    p.player.position
                )));
            }
            if !fill.fits(p) {
                return Err(SquadOptError::Infeasible(format!(
                    "Included player {} breaks the budget or club cap",
                    id
                )));
            }
            fill.take(p);
        }

        for &position in Position::all() {
            let quota = position.squad_quota();
            let mut ranked: Vec<&ProjectedPlayer> = inst.candidates(position).collect();
            ranked.sort_by(|a, b| by_value(a, b));

            for p in &ranked {
                if fill.count(position) >= quota {
                    break;
                }
                if fill.fits(p) {
                    fill.take(p);
                }
            }

            if fill.count(position) < quota {
                // Second pass: cheapest first
                ranked.sort_by(|a, b| {
                    a.player
                        .cost
                        .cmp(&b.player.cost)
                        .then(a.player.id.cmp(&b.player.id))
                });
                for p in &ranked {
                    if fill.count(position) >= quota {
                        break;
                    }
                    if fill.fits(p) {
                        fill.take(p);
                    }
                }
            }

            let got = fill.count(position);
            if got < quota {
                return Err(SquadOptError::Infeasible(format!(
                    "Could not fill {}: need {}, got {}, remaining budget {}",
                    position, quota, got, fill.remaining
                )));
            }
        }

        if fill.picked.len() != SQUAD_SIZE {
            return Err(SquadOptError::Infeasible(format!(
                "Greedy fill selected {} players instead of {}",
                fill.picked.len(),
                SQUAD_SIZE
            )));
        }

        let objective = fill
            .picked
            .iter()
            .filter_map(|id| inst.get(*id))
            .map(|p| p.window_points)
            .sum();
        debug!(objective, remaining = %fill.remaining, "greedy fill complete");

        Ok(SquadSelection {
            ids: fill.picked,
            status: SolveStatus::Feasible,
            objective,
            nodes: 0,
        })
    }
}

/// Higher points per cost first, then higher points, then lower id
fn by_value(a: &ProjectedPlayer, b: &ProjectedPlayer) -> Ordering {
    b.value_per_cost()
        .total_cmp(&a.value_per_cost())
        .then(b.window_points.total_cmp(&a.window_points))
        .then(a.player.id.cmp(&b.player.id))
}
