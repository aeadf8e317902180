use serde::{Deserialize, Serialize};
use squadopt_types::Result;
use tracing::{debug, warn};

use crate::backend::{IpSolution, IpStatus, SolverBackend};
use crate::ip_model::IpModel;
use crate::lp_relaxation::{LpOutcome, LpRelaxation};

/// Parameters for the branch-and-bound search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchBoundParams {
    /// Nodes explored before giving up with `NodeLimit`
    pub max_nodes: usize,
    /// Distance from 0/1 below which an LP value counts as integral
    pub integrality_tol: f64,
    /// A node is pruned when its bound does not beat the incumbent by more than this
    pub prune_tol: f64,
    /// Interior-point iteration cap per relaxation
    pub lp_max_iter: u32,
    /// Clarabel gap tolerance
    pub lp_tolerance: f64,
}

impl Default for BranchBoundParams {
    fn default() -> Self {
        BranchBoundParams {
            max_nodes: 200_000,
            integrality_tol: 1e-5,
            prune_tol: 1e-6,
            lp_max_iter: 200,
            lp_tolerance: 1e-8,
        }
    }
}

/// Exact binary-program solver: depth-first branch-and-bound over
/// Clarabel LP relaxations (pure Rust, no C bindings)
pub struct ClarabelBranchAndBound {
    params: BranchBoundParams,
}

struct Incumbent {
    x: Vec<f64>,
    objective: f64,
}

impl ClarabelBranchAndBound {
    /// Create a new solver with default settings
    pub fn new() -> Self {
        ClarabelBranchAndBound {
            params: BranchBoundParams::default(),
        }
    }

    /// Create solver with custom settings
    pub fn with_params(params: BranchBoundParams) -> Self {
        ClarabelBranchAndBound { params }
    }

    pub fn params(&self) -> &BranchBoundParams {
        &self.params
    }
}

impl Default for ClarabelBranchAndBound {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for ClarabelBranchAndBound {
    fn solve_ip(&self, model: &IpModel) -> Result<IpSolution> {
        model.validate()?;

        let n = model.num_vars();
        let lp = LpRelaxation::new(self.params.lp_max_iter, self.params.lp_tolerance);

        let mut stack: Vec<Vec<Option<bool>>> = vec![model.fixed.clone()];
        let mut incumbent: Option<Incumbent> = None;
        let mut nodes = 0;
        let mut lp_iterations = 0;

        while let Some(fixings) = stack.pop() {
            if nodes >= self.params.max_nodes {
                warn!(nodes, "branch-and-bound node limit reached");
                return Ok(finish(incumbent, n, IpStatus::NodeLimit, nodes, lp_iterations));
            }
            nodes += 1;

            let (x, bound) = match lp.solve(model, &fixings) {
                LpOutcome::Infeasible => continue,
                LpOutcome::Failed(reason) => {
                    warn!(nodes, %reason, "LP relaxation failed");
                    return Ok(finish(
                        incumbent,
                        n,
                        IpStatus::NumericalFailure,
                        nodes,
                        lp_iterations,
                    ));
                }
                LpOutcome::Optimal {
                    x,
                    objective,
                    iterations,
                } => {
                    lp_iterations += iterations;
                    (x, objective)
                }
            };

            if let Some(best) = &incumbent {
                if bound <= best.objective + self.params.prune_tol {
                    continue;
                }
            }

            let branch_var = match most_fractional(&x, &fixings, self.params.integrality_tol) {
                Some(var) => Some(var),
                None => {
                    let rounded: Vec<f64> = x.iter().map(|v| if *v > 0.5 { 1.0 } else { 0.0 }).collect();
                    if model.is_feasible(&rounded, 1e-6) {
                        let objective = model.evaluate(&rounded);
                        let improves = incumbent
                            .as_ref()
                            .map_or(true, |best| objective > best.objective + self.params.prune_tol);
                        if improves {
                            debug!(nodes, objective, bound, "new incumbent");
                            incumbent = Some(Incumbent { x: rounded, objective });
                        }
                        None
                    } else {
                        // Rounding broke a row; keep splitting on the least integral free variable
                        most_fractional(&x, &fixings, 0.0)
                    }
                }
            };

            if let Some(var) = branch_var {
                let mut down = fixings.clone();
                down[var] = Some(false);
                let mut up = fixings;
                up[var] = Some(true);
                // Dive on x = 1 first so an incumbent shows up early
                stack.push(down);
                stack.push(up);
            }
        }

        let status = if incumbent.is_some() {
            IpStatus::Optimal
        } else {
            IpStatus::Infeasible
        };
        debug!(nodes, lp_iterations, ?status, "branch-and-bound finished");
        Ok(finish(incumbent, n, status, nodes, lp_iterations))
    }

    fn name(&self) -> &'static str {
        "clarabel-bnb"
    }
}

/// Free variable whose LP value is furthest from integral, if above `tol`
fn most_fractional(x: &[f64], fixings: &[Option<bool>], tol: f64) -> Option<usize> {
    x.iter()
        .zip(fixings.iter())
        .enumerate()
        .filter(|(_, (_, fixing))| fixing.is_none())
        .map(|(i, (v, _))| (i, (v - v.round()).abs()))
        .filter(|(_, frac)| *frac > tol)
        .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(i, _)| i)
}

fn finish(
    incumbent: Option<Incumbent>,
    n: usize,
    status: IpStatus,
    nodes: usize,
    lp_iterations: usize,
) -> IpSolution {
    let (x, objective) = match incumbent {
        Some(best) => (best.x, best.objective),
        None => (vec![0.0; n], 0.0),
    };
    IpSolution {
        x,
        status,
        objective,
        nodes,
        lp_iterations,
    }
}
