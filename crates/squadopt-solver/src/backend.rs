use serde::{Deserialize, Serialize};
use squadopt_types::Result;

use crate::ip_model::IpModel;

/// Terminal status of a binary-program solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpStatus {
    Optimal,
    Infeasible,
    NodeLimit,
    NumericalFailure,
}

/// Solution from a binary-program backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpSolution {
    pub x: Vec<f64>,
    pub status: IpStatus,
    pub objective: f64,
    /// Branch-and-bound nodes explored
    pub nodes: usize,
    /// Interior-point iterations summed over all relaxations
    pub lp_iterations: usize,
}

impl IpSolution {
    /// Indices of variables set to 1
    pub fn selected(&self) -> Vec<usize> {
        self.x
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.5)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Trait for binary-program backends
pub trait SolverBackend: Send + Sync {
    /// Solve: maximize c^T x subject to the model rows, x binary
    fn solve_ip(&self, model: &IpModel) -> Result<IpSolution>;

    /// Short name used in diagnostics
    fn name(&self) -> &'static str;
}
