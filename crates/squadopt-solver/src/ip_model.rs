use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use squadopt_types::{PlayerId, Result, SquadOptError};

/// Variable metadata for tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarMeta {
    Player(PlayerId),
}

/// Binary program:
/// maximize c^T x
/// subject to l_i <= a_i x <= u_i for every row, x in {0,1}^n
#[derive(Debug, Clone)]
pub struct IpModel {
    /// Objective coefficients c
    pub objective: DVector<f64>,
    /// Sparse constraint rows
    pub constraints: Vec<IpConstraint>,
    /// Variables pinned to a value before solving
    pub fixed: Vec<Option<bool>>,
    /// Variable metadata
    pub var_meta: Vec<VarMeta>,
}

impl IpModel {
    /// Create a model with no constraints and no fixed variables
    pub fn new(objective: DVector<f64>, var_meta: Vec<VarMeta>) -> Self {
        let n = objective.len();
        IpModel {
            objective,
            constraints: Vec::new(),
            fixed: vec![None; n],
            var_meta,
        }
    }

    pub fn add_constraint(&mut self, constraint: IpConstraint) {
        self.constraints.push(constraint);
    }

    /// Pin variable `var` to `value`
    pub fn fix(&mut self, var: usize, value: bool) {
        if let Some(slot) = self.fixed.get_mut(var) {
            *slot = Some(value);
        }
    }

    /// Get number of variables
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Get number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Validate model dimensions and coefficients
    pub fn validate(&self) -> Result<()> {
        let n = self.num_vars();

        if self.var_meta.len() != n {
            return Err(SquadOptError::Solver(format!(
                "var_meta length {} != num_vars {}",
                self.var_meta.len(),
                n
            )));
        }

        if self.fixed.len() != n {
            return Err(SquadOptError::Solver(format!(
                "fixed length {} != num_vars {}",
                self.fixed.len(),
                n
            )));
        }

        if self.objective.iter().any(|c| !c.is_finite()) {
            return Err(SquadOptError::Solver(
                "objective has non-finite coefficients".to_string(),
            ));
        }

        for (row, constraint) in self.constraints.iter().enumerate() {
            if let Some((&var, _)) = constraint.coeffs.iter().find(|&(&var, _)| var >= n) {
                return Err(SquadOptError::Solver(format!(
                    "constraint {} references variable {} but model has {}",
                    row, var, n
                )));
            }
            if constraint.coeffs.values().any(|c| !c.is_finite()) {
                return Err(SquadOptError::Solver(format!(
                    "constraint {} has non-finite coefficients",
                    row
                )));
            }
            if constraint.lower.is_nan() || constraint.upper.is_nan() {
                return Err(SquadOptError::Solver(format!("constraint {} has NaN bounds", row)));
            }
        }

        Ok(())
    }

    /// Objective value c^T x
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(x.iter())
            .map(|(c, v)| c * v)
            .sum()
    }

    /// Check a 0/1 point against every row and every fixed variable
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        if x.len() != self.num_vars() {
            return false;
        }

        let binary = x.iter().all(|v| v.abs() <= tol || (v - 1.0).abs() <= tol);
        let respects_fixed = self.fixed.iter().zip(x.iter()).all(|(fixed, v)| match fixed {
            Some(true) => (v - 1.0).abs() <= tol,
            Some(false) => v.abs() <= tol,
            None => true,
        });

        binary
            && respects_fixed
            && self.constraints.iter().all(|c| {
                let activity = c.activity(x);
                activity >= c.lower - tol && activity <= c.upper + tol
            })
    }
}

/// Linear row of the model
#[derive(Debug, Clone, PartialEq)]
pub struct IpConstraint {
    pub coeffs: BTreeMap<usize, f64>, // var_index -> coefficient
    pub lower: f64,
    pub upper: f64,
}

impl IpConstraint {
    /// Create an equality constraint: sum(coeffs[i] * x[i]) = value
    pub fn eq(coeffs: BTreeMap<usize, f64>, value: f64) -> Self {
        IpConstraint {
            coeffs,
            lower: value,
            upper: value,
        }
    }

    /// Create an inequality constraint: lower <= sum(coeffs[i] * x[i]) <= upper
    pub fn ineq(coeffs: BTreeMap<usize, f64>, lower: f64, upper: f64) -> Self {
        IpConstraint { coeffs, lower, upper }
    }

    /// Create an upper-bounded constraint: sum(coeffs[i] * x[i]) <= upper
    pub fn at_most(coeffs: BTreeMap<usize, f64>, upper: f64) -> Self {
        IpConstraint {
            coeffs,
            lower: f64::NEG_INFINITY,
            upper,
        }
    }

    pub fn is_equality(&self) -> bool {
        self.lower == self.upper
    }

    /// Row activity a^T x
    pub fn activity(&self, x: &[f64]) -> f64 {
        self.coeffs
            .iter()
            .map(|(&var, coeff)| coeff * x.get(var).copied().unwrap_or(0.0))
            .sum()
    }
}
