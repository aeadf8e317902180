use clarabel::algebra::CscMatrix;
use clarabel::solver::{DefaultSettings, DefaultSolver, IPSolver, SolverStatus, SupportedConeT};

use crate::ip_model::IpModel;

/// Outcome of one LP relaxation
#[derive(Debug, Clone)]
pub(crate) enum LpOutcome {
    Optimal {
        x: Vec<f64>,
        objective: f64,
        iterations: usize,
    },
    Infeasible,
    Failed(String),
}

/// Clarabel LP relaxation of a binary program (0 <= x <= 1)
#[derive(Debug, Clone)]
pub(crate) struct LpRelaxation {
    max_iter: u32,
    tolerance: f64,
}

#[derive(Clone, Copy, PartialEq)]
enum ConeKind {
    Zero,
    Nonnegative,
}

/// Rows of the Clarabel problem Ax + s = b, s in K, collected as triplets
struct ConeRows {
    triplets: Vec<(usize, usize, f64)>,
    b: Vec<f64>,
    cones: Vec<SupportedConeT<f64>>,
}

impl ConeRows {
    fn new() -> Self {
        ConeRows {
            triplets: Vec::new(),
            b: Vec::new(),
            cones: Vec::new(),
        }
    }

    fn num_rows(&self) -> usize {
        self.b.len()
    }

    /// Append one row: sum(coeff * x) + s = rhs
    fn push(
        &mut self,
        coeffs: impl Iterator<Item = (usize, f64)>,
        rhs: f64,
        kind: ConeKind,
    ) {
        let row = self.num_rows();
        for (col, val) in coeffs {
            if val != 0.0 {
                self.triplets.push((row, col, val));
            }
        }
        self.b.push(rhs);

        // Merge consecutive rows of the same cone type into one cone block
        let merged = match (kind, self.cones.last_mut()) {
            (ConeKind::Zero, Some(SupportedConeT::ZeroConeT(dim)))
            | (ConeKind::Nonnegative, Some(SupportedConeT::NonnegativeConeT(dim))) => {
                *dim += 1;
                true
            }
            _ => false,
        };
        if !merged {
            self.cones.push(match kind {
                ConeKind::Zero => SupportedConeT::ZeroConeT(1),
                ConeKind::Nonnegative => SupportedConeT::NonnegativeConeT(1),
            });
        }
    }
}

impl LpRelaxation {
    pub(crate) fn new(max_iter: u32, tolerance: f64) -> Self {
        LpRelaxation { max_iter, tolerance }
    }

    /// Solve the relaxation with the given per-variable fixings
    pub(crate) fn solve(&self, model: &IpModel, fixings: &[Option<bool>]) -> LpOutcome {
        let n = model.num_vars();
        let mut rows = ConeRows::new();

        // Model rows.
        // Clarabel format: Ax + s = b, s >= 0, which means Ax <= b
        //  - equality:    a x + s = value, s in {0}
        //  - lower bound: -a x + s = -l
        //  - upper bound:  a x + s = u
        for constraint in &model.constraints {
            let coeffs = || constraint.coeffs.iter().map(|(&j, &v)| (j, v));
            if constraint.is_equality() && constraint.lower.is_finite() {
                rows.push(coeffs(), constraint.lower, ConeKind::Zero);
                continue;
            }
            if constraint.lower.is_finite() {
                rows.push(coeffs().map(|(j, v)| (j, -v)), -constraint.lower, ConeKind::Nonnegative);
            }
            if constraint.upper.is_finite() {
                rows.push(coeffs(), constraint.upper, ConeKind::Nonnegative);
            }
        }

        // Variable bounds: fixed -> equality row, free -> 0 <= x <= 1
        for (j, fixing) in fixings.iter().enumerate().take(n) {
            match fixing {
                Some(value) => {
                    let rhs = if *value { 1.0 } else { 0.0 };
                    rows.push(std::iter::once((j, 1.0)), rhs, ConeKind::Zero);
                }
                None => {
                    rows.push(std::iter::once((j, -1.0)), 0.0, ConeKind::Nonnegative);
                    rows.push(std::iter::once((j, 1.0)), 1.0, ConeKind::Nonnegative);
                }
            }
        }

        let a = to_csc(rows.num_rows(), n, rows.triplets);
        let p = zero_csc(n);
        // Clarabel minimizes, so negate the objective
        let q: Vec<f64> = model.objective.iter().map(|c| -c).collect();

        let mut settings = DefaultSettings::default();
        settings.verbose = false;
        settings.max_iter = self.max_iter;
        settings.tol_gap_abs = self.tolerance;
        settings.tol_gap_rel = self.tolerance;

        let mut solver = DefaultSolver::new(&p, &q, &a, &rows.b, &rows.cones, settings);
        solver.solve();

        match solver.solution.status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => {
                let x: Vec<f64> = solver.solution.x.iter().map(|v| v.clamp(0.0, 1.0)).collect();
                let objective = model.evaluate(&x);
                LpOutcome::Optimal {
                    x,
                    objective,
                    iterations: solver.info.iterations as usize,
                }
            }
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                LpOutcome::Infeasible
            }
            other => LpOutcome::Failed(format!("{:?}", other)),
        }
    }
}

/// Build a CSC matrix from (row, col, value) triplets; duplicates are summed
fn to_csc(m: usize, n: usize, mut triplets: Vec<(usize, usize, f64)>) -> CscMatrix<f64> {
    triplets.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));

    let mut colptr = Vec::with_capacity(n + 1);
    let mut rowval: Vec<usize> = Vec::with_capacity(triplets.len());
    let mut nzval: Vec<f64> = Vec::with_capacity(triplets.len());

    colptr.push(0);
    let mut iter = triplets.into_iter().peekable();
    for col in 0..n {
        while let Some(&(row, c, val)) = iter.peek() {
            if c != col {
                break;
            }
            iter.next();
            let repeats_last = rowval.len() > colptr[col] && rowval.last() == Some(&row);
            if repeats_last {
                if let Some(last) = nzval.last_mut() {
                    *last += val;
                }
            } else {
                rowval.push(row);
                nzval.push(val);
            }
        }
        colptr.push(nzval.len());
    }

    CscMatrix {
        m,
        n,
        colptr,
        rowval,
        nzval,
    }
}

/// Empty n x n matrix (LP has no quadratic term)
fn zero_csc(n: usize) -> CscMatrix<f64> {
    CscMatrix {
        m: n,
        n,
        colptr: vec![0; n + 1],
        rowval: Vec::new(),
        nzval: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IpConstraint, VarMeta};
    use nalgebra::DVector;
    use std::collections::BTreeMap;

    #[test]
    fn test_to_csc_merges_duplicates() {
        let csc = to_csc(2, 2, vec![(1, 0, 2.0), (0, 0, 1.0), (1, 0, 3.0), (0, 1, 4.0)]);
        assert_eq!(csc.colptr, vec![0, 2, 3]);
        assert_eq!(csc.rowval, vec![0, 1, 0]);
        assert_eq!(csc.nzval, vec![1.0, 5.0, 4.0]);
    }

    #[test]
    fn test_fractional_relaxation() {
        // maximize 10a + 7b + 7c subject to 6a + 4b + 4c <= 9
        // LP optimum takes b and c fully plus 1/6 of a
        let mut model = IpModel::new(
            DVector::from_vec(vec![10.0, 7.0, 7.0]),
            vec![VarMeta::Player(1), VarMeta::Player(2), VarMeta::Player(3)],
        );
        let coeffs: BTreeMap<usize, f64> = [(0, 6.0), (1, 4.0), (2, 4.0)].into_iter().collect();
        model.add_constraint(IpConstraint::at_most(coeffs, 9.0));

        let lp = LpRelaxation::new(200, 1e-8);
        match lp.solve(&model, &model.fixed) {
            LpOutcome::Optimal { x, objective, .. } => {
                assert!((objective - (14.0 + 10.0 / 6.0)).abs() < 1e-4, "objective = {}", objective);
                assert!((x[0] - 1.0 / 6.0).abs() < 1e-4, "x[0] = {}", x[0]);
                assert!((x[1] - 1.0).abs() < 1e-4);
                assert!((x[2] - 1.0).abs() < 1e-4);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_infeasible_relaxation() {
        // x0 + x1 = 3 cannot hold with 0 <= x <= 1
        let mut model = IpModel::new(
            DVector::from_vec(vec![1.0, 1.0]),
            vec![VarMeta::Player(1), VarMeta::Player(2)],
        );
        let coeffs: BTreeMap<usize, f64> = [(0, 1.0), (1, 1.0)].into_iter().collect();
        model.add_constraint(IpConstraint::eq(coeffs, 3.0));

        let lp = LpRelaxation::new(200, 1e-8);
        assert!(matches!(lp.solve(&model, &model.fixed), LpOutcome::Infeasible));
    }
}
