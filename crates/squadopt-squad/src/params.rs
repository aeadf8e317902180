use serde::{Deserialize, Serialize};
use squadopt_types::{PlayerId, Result, Round, RoundWindow, SquadOptError};
use std::collections::BTreeSet;

/// Built-in squad solving strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Branch-and-bound to proven optimality
    #[default]
    Exact,
    /// Greedy points-per-cost fill
    Heuristic,
}

/// Players forced into or barred from the squad
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraConstraints {
    pub include: Vec<PlayerId>,
    pub exclude: Vec<PlayerId>,
}

impl ExtraConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, id: PlayerId) -> Self {
        self.include.push(id);
        self
    }

    pub fn exclude(mut self, id: PlayerId) -> Self {
        self.exclude.push(id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn is_included(&self, id: PlayerId) -> bool {
        self.include.contains(&id)
    }

    pub fn is_excluded(&self, id: PlayerId) -> bool {
        self.exclude.contains(&id)
    }

    /// Every listed id must exist in the pool and no id may be both
    /// included and excluded.
    pub fn validate(&self, pool: &BTreeSet<PlayerId>) -> Result<()> {
        let unknown: Vec<PlayerId> = self
            .include
            .iter()
            .chain(self.exclude.iter())
            .filter(|id| !pool.contains(id))
            .copied()
            .collect();
        if !unknown.is_empty() {
            return Err(SquadOptError::Data(format!(
                "Constraint references unknown player IDs: {:?}",
                unknown
            )));
        }

        let conflicting: Vec<PlayerId> = self
            .include
            .iter()
            .filter(|id| self.exclude.contains(id))
            .copied()
            .collect();
        if !conflicting.is_empty() {
            return Err(SquadOptError::Data(format!(
                "Players both included and excluded: {:?}",
                conflicting
            )));
        }
        Ok(())
    }
}

/// Parameters for a squad selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    pub start_round: Round,
    pub end_round: Round,
    /// Budget in currency units
    pub budget: f64,
    pub solver: SolverKind,
    /// Expected-points column per round; `ep_gw{r}` when absent
    pub ep_columns: Option<Vec<String>>,
    pub constraints: ExtraConstraints,
}

impl Default for SelectionParams {
    fn default() -> Self {
        SelectionParams {
            start_round: 1,
            end_round: 4,
            budget: 100.0,
            solver: SolverKind::Exact,
            ep_columns: None,
            constraints: ExtraConstraints::default(),
        }
    }
}

impl SelectionParams {
    pub fn window(&self) -> Result<RoundWindow> {
        RoundWindow::new(self.start_round, self.end_round)
    }

    pub fn with_rounds(mut self, start: Round, end: Round) -> Self {
        self.start_round = start;
        self.end_round = end;
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_constraints(mut self, constraints: ExtraConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}
