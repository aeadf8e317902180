use serde::{Deserialize, Serialize};
use squadopt_fixtures::FixtureSummary;
use squadopt_types::{ClubId, Cost, PlayerId, Position, Round, RoundWindow};
use std::collections::BTreeMap;

use crate::projection::ProjectionSource;
use crate::solvers::SolveStatus;

/// A member of the selected squad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub club: ClubId,
    pub cost: Cost,
    /// Fixture-weighted expected points by round
    pub round_points: BTreeMap<Round, f64>,
    pub window_points: f64,
}

/// Diagnostic information from a solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    pub solver: String,
    pub status: SolveStatus,
    pub objective_value: f64,
    pub nodes: usize,
    pub elapsed_ms: u64,
    pub projection: ProjectionSource,
}

/// Selected 15-player squad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadResult {
    pub window: RoundWindow,
    /// Ordered by position, then window points descending
    pub players: Vec<SelectedPlayer>,
    /// In currency units
    pub total_cost: f64,
    pub total_points: f64,
    pub by_position: BTreeMap<Position, Vec<PlayerId>>,
    pub club_counts: BTreeMap<ClubId, usize>,
    pub diagnostics: Diagnostics,
    pub fixture_summary: FixtureSummary,
}

impl SquadResult {
    pub fn player(&self, id: PlayerId) -> Option<&SelectedPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn count(&self, position: Position) -> usize {
        self.by_position.get(&position).map_or(0, |ids| ids.len())
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Total cost in tenths
    pub fn cost(&self) -> Cost {
        self.players.iter().map(|p| p.cost).sum()
    }
}
