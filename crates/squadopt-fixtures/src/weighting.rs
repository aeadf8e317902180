use serde::{Deserialize, Serialize};
use squadopt_types::{ClubId, FixtureTable, Round, RoundWindow};
use std::collections::BTreeMap;

/// Multiplier for clubs without fixture information
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Lowest multiplier any difficulty can produce
pub const MIN_MULTIPLIER: f64 = 0.6;

/// Points multiplier for a fixture difficulty rating.
///
/// m = max(0.6, 1.6 - 0.2 * difficulty): 1 -> 1.4, 2 -> 1.2, 3 -> 1.0,
/// 4 -> 0.8, 5 -> 0.6. Computed in integer tenths so the table values are
/// exact.
pub fn difficulty_multiplier(difficulty: i32) -> f64 {
    let tenths = (16 - 2 * i64::from(difficulty)).max(6);
    tenths as f64 / 10.0
}

/// Per-club multipliers for a single round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundMultipliers {
    pub round: Round,
    pub by_club: BTreeMap<ClubId, f64>,
}

impl RoundMultipliers {
    /// No information: every club gets 1.0
    pub fn neutral(round: Round) -> Self {
        RoundMultipliers {
            round,
            by_club: BTreeMap::new(),
        }
    }

    /// Multipliers for every club playing in `round`.
    ///
    /// A club listed in two fixtures of the same round keeps the value of the
    /// later fixture in table order.
    pub fn for_round(fixtures: Option<&FixtureTable>, round: Round) -> Self {
        let mut multipliers = RoundMultipliers::neutral(round);
        let Some(table) = fixtures.filter(|t| t.has_rounds()) else {
            return multipliers;
        };

        for fixture in table.in_round(round) {
            multipliers
                .by_club
                .insert(fixture.team_h, difficulty_multiplier(fixture.team_h_difficulty));
            multipliers
                .by_club
                .insert(fixture.team_a, difficulty_multiplier(fixture.team_a_difficulty));
        }
        multipliers
    }

    /// Multiplier for a club, 1.0 when it has no fixture this round
    pub fn get(&self, club: ClubId) -> f64 {
        self.by_club.get(&club).copied().unwrap_or(NEUTRAL_MULTIPLIER)
    }

    pub fn is_neutral(&self) -> bool {
        self.by_club.is_empty()
    }
}

/// Multipliers for every round of a planning window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureWeights {
    pub window: RoundWindow,
    rounds: Vec<RoundMultipliers>,
}

impl FixtureWeights {
    pub fn new(fixtures: Option<&FixtureTable>, window: RoundWindow) -> Self {
        let rounds = window
            .rounds()
            .map(|round| RoundMultipliers::for_round(fixtures, round))
            .collect();
        FixtureWeights { window, rounds }
    }

    /// Neutral weights for a window
    pub fn neutral(window: RoundWindow) -> Self {
        Self::new(None, window)
    }

    pub fn round(&self, round: Round) -> Option<&RoundMultipliers> {
        self.window.index_of(round).and_then(|i| self.rounds.get(i))
    }

    /// Multiplier for a club in a round; 1.0 outside the window
    pub fn multiplier(&self, club: ClubId, round: Round) -> f64 {
        self.round(round)
            .map(|m| m.get(club))
            .unwrap_or(NEUTRAL_MULTIPLIER)
    }

    /// True when at least one round carries difficulty information
    pub fn has_information(&self) -> bool {
        self.rounds.iter().any(|r| !r.is_neutral())
    }
}
