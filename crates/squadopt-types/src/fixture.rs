use serde::{Deserialize, Serialize};

use crate::player::ClubId;
use crate::window::Round;

/// Difficulty assumed when a rating is missing
pub const NEUTRAL_DIFFICULTY: i32 = 3;

fn neutral_difficulty() -> i32 {
    NEUTRAL_DIFFICULTY
}

/// A single match between two clubs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Round the match is scheduled in; `None` for unscheduled matches
    #[serde(default)]
    pub event: Option<Round>,
    pub team_h: ClubId,
    pub team_a: ClubId,
    #[serde(default = "neutral_difficulty")]
    pub team_h_difficulty: i32,
    #[serde(default = "neutral_difficulty")]
    pub team_a_difficulty: i32,
}

impl Fixture {
    pub fn new(
        round: Round,
        home: ClubId,
        away: ClubId,
        home_difficulty: i32,
        away_difficulty: i32,
    ) -> Self {
        Fixture {
            event: Some(round),
            team_h: home,
            team_a: away,
            team_h_difficulty: home_difficulty,
            team_a_difficulty: away_difficulty,
        }
    }

    pub fn is_in_round(&self, round: Round) -> bool {
        self.event == Some(round)
    }
}

/// Fixture list in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureTable {
    pub fixtures: Vec<Fixture>,
}

impl FixtureTable {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        FixtureTable { fixtures }
    }

    pub fn empty() -> Self {
        FixtureTable::default()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// True when at least one fixture is scheduled in a round. A table
    /// without rounds carries no usable difficulty information.
    pub fn has_rounds(&self) -> bool {
        self.fixtures.iter().any(|f| f.event.is_some())
    }

    /// Fixtures scheduled in `round`, in source order
    pub fn in_round(&self, round: Round) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter().filter(move |f| f.is_in_round(round))
    }
}

impl From<Vec<Fixture>> for FixtureTable {
    fn from(fixtures: Vec<Fixture>) -> Self {
        FixtureTable::new(fixtures)
    }
}
