use serde::{Deserialize, Serialize};
use squadopt_types::{ClubId, FixtureTable, Round, RoundWindow, NEUTRAL_DIFFICULTY};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Where a club plays a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "A")]
    Away,
    #[serde(rename = "?")]
    Unknown,
}

impl Venue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Home => "H",
            Venue::Away => "A",
            Venue::Unknown => "?",
        }
    }
}

/// One round of a club's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDescriptor {
    pub round: Round,
    /// `None` when the opponent is unknown
    pub opponent: Option<ClubId>,
    pub venue: Venue,
    pub difficulty: i32,
}

impl FixtureDescriptor {
    /// Placeholder for a round without a known fixture
    pub fn unknown(round: Round) -> Self {
        FixtureDescriptor {
            round,
            opponent: None,
            venue: Venue::Unknown,
            difficulty: NEUTRAL_DIFFICULTY,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.opponent.is_none()
    }
}

/// Rough reading of a club's average difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Favourable,
    Neutral,
    Tough,
}

/// A club's schedule over the window plus aggregate statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubFixtures {
    pub fixtures: Vec<FixtureDescriptor>,
    pub avg_difficulty: f64,
    pub total_difficulty: i64,
}

impl ClubFixtures {
    fn from_fixtures(fixtures: Vec<FixtureDescriptor>) -> Self {
        let total_difficulty: i64 = fixtures.iter().map(|f| i64::from(f.difficulty)).sum();
        let avg_difficulty = if fixtures.is_empty() {
            f64::from(NEUTRAL_DIFFICULTY)
        } else {
            total_difficulty as f64 / fixtures.len() as f64
        };
        ClubFixtures {
            fixtures,
            avg_difficulty,
            total_difficulty,
        }
    }

    /// Below 2.5 is favourable, above 3.5 is tough
    pub fn outlook(&self) -> Outlook {
        if self.avg_difficulty < 2.5 {
            Outlook::Favourable
        } else if self.avg_difficulty > 3.5 {
            Outlook::Tough
        } else {
            Outlook::Neutral
        }
    }
}

/// Fixture-difficulty report for the clubs of a squad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSummary {
    pub rounds: Vec<Round>,
    pub clubs: BTreeMap<ClubId, ClubFixtures>,
}

impl FixtureSummary {
    pub fn club(&self, club: ClubId) -> Option<&ClubFixtures> {
        self.clubs.get(&club)
    }

    /// Clubs ordered by average difficulty, easiest first (ties by club id)
    pub fn easiest(&self, limit: usize) -> Vec<(ClubId, &ClubFixtures)> {
        let mut clubs: Vec<(ClubId, &ClubFixtures)> =
            self.clubs.iter().map(|(club, info)| (*club, info)).collect();
        clubs.sort_by(|a, b| {
            a.1.avg_difficulty
                .total_cmp(&b.1.avg_difficulty)
                .then(a.0.cmp(&b.0))
        });
        clubs.truncate(limit);
        clubs
    }
}

/// Describe each club's fixtures over the window.
///
/// A club's home fixture is preferred over an away fixture in the same round;
/// rounds with no fixture get a neutral placeholder (difficulty 3).
pub fn summarize_fixtures(
    clubs: impl IntoIterator<Item = ClubId>,
    fixtures: Option<&FixtureTable>,
    window: RoundWindow,
) -> FixtureSummary {
    let clubs: BTreeSet<ClubId> = clubs.into_iter().collect();
    let mut placeholders = 0usize;

    let summary = clubs
        .into_iter()
        .map(|club| {
            let schedule = window
                .rounds()
                .map(|round| {
                    let descriptor = describe(club, round, fixtures);
                    if descriptor.is_placeholder() {
                        placeholders += 1;
                    }
                    descriptor
                })
                .collect();
            (club, ClubFixtures::from_fixtures(schedule))
        })
        .collect();

    debug!(window = %window, placeholders, "fixture summary built");
    FixtureSummary {
        rounds: window.rounds().collect(),
        clubs: summary,
    }
}

fn describe(club: ClubId, round: Round, fixtures: Option<&FixtureTable>) -> FixtureDescriptor {
    let Some(table) = fixtures else {
        return FixtureDescriptor::unknown(round);
    };

    if let Some(home) = table.in_round(round).find(|f| f.team_h == club) {
        return FixtureDescriptor {
            round,
            opponent: Some(home.team_a),
            venue: Venue::Home,
            difficulty: home.team_h_difficulty,
        };
    }
    if let Some(away) = table.in_round(round).find(|f| f.team_a == club) {
        return FixtureDescriptor {
            round,
            opponent: Some(away.team_h),
            venue: Venue::Away,
            difficulty: away.team_a_difficulty,
        };
    }
    FixtureDescriptor::unknown(round)
}
