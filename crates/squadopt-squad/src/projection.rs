use serde::{Deserialize, Serialize};
use squadopt_fixtures::FixtureWeights;
use squadopt_types::{FixtureTable, Player, Result, Round, RoundWindow, SquadOptError};
use tracing::{debug, warn};

/// Rounds in a season, used to spread the season total over single rounds
const SEASON_ROUNDS: f64 = 38.0;

/// Season total assumed when a player has none
const DEFAULT_TOTAL_POINTS: f64 = 50.0;

/// Floor for the synthesized per-round baseline
const MIN_BASELINE: f64 = 0.5;

/// Where per-round expected points came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionSource {
    /// Supplied expected-points columns
    Columns,
    /// Season-total baseline, used when any column is missing
    Synthesized,
}

/// Player with fixture-weighted expected points over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPlayer {
    pub player: Player,
    /// One value per round of the window, in round order
    pub round_points: Vec<f64>,
    pub window_points: f64,
}

impl ProjectedPlayer {
    pub fn points_in(&self, window: RoundWindow, round: Round) -> Option<f64> {
        window
            .index_of(round)
            .and_then(|i| self.round_points.get(i))
            .copied()
    }

    /// Window points per tenth of cost; a free player ranks first
    pub fn value_per_cost(&self) -> f64 {
        let tenths = self.player.cost.tenths();
        if tenths <= 0 {
            f64::INFINITY
        } else {
            self.window_points / tenths as f64
        }
    }
}

/// Projected pool for a window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub window: RoundWindow,
    pub source: ProjectionSource,
    pub players: Vec<ProjectedPlayer>,
}

/// `ep_gw{r}` for each round of the window
pub fn default_columns(window: RoundWindow) -> Vec<String> {
    window.rounds().map(|r| format!("ep_gw{}", r)).collect()
}

/// Fixture-weighted expected points per player and round.
///
/// Column `i` of `columns` holds round `window.start + i`. When any player
/// lacks any column, every player is synthesized from the season total
/// instead of mixing sources.
pub fn build_projection(
    players: Vec<Player>,
    fixtures: Option<&FixtureTable>,
    window: RoundWindow,
    columns: Option<&[String]>,
) -> Result<Projection> {
    let columns = match columns {
        Some(names) => {
            if names.len() != window.len() {
                return Err(SquadOptError::Range(format!(
                    "Expected {} expected-points columns for {}, got {}",
                    window.len(),
                    window,
                    names.len()
                )));
            }
            names.to_vec()
        }
        None => default_columns(window),
    };

    let weights = FixtureWeights::new(fixtures, window);
    let complete = players
        .iter()
        .all(|p| columns.iter().all(|c| p.column(c).is_some()));
    let source = if complete {
        ProjectionSource::Columns
    } else {
        warn!(
            window = %window,
            "expected-points columns missing, synthesizing from season totals"
        );
        ProjectionSource::Synthesized
    };

    let projected = players
        .into_iter()
        .map(|player| {
            let round_points: Vec<f64> = window
                .rounds()
                .zip(columns.iter())
                .map(|(round, column)| {
                    let base = match source {
                        ProjectionSource::Columns => player.column(column).unwrap_or(0.0),
                        ProjectionSource::Synthesized => baseline(&player),
                    };
                    base * weights.multiplier(player.club, round)
                })
                .collect();
            let window_points = round_points.iter().sum();
            ProjectedPlayer {
                player,
                round_points,
                window_points,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        players = projected.len(),
        fixture_weighted = weights.has_information(),
        ?source,
        "projection built"
    );

    Ok(Projection {
        window,
        source,
        players: projected,
    })
}

fn baseline(player: &Player) -> f64 {
    let total = player.total_points.unwrap_or(DEFAULT_TOTAL_POINTS);
    (total / SEASON_ROUNDS).max(MIN_BASELINE)
}
