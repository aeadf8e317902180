use serde::{Deserialize, Serialize};
use squadopt_squad::{SelectedPlayer, SquadResult};
use squadopt_types::{
    ClubId, PlayerId, Position, Result, Round, SquadOptError, MAX_ROUND, STARTING_SIZE,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::formation::Formation;

/// Parameters for picking a starting eleven
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupParams {
    pub round: Round,
    /// Multiplier applied to the captain's points
    pub captain_weight: f64,
    /// Multiplier applied to the vice-captain's points
    pub vice_weight: f64,
}

impl Default for LineupParams {
    fn default() -> Self {
        LineupParams {
            round: 1,
            captain_weight: 2.0,
            vice_weight: 1.0,
        }
    }
}

impl LineupParams {
    pub fn for_round(round: Round) -> Self {
        LineupParams {
            round,
            ..Self::default()
        }
    }
}

/// Squad member with points for the chosen round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupPlayer {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub club: ClubId,
    pub points: f64,
}

/// Best starting eleven for a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartingElevenResult {
    pub round: Round,
    pub formation: Formation,
    pub formation_label: String,
    /// Goalkeeper first, then defenders, midfielders, forwards
    pub starters: Vec<LineupPlayer>,
    /// Highest points first
    pub bench: Vec<LineupPlayer>,
    pub captain: PlayerId,
    pub vice_captain: PlayerId,
    /// Starter points with the captain and vice weights applied
    pub expected_points: f64,
    pub breakdown: BTreeMap<Position, usize>,
}

impl StartingElevenResult {
    pub fn starter_ids(&self) -> Vec<PlayerId> {
        self.starters.iter().map(|p| p.id).collect()
    }

    pub fn bench_ids(&self) -> Vec<PlayerId> {
        self.bench.iter().map(|p| p.id).collect()
    }
}

/// Points for a squad member in `round`.
///
/// Outside the squad's window the windowed total is spread evenly.
pub fn round_points(squad: &SquadResult, player: &SelectedPlayer, round: Round) -> f64 {
    match player.round_points.get(&round) {
        Some(points) if squad.window.contains(round) => *points,
        _ => player.window_points / squad.window.len() as f64,
    }
}

/// Pick the formation, starters, captain and vice-captain that maximize
/// weighted points for one round. Earlier formations win ties.
pub fn select_lineup(squad: &SquadResult, params: &LineupParams) -> Result<StartingElevenResult> {
    if params.round < 1 || params.round > MAX_ROUND {
        return Err(SquadOptError::Range(format!(
            "Round {} outside 1..={}",
            params.round, MAX_ROUND
        )));
    }
    if !params.captain_weight.is_finite() || !params.vice_weight.is_finite() {
        return Err(SquadOptError::Config(
            "Captain and vice-captain weights must be finite".to_string(),
        ));
    }

    let mut by_position: BTreeMap<Position, Vec<LineupPlayer>> = BTreeMap::new();
    for player in &squad.players {
        by_position
            .entry(player.position)
            .or_default()
            .push(LineupPlayer {
                id: player.id,
                name: player.name.clone(),
                position: player.position,
                club: player.club,
                points: round_points(squad, player, params.round),
            });
    }
    for group in by_position.values_mut() {
        group.sort_by(by_points);
    }

    let mut best: Option<(Formation, f64, Vec<LineupPlayer>)> = None;
    for formation in Formation::ALLOWED {
        let Some(starters) = fill(&by_position, formation) else {
            debug!(formation = %formation, "formation skipped, not enough players");
            continue;
        };
        let score = weighted_score(&starters, params);
        debug!(formation = %formation, score, "formation scored");
        if best.as_ref().map_or(true, |(_, top, _)| score > *top) {
            best = Some((formation, score, starters));
        }
    }

    let Some((formation, expected_points, starters)) = best else {
        return Err(SquadOptError::Config(format!(
            "No legal formation can be fielded for round {}",
            params.round
        )));
    };

    let (captain, vice_captain) = captains(&starters).ok_or_else(|| {
        SquadOptError::Config("Starting eleven has fewer than two players".to_string())
    })?;

    let mut bench: Vec<LineupPlayer> = by_position
        .into_values()
        .flatten()
        .filter(|p| !starters.iter().any(|s| s.id == p.id))
        .collect();
    bench.sort_by(by_points);

    let breakdown = Position::all()
        .iter()
        .map(|&pos| (pos, formation.slots(pos)))
        .collect();

    Ok(StartingElevenResult {
        round: params.round,
        formation,
        formation_label: formation.label(),
        starters,
        bench,
        captain,
        vice_captain,
        expected_points,
        breakdown,
    })
}

/// Points descending, then id ascending
fn by_points(a: &LineupPlayer, b: &LineupPlayer) -> Ordering {
    b.points.total_cmp(&a.points).then(a.id.cmp(&b.id))
}

fn fill(
    by_position: &BTreeMap<Position, Vec<LineupPlayer>>,
    formation: Formation,
) -> Option<Vec<LineupPlayer>> {
    let mut starters = Vec::with_capacity(STARTING_SIZE);
    for &position in Position::all() {
        let need = formation.slots(position);
        let group = by_position.get(&position).map_or(&[][..], |g| g.as_slice());
        if group.len() < need {
            return None;
        }
        starters.extend_from_slice(&group[..need]);
    }
    Some(starters)
}

fn captains(starters: &[LineupPlayer]) -> Option<(PlayerId, PlayerId)> {
    let mut ranked: Vec<&LineupPlayer> = starters.iter().collect();
    ranked.sort_by(|a, b| by_points(a, b));
    match ranked.as_slice() {
        [first, second, ..] => Some((first.id, second.id)),
        _ => None,
    }
}

/// Sum of starter points in lineup order, each scaled by its armband weight
fn weighted_score(starters: &[LineupPlayer], params: &LineupParams) -> f64 {
    let (captain, vice) = captains(starters).map_or((None, None), |(c, v)| (Some(c), Some(v)));
    starters
        .iter()
        .map(|p| {
            if Some(p.id) == captain {
                p.points * params.captain_weight
            } else if Some(p.id) == vice {
                p.points * params.vice_weight
            } else {
                p.points
            }
        })
        .sum()
}
