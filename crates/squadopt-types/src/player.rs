use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::cost::Cost;
use crate::error::{Result, SquadOptError};
use crate::position::Position;

pub type PlayerId = u64;

/// Club affiliation code (`team` on the wire)
pub type ClubId = u32;

/// Columns every player row must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["id", "element_type", "team", "now_cost"];

/// Raw player row as delivered by the data source.
///
/// Required columns are optional here so a missing column surfaces as a
/// schema error instead of a deserialization failure. Unknown columns
/// (including per-round expected points such as `ep_gw1`) land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<ClubId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub now_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_points: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_name: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, element_type: i64, team: ClubId, now_cost: i64) -> Self {
        PlayerRecord {
            id: Some(id),
            element_type: Some(element_type),
            team: Some(team),
            now_cost: Some(now_cost),
            ..Default::default()
        }
    }

    pub fn with_total_points(mut self, total_points: f64) -> Self {
        self.total_points = Some(total_points);
        self
    }

    pub fn with_name(mut self, first_name: &str, second_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self.second_name = Some(second_name.to_string());
        self
    }

    pub fn with_column(mut self, name: &str, value: f64) -> Self {
        self.extra.insert(name.to_string(), serde_json::json!(value));
        self
    }

    fn has_column(&self, column: &str) -> bool {
        match column {
            "id" => self.id.is_some(),
            "element_type" => self.element_type.is_some(),
            "team" => self.team.is_some(),
            "now_cost" => self.now_cost.is_some(),
            other => self.extra.contains_key(other),
        }
    }

    fn display_name(&self, id: PlayerId) -> String {
        if let Some(name) = self.web_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let parts: Vec<&str> = [self.first_name.as_deref(), self.second_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();
        if parts.is_empty() {
            format!("Player {}", id)
        } else {
            parts.join(" ")
        }
    }

    /// Numeric extra columns. The FPL API ships some numbers as strings
    /// (e.g. `"ep_next": "3.2"`), so numeric strings count too.
    fn numeric_columns(&self) -> BTreeMap<String, f64> {
        self.extra
            .iter()
            .filter_map(|(name, value)| {
                let number = match value {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }?;
                number.is_finite().then(|| (name.clone(), number))
            })
            .collect()
    }
}

/// Validated player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub position: Position,
    pub club: ClubId,
    pub cost: Cost,
    pub total_points: Option<f64>,
    pub name: String,
    /// Remaining numeric columns, e.g. per-round expected points
    pub columns: BTreeMap<String, f64>,
}

impl Player {
    pub fn column(&self, name: &str) -> Option<f64> {
        self.columns.get(name).copied()
    }
}

/// Validate raw rows into players.
///
/// Checks, in order: required columns present in the table (schema error
/// naming every column no row carries), unique ids, then per row: required
/// values present, known position codes, non-negative costs.
pub fn validate_players(records: &[PlayerRecord]) -> Result<Vec<Player>> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| {
            !records.is_empty() && records.iter().all(|r| !r.has_column(column))
        })
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SquadOptError::Schema(missing));
    }

    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for record in records {
        if let Some(id) = record.id {
            if !seen.insert(id) {
                duplicates.insert(id);
            }
        }
    }
    if !duplicates.is_empty() {
        return Err(SquadOptError::Data(format!(
            "Duplicate player IDs found: {:?}",
            duplicates
        )));
    }

    records
        .iter()
        .enumerate()
        .map(|(row, record)| to_player(row, record))
        .collect()
}

fn to_player(row: usize, record: &PlayerRecord) -> Result<Player> {
    let (id, element_type, club, now_cost) =
        match (record.id, record.element_type, record.team, record.now_cost) {
            (Some(id), Some(et), Some(team), Some(cost)) => (id, et, team, cost),
            _ => {
                let blank: Vec<&str> = REQUIRED_COLUMNS
                    .iter()
                    .copied()
                    .filter(|column| !record.has_column(column))
                    .collect();
                let who = record
                    .id
                    .map_or_else(|| format!("Row {}", row), |id| format!("Player {}", id));
                return Err(SquadOptError::Data(format!(
                    "{} has no value for {}",
                    who,
                    blank.join(", ")
                )));
            }
        };

    let position = Position::from_code(element_type).ok_or_else(|| {
        SquadOptError::Data(format!(
            "Player {} has unknown element_type {}",
            id, element_type
        ))
    })?;

    let cost = Cost::from_tenths(now_cost);
    if cost.is_negative() {
        return Err(SquadOptError::Data(format!(
            "Player {} has negative cost {}",
            id, now_cost
        )));
    }

    Ok(Player {
        id,
        position,
        club,
        cost,
        total_points: record.total_points.filter(|p| p.is_finite()),
        name: record.display_name(id),
        columns: record.numeric_columns(),
    })
}
