use serde_json::Value;
use squadopt_types::{FixtureTable, PlayerRecord, Result, SquadOptError};
use std::fs;
use std::path::Path;

/// Players from JSON: a bare array or a `bootstrap-static` document with an
/// `elements` array
pub fn parse_players(json: &str) -> Result<Vec<PlayerRecord>> {
    let value: Value = serde_json::from_str(json)?;
    let rows = match value {
        Value::Object(mut map) => map.remove("elements").ok_or_else(|| {
            SquadOptError::Serialization("object has no `elements` array".to_string())
        })?,
        other => other,
    };
    Ok(serde_json::from_value(rows)?)
}

/// Fixtures from a JSON array
pub fn parse_fixtures(json: &str) -> Result<FixtureTable> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_players(path: &Path) -> Result<Vec<PlayerRecord>> {
    parse_players(&read(path)?)
}

pub fn read_fixtures(path: &Path) -> Result<FixtureTable> {
    parse_fixtures(&read(path)?)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| {
        SquadOptError::Config(format!("Cannot read {}: {}", path.display(), err))
    })
}
