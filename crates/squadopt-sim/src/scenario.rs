use serde::{Deserialize, Serialize};
use squadopt_squad::SelectionParams;
use squadopt_types::{Round, RoundWindow};

use crate::generator::PoolConfig;

/// Scenario configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    pub description: String,
    pub pool: PoolConfig,
    pub selection: SelectionParams,
    /// Generate a fixture list for the selection window
    pub with_fixtures: bool,
    /// Round the starting eleven is picked for
    pub lineup_round: Round,
    /// Also run the greedy heuristic and report the gap
    pub compare_heuristic: bool,
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            name: "default".to_string(),
            description: "Full league pool, 100.0 budget, four-round window".to_string(),
            pool: PoolConfig::default(),
            selection: SelectionParams::default(),
            with_fixtures: true,
            lineup_round: 1,
            compare_heuristic: true,
            seed: 42,
        }
    }
}

impl ScenarioConfig {
    pub fn default_scenario() -> Self {
        Self::default()
    }

    /// Budget low enough that the greedy fill often runs dry
    pub fn tight_budget() -> Self {
        ScenarioConfig {
            name: "tight_budget".to_string(),
            description: "83.0 budget over the default pool".to_string(),
            selection: SelectionParams::default().with_budget(83.0),
            ..Default::default()
        }
    }

    /// No fixtures and no expected-points columns
    pub fn blank_fixtures() -> Self {
        ScenarioConfig {
            name: "blank_fixtures".to_string(),
            description: "Season totals only, every multiplier neutral".to_string(),
            pool: PoolConfig {
                ep_rounds: None,
                ..PoolConfig::default()
            },
            with_fixtures: false,
            ..Default::default()
        }
    }

    /// Eight-round window starting mid-season
    pub fn long_window() -> Self {
        let window = RoundWindow { start: 10, end: 17 };
        ScenarioConfig {
            name: "long_window".to_string(),
            description: "Rounds 10-17 with fixture weighting".to_string(),
            pool: PoolConfig {
                ep_rounds: Some(window),
                ..PoolConfig::default()
            },
            selection: SelectionParams::default().with_rounds(window.start, window.end),
            lineup_round: window.start,
            ..Default::default()
        }
    }

    /// Eight clubs, the smallest league the defaults comfortably fill
    pub fn small_league() -> Self {
        ScenarioConfig {
            name: "small_league".to_string(),
            description: "Eight clubs, quick to solve".to_string(),
            pool: PoolConfig {
                clubs: 8,
                ..PoolConfig::default()
            },
            ..Default::default()
        }
    }

    pub fn all() -> Vec<ScenarioConfig> {
        vec![
            Self::default_scenario(),
            Self::tight_budget(),
            Self::blank_fixtures(),
            Self::long_window(),
            Self::small_league(),
        ]
    }

    pub fn by_name(name: &str) -> Option<ScenarioConfig> {
        Self::all().into_iter().find(|s| s.name == name)
    }
}
