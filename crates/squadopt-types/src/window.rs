use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Result, SquadOptError};

/// A single fixture week
pub type Round = u32;

/// Last round of a season
pub const MAX_ROUND: Round = 38;

/// Inclusive planning window of rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundWindow {
    pub start: Round,
    pub end: Round,
}

impl RoundWindow {
    /// Create a window, checking 1 <= start <= end <= 38
    pub fn new(start: Round, end: Round) -> Result<Self> {
        if start < 1 || end < start || end > MAX_ROUND {
            return Err(SquadOptError::Range(format!(
                "Invalid round range {}..={} (must satisfy 1 <= start <= end <= {})",
                start, end, MAX_ROUND
            )));
        }
        Ok(RoundWindow { start, end })
    }

    pub fn rounds(&self) -> RangeInclusive<Round> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, round: Round) -> bool {
        self.rounds().contains(&round)
    }

    /// Offset of a round inside the window
    pub fn index_of(&self, round: Round) -> Option<usize> {
        if self.contains(round) {
            Some((round - self.start) as usize)
        } else {
            None
        }
    }
}

impl Default for RoundWindow {
    fn default() -> Self {
        RoundWindow { start: 1, end: 4 }
    }
}

impl fmt::Display for RoundWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GW{}-{}", self.start, self.end)
    }
}
