use serde::{Deserialize, Serialize};
use squadopt_types::Position;
use std::fmt;

/// Outfield shape of a starting eleven; one goalkeeper is implied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formation {
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl Formation {
    /// Legal formations, in the order they are tried
    pub const ALLOWED: [Formation; 8] = [
        Formation::new(3, 4, 3),
        Formation::new(3, 5, 2),
        Formation::new(4, 3, 3),
        Formation::new(4, 4, 2),
        Formation::new(4, 5, 1),
        Formation::new(5, 2, 3),
        Formation::new(5, 3, 2),
        Formation::new(5, 4, 1),
    ];

    pub const fn new(defenders: usize, midfielders: usize, forwards: usize) -> Self {
        Formation {
            defenders,
            midfielders,
            forwards,
        }
    }

    /// Starters required at a position
    pub fn slots(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => 1,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn is_allowed(&self) -> bool {
        Self::ALLOWED.contains(self)
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.defenders, self.midfielders, self.forwards)
    }
}
