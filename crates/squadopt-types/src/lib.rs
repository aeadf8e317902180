mod cost;
mod error;
mod fixture;
mod player;
mod position;
mod window;

pub use cost::Cost;
pub use error::{Result, SquadOptError};
pub use fixture::{Fixture, FixtureTable, NEUTRAL_DIFFICULTY};
pub use player::{validate_players, ClubId, Player, PlayerId, PlayerRecord, REQUIRED_COLUMNS};
pub use position::{Position, MAX_PER_CLUB, SQUAD_SIZE, STARTING_SIZE};
pub use window::{Round, RoundWindow, MAX_ROUND};
