mod formation;
mod selector;

pub use formation::Formation;
pub use selector::{
    round_points, select_lineup, LineupParams, LineupPlayer, StartingElevenResult,
};

#[cfg(test)]
mod tests;
