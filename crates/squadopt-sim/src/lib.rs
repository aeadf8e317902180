mod generator;
mod loader;
mod runner;
mod scenario;

pub use generator::{PoolConfig, PoolGenerator};
pub use loader::{parse_fixtures, parse_players, read_fixtures, read_players};
pub use runner::{SimResult, SimRunner, SolverRun};
pub use scenario::ScenarioConfig;

#[cfg(test)]
mod tests;
