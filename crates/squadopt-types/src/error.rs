use thiserror::Error;

#[derive(Debug, Error)]
pub enum SquadOptError {
    #[error("Missing required columns: {0:?}")]
    Schema(Vec<String>),

    #[error("Invalid data: {0}")]
    Data(String),

    #[error("Out of range: {0}")]
    Range(String),

    #[error("Infeasible problem: {0}")]
    Infeasible(String),

    #[error("Solver returned an inconsistent result: {0}")]
    SolverConsistency(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SquadOptError {
    /// Infeasibility depends on the constraints, not on a bug, so callers may
    /// retry with a larger budget or fewer forced picks.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SquadOptError::Infeasible(_))
    }

    /// Names of the missing columns for a schema error
    pub fn missing_columns(&self) -> &[String] {
        match self {
            SquadOptError::Schema(columns) => columns,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for SquadOptError {
    fn from(err: serde_json::Error) -> Self {
        SquadOptError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SquadOptError>;
