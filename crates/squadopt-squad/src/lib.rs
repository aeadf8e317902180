mod instance;
mod model_builder;
mod params;
mod projection;
mod result;
mod selector;
mod solvers;

pub use instance::SquadInstance;
pub use model_builder::ModelBuilder;
pub use params::{ExtraConstraints, SelectionParams, SolverKind};
pub use projection::{
    build_projection, default_columns, ProjectedPlayer, Projection, ProjectionSource,
};
pub use result::{Diagnostics, SelectedPlayer, SquadResult};
pub use selector::{select_squad, SquadSelector};
pub use solvers::{ExactSolver, HeuristicSolver, SolveStatus, SquadSelection, SquadSolver};
