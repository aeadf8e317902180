mod ip_model;
mod backend;
mod lp_relaxation;
mod branch_bound;

pub use ip_model::{IpModel, IpConstraint, VarMeta};
pub use backend::{SolverBackend, IpSolution, IpStatus};
pub use branch_bound::{BranchBoundParams, ClarabelBranchAndBound};
