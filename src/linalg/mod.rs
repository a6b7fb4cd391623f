pub mod direct;
pub mod iterative;
pub mod preconditioner;
pub mod solver;

pub use direct::DirectSolver;
pub use iterative::BiCgStab;
pub use preconditioner::{IdentityPreconditioner, JacobiPreconditioner, Preconditioner};
pub use solver::{LinearOperator, Solver, SolverStats, SolverUtils};
