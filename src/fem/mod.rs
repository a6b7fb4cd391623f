pub mod assembly;
pub mod basis;
pub mod dof;
pub mod solution;

pub use assembly::Assembler;
pub use basis::Tri3Basis;
pub use dof::{
    DofManager, DOFS_PER_VERTEX, MULTIPLIER_ROT, MULTIPLIER_TRANS_X, MULTIPLIER_TRANS_Y,
    NUM_MULTIPLIERS,
};
pub use solution::Solution;
