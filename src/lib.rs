//! 2D linear elastostatics with material inclusions
//!
//! Solves the pure-traction plane-stress problem on a square matrix domain
//! containing two circular inclusions. Rigid-body modes are removed by three
//! global Lagrange multiplier unknowns appended to the per-vertex
//! displacement DOFs, giving a symmetric indefinite saddle-point system.

pub mod analysis;
pub mod config;
pub mod error;
pub mod fem;
pub mod linalg;
pub mod mechanics;
pub mod mesh;
pub mod mesh_generator;
pub mod postprocess;

pub use analysis::{run_analysis, AnalysisResult};
pub use config::{LoadingConfig, MaterialConfig, MaterialsConfig, ProblemConfig, SolverSettings};
pub use error::ElasticaError;
pub use fem::{Assembler, DofManager, Solution, Tri3Basis};
pub use linalg::{BiCgStab, DirectSolver, Solver, SolverStats};
pub use mechanics::{ElasticityElement, IsotropicElasticity, MaterialField, StrainDisplacement};
pub use mesh::{
    BoundaryFacet, BoundarySide, Mesh, RegionTag, ScalarField, Tri3Element, VectorField,
};
pub use mesh_generator::MeshGenerator;
pub use postprocess::{DerivedFields, PostProcessor, ScalarEnergies};
