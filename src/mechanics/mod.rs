/// Solid mechanics module for plane linear elasticity
///
/// This module provides implementations for:
/// - The plane-stress linear elastic constitutive model
/// - Per-region material assignment over the mesh
/// - The strain-displacement relationship
/// - Element matrices for displacement-based FEM with multiplier constraints
pub mod constitutive;
pub mod element;
pub mod material_field;
pub mod strain;

pub use constitutive::IsotropicElasticity;
pub use element::ElasticityElement;
pub use material_field::MaterialField;
pub use strain::StrainDisplacement;
