//! Per-region material assignment
//!
//! Maps the region tag of a cell to its elastic constants. The lookup is a
//! pure, total function of the tag and the three fixed parameter sets.

use crate::config::MaterialsConfig;
use crate::error::ElasticaError;
use crate::mesh::{RegionTag, REGION_INCLUSION_A, REGION_MATRIX};

use super::constitutive::IsotropicElasticity;

/// Material coefficients for the matrix and the two inclusions
#[derive(Debug, Clone)]
pub struct MaterialField {
    matrix: IsotropicElasticity,
    inclusion_a: IsotropicElasticity,
    inclusion_b: IsotropicElasticity,
}

impl MaterialField {
    pub fn new(
        matrix: IsotropicElasticity,
        inclusion_a: IsotropicElasticity,
        inclusion_b: IsotropicElasticity,
    ) -> Self {
        Self {
            matrix,
            inclusion_a,
            inclusion_b,
        }
    }

    /// Build the field from validated configuration
    pub fn from_config(config: &MaterialsConfig) -> Result<Self, ElasticaError> {
        Ok(Self::new(
            IsotropicElasticity::new(config.matrix.youngs_modulus, config.matrix.poisson_ratio)?,
            IsotropicElasticity::new(
                config.inclusion_a.youngs_modulus,
                config.inclusion_a.poisson_ratio,
            )?,
            IsotropicElasticity::new(
                config.inclusion_b.youngs_modulus,
                config.inclusion_b.poisson_ratio,
            )?,
        ))
    }

    /// Resolve a region tag to its material
    ///
    /// Tag 1 is the matrix, tag 2 inclusion-A, and any other tag resolves to
    /// inclusion-B. The catch-all branch reproduces the reference behavior,
    /// where every cell not tagged 1 or 2 receives inclusion-B's constants;
    /// callers that need strict tag validation check the tag before the
    /// lookup (see the assembler).
    pub fn material_for(&self, tag: RegionTag) -> &IsotropicElasticity {
        if tag == REGION_MATRIX {
            &self.matrix
        } else if tag == REGION_INCLUSION_A {
            &self.inclusion_a
        } else {
            &self.inclusion_b
        }
    }
}
