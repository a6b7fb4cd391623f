//! Constitutive model for 2D plane-stress linear elasticity
//!
//! Implements the material stiffness matrix (D) that relates stress to strain.

use nalgebra::SMatrix;

use crate::error::ElasticaError;

/// Isotropic linear elastic material in 2D plane stress
///
/// Characterized by Young's modulus E and Poisson's ratio ν. Valid for small
/// strains and linear elastic behavior.
///
/// # References
/// - Timoshenko & Goodier, "Theory of Elasticity"
/// - Zienkiewicz & Taylor, "The Finite Element Method", Vol. 1
#[derive(Debug, Clone, Copy)]
pub struct IsotropicElasticity {
    pub youngs_modulus: f64,
    pub poisson_ratio: f64,
}

impl IsotropicElasticity {
    /// Create new isotropic elastic material
    ///
    /// # Arguments
    /// * `youngs_modulus` - Young's modulus E, must be > 0
    /// * `poisson_ratio` - Poisson's ratio ν, must be in (-1, 0.5)
    pub fn new(youngs_modulus: f64, poisson_ratio: f64) -> Result<Self, ElasticaError> {
        if youngs_modulus <= 0.0 {
            return Err(ElasticaError::InvalidMaterialParameters(format!(
                "Young's modulus must be positive, got {}",
                youngs_modulus
            )));
        }
        if poisson_ratio <= -1.0 || poisson_ratio >= 0.5 {
            return Err(ElasticaError::InvalidMaterialParameters(format!(
                "Poisson's ratio must be in (-1, 0.5), got {}",
                poisson_ratio
            )));
        }

        Ok(Self {
            youngs_modulus,
            poisson_ratio,
        })
    }

    /// Compute 3×3 constitutive matrix D for plane-stress elasticity
    ///
    /// Relates stress to strain in Voigt notation: σ = D ε with
    /// σ = [σ_xx, σ_yy, σ_xy]^T and ε = [ε_xx, ε_yy, γ_xy]^T.
    ///
    /// ```text
    /// D = (E / (1-ν²)) ×
    ///     [ 1    ν      0    ]
    ///     [ ν    1      0    ]
    ///     [ 0    0   (1-ν)/2 ]
    /// ```
    ///
    /// Equivalently σ = 2μ ε + λ tr(ε) I with the plane constants
    /// μ = E/(2(1+ν)) and λ = Eν/(1-ν²).
    ///
    /// # Returns
    /// 3×3 symmetric positive-definite constitutive matrix
    #[allow(non_snake_case)]
    pub fn constitutive_matrix(&self) -> SMatrix<f64, 3, 3> {
        let E = self.youngs_modulus;
        let nu = self.poisson_ratio;

        let factor = E / (1.0 - nu * nu);

        let mut D = SMatrix::<f64, 3, 3>::zeros();
        D[(0, 0)] = 1.0;
        D[(0, 1)] = nu;
        D[(1, 0)] = nu;
        D[(1, 1)] = 1.0;
        D[(2, 2)] = (1.0 - nu) / 2.0;

        D * factor
    }

    /// Compute the plane Lamé parameters (λ, μ)
    ///
    /// # Returns
    /// (λ, μ) where:
    /// - λ = E ν / (1 - ν²) - First Lamé parameter (plane-stress form)
    /// - μ = E / (2(1+ν)) - Shear modulus
    #[allow(non_snake_case)]
    pub fn lame_parameters(&self) -> (f64, f64) {
        let E = self.youngs_modulus;
        let nu = self.poisson_ratio;

        let lambda = (E * nu) / (1.0 - nu * nu);
        let mu = E / (2.0 * (1.0 + nu));

        (lambda, mu)
    }
}
