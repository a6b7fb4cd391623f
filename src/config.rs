//! Configuration for the inclusion analysis
//!
//! Reads TOML configuration files and provides structured data for material
//! constants per region, the applied boundary stress, and solver parameters.

use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ElasticaError;

/// Main problem configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProblemConfig {
    pub materials: MaterialsConfig,
    pub loading: LoadingConfig,
    pub solver: SolverSettings,
}

/// Material constants for the three regions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaterialsConfig {
    pub matrix: MaterialConfig,
    pub inclusion_a: MaterialConfig,
    pub inclusion_b: MaterialConfig,
}

/// Young's modulus and Poisson ratio for one region
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MaterialConfig {
    /// Young's modulus E, must be > 0
    pub youngs_modulus: f64,
    /// Poisson ratio ν, must be in (-1, 0.5)
    pub poisson_ratio: f64,
}

impl MaterialConfig {
    /// Check admissibility of the 2D plane constants
    pub fn validate(&self, region: &str) -> Result<(), ElasticaError> {
        if self.youngs_modulus <= 0.0 {
            return Err(ElasticaError::InvalidMaterialParameters(format!(
                "{}: Young's modulus must be positive, got {}",
                region, self.youngs_modulus
            )));
        }
        if self.poisson_ratio <= -1.0 || self.poisson_ratio >= 0.5 {
            return Err(ElasticaError::InvalidMaterialParameters(format!(
                "{}: Poisson ratio must be in (-1, 0.5), got {}",
                region, self.poisson_ratio
            )));
        }
        Ok(())
    }
}

/// Prescribed boundary stress σ₀ (constant 2×2 tensor)
///
/// The traction on a facet with outward normal n is t = σ₀ · n. Only the
/// Left/Right boundary regions carry traction; the remaining sides are free.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct LoadingConfig {
    pub sigma_xx: f64,
    #[serde(default)]
    pub sigma_yy: f64,
    #[serde(default)]
    pub sigma_xy: f64,
}

impl LoadingConfig {
    /// Uniaxial load with only σ_xx nonzero
    pub fn uniaxial(sigma_xx: f64) -> Self {
        Self {
            sigma_xx,
            sigma_yy: 0.0,
            sigma_xy: 0.0,
        }
    }

    /// The symmetric stress tensor σ₀
    pub fn tensor(&self) -> Matrix2<f64> {
        Matrix2::new(self.sigma_xx, self.sigma_xy, self.sigma_xy, self.sigma_yy)
    }

    /// Load with the sign of every component reversed
    pub fn negated(&self) -> Self {
        Self {
            sigma_xx: -self.sigma_xx,
            sigma_yy: -self.sigma_yy,
            sigma_xy: -self.sigma_xy,
        }
    }
}

/// Linear solver selection and acceptance criteria
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverSettings {
    /// "direct" or "bicgstab"
    #[serde(default = "default_linear_solver")]
    pub linear_solver: String,
    /// Iteration cap for iterative solvers
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Relative residual tolerance ||b - Ax|| / ||b||
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Absolute residual floor for nearly-zero right-hand sides
    #[serde(default = "default_abs_tolerance")]
    pub abs_tolerance: f64,
}

fn default_linear_solver() -> String {
    "direct".to_string()
}
fn default_max_iterations() -> usize {
    20_000
}
fn default_tolerance() -> f64 {
    1e-10
}
fn default_abs_tolerance() -> f64 {
    1e-14
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            linear_solver: default_linear_solver(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            abs_tolerance: default_abs_tolerance(),
        }
    }
}

impl ProblemConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ElasticaError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ElasticaError::Config(format!("failed to read config file: {}", e)))?;

        let config: ProblemConfig = toml::from_str(&contents)
            .map_err(|e| ElasticaError::Config(format!("failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate all material regions
    pub fn validate(&self) -> Result<(), ElasticaError> {
        self.materials.matrix.validate("matrix")?;
        self.materials.inclusion_a.validate("inclusion_a")?;
        self.materials.inclusion_b.validate("inclusion_b")?;
        Ok(())
    }

    /// Reference two-inclusion benchmark: soft matrix (E = 1, ν = 0.3) with a
    /// stiff inclusion (E = 10, ν = 0.2) and a soft inclusion (E = 0.1,
    /// ν = 0.1), pulled uniaxially with σ_xx = 0.2·E_matrix.
    pub fn two_inclusion_benchmark() -> Self {
        Self {
            materials: MaterialsConfig {
                matrix: MaterialConfig {
                    youngs_modulus: 1.0,
                    poisson_ratio: 0.3,
                },
                inclusion_a: MaterialConfig {
                    youngs_modulus: 10.0,
                    poisson_ratio: 0.2,
                },
                inclusion_b: MaterialConfig {
                    youngs_modulus: 0.1,
                    poisson_ratio: 0.1,
                },
            },
            loading: LoadingConfig::uniaxial(0.2),
            solver: SolverSettings::default(),
        }
    }
}
