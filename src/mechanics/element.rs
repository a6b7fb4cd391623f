//! Element matrices for plane linear elasticity
//!
//! Implements the element stiffness, the boundary traction load, and the
//! coupling blocks between displacements and the three rigid-body multiplier
//! unknowns.

use nalgebra::{Matrix2, Point2, SMatrix, SVector};

use crate::error::ElasticaError;
use crate::fem::Tri3Basis;

use super::{IsotropicElasticity, StrainDisplacement};

/// Element matrix computations for the augmented elasticity system
pub struct ElasticityElement;

impl ElasticityElement {
    /// Compute element stiffness matrix for linear elasticity
    ///
    /// K_e = B^T D B · A
    ///
    /// Basis gradients are constant over a linear triangle, so single-point
    /// integration over the cell area is exact for the stiffness term.
    ///
    /// # Arguments
    /// * `vertices` - Physical coordinates of the 3 cell vertices
    /// * `material` - Elastic material properties (E, ν) of the cell's region
    ///
    /// # Returns
    /// 6×6 symmetric element stiffness matrix
    ///
    /// # Errors
    /// `DegenerateGeometry` if the cell has zero or negative signed area.
    #[allow(non_snake_case)]
    pub fn stiffness_matrix(
        vertices: &[Point2<f64>; 3],
        material: &IsotropicElasticity,
    ) -> Result<SMatrix<f64, 6, 6>, ElasticaError> {
        let (gradients, area) = Tri3Basis::gradients(vertices)?;

        let D = material.constitutive_matrix();
        let B = StrainDisplacement::compute_b_matrix(&gradients);

        let DB = D * B;
        Ok(B.transpose() * DB * area)
    }

    /// Compute the traction load of one boundary facet
    ///
    /// ∫_facet t·v ds with t = σ₀·n constant on the facet and v the linear
    /// edge basis, which puts t·L/2 on each endpoint.
    ///
    /// # Arguments
    /// * `a`, `b` - Endpoint coordinates of the facet
    /// * `normal` - Outward unit normal of the facet
    /// * `sigma0` - Prescribed constant stress tensor
    ///
    /// # Returns
    /// 4-vector of nodal loads ordered [f_ax, f_ay, f_bx, f_by]
    pub fn traction_load(
        a: &Point2<f64>,
        b: &Point2<f64>,
        normal: &nalgebra::Vector2<f64>,
        sigma0: &Matrix2<f64>,
    ) -> SVector<f64, 4> {
        let length = (b - a).norm();
        let traction = sigma0 * normal;
        let half = 0.5 * length;

        SVector::<f64, 4>::new(
            traction[0] * half,
            traction[1] * half,
            traction[0] * half,
            traction[1] * half,
        )
    }

    /// Compute the multiplier coupling block of one cell
    ///
    /// Columns pair the displacement basis with the three global constraint
    /// functionals:
    /// - column 0: x-translation, ∫ N_i dA = A/3
    /// - column 1: y-translation, ∫ N_i dA = A/3
    /// - column 2: rotation kernel (x, -y), with the exact linear moments
    ///   ∫ N_i x dA = (A/12)(x_0 + x_1 + x_2 + x_i) and likewise for y
    ///
    /// # Returns
    /// 6×3 coupling block; the assembler scatters it and its transpose into
    /// the bordered rows/columns of the global matrix.
    #[allow(non_snake_case)]
    pub fn multiplier_coupling(
        vertices: &[Point2<f64>; 3],
    ) -> Result<SMatrix<f64, 6, 3>, ElasticaError> {
        let area = Tri3Basis::area(vertices)?;

        let sum_x: f64 = vertices.iter().map(|v| v.x).sum();
        let sum_y: f64 = vertices.iter().map(|v| v.y).sum();

        let mut C = SMatrix::<f64, 6, 3>::zeros();
        for i in 0..3 {
            let moment_x = area / 12.0 * (sum_x + vertices[i].x);
            let moment_y = area / 12.0 * (sum_y + vertices[i].y);

            C[(2 * i, 0)] = area / 3.0;
            C[(2 * i + 1, 1)] = area / 3.0;
            // ∫ (x v_y - y v_x) dA for v = N_i e_x and v = N_i e_y
            C[(2 * i, 2)] = -moment_y;
            C[(2 * i + 1, 2)] = moment_x;
        }

        Ok(C)
    }
}
