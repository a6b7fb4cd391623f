//! Strain-displacement relationship for plane elasticity
//!
//! Implements the B-matrix that relates nodal displacements to element
//! strains.

use nalgebra::{SMatrix, Vector2};

/// Strain-displacement matrix computations
pub struct StrainDisplacement;

impl StrainDisplacement {
    /// Compute 3×6 strain-displacement matrix B from shape function gradients
    ///
    /// Relates nodal displacements to element strains: ε = B · u_e
    ///
    /// # Arguments
    /// * `gradients` - Cartesian gradients [∂N_i/∂x, ∂N_i/∂y] for i = 0..2,
    ///   constant over the cell for linear triangles
    ///
    /// # Returns
    /// B matrix (3×6) where:
    /// - Rows: [ε_xx, ε_yy, γ_xy] (Voigt notation, engineering shear)
    /// - Columns: [u_0x, u_0y, u_1x, u_1y, u_2x, u_2y]
    ///
    /// For each node i, columns 2i, 2i+1 are:
    /// ```text
    ///     [∂N_i/∂x    0     ]   (ε_xx = ∂u_x/∂x)
    ///     [  0      ∂N_i/∂y ]   (ε_yy = ∂u_y/∂y)
    ///     [∂N_i/∂y  ∂N_i/∂x ]   (γ_xy = ∂u_x/∂y + ∂u_y/∂x)
    /// ```
    #[allow(non_snake_case)]
    pub fn compute_b_matrix(gradients: &[Vector2<f64>; 3]) -> SMatrix<f64, 3, 6> {
        let mut B = SMatrix::<f64, 3, 6>::zeros();

        for i in 0..3 {
            let col = 2 * i;
            let dni_dx = gradients[i][0];
            let dni_dy = gradients[i][1];

            B[(0, col)] = dni_dx;
            B[(1, col + 1)] = dni_dy;
            B[(2, col)] = dni_dy;
            B[(2, col + 1)] = dni_dx;
        }

        B
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fem::Tri3Basis;
    use approx::assert_relative_eq;
    use nalgebra::{Point2, SVector};

    fn reference_triangle() -> [Point2<f64>; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_b_matrix_rigid_translation() {
        // Rigid body translation must produce zero strain
        let (gradients, _) = Tri3Basis::gradients(&reference_triangle()).unwrap();
        let b = StrainDisplacement::compute_b_matrix(&gradients);

        let mut u_rigid = SVector::<f64, 6>::zeros();
        for i in 0..3 {
            u_rigid[2 * i] = 0.7; // u_x
            u_rigid[2 * i + 1] = -1.3; // u_y
        }

        let strain = b * u_rigid;
        for k in 0..3 {
            assert_relative_eq!(strain[k], 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_b_matrix_rigid_rotation() {
        // Infinitesimal rotation u = ω (-y, x) must produce zero strain
        let vertices = reference_triangle();
        let (gradients, _) = Tri3Basis::gradients(&vertices).unwrap();
        let b = StrainDisplacement::compute_b_matrix(&gradients);

        let omega = 0.42;
        let mut u_rot = SVector::<f64, 6>::zeros();
        for i in 0..3 {
            u_rot[2 * i] = -omega * vertices[i].y;
            u_rot[2 * i + 1] = omega * vertices[i].x;
        }

        let strain = b * u_rot;
        for k in 0..3 {
            assert_relative_eq!(strain[k], 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_b_matrix_uniform_extension() {
        // u = (αx, 0) gives ε_xx = α, other components zero
        let vertices = reference_triangle();
        let (gradients, _) = Tri3Basis::gradients(&vertices).unwrap();
        let b = StrainDisplacement::compute_b_matrix(&gradients);

        let alpha = 0.05;
        let mut u = SVector::<f64, 6>::zeros();
        for i in 0..3 {
            u[2 * i] = alpha * vertices[i].x;
        }

        let strain = b * u;
        assert_relative_eq!(strain[0], alpha, epsilon = 1e-14);
        assert_relative_eq!(strain[1], 0.0, epsilon = 1e-14);
        assert_relative_eq!(strain[2], 0.0, epsilon = 1e-14);
    }
}
