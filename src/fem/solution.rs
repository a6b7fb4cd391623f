use nalgebra::Vector2;

use crate::mesh::VectorField;

use super::dof::{DofManager, NUM_MULTIPLIERS};

/// The solved DOF vector with typed views
///
/// Created by the linear solver and read-only thereafter. Split views give
/// the piecewise-linear displacement field (two components per vertex) and
/// the three multiplier scalars.
#[derive(Debug, Clone)]
pub struct Solution {
    values: Vec<f64>,
    num_vertices: usize,
}

impl Solution {
    /// Wrap a solved DOF vector
    ///
    /// # Panics
    /// Panics if the vector length disagrees with the DOF layout; the solver
    /// always produces a vector of the assembled system's size, so a mismatch
    /// is a programming error.
    pub fn new(values: Vec<f64>, dofs: &DofManager) -> Self {
        assert_eq!(
            values.len(),
            dofs.total_dofs(),
            "solution vector length must match the DOF layout"
        );
        Self {
            values,
            num_vertices: dofs.num_vertices(),
        }
    }

    /// Displacement of one vertex
    pub fn displacement(&self, vertex: usize) -> Vector2<f64> {
        Vector2::new(self.values[2 * vertex], self.values[2 * vertex + 1])
    }

    /// The three multiplier scalars [c_trans_x, c_trans_y, c_rot]
    pub fn multipliers(&self) -> [f64; NUM_MULTIPLIERS] {
        let base = 2 * self.num_vertices;
        [
            self.values[base],
            self.values[base + 1],
            self.values[base + 2],
        ]
    }

    /// The raw DOF vector
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of mesh vertices covered by the displacement block
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// The displacement block as a named per-vertex vector field
    pub fn displacement_field(&self) -> VectorField {
        let values = (0..self.num_vertices)
            .map(|v| self.displacement(v))
            .collect();
        VectorField::new("displacement", values)
    }
}
