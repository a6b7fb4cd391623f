use nalgebra::{Point2, Vector2};

use crate::error::ElasticaError;

/// Relative floor for the signed area of the affine map. Cells flatter than
/// this fraction of their squared longest edge are treated as degenerate.
const MIN_AREA_RATIO: f64 = 1e-12;

/// Tri3 (3-node linear triangular) element basis functions
///
/// Node numbering: the three vertices in counter-clockwise order.
///
/// Shape functions are the barycentric coordinates L0, L1, L2 of the
/// triangle, with L0 + L1 + L2 = 1. Their Cartesian gradients are constant
/// over the cell, so the stiffness integrand is constant and one-point
/// integration is exact.
pub struct Tri3Basis;

impl Tri3Basis {
    /// Signed area of the triangle (positive for counter-clockwise order)
    pub fn signed_area(vertices: &[Point2<f64>; 3]) -> f64 {
        let [v0, v1, v2] = vertices;
        0.5 * ((v1.x - v0.x) * (v2.y - v0.y) - (v2.x - v0.x) * (v1.y - v0.y))
    }

    /// Cell area, failing fast on a degenerate affine map
    ///
    /// # Errors
    /// `DegenerateGeometry` if the signed area is zero, negative (flipped
    /// orientation), or vanishing relative to the cell's edge lengths.
    pub fn area(vertices: &[Point2<f64>; 3]) -> Result<f64, ElasticaError> {
        let signed = Self::signed_area(vertices);

        let scale = edge_scale(vertices);
        if signed <= MIN_AREA_RATIO * scale {
            return Err(ElasticaError::DegenerateGeometry { area: signed });
        }

        Ok(signed)
    }

    /// Evaluate all 3 shape functions at a point given in barycentric form
    #[allow(non_snake_case)]
    pub fn shape_functions(L: &[f64; 3]) -> [f64; 3] {
        *L
    }

    /// Cartesian gradients of the shape functions and the cell area
    ///
    /// For vertices (x_i, y_i) with cyclic successors j, k:
    ///
    /// ∂N_i/∂x = (y_j - y_k) / (2A),  ∂N_i/∂y = (x_k - x_j) / (2A)
    ///
    /// # Returns
    /// The three gradient vectors and the (positive) cell area
    ///
    /// # Errors
    /// `DegenerateGeometry` if the affine map is singular.
    pub fn gradients(
        vertices: &[Point2<f64>; 3],
    ) -> Result<([Vector2<f64>; 3], f64), ElasticaError> {
        let area = Self::area(vertices)?;
        let inv_2a = 1.0 / (2.0 * area);

        let mut gradients = [Vector2::zeros(); 3];
        for i in 0..3 {
            let j = (i + 1) % 3;
            let k = (i + 2) % 3;
            gradients[i] = Vector2::new(
                (vertices[j].y - vertices[k].y) * inv_2a,
                (vertices[k].x - vertices[j].x) * inv_2a,
            );
        }

        Ok((gradients, area))
    }
}

/// Squared longest edge of the cell, used as the degeneracy scale
fn edge_scale(vertices: &[Point2<f64>; 3]) -> f64 {
    let mut scale: f64 = 0.0;
    for i in 0..3 {
        let j = (i + 1) % 3;
        scale = scale.max((vertices[j] - vertices[i]).norm_squared());
    }
    scale
}
