use log::info;
use sprs::CsMat;
use std::time::Instant;

use crate::error::ElasticaError;

use super::solver::{Solver, SolverStats, SolverUtils};

/// Direct solver using LU decomposition with partial pivoting
///
/// Densifies the sparse system and factorizes with nalgebra's LU. Good for
/// small to medium problems; the augmented saddle-point structure is handled
/// without modification since LU does not require definiteness. A failed
/// factorization or an unacceptable residual is surfaced as `SingularSystem`
/// rather than silently returning NaNs.
pub struct DirectSolver {
    tolerance: f64,
    name: String,
}

impl DirectSolver {
    pub fn new() -> Self {
        Self {
            tolerance: 1e-10,
            name: "Direct (LU)".to_string(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for DirectSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for DirectSolver {
    #[allow(non_snake_case)]
    fn solve(&self, A: &CsMat<f64>, b: &[f64]) -> Result<(Vec<f64>, SolverStats), ElasticaError> {
        let start = Instant::now();
        let n = b.len();

        let mut a_dense = nalgebra::DMatrix::zeros(n, n);
        for (row_idx, row) in A.outer_iterator().enumerate() {
            for (col_idx, &val) in row.iter() {
                a_dense[(row_idx, col_idx)] = val;
            }
        }

        let lu = a_dense.lu();
        let b_vec = nalgebra::DVector::from_column_slice(b);

        let x_vec = lu.solve(&b_vec).ok_or_else(|| {
            ElasticaError::SingularSystem("LU factorization found a zero pivot".to_string())
        })?;

        let x: Vec<f64> = x_vec.iter().copied().collect();

        let residual_norm = SolverUtils::residual_norm(A, &x, b);
        let relative_residual = SolverUtils::relative_residual(A, &x, b);

        if !relative_residual.is_finite() || relative_residual > self.tolerance {
            return Err(ElasticaError::SingularSystem(format!(
                "LU solution residual {:.3e} exceeds tolerance {:.3e}",
                relative_residual, self.tolerance
            )));
        }

        let solve_time = start.elapsed().as_secs_f64();
        info!(
            "direct solve: n = {}, residual = {:.3e}, {:.3} s",
            n, relative_residual, solve_time
        );

        Ok((
            x,
            SolverStats {
                iterations: 0,
                residual_norm,
                relative_residual,
                solve_time,
            },
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }
}
