use sprs::CsMat;

use crate::error::ElasticaError;

/// Statistics from solver execution
#[derive(Debug, Clone)]
pub struct SolverStats {
    /// Number of iterations (0 for direct solvers)
    pub iterations: usize,

    /// Final residual norm ||r|| = ||b - Ax||
    pub residual_norm: f64,

    /// Relative residual ||r|| / ||b||
    pub relative_residual: f64,

    /// Solve time in seconds
    pub solve_time: f64,
}

/// Trait for a linear operator A that can be applied to a vector x to get Ax
pub trait LinearOperator {
    /// Apply the operator to vector v: out = A * v
    fn apply(&self, v: &[f64]) -> Vec<f64>;

    /// Number of rows (output dimension)
    fn rows(&self) -> usize;

    /// Number of columns (input dimension)
    fn cols(&self) -> usize;
}

impl LinearOperator for CsMat<f64> {
    fn apply(&self, v: &[f64]) -> Vec<f64> {
        let n = self.rows();
        let mut result = vec![0.0; n];
        for (row_idx, row) in self.outer_iterator().enumerate() {
            let mut sum = 0.0;
            for (col_idx, &val) in row.iter() {
                sum += val * v[col_idx];
            }
            result[row_idx] = sum;
        }
        result
    }

    fn rows(&self) -> usize {
        self.rows()
    }

    fn cols(&self) -> usize {
        self.cols()
    }
}

/// Linear system solver
///
/// Solves Ax = b for x. A solve only succeeds after an explicit residual
/// acceptance check ||b - Ax|| against the configured tolerance; no solver
/// returns a silently inaccurate vector.
pub trait Solver {
    /// Solve the linear system Ax = b
    ///
    /// # Arguments
    /// * `A` - System matrix (n × n), symmetric but generally indefinite
    /// * `b` - Right-hand side vector (n)
    ///
    /// # Returns
    /// Solution vector x and solver statistics
    ///
    /// # Errors
    /// * `SingularSystem` if a factorization or pivot check fails
    /// * `DidNotConverge` if an iterative method exceeds its iteration cap
    #[allow(non_snake_case)]
    fn solve(&self, A: &CsMat<f64>, b: &[f64]) -> Result<(Vec<f64>, SolverStats), ElasticaError>;

    /// Get solver name
    fn name(&self) -> &str;

    /// Get relative residual tolerance
    fn tolerance(&self) -> f64;

    /// Set relative residual tolerance
    fn set_tolerance(&mut self, tolerance: f64);
}

/// Helper functions for solver validation
pub struct SolverUtils;

impl SolverUtils {
    /// Compute residual r = b - Ax
    #[allow(non_snake_case)]
    pub fn compute_residual<O: LinearOperator>(A: &O, x: &[f64], b: &[f64]) -> Vec<f64> {
        let ax = A.apply(x);
        b.iter()
            .zip(ax.iter())
            .map(|(&bi, &axi)| bi - axi)
            .collect()
    }

    /// Compute L2 norm of a vector
    pub fn norm(v: &[f64]) -> f64 {
        v.iter().map(|&x| x * x).sum::<f64>().sqrt()
    }

    /// Compute residual norm ||b - Ax||
    #[allow(non_snake_case)]
    pub fn residual_norm<O: LinearOperator>(A: &O, x: &[f64], b: &[f64]) -> f64 {
        let r = Self::compute_residual(A, x, b);
        Self::norm(&r)
    }

    /// Compute relative residual ||b - Ax|| / ||b||
    #[allow(non_snake_case)]
    pub fn relative_residual<O: LinearOperator>(A: &O, x: &[f64], b: &[f64]) -> f64 {
        let r_norm = Self::residual_norm(A, x, b);
        let b_norm = Self::norm(b);

        if b_norm < 1e-14 {
            r_norm
        } else {
            r_norm / b_norm
        }
    }
}
