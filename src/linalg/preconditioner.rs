use sprs::CsMat;

/// Preconditioner applying an approximate inverse: z = M⁻¹ r
pub trait Preconditioner {
    fn apply(&self, r: &[f64]) -> Vec<f64>;
}

/// No-op preconditioner
pub struct IdentityPreconditioner;

impl Preconditioner for IdentityPreconditioner {
    fn apply(&self, r: &[f64]) -> Vec<f64> {
        r.to_vec()
    }
}

/// Jacobi (diagonal) preconditioner
///
/// The multiplier rows of the augmented system carry a zero diagonal, so
/// those entries fall back to 1.0 instead of dividing by zero.
pub struct JacobiPreconditioner {
    inv_diag: Vec<f64>,
}

impl JacobiPreconditioner {
    pub fn new(a: &CsMat<f64>) -> Self {
        let n = a.rows();
        let mut inv_diag = vec![1.0; n];

        for (row_idx, row) in a.outer_iterator().enumerate() {
            for (col_idx, &val) in row.iter() {
                if col_idx == row_idx && val.abs() > 1e-30 {
                    inv_diag[row_idx] = 1.0 / val;
                }
            }
        }

        Self { inv_diag }
    }
}

impl Preconditioner for JacobiPreconditioner {
    fn apply(&self, r: &[f64]) -> Vec<f64> {
        r.iter()
            .zip(self.inv_diag.iter())
            .map(|(&ri, &di)| ri * di)
            .collect()
    }
}
