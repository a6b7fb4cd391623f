use log::info;
use sprs::CsMat;
use std::time::Instant;

use crate::error::ElasticaError;

use super::preconditioner::{IdentityPreconditioner, JacobiPreconditioner, Preconditioner};
use super::solver::{LinearOperator, Solver, SolverStats, SolverUtils};

/// BiCGSTAB (Biconjugate Gradient Stabilized) solver
///
/// Handles the symmetric indefinite augmented system, which plain CG cannot.
/// The iteration is capped; exceeding the cap without meeting the residual
/// tolerance surfaces `DidNotConverge`.
pub struct BiCgStab {
    max_iterations: usize,
    tolerance: f64,
    abs_tolerance: f64,
    use_preconditioner: bool,
    name: String,
}

impl BiCgStab {
    pub fn new() -> Self {
        Self {
            max_iterations: 20_000,
            tolerance: 1e-10,
            abs_tolerance: 1e-14,
            use_preconditioner: true,
            name: "BiCGSTAB".to_string(),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_abs_tolerance(mut self, abs_tolerance: f64) -> Self {
        self.abs_tolerance = abs_tolerance;
        self
    }

    pub fn with_preconditioner(mut self, use_precond: bool) -> Self {
        self.use_preconditioner = use_precond;
        self
    }

    fn solve_preconditioned<O, P>(
        &self,
        a: &O,
        b: &[f64],
        precond: &P,
    ) -> Result<(Vec<f64>, SolverStats), ElasticaError>
    where
        O: LinearOperator,
        P: Preconditioner,
    {
        let n = b.len();
        let start = Instant::now();
        let b_norm = SolverUtils::norm(b);

        if b_norm < 1e-25 {
            return Ok((
                vec![0.0; n],
                SolverStats {
                    iterations: 0,
                    residual_norm: 0.0,
                    relative_residual: 0.0,
                    solve_time: start.elapsed().as_secs_f64(),
                },
            ));
        }

        let mut x = vec![0.0; n];
        let mut r = b.to_vec();
        let r_hat = r.clone();

        let mut rho = 1.0;
        let mut alpha = 1.0;
        let mut omega = 1.0;
        let mut v = vec![0.0; n];
        let mut p = vec![0.0; n];

        let mut iteration = 0;
        let mut final_res = b_norm;

        while iteration < self.max_iterations {
            let rho_new: f64 = r_hat.iter().zip(r.iter()).map(|(&a, &b)| a * b).sum();
            if rho_new.abs() < 1e-60 {
                break; // breakdown, surface DidNotConverge below
            }

            let beta = (rho_new / rho) * (alpha / omega);
            rho = rho_new;

            for i in 0..n {
                p[i] = r[i] + beta * (p[i] - omega * v[i]);
            }

            let p_hat = precond.apply(&p);
            v = a.apply(&p_hat);

            let r_hat_v: f64 = r_hat.iter().zip(v.iter()).map(|(&a, &b)| a * b).sum();
            if r_hat_v.abs() < 1e-60 {
                break;
            }
            alpha = rho / r_hat_v;

            let s: Vec<f64> = r.iter().zip(v.iter()).map(|(&ri, &vi)| ri - alpha * vi).collect();

            let s_norm = SolverUtils::norm(&s);
            if s_norm < self.tolerance * b_norm || s_norm < self.abs_tolerance {
                for i in 0..n {
                    x[i] += alpha * p_hat[i];
                }
                final_res = s_norm;
                break;
            }

            let s_hat = precond.apply(&s);
            let t = a.apply(&s_hat);

            let tt: f64 = t.iter().map(|&ti| ti * ti).sum();
            if tt < 1e-60 {
                break;
            }
            let ts: f64 = t.iter().zip(s.iter()).map(|(&ti, &si)| ti * si).sum();
            omega = ts / tt;

            for i in 0..n {
                x[i] += alpha * p_hat[i] + omega * s_hat[i];
                r[i] = s[i] - omega * t[i];
            }

            let r_norm = SolverUtils::norm(&r);
            final_res = r_norm;
            if r_norm < self.tolerance * b_norm || r_norm < self.abs_tolerance {
                break;
            }

            iteration += 1;
        }

        let relative_residual = final_res / b_norm;
        if relative_residual > self.tolerance && final_res > self.abs_tolerance {
            return Err(ElasticaError::DidNotConverge {
                iterations: iteration,
                residual: relative_residual,
            });
        }

        let solve_time = start.elapsed().as_secs_f64();
        info!(
            "bicgstab: n = {}, {} iterations, residual = {:.3e}, {:.3} s",
            n, iteration, relative_residual, solve_time
        );

        Ok((
            x,
            SolverStats {
                iterations: iteration,
                residual_norm: final_res,
                relative_residual,
                solve_time,
            },
        ))
    }
}

impl Default for BiCgStab {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for BiCgStab {
    fn solve(&self, a: &CsMat<f64>, b: &[f64]) -> Result<(Vec<f64>, SolverStats), ElasticaError> {
        if self.use_preconditioner {
            let precond = JacobiPreconditioner::new(a);
            self.solve_preconditioned(a, b, &precond)
        } else {
            self.solve_preconditioned(a, b, &IdentityPreconditioner)
        }
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
