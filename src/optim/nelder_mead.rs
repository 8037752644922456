//! Nelder-Mead simplex minimizer.

use super::{finish, to_vec, MinimizeResult, Minimizer, Problem, RunSummary, Tracker};
use argmin::core::Executor;
use argmin::solver::neldermead::NelderMead as SimplexSolver;
use faer::Col;
use std::time::{Duration, Instant};

/// Nelder-Mead downhill simplex minimizer.
///
/// Derivative-free, so it copes with objectives that are not differentiable
/// everywhere (the SCAD penalty has a kink at zero). Runs argmin's
/// [`SimplexSolver`] from a simplex built around `x0`: nonzero coordinates
/// are scaled by 5%, zero coordinates are moved by 0.00025.
///
/// Converges when the standard deviation of the objective over the simplex
/// vertices drops below `f_tolerance`.
#[derive(Debug, Clone)]
pub struct NelderMead {
    max_iterations: usize,
    f_tolerance: f64,
    time_limit: Option<Duration>,
}

const NONZERO_STEP: f64 = 0.05;
const ZERO_STEP: f64 = 0.00025;

impl NelderMead {
    /// Creates a new Nelder-Mead minimizer.
    ///
    /// # Arguments
    ///
    /// * `max_iterations` - Maximum number of simplex iterations
    /// * `f_tolerance` - Objective spread tolerance
    pub fn new(max_iterations: usize, f_tolerance: f64) -> Self {
        Self {
            max_iterations,
            f_tolerance,
            time_limit: None,
        }
    }

    /// Stop with [`ConvergenceStatus::TimeLimit`](super::ConvergenceStatus::TimeLimit)
    /// once `limit` has elapsed.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    fn initial_simplex(x0: &[f64]) -> Vec<Vec<f64>> {
        let mut simplex = Vec::with_capacity(x0.len() + 1);
        simplex.push(x0.to_vec());
        for k in 0..x0.len() {
            let mut vertex = x0.to_vec();
            vertex[k] = if vertex[k] != 0.0 {
                (1.0 + NONZERO_STEP) * vertex[k]
            } else {
                ZERO_STEP
            };
            simplex.push(vertex);
        }
        simplex
    }
}

impl Default for NelderMead {
    /// Defaults: 5000 iterations, f tolerance 1e-10.
    fn default() -> Self {
        Self::new(5000, 1e-10)
    }
}

impl Minimizer for NelderMead {
    fn minimize<F>(&self, objective: F, x0: Col<f64>) -> MinimizeResult
    where
        F: Fn(&Col<f64>) -> f64,
    {
        let started = Instant::now();
        let tracker = Tracker::new(objective);
        let start = to_vec(&x0);

        let outcome = SimplexSolver::new(Self::initial_simplex(&start))
            .with_sd_tolerance(self.f_tolerance)
            .and_then(|solver| {
                let mut executor = Executor::new(Problem(&tracker), solver)
                    .configure(|state| state.max_iters(self.max_iterations as u64));
                if let Some(limit) = self.time_limit {
                    executor = executor.timeout(limit);
                }
                executor.run()
            })
            .map(|res| RunSummary::from_state(res.state()));

        finish("Nelder-Mead", &tracker, start, outcome, started)
    }
}
