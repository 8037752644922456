//! BFGS quasi-Newton minimizer with a finite-difference gradient.

use super::{
    finish, to_vec, ConvergenceStatus, MinimizeResult, Minimizer, Problem, RunSummary, Tracker,
};
use argmin::core::Executor;
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::BFGS;
use faer::Col;
use std::time::{Duration, Instant};

/// More-Thuente line search over plain `Vec<f64>` parameters.
type LineSearch = MoreThuenteLineSearch<Vec<f64>, Vec<f64>, f64>;

/// BFGS minimizer.
///
/// Runs argmin's dense [`BFGS`] with a More-Thuente line search, starting
/// from the identity as inverse Hessian. Gradients are central differences
/// of the objective, so no analytic derivative is needed.
///
/// Converges when `‖g‖ < gradient_tolerance` or when one iteration changes
/// the objective by less than `cost_tolerance`.
#[derive(Debug, Clone)]
pub struct Bfgs {
    max_iterations: usize,
    gradient_tolerance: f64,
    cost_tolerance: f64,
    time_limit: Option<Duration>,
}

impl Bfgs {
    /// Creates a new BFGS minimizer.
    ///
    /// # Arguments
    ///
    /// * `max_iterations` - Maximum number of quasi-Newton iterations
    /// * `gradient_tolerance` - Stop when the gradient norm falls below this
    /// * `cost_tolerance` - Stop when an iteration changes the objective by less than this
    pub fn new(max_iterations: usize, gradient_tolerance: f64, cost_tolerance: f64) -> Self {
        Self {
            max_iterations,
            gradient_tolerance,
            cost_tolerance,
            time_limit: None,
        }
    }

    /// Stop with [`ConvergenceStatus::TimeLimit`] once `limit` has elapsed.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    fn identity(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect()
    }
}

impl Default for Bfgs {
    /// Defaults: 5000 iterations, gradient tolerance 1e-6, cost tolerance 1e-12.
    fn default() -> Self {
        Self::new(5000, 1e-6, 1e-12)
    }
}

impl Minimizer for Bfgs {
    fn minimize<F>(&self, objective: F, x0: Col<f64>) -> MinimizeResult
    where
        F: Fn(&Col<f64>) -> f64,
    {
        let started = Instant::now();
        let tracker = Tracker::new(objective);
        let start = to_vec(&x0);

        let initial_cost = tracker.eval(&start);
        if !initial_cost.is_finite() {
            log::warn!("Initial cost is not finite ({initial_cost}); skipping BFGS");
            return MinimizeResult {
                solution: x0,
                objective_value: initial_cost,
                iterations: 0,
                function_evaluations: tracker.calls(),
                status: ConvergenceStatus::NumericalError,
                elapsed_time: started.elapsed(),
            };
        }

        let n = start.len();
        let outcome = BFGS::new(LineSearch::new())
            .with_tolerance_grad(self.gradient_tolerance)
            .and_then(|solver| solver.with_tolerance_cost(self.cost_tolerance))
            .and_then(|solver| {
                let mut executor = Executor::new(Problem(&tracker), solver).configure(|state| {
                    state
                        .param(start.clone())
                        .inv_hessian(Self::identity(n))
                        .max_iters(self.max_iterations as u64)
                });
                if let Some(limit) = self.time_limit {
                    executor = executor.timeout(limit);
                }
                executor.run()
            })
            .map(|res| RunSummary::from_state(res.state()));

        finish("BFGS", &tracker, start, outcome, started)
    }
}
