//! Numerical minimizers for unconstrained objectives.
//!
//! Estimators hand a scalar objective and a starting point to a [`Minimizer`]
//! and get back the best point found together with a [`ConvergenceStatus`].
//! Backends can be swapped without touching estimator code.
//!
//! Both backends run on [`argmin`] over `Vec<f64>` parameters. This module
//! adapts a `faer` objective to argmin's `CostFunction`/`Gradient` traits and
//! maps argmin's termination reasons back onto [`ConvergenceStatus`].
//!
//! # Available Minimizers
//!
//! - [`NelderMead`] - derivative-free simplex search
//! - [`Bfgs`] - quasi-Newton with a finite-difference gradient
//!
//! # Example
//!
//! ```rust,ignore
//! use scad_regress::optim::{ConvergenceStatus, Minimizer, NelderMead};
//! use faer::Col;
//!
//! let minimizer = NelderMead::new(1000, 1e-12);
//! let objective = |x: &Col<f64>| (x[0] - 5.0).powi(2) + (x[1] - 3.0).powi(2);
//!
//! let result = minimizer.minimize(objective, Col::zeros(2));
//!
//! assert_eq!(result.status, ConvergenceStatus::Converged);
//! assert!((result.solution[0] - 5.0).abs() < 1e-4);
//! ```

mod bfgs;
mod nelder_mead;

pub use bfgs::Bfgs;
pub use nelder_mead::NelderMead;

use argmin::core::{CostFunction, Error, Gradient, State, TerminationReason, TerminationStatus};
use faer::Col;
use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

/// A derivative-free or numerically differentiated minimizer.
pub trait Minimizer {
    /// Minimize `objective` starting from `x0`.
    ///
    /// Never fails: when the stopping criteria are not met the best point
    /// seen so far is returned with a non-converged status.
    fn minimize<F>(&self, objective: F, x0: Col<f64>) -> MinimizeResult
    where
        F: Fn(&Col<f64>) -> f64;
}

/// Outcome of a minimizer run.
#[derive(Debug, Clone)]
pub struct MinimizeResult {
    /// Best point found.
    pub solution: Col<f64>,
    /// Objective value at `solution`.
    pub objective_value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Objective evaluations performed, including gradient estimation.
    pub function_evaluations: usize,
    /// Termination status.
    pub status: ConvergenceStatus,
    /// Total elapsed time.
    pub elapsed_time: Duration,
}

/// Convergence status of a minimizer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// Stopping criteria satisfied.
    Converged,
    /// Reached the iteration limit.
    MaxIterations,
    /// Reached the wall-clock limit.
    TimeLimit,
    /// The solver gave up before meeting its criteria (e.g. a failed line search).
    Stalled,
    /// Objective produced NaN or infinity.
    NumericalError,
}

impl ConvergenceStatus {
    /// True only for [`ConvergenceStatus::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, ConvergenceStatus::Converged)
    }
}

impl std::fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConvergenceStatus::Converged => "converged",
            ConvergenceStatus::MaxIterations => "maximum iterations reached",
            ConvergenceStatus::TimeLimit => "time limit reached",
            ConvergenceStatus::Stalled => "stalled",
            ConvergenceStatus::NumericalError => "numerical error",
        };
        f.write_str(s)
    }
}

impl From<&TerminationReason> for ConvergenceStatus {
    fn from(reason: &TerminationReason) -> Self {
        match reason {
            TerminationReason::SolverConverged | TerminationReason::TargetCostReached => {
                ConvergenceStatus::Converged
            }
            TerminationReason::MaxItersReached => ConvergenceStatus::MaxIterations,
            TerminationReason::Timeout => ConvergenceStatus::TimeLimit,
            _ => ConvergenceStatus::Stalled,
        }
    }
}

/// Caller objective with an evaluation counter and the best finite point seen.
pub(crate) struct Tracker<F> {
    objective: F,
    calls: Cell<usize>,
    best: RefCell<Option<(Vec<f64>, f64)>>,
}

impl<F: Fn(&Col<f64>) -> f64> Tracker<F> {
    pub(crate) fn new(objective: F) -> Self {
        Self {
            objective,
            calls: Cell::new(0),
            best: RefCell::new(None),
        }
    }

    pub(crate) fn eval(&self, x: &[f64]) -> f64 {
        self.calls.set(self.calls.get() + 1);
        let fx = (self.objective)(&Col::from_fn(x.len(), |i| x[i]));

        if fx.is_finite() {
            let mut best = self.best.borrow_mut();
            if best.as_ref().map_or(true, |(_, f_best)| fx < *f_best) {
                *best = Some((x.to_vec(), fx));
            }
        }
        fx
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    pub(crate) fn best(&self) -> Option<(Vec<f64>, f64)> {
        self.best.borrow().clone()
    }

    /// Central-difference gradient with step `cbrt(eps) * max(1, |x_i|)`.
    pub(crate) fn gradient(&self, x: &[f64]) -> Vec<f64> {
        let mut probe = x.to_vec();
        let mut grad = vec![0.0; x.len()];
        for i in 0..x.len() {
            let h = f64::EPSILON.cbrt() * x[i].abs().max(1.0);
            probe[i] = x[i] + h;
            let f_plus = self.eval(&probe);
            probe[i] = x[i] - h;
            let f_minus = self.eval(&probe);
            probe[i] = x[i];
            grad[i] = (f_plus - f_minus) / (2.0 * h);
        }
        grad
    }
}

/// argmin view of a [`Tracker`].
///
/// NaN is reported as `+inf` so simplex ordering stays total.
pub(crate) struct Problem<'a, F>(pub(crate) &'a Tracker<F>);

impl<F: Fn(&Col<f64>) -> f64> CostFunction for Problem<'_, F> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
        let fx = self.0.eval(param);
        Ok(if fx.is_nan() { f64::INFINITY } else { fx })
    }
}

impl<F: Fn(&Col<f64>) -> f64> Gradient for Problem<'_, F> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.0.gradient(param))
    }
}

/// Final solver state, detached from argmin's generic state types.
pub(crate) struct RunSummary {
    best_param: Option<Vec<f64>>,
    best_cost: f64,
    iterations: u64,
    reason: Option<TerminationReason>,
}

impl RunSummary {
    pub(crate) fn from_state<I>(state: &I) -> Self
    where
        I: State<Param = Vec<f64>, Float = f64>,
    {
        let reason = match state.get_termination_status() {
            TerminationStatus::Terminated(reason) => Some(reason.clone()),
            TerminationStatus::NotTerminated => None,
        };
        Self {
            best_param: state.get_best_param().cloned(),
            best_cost: state.get_best_cost(),
            iterations: state.get_iter(),
            reason,
        }
    }
}

/// Convert an argmin run into a [`MinimizeResult`].
///
/// A run that errored out (e.g. a line search that could not find a descent
/// step) falls back to the best point the tracker saw and reports
/// [`ConvergenceStatus::Stalled`].
pub(crate) fn finish<F>(
    name: &str,
    tracker: &Tracker<F>,
    x0: Vec<f64>,
    outcome: Result<RunSummary, Error>,
    started: Instant,
) -> MinimizeResult
where
    F: Fn(&Col<f64>) -> f64,
{
    let fallback = |x0: Vec<f64>| tracker.best().unwrap_or((x0, f64::INFINITY));

    let (solution, objective_value, iterations, mut status) = match outcome {
        Ok(run) => {
            let status = run
                .reason
                .as_ref()
                .map_or(ConvergenceStatus::Stalled, ConvergenceStatus::from);
            let (x, fx) = match run.best_param {
                Some(x) => (x, run.best_cost),
                None => fallback(x0),
            };
            (x, fx, run.iterations as usize, status)
        }
        Err(err) => {
            log::warn!("{name} stopped early: {err}");
            let (x, fx) = fallback(x0);
            (x, fx, 0, ConvergenceStatus::Stalled)
        }
    };

    if !objective_value.is_finite() {
        status = ConvergenceStatus::NumericalError;
    }

    log::debug!(
        "{name} finished: status={}, iterations={}, evaluations={}, f={:.6e}",
        status,
        iterations,
        tracker.calls(),
        objective_value
    );

    MinimizeResult {
        solution: Col::from_fn(solution.len(), |i| solution[i]),
        objective_value,
        iterations,
        function_evaluations: tracker.calls(),
        status,
        elapsed_time: started.elapsed(),
    }
}

/// Copy a column into argmin's parameter type.
pub(crate) fn to_vec(x: &Col<f64>) -> Vec<f64> {
    x.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_converged() {
        assert!(ConvergenceStatus::Converged.is_converged());
        assert!(!ConvergenceStatus::MaxIterations.is_converged());
        assert!(!ConvergenceStatus::TimeLimit.is_converged());
        assert!(!ConvergenceStatus::Stalled.is_converged());
        assert!(!ConvergenceStatus::NumericalError.is_converged());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ConvergenceStatus::Converged.to_string(), "converged");
        assert_eq!(
            ConvergenceStatus::MaxIterations.to_string(),
            "maximum iterations reached"
        );
    }

    #[test]
    fn test_status_from_termination_reason() {
        assert_eq!(
            ConvergenceStatus::from(&TerminationReason::SolverConverged),
            ConvergenceStatus::Converged
        );
        assert_eq!(
            ConvergenceStatus::from(&TerminationReason::MaxItersReached),
            ConvergenceStatus::MaxIterations
        );
        assert_eq!(
            ConvergenceStatus::from(&TerminationReason::Timeout),
            ConvergenceStatus::TimeLimit
        );
        assert_eq!(
            ConvergenceStatus::from(&TerminationReason::Interrupt),
            ConvergenceStatus::Stalled
        );
    }

    #[test]
    fn test_tracker_counts_and_keeps_best() {
        let tracker = Tracker::new(|x: &Col<f64>| (x[0] - 1.0).powi(2));
        tracker.eval(&[3.0]);
        tracker.eval(&[1.5]);
        tracker.eval(&[-2.0]);

        assert_eq!(tracker.calls(), 3);
        let (x, fx) = tracker.best().unwrap();
        assert_eq!(x, vec![1.5]);
        assert!((fx - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_tracker_ignores_non_finite_values() {
        let tracker = Tracker::new(|_: &Col<f64>| f64::NAN);
        tracker.eval(&[0.0]);
        assert!(tracker.best().is_none());
    }

    #[test]
    fn test_gradient_estimate() {
        let tracker = Tracker::new(|x: &Col<f64>| x[0] * x[0] + 3.0 * x[1]);
        let grad = tracker.gradient(&[2.0, -1.0]);
        assert!((grad[0] - 4.0).abs() < 1e-6);
        assert!((grad[1] - 3.0).abs() < 1e-6);
        assert_eq!(tracker.calls(), 4);
    }

    #[test]
    fn test_problem_maps_nan_to_infinity() {
        let tracker = Tracker::new(|_: &Col<f64>| f64::NAN);
        let cost = Problem(&tracker).cost(&vec![0.0]).unwrap();
        assert_eq!(cost, f64::INFINITY);
    }

    #[test]
    fn test_failed_run_falls_back_to_best_point() {
        let tracker = Tracker::new(|x: &Col<f64>| x[0] * x[0]);
        tracker.eval(&[0.5]);

        let result = finish(
            "test",
            &tracker,
            vec![2.0],
            Err(Error::msg("line search failed")),
            Instant::now(),
        );

        assert_eq!(result.status, ConvergenceStatus::Stalled);
        assert_eq!(result.solution[0], 0.5);
        assert!((result.objective_value - 0.25).abs() < 1e-12);
    }
}
