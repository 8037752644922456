//! Estimator options and configuration.

use std::time::Duration;
use thiserror::Error;

/// Numerical minimizer used to fit the penalized objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinimizerKind {
    /// Nelder-Mead simplex search (default, derivative-free).
    ///
    /// Robust to the kink of the SCAD penalty at zero.
    #[default]
    NelderMead,
    /// BFGS quasi-Newton with a central-difference gradient.
    Bfgs,
}

/// Configuration options for the SCAD estimator.
#[derive(Debug, Clone)]
pub struct ScadOptions {
    /// Curvature transition parameter `a` (must be > 1, default: 2.0).
    pub a: f64,
    /// Penalty strength `lambda` (must be >= 0, default: 1.0).
    pub lambda: f64,
    /// Minimizer backend (default: Nelder-Mead).
    pub minimizer: MinimizerKind,
    /// Maximum minimizer iterations (default: 5000).
    pub max_iterations: usize,
    /// Convergence tolerance on the objective change between iterations (BFGS).
    pub tolerance: f64,
    /// Convergence tolerance on the standard deviation of objective values
    /// over the simplex (Nelder-Mead).
    pub f_tolerance: f64,
    /// Convergence tolerance on the gradient norm (BFGS).
    pub gradient_tolerance: f64,
    /// Optional wall-clock budget for a single fit.
    pub time_limit: Option<Duration>,
    /// Fail the fit instead of warning when the minimizer does not converge.
    pub require_convergence: bool,
}

impl Default for ScadOptions {
    fn default() -> Self {
        Self {
            a: 2.0,
            lambda: 1.0,
            minimizer: MinimizerKind::NelderMead,
            max_iterations: 5000,
            tolerance: 1e-12,
            f_tolerance: 1e-10,
            gradient_tolerance: 1e-6,
            time_limit: None,
            require_convergence: false,
        }
    }
}

/// Errors that can occur when validating estimator options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("a must be greater than 1, got {0}")]
    InvalidA(f64),
    #[error("lambda must be finite and non-negative, got {0}")]
    InvalidLambda(f64),
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
    #[error("max_iterations must be at least 1, got {0}")]
    InvalidMaxIterations(usize),
    #[error("time_limit must be non-zero")]
    InvalidTimeLimit,
}

impl ScadOptions {
    /// Create a new builder for estimator options.
    pub fn builder() -> ScadOptionsBuilder {
        ScadOptionsBuilder::default()
    }

    /// Create options with the given penalty hyperparameters and default minimizer settings.
    pub fn scad(a: f64, lambda: f64) -> Self {
        Self {
            a,
            lambda,
            ..Default::default()
        }
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        // Written so that NaN fails too.
        if !(self.a > 1.0) || !self.a.is_finite() {
            return Err(OptionsError::InvalidA(self.a));
        }
        if !(self.lambda >= 0.0) || !self.lambda.is_finite() {
            return Err(OptionsError::InvalidLambda(self.lambda));
        }
        if !(self.tolerance > 0.0) {
            return Err(OptionsError::InvalidTolerance(self.tolerance));
        }
        if !(self.f_tolerance > 0.0) {
            return Err(OptionsError::InvalidTolerance(self.f_tolerance));
        }
        if !(self.gradient_tolerance > 0.0) {
            return Err(OptionsError::InvalidTolerance(self.gradient_tolerance));
        }
        if self.max_iterations < 1 {
            return Err(OptionsError::InvalidMaxIterations(self.max_iterations));
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err(OptionsError::InvalidTimeLimit);
        }
        Ok(())
    }
}

/// Builder for `ScadOptions`.
#[derive(Debug, Clone, Default)]
pub struct ScadOptionsBuilder {
    options: ScadOptions,
}

impl ScadOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the curvature transition parameter `a`.
    pub fn a(mut self, a: f64) -> Self {
        self.options.a = a;
        self
    }

    /// Set the penalty strength `lambda`.
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.options.lambda = lambda;
        self
    }

    /// Set the minimizer backend.
    pub fn minimizer(mut self, minimizer: MinimizerKind) -> Self {
        self.options.minimizer = minimizer;
        self
    }

    /// Set the maximum number of minimizer iterations.
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.options.max_iterations = max_iter;
        self
    }

    /// Set the objective-change convergence tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.options.tolerance = tol;
        self
    }

    /// Set the objective-spread convergence tolerance.
    pub fn f_tolerance(mut self, tol: f64) -> Self {
        self.options.f_tolerance = tol;
        self
    }

    /// Set the gradient-norm convergence tolerance.
    pub fn gradient_tolerance(mut self, tol: f64) -> Self {
        self.options.gradient_tolerance = tol;
        self
    }

    /// Set a wall-clock budget for each fit.
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.options.time_limit = Some(limit);
        self
    }

    /// Turn minimizer non-convergence into a fit error.
    pub fn require_convergence(mut self, require: bool) -> Self {
        self.options.require_convergence = require;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<ScadOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> ScadOptions {
        self.options
    }
}
