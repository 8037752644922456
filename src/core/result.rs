//! Regression result structures.

use crate::optim::ConvergenceStatus;
use faer::Col;

/// Complete result from a penalized regression fit.
///
/// Contains coefficients, fit statistics on the training data, and a summary
/// of the minimizer run that produced them.
#[derive(Debug, Clone)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// Estimated slope coefficients (excluding intercept).
    pub coefficients: Col<f64>,

    /// Intercept term (unpenalized).
    pub intercept: f64,

    /// Residuals (y - fitted_values).
    pub residuals: Col<f64>,

    /// Fitted values (predictions on training data).
    pub fitted_values: Col<f64>,

    /// Number of parameters (slopes plus intercept).
    pub n_parameters: usize,

    /// Number of observations.
    pub n_observations: usize,

    // ========== Fit Statistics ==========
    /// Coefficient of determination (R²).
    pub r_squared: f64,

    /// Adjusted R².
    pub adj_r_squared: f64,

    /// Mean squared error on the training data (RSS / n).
    pub mse: f64,

    /// Root mean squared error.
    pub rmse: f64,

    /// SCAD penalty evaluated at the fitted slopes.
    pub penalty: f64,

    /// Minimized objective value (mse + penalty).
    pub objective_value: f64,

    // ========== Minimizer Summary ==========
    /// Minimizer iterations performed.
    pub iterations: usize,

    /// Objective evaluations performed.
    pub function_evaluations: usize,

    /// How the minimizer terminated.
    pub status: ConvergenceStatus,
}

impl RegressionResult {
    /// Create a new empty result (used internally by solvers).
    pub(crate) fn empty(n_features: usize, n_observations: usize) -> Self {
        Self {
            coefficients: Col::zeros(n_features),
            intercept: 0.0,
            residuals: Col::zeros(n_observations),
            fitted_values: Col::zeros(n_observations),
            n_parameters: 0,
            n_observations,
            r_squared: 0.0,
            adj_r_squared: 0.0,
            mse: 0.0,
            rmse: 0.0,
            penalty: 0.0,
            objective_value: 0.0,
            iterations: 0,
            function_evaluations: 0,
            status: ConvergenceStatus::MaxIterations,
        }
    }

    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Whether the minimizer met its convergence criteria.
    pub fn converged(&self) -> bool {
        self.status.is_converged()
    }

    /// Total sum of squares (TSS).
    pub fn tss(&self) -> f64 {
        let y_mean = self.fitted_values.iter().sum::<f64>() / self.n_observations as f64
            + self.residuals.iter().sum::<f64>() / self.n_observations as f64;

        self.residuals
            .iter()
            .zip(self.fitted_values.iter())
            .map(|(&r, &f)| {
                let y = f + r;
                (y - y_mean).powi(2)
            })
            .sum()
    }

    /// Residual sum of squares (RSS).
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|&r| r.powi(2)).sum()
    }
}
