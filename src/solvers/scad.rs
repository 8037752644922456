//! SCAD-penalized linear regression solver.

use crate::core::{MinimizerKind, RegressionResult, ScadOptions, ScadOptionsBuilder};
use crate::optim::{Bfgs, ConvergenceStatus, Minimizer, NelderMead};
use crate::penalty::ScadPenalty;
use crate::solvers::objective::ScadObjective;
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{all_finite_col, all_finite_mat, column_as_matrix, linear_predictor};
use faer::{Col, Mat};
use std::time::Duration;

/// Linear regression with the smoothly clipped absolute deviation penalty.
///
/// Minimizes: (1/n)||y - Xβ - β₀||² + Σⱼ p_{a,λ}(βⱼ)
///
/// Where p is the SCAD penalty (see [`ScadPenalty`]). The intercept β₀ is
/// never penalized. The objective is nonconvex, so it is handed to a
/// general-purpose [`Minimizer`] started from the all-zero vector.
///
/// # Example
///
/// ```rust,ignore
/// use scad_regress::solvers::{FittedRegressor, Regressor, ScadRegressor};
/// use faer::{Mat, Col};
///
/// let x = Mat::from_fn(100, 2, |i, j| ((i + j) as f64) * 0.01);
/// let y = Col::from_fn(100, |i| 1.0 + 2.0 * x[(i, 0)]);
///
/// let fitted = ScadRegressor::builder()
///     .a(3.7)
///     .lambda(0.1)
///     .build()
///     .fit(&x, &y)?;
///
/// println!("Coefficients: {:?}", fitted.coefficient_vector());
/// ```
#[derive(Debug, Clone)]
pub struct ScadRegressor {
    options: ScadOptions,
}

impl ScadRegressor {
    /// Create a new SCAD regressor with the given options.
    pub fn new(options: ScadOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> ScadRegressorBuilder {
        ScadRegressorBuilder::default()
    }

    /// Options this regressor fits with.
    pub fn options(&self) -> &ScadOptions {
        &self.options
    }

    /// Penalty built from the configured hyperparameters.
    pub fn penalty(&self) -> ScadPenalty {
        ScadPenalty::new(self.options.a, self.options.lambda)
    }

    /// Fit with a single feature given as a bare vector.
    pub fn fit_vector(&self, x: &Col<f64>, y: &Col<f64>) -> Result<FittedScad, RegressionError> {
        self.fit(&column_as_matrix(x), y)
    }

    /// Fit using a caller-supplied minimizer instead of the configured one.
    ///
    /// The iteration and time budgets of `options` are not applied; the
    /// minimizer carries its own.
    pub fn fit_with<M: Minimizer>(
        &self,
        minimizer: &M,
        x: &Mat<f64>,
        y: &Col<f64>,
    ) -> Result<FittedScad, RegressionError> {
        self.validate(x, y)?;

        let n_samples = x.nrows();
        let n_features = x.ncols();
        let objective = ScadObjective::new(x, y, self.penalty());

        log::debug!(
            "Fitting SCAD regression: n={}, p={}, a={}, lambda={}",
            n_samples,
            n_features,
            self.options.a,
            self.options.lambda
        );

        let x0 = Col::zeros(objective.dimension());
        let outcome = minimizer.minimize(|beta| objective.value(beta), x0);

        if outcome.status == ConvergenceStatus::NumericalError
            || !outcome.objective_value.is_finite()
        {
            return Err(RegressionError::NumericalError(format!(
                "objective is not finite at the solution (value {})",
                outcome.objective_value
            )));
        }

        if !outcome.status.is_converged() {
            if self.options.require_convergence {
                return Err(RegressionError::ConvergenceFailed {
                    iterations: outcome.iterations,
                });
            }
            log::warn!(
                "SCAD minimizer did not converge ({}) after {} iterations; \
                 keeping the best point found (objective {:.6e})",
                outcome.status,
                outcome.iterations,
                outcome.objective_value
            );
        }

        let beta = outcome.solution;
        let intercept = beta[0];
        let coefficients = Col::from_fn(n_features, |j| beta[j + 1]);

        let fitted_values = linear_predictor(x, &coefficients, intercept);
        let residuals = Col::from_fn(n_samples, |i| y[i] - fitted_values[i]);

        let mut result = RegressionResult::empty(n_features, n_samples);
        result.coefficients = coefficients;
        result.intercept = intercept;
        result.fitted_values = fitted_values;
        result.residuals = residuals;
        result.n_parameters = n_features + 1;
        result.mse = objective.mse(&beta);
        result.rmse = result.mse.sqrt();
        result.penalty = objective.penalty(&beta);
        result.objective_value = outcome.objective_value;
        result.iterations = outcome.iterations;
        result.function_evaluations = outcome.function_evaluations;
        result.status = outcome.status;
        self.fill_fit_statistics(&mut result);

        log::debug!(
            "SCAD fit done: status={}, objective={:.6e}, mse={:.6e}, penalty={:.6e}, elapsed={:?}",
            result.status,
            result.objective_value,
            result.mse,
            result.penalty,
            outcome.elapsed_time
        );

        Ok(FittedScad {
            options: self.options.clone(),
            result,
        })
    }

    fn validate(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
        self.options.validate()?;

        if x.nrows() != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.nrows(),
            });
        }

        if x.ncols() == 0 {
            return Err(RegressionError::NoFeatures);
        }

        if x.nrows() < 1 {
            return Err(RegressionError::InsufficientObservations {
                needed: 1,
                got: x.nrows(),
            });
        }

        if !all_finite_mat(x) || !all_finite_col(y) {
            return Err(RegressionError::NonFiniteInput);
        }

        Ok(())
    }

    /// R² and adjusted R² from the stored residuals.
    fn fill_fit_statistics(&self, result: &mut RegressionResult) {
        let n = result.n_observations;
        let tss = result.tss();
        let rss = result.rss();

        result.r_squared = if tss > 0.0 {
            1.0 - rss / tss
        } else if rss < 1e-10 {
            1.0
        } else {
            0.0
        };

        let df_total = n.saturating_sub(1) as f64;
        let df_resid = result.residual_df() as f64;
        result.adj_r_squared = if df_resid > 0.0 && df_total > 0.0 {
            1.0 - (1.0 - result.r_squared) * df_total / df_resid
        } else {
            f64::NAN
        };
    }
}

impl Default for ScadRegressor {
    /// `a = 2.0`, `lambda = 1.0`, Nelder-Mead.
    fn default() -> Self {
        Self::new(ScadOptions::default())
    }
}

impl Regressor for ScadRegressor {
    type Fitted = FittedScad;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let options = &self.options;
        match options.minimizer {
            MinimizerKind::NelderMead => {
                let minimizer = NelderMead::new(options.max_iterations, options.f_tolerance)
                    .with_time_limit(options.time_limit);
                self.fit_with(&minimizer, x, y)
            }
            MinimizerKind::Bfgs => {
                let minimizer = Bfgs::new(
                    options.max_iterations,
                    options.gradient_tolerance,
                    options.tolerance,
                )
                .with_time_limit(options.time_limit);
                self.fit_with(&minimizer, x, y)
            }
        }
    }
}

/// A fitted SCAD regression model.
#[derive(Debug, Clone)]
pub struct FittedScad {
    options: ScadOptions,
    result: RegressionResult,
}

impl FittedScad {
    /// Get the options used to fit this model.
    pub fn options(&self) -> &ScadOptions {
        &self.options
    }

    /// Get the curvature transition parameter.
    pub fn a(&self) -> f64 {
        self.options.a
    }

    /// Get the penalty strength.
    pub fn lambda(&self) -> f64 {
        self.options.lambda
    }

    /// Number of features the model was fit on.
    pub fn n_features(&self) -> usize {
        self.result.coefficients.nrows()
    }

    /// Full coefficient vector of length `p + 1`, intercept first.
    pub fn coefficient_vector(&self) -> Col<f64> {
        let slopes = &self.result.coefficients;
        let intercept = self.result.intercept;
        Col::from_fn(slopes.nrows() + 1, |i| {
            if i == 0 {
                intercept
            } else {
                slopes[i - 1]
            }
        })
    }

    /// Count non-zero slopes.
    pub fn n_nonzero(&self) -> usize {
        self.result
            .coefficients
            .iter()
            .filter(|&&c| c.abs() > 1e-10)
            .count()
    }

    /// How the minimizer terminated.
    pub fn status(&self) -> ConvergenceStatus {
        self.result.status
    }

    /// Whether the minimizer met its convergence criteria.
    pub fn converged(&self) -> bool {
        self.result.converged()
    }

    /// Predict from a single feature given as a bare vector.
    pub fn predict_vector(&self, x: &Col<f64>) -> Result<Col<f64>, RegressionError> {
        self.predict(&column_as_matrix(x))
    }
}

impl FittedRegressor for FittedScad {
    fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError> {
        if x.ncols() != self.n_features() {
            return Err(RegressionError::FeatureMismatch {
                expected: self.n_features(),
                got: x.ncols(),
            });
        }

        let intercept = self.result.intercept;
        Ok(linear_predictor(x, &self.result.coefficients, intercept))
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }
}

/// Builder for `ScadRegressor`.
#[derive(Debug, Clone, Default)]
pub struct ScadRegressorBuilder {
    builder: ScadOptionsBuilder,
}

impl ScadRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the curvature transition parameter `a` (> 1).
    pub fn a(mut self, a: f64) -> Self {
        self.builder = self.builder.a(a);
        self
    }

    /// Set the penalty strength `lambda` (>= 0).
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.builder = self.builder.lambda(lambda);
        self
    }

    /// Set the minimizer backend.
    pub fn minimizer(mut self, minimizer: MinimizerKind) -> Self {
        self.builder = self.builder.minimizer(minimizer);
        self
    }

    /// Set maximum minimizer iterations.
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.builder = self.builder.max_iterations(max_iter);
        self
    }

    /// Set the objective-change convergence tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.tolerance(tol);
        self
    }

    /// Set the objective-spread convergence tolerance.
    pub fn f_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.f_tolerance(tol);
        self
    }

    /// Set the gradient-norm convergence tolerance.
    pub fn gradient_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.gradient_tolerance(tol);
        self
    }

    /// Set a wall-clock budget for each fit.
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.builder = self.builder.time_limit(limit);
        self
    }

    /// Fail instead of warning when the minimizer does not converge.
    pub fn require_convergence(mut self, require: bool) -> Self {
        self.builder = self.builder.require_convergence(require);
        self
    }

    /// Build the SCAD regressor. Options are validated when fitting.
    pub fn build(self) -> ScadRegressor {
        ScadRegressor::new(self.builder.build_unchecked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scad_basic() {
        let x = Mat::from_fn(40, 1, |i, _| i as f64 * 0.1);
        let y = Col::from_fn(40, |i| 1.0 + 2.0 * x[(i, 0)]);

        let model = ScadRegressor::builder().a(3.7).lambda(0.05).build();
        let fitted = model.fit(&x, &y).expect("model should fit");

        assert!(fitted.r_squared() > 0.99);
        assert!((fitted.intercept() - 1.0).abs() < 0.1);
        assert!((fitted.coefficients()[0] - 2.0).abs() < 0.1);
        assert_eq!(fitted.coefficient_vector().nrows(), 2);
    }

    #[test]
    fn test_predict_feature_mismatch() {
        let x = Mat::from_fn(10, 2, |i, j| (((i + 1) * (j + 2)) % 7) as f64);
        let y = Col::from_fn(10, |i| i as f64);

        let fitted = ScadRegressor::builder()
            .lambda(0.1)
            .build()
            .fit(&x, &y)
            .expect("model should fit");

        let x_bad = Mat::from_fn(3, 3, |i, j| (i + j) as f64);
        assert!(matches!(
            fitted.predict(&x_bad),
            Err(RegressionError::FeatureMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn test_rejects_invalid_options() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(5, |i| i as f64);

        let result = ScadRegressor::builder().a(0.5).build().fit(&x, &y);
        assert!(matches!(result, Err(RegressionError::InvalidOptions(_))));
    }

    #[test]
    fn test_coefficient_vector_layout() {
        let x = Mat::from_fn(30, 2, |i, j| ((i * (j + 2)) % 7) as f64);
        let y = Col::from_fn(30, |i| 0.5 + x[(i, 0)] - 3.0 * x[(i, 1)]);

        let fitted = ScadRegressor::builder()
            .lambda(0.01)
            .build()
            .fit(&x, &y)
            .expect("model should fit");

        let beta = fitted.coefficient_vector();
        assert_eq!(beta[0], fitted.intercept());
        assert_eq!(beta[1], fitted.coefficients()[0]);
        assert_eq!(beta[2], fitted.coefficients()[1]);
    }
}
