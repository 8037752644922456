//! Stateful SCAD estimator with an explicit fit-once lifecycle.

use crate::core::ScadOptions;
use crate::solvers::scad::{FittedScad, ScadRegressor};
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use faer::{Col, Mat};

/// Lifecycle of a [`ScadEstimator`].
#[derive(Debug, Clone, Default)]
enum FitState {
    #[default]
    Unfitted,
    Fitted(FittedScad),
}

/// SCAD regression estimator that is fit in place.
///
/// Starts out unfitted. [`fit`](Self::fit) is the only transition to the
/// fitted state and may run once; fitting again requires an explicit
/// [`reset`](Self::reset). Use [`ScadRegressor`] directly for the
/// value-returning `fit -> FittedScad` style.
///
/// # Example
///
/// ```rust,ignore
/// use scad_regress::solvers::ScadEstimator;
///
/// let mut model = ScadEstimator::new(3.7, 0.1);
/// assert!(!model.is_fitted());
///
/// model.fit(&x, &y)?;
/// let predictions = model.predict(&x_new)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScadEstimator {
    regressor: ScadRegressor,
    state: FitState,
}

impl ScadEstimator {
    /// Create an unfitted estimator. Hyperparameters are validated by `fit`.
    pub fn new(a: f64, lambda: f64) -> Self {
        Self::from_options(ScadOptions::scad(a, lambda))
    }

    /// Create an unfitted estimator from full options.
    pub fn from_options(options: ScadOptions) -> Self {
        Self {
            regressor: ScadRegressor::new(options),
            state: FitState::Unfitted,
        }
    }

    /// Options this estimator fits with.
    pub fn options(&self) -> &ScadOptions {
        self.regressor.options()
    }

    /// True iff a previous `fit` succeeded and no `reset` followed.
    pub fn is_fitted(&self) -> bool {
        matches!(self.state, FitState::Fitted(_))
    }

    /// The fitted model, if any.
    pub fn fitted(&self) -> Option<&FittedScad> {
        match &self.state {
            FitState::Fitted(fitted) => Some(fitted),
            FitState::Unfitted => None,
        }
    }

    /// Fit coefficients on `x` (n_samples × n_features) and `y`.
    ///
    /// Fails with [`RegressionError::AlreadyFitted`] when called on a fitted
    /// estimator. On error the estimator stays unfitted.
    pub fn fit(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<&FittedScad, RegressionError> {
        if self.is_fitted() {
            return Err(RegressionError::AlreadyFitted);
        }

        let fitted = self.regressor.fit(x, y)?;
        self.state = FitState::Fitted(fitted);
        self.fitted().ok_or(RegressionError::NotFitted)
    }

    /// Fit with a single feature given as a bare vector.
    pub fn fit_vector(
        &mut self,
        x: &Col<f64>,
        y: &Col<f64>,
    ) -> Result<&FittedScad, RegressionError> {
        self.fit(&crate::utils::column_as_matrix(x), y)
    }

    /// Predict targets for `x`.
    ///
    /// Fails with [`RegressionError::NotFitted`] before a successful `fit`.
    pub fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError> {
        self.fitted()
            .ok_or(RegressionError::NotFitted)?
            .predict(x)
    }

    /// Predict from a single feature given as a bare vector.
    pub fn predict_vector(&self, x: &Col<f64>) -> Result<Col<f64>, RegressionError> {
        self.fitted()
            .ok_or(RegressionError::NotFitted)?
            .predict_vector(x)
    }

    /// Full coefficient vector (intercept first), if fitted.
    pub fn coefficients(&self) -> Option<Col<f64>> {
        self.fitted().map(FittedScad::coefficient_vector)
    }

    /// Discard the fitted coefficients and return to the unfitted state.
    pub fn reset(&mut self) {
        self.state = FitState::Unfitted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> (Mat<f64>, Col<f64>) {
        let x = Mat::from_fn(20, 1, |i, _| i as f64 * 0.25);
        let y = Col::from_fn(20, |i| 1.0 + 2.0 * x[(i, 0)]);
        (x, y)
    }

    #[test]
    fn test_default_hyperparameters() {
        let model = ScadEstimator::default();
        assert!((model.options().a - 2.0).abs() < 1e-12);
        assert!((model.options().lambda - 1.0).abs() < 1e-12);
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_lifecycle() {
        let (x, y) = line();
        let mut model = ScadEstimator::new(3.7, 0.05);

        assert!(model.coefficients().is_none());
        model.fit(&x, &y).expect("fit should succeed");
        assert!(model.is_fitted());
        assert_eq!(model.coefficients().map(|c| c.nrows()), Some(2));

        model.reset();
        assert!(!model.is_fitted());
        assert!(matches!(model.predict(&x), Err(RegressionError::NotFitted)));
    }

    #[test]
    fn test_refit_requires_reset() {
        let (x, y) = line();
        let mut model = ScadEstimator::new(3.7, 0.05);

        model.fit(&x, &y).expect("fit should succeed");
        assert!(matches!(
            model.fit(&x, &y),
            Err(RegressionError::AlreadyFitted)
        ));

        model.reset();
        assert!(model.fit(&x, &y).is_ok());
    }

    #[test]
    fn test_failed_fit_stays_unfitted() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(4, |i| i as f64);
        let mut model = ScadEstimator::new(3.7, 0.05);

        assert!(matches!(
            model.fit(&x, &y),
            Err(RegressionError::DimensionMismatch { x_rows: 5, y_len: 4 })
        ));
        assert!(!model.is_fitted());
    }
}
