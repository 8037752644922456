//! Regression solvers for the SCAD-penalized linear model.

mod estimator;
mod objective;
mod scad;
mod traits;

pub use estimator::ScadEstimator;
pub use objective::ScadObjective;
pub use scad::{FittedScad, ScadRegressor, ScadRegressorBuilder};
pub use traits::{FittedRegressor, RegressionError, Regressor};
