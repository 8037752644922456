//! Linear regression with the smoothly clipped absolute deviation (SCAD) penalty.
//!
//! This library provides an sklearn-style estimator that fits an intercept
//! and slopes by minimizing mean squared error plus the SCAD penalty with a
//! general-purpose numerical minimizer, then predicts on new data.
//!
//! # Example
//!
//! ```rust,ignore
//! use scad_regress::prelude::*;
//!
//! // Fit a SCAD model
//! let fitted = ScadRegressor::builder()
//!     .a(3.7)
//!     .lambda(0.1)
//!     .build()
//!     .fit(&x, &y)?;
//!
//! // Make predictions
//! let predictions = fitted.predict(&x_new)?;
//!
//! // Intercept first, then one slope per feature
//! println!("β = {:?}", fitted.coefficient_vector());
//!
//! // Or keep the fit-once state on a single estimator value
//! let mut model = ScadEstimator::new(3.7, 0.1);
//! model.fit(&x, &y)?;
//! assert!(model.is_fitted());
//! ```

pub mod core;
pub mod optim;
pub mod penalty;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        MinimizerKind, OptionsError, RegressionResult, ScadOptions, ScadOptionsBuilder,
    };
    pub use crate::optim::{Bfgs, ConvergenceStatus, MinimizeResult, Minimizer, NelderMead};
    pub use crate::penalty::ScadPenalty;
    pub use crate::solvers::{
        FittedRegressor, FittedScad, RegressionError, Regressor, ScadEstimator, ScadObjective,
        ScadRegressor, ScadRegressorBuilder,
    };
}

pub use crate::core::{MinimizerKind, OptionsError, RegressionResult, ScadOptions};
pub use crate::optim::ConvergenceStatus;
pub use crate::penalty::ScadPenalty;
pub use crate::solvers::{
    FittedRegressor, FittedScad, RegressionError, Regressor, ScadEstimator, ScadRegressor,
};
