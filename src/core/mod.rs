//! Core types for penalized regression.

mod options;
mod result;

pub use options::{MinimizerKind, OptionsError, ScadOptions, ScadOptionsBuilder};
pub use result::RegressionResult;
