//! Shared helpers for design matrices.

mod matrix;

pub use matrix::{all_finite_col, all_finite_mat, column_as_matrix, linear_predictor};
