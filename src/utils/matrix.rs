//! Matrix utility functions.

use faer::{Col, Mat};

/// View a feature vector as a single-column design matrix.
pub fn column_as_matrix(x: &Col<f64>) -> Mat<f64> {
    Mat::from_fn(x.nrows(), 1, |i, _| x[i])
}

/// Apply the affine map `X · slopes + intercept`.
///
/// `x` must have as many columns as `slopes` has rows.
pub fn linear_predictor(x: &Mat<f64>, slopes: &Col<f64>, intercept: f64) -> Col<f64> {
    let n_samples = x.nrows();
    let n_features = x.ncols();
    let mut predictions = Col::zeros(n_samples);

    for i in 0..n_samples {
        let mut pred = intercept;
        for j in 0..n_features {
            pred += x[(i, j)] * slopes[j];
        }
        predictions[i] = pred;
    }

    predictions
}

/// Check that every entry of a matrix is finite.
pub fn all_finite_mat(x: &Mat<f64>) -> bool {
    (0..x.ncols()).all(|j| (0..x.nrows()).all(|i| x[(i, j)].is_finite()))
}

/// Check that every entry of a vector is finite.
pub fn all_finite_col(y: &Col<f64>) -> bool {
    y.iter().all(|v| v.is_finite())
}
