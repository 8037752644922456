//! Penalized least-squares objective.

use crate::penalty::ScadPenalty;
use faer::{Col, Mat};

/// Mean squared error plus the SCAD penalty on the slopes.
///
/// Candidate vectors have length `p + 1`: index 0 is the intercept (never
/// penalized), indices `1..=p` are the slopes for the columns of `x`.
#[derive(Debug, Clone, Copy)]
pub struct ScadObjective<'a> {
    x: &'a Mat<f64>,
    y: &'a Col<f64>,
    penalty: ScadPenalty,
}

impl<'a> ScadObjective<'a> {
    /// Bind training data and penalty. `x` and `y` must have matching rows.
    pub fn new(x: &'a Mat<f64>, y: &'a Col<f64>, penalty: ScadPenalty) -> Self {
        Self { x, y, penalty }
    }

    /// Length of the candidate vectors this objective accepts.
    pub fn dimension(&self) -> usize {
        self.x.ncols() + 1
    }

    /// Mean squared error of the affine fit `X · beta[1..] + beta[0]`.
    pub fn mse(&self, beta: &Col<f64>) -> f64 {
        let n_samples = self.x.nrows();
        let n_features = self.x.ncols();

        let mut rss = 0.0;
        for i in 0..n_samples {
            let mut pred = beta[0];
            for j in 0..n_features {
                pred += self.x[(i, j)] * beta[j + 1];
            }
            let r = self.y[i] - pred;
            rss += r * r;
        }

        rss / n_samples as f64
    }

    /// SCAD penalty on `beta[1..]`.
    pub fn penalty(&self, beta: &Col<f64>) -> f64 {
        self.penalty.total_col(beta.as_ref().subrows(1, beta.nrows() - 1))
    }

    /// Objective value `mse + penalty`.
    pub fn value(&self, beta: &Col<f64>) -> f64 {
        self.mse(beta) + self.penalty(beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_data() -> (Mat<f64>, Col<f64>) {
        // y = 1 + 2x exactly
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(5, |i| 1.0 + 2.0 * i as f64);
        (x, y)
    }

    #[test]
    fn test_zero_residual_leaves_only_penalty() {
        let (x, y) = line_data();
        let penalty = ScadPenalty::new(2.0, 1.0);
        let objective = ScadObjective::new(&x, &y, penalty);

        let beta = Col::from_fn(2, |i| if i == 0 { 1.0 } else { 2.0 });
        assert!(objective.mse(&beta).abs() < 1e-12);
        // |2| = aλ lands on the bridge: (8 - 4 - 1) / 2 = 1.5
        assert!((objective.value(&beta) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_intercept_is_not_penalized() {
        let (x, y) = line_data();
        let objective = ScadObjective::new(&x, &y, ScadPenalty::new(2.0, 1.0));

        let beta = Col::from_fn(2, |i| if i == 0 { 100.0 } else { 0.0 });
        assert_eq!(objective.penalty(&beta), 0.0);
    }

    #[test]
    fn test_mse_at_zero() {
        let (x, y) = line_data();
        let objective = ScadObjective::new(&x, &y, ScadPenalty::new(2.0, 0.5));

        // y = [1, 3, 5, 7, 9]; mean of squares = 165 / 5
        let beta = Col::zeros(2);
        assert!((objective.value(&beta) - 33.0).abs() < 1e-12);
        assert_eq!(objective.dimension(), 2);
    }

    #[test]
    fn test_every_slope_is_penalized() {
        let x = Mat::from_fn(3, 3, |i, j| (i * j) as f64);
        let y = Col::zeros(3);
        let penalty = ScadPenalty::new(3.0, 1.0);
        let objective = ScadObjective::new(&x, &y, penalty);

        let beta = Col::from_fn(4, |i| if i == 0 { 7.0 } else { 0.5 });
        assert!((objective.penalty(&beta) - 1.5).abs() < 1e-12);
        assert_eq!(objective.penalty(&beta), penalty.total(&[0.5, 0.5, 0.5]));
    }
}
