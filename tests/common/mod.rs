//! Common test utilities and data generators.
#![allow(dead_code)]

use faer::{Col, Mat};

/// Deterministic uniform draws in [-1, 1) from a linear congruential generator.
pub fn lcg_uniform(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            // Top 53 bits as a fraction in [0, 1)
            ((state >> 11) as f64) / ((1u64 << 53) as f64) * 2.0 - 1.0
        })
        .collect()
}

/// Generate linear data: y = intercept + X * beta + noise.
///
/// Features are uniform on [-1, 1); true coefficients are taken from `beta`.
pub fn generate_linear_data(
    n_samples: usize,
    beta: &[f64],
    intercept: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>) {
    let n_features = beta.len();
    let draws = lcg_uniform(n_samples * (n_features + 1), seed);

    let mut x = Mat::zeros(n_samples, n_features);
    let mut y = Col::zeros(n_samples);

    for i in 0..n_samples {
        let row = &draws[i * (n_features + 1)..(i + 1) * (n_features + 1)];
        let mut yi = intercept;
        for j in 0..n_features {
            x[(i, j)] = row[j];
            yi += row[j] * beta[j];
        }
        y[i] = yi + noise_std * row[n_features];
    }

    (x, y)
}

/// Ordinary least squares with intercept via the normal equations.
///
/// Returns `[intercept, slope_1, ..., slope_p]`.
pub fn least_squares(x: &Mat<f64>, y: &Col<f64>) -> Vec<f64> {
    let n = x.nrows();
    let k = x.ncols() + 1;
    let design = |i: usize, j: usize| if j == 0 { 1.0 } else { x[(i, j - 1)] };

    // Augmented system [ZᵀZ | Zᵀy]
    let mut a = vec![vec![0.0; k + 1]; k];
    for r in 0..k {
        for c in 0..k {
            a[r][c] = (0..n).map(|i| design(i, r) * design(i, c)).sum();
        }
        a[r][k] = (0..n).map(|i| design(i, r) * y[i]).sum();
    }

    // Gaussian elimination with partial pivoting
    for col in 0..k {
        let pivot = (col..k)
            .max_by(|&p, &q| a[p][col].abs().total_cmp(&a[q][col].abs()))
            .unwrap();
        a.swap(col, pivot);
        for row in (col + 1)..k {
            let factor = a[row][col] / a[col][col];
            for c in col..=k {
                a[row][c] -= factor * a[col][c];
            }
        }
    }

    let mut solution = vec![0.0; k];
    for row in (0..k).rev() {
        let tail: f64 = ((row + 1)..k).map(|c| a[row][c] * solution[c]).sum();
        solution[row] = (a[row][k] - tail) / a[row][row];
    }
    solution
}

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
