//! Smoothly clipped absolute deviation (SCAD) penalty.

use faer::ColRef;

/// SCAD penalty with curvature parameter `a` and strength `lambda`.
///
/// For each coefficient β the penalty is
///
/// ```text
/// p(β) = λ|β|                              if |β| ≤ λ
///      = (2aλ|β| − β² − λ²) / (2(a − 1))   if λ < |β| ≤ aλ
///      = λ²(a + 1) / 2                     if |β| > aλ
/// ```
///
/// The penalty grows like the Lasso near zero, bends through a quadratic
/// bridge, and saturates for large coefficients so they are not shrunk.
///
/// # Example
///
/// ```rust,ignore
/// use scad_regress::penalty::ScadPenalty;
///
/// let penalty = ScadPenalty::new(3.7, 1.0);
/// assert_eq!(penalty.value(0.5), 0.5);
/// assert_eq!(penalty.value(10.0), penalty.saturation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScadPenalty {
    a: f64,
    lambda: f64,
}

impl ScadPenalty {
    /// Create a penalty. Expects `a > 1` and `lambda >= 0`; callers validate.
    pub fn new(a: f64, lambda: f64) -> Self {
        Self { a, lambda }
    }

    /// Curvature transition parameter.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Penalty strength.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Constant value of the penalty beyond `aλ`.
    pub fn saturation(&self) -> f64 {
        self.lambda * self.lambda * (self.a + 1.0) / 2.0
    }

    /// Penalty contribution of a single coefficient.
    pub fn value(&self, beta: f64) -> f64 {
        let abs_beta = beta.abs();
        let a = self.a;
        let lambda = self.lambda;

        if abs_beta <= lambda {
            lambda * abs_beta
        } else if abs_beta <= a * lambda {
            (2.0 * a * lambda * abs_beta - abs_beta * abs_beta - lambda * lambda)
                / (2.0 * (a - 1.0))
        } else {
            self.saturation()
        }
    }

    /// Derivative of the penalty with respect to `|β|`.
    ///
    /// Equals λ on the linear region, `(aλ − |β|)/(a − 1)` on the bridge
    /// and zero once the penalty has saturated.
    pub fn derivative(&self, beta: f64) -> f64 {
        let abs_beta = beta.abs();
        if abs_beta <= self.lambda {
            self.lambda
        } else if abs_beta <= self.a * self.lambda {
            (self.a * self.lambda - abs_beta) / (self.a - 1.0)
        } else {
            0.0
        }
    }

    /// Total penalty over a slice of slope coefficients.
    pub fn total(&self, betas: &[f64]) -> f64 {
        betas.iter().map(|&b| self.value(b)).sum()
    }

    /// Total penalty over a coefficient column.
    pub fn total_col(&self, betas: ColRef<'_, f64>) -> f64 {
        betas.iter().map(|&b| self.value(b)).sum()
    }
}
