//! Binary logistic regression with class-balanced weighting.
//!
//! Fits `(1/S)·Σ sᵢ·logloss(yᵢ, σ(w·xᵢ + b)) + ‖w‖²/(2·C·S)` where `sᵢ` is the
//! balanced weight of row i's class and `S = Σ sᵢ`. Solved with Nesterov
//! accelerated gradient descent with adaptive restart on sparse rows.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use sprs::{CsMat, CsVecView};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Label;

const POWER_ITERATIONS: usize = 30;

#[derive(Error, Debug, PartialEq)]
pub enum LogisticRegressionError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Feature matrix has {rows} rows but {labels} labels were given")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("Training data must contain both classes")]
    SingleClass,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LogisticRegressionConfig {
    /// Inverse L2 regularisation strength
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the largest absolute gradient component drops below this
    pub tolerance: f64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-4,
        }
    }
}

/// Fitted model: decision `w·x + b > 0` means `Label::Real`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Array1<f64>,
    intercept: f64,
    n_iter: usize,
    converged: bool,
}

impl LogisticRegression {
    /// Build a model from known weights.
    #[must_use]
    pub fn from_weights(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients: Array1::from(coefficients),
            intercept,
            n_iter: 0,
            converged: true,
        }
    }

    pub fn fit(
        x: &CsMat<f64>,
        labels: &[Label],
        config: &LogisticRegressionConfig,
    ) -> Result<Self, LogisticRegressionError> {
        if !x.is_csr() {
            return Err(LogisticRegressionError::InvalidParameter(
                "feature matrix must be CSR",
            ));
        }
        if x.rows() != labels.len() {
            return Err(LogisticRegressionError::LengthMismatch {
                rows: x.rows(),
                labels: labels.len(),
            });
        }
        if !(config.c > 0.0) {
            return Err(LogisticRegressionError::InvalidParameter("C must be positive"));
        }

        let sample_weights = balanced_sample_weights(labels)?;
        let targets: Vec<f64> = labels.iter().map(|l| l.as_target()).collect();
        let weight_sum: f64 = sample_weights.iter().sum();
        let n_features = x.cols();

        let problem = Problem {
            x,
            targets: &targets,
            sample_weights: &sample_weights,
            weight_sum,
            l2: 1.0 / (config.c * weight_sum),
        };
        let lipschitz = problem.lipschitz_bound();
        let step = 1.0 / lipschitz;
        debug!(lipschitz, n_features, rows = x.rows(), "fitting logistic regression");

        let mut w = Array1::<f64>::zeros(n_features);
        let mut b = 0.0;
        let mut look_w = w.clone();
        let mut look_b = b;
        let mut converged = false;
        let mut n_iter = 0;
        // Momentum counter, reset whenever a step moves against the gradient.
        let mut momentum_step = 0usize;

        for iter in 0..config.max_iter {
            n_iter = iter + 1;
            let (grad_w, grad_b) = problem.gradient(&look_w, look_b);

            let grad_max = grad_w
                .iter()
                .fold(grad_b.abs(), |acc, g| acc.max(g.abs()));
            if grad_max < config.tolerance {
                w = look_w;
                b = look_b;
                converged = true;
                break;
            }

            let next_w = &look_w - &(&grad_w * step);
            let next_b = look_b - step * grad_b;
            let delta_w = &next_w - &w;
            let delta_b = next_b - b;

            if grad_w.dot(&delta_w) + grad_b * delta_b > 0.0 {
                momentum_step = 0;
                look_w = next_w.clone();
                look_b = next_b;
            } else {
                let momentum = momentum_step as f64 / (momentum_step as f64 + 3.0);
                momentum_step += 1;
                look_w = &next_w + &(delta_w * momentum);
                look_b = next_b + momentum * delta_b;
            }
            w = next_w;
            b = next_b;
        }

        if !converged {
            warn!(
                max_iter = config.max_iter,
                "logistic regression did not converge; consider raising max_iter"
            );
        }

        Ok(Self {
            coefficients: w,
            intercept: b,
            n_iter,
            converged,
        })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    #[must_use]
    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Signed distance to the decision boundary; positive means `Real`.
    pub fn decision_function(&self, row: CsVecView<'_, f64>) -> Result<f64, LogisticRegressionError> {
        if row.dim() != self.n_features() {
            return Err(LogisticRegressionError::DimensionMismatch {
                expected: self.n_features(),
                got: row.dim(),
            });
        }
        Ok(dot(&self.coefficients, row) + self.intercept)
    }

    pub fn predict(&self, row: CsVecView<'_, f64>) -> Result<Label, LogisticRegressionError> {
        let decision = self.decision_function(row)?;
        Ok(if decision > 0.0 { Label::Real } else { Label::Fake })
    }

    /// Probability of `Label::Real`.
    pub fn predict_proba(&self, row: CsVecView<'_, f64>) -> Result<f64, LogisticRegressionError> {
        Ok(sigmoid(self.decision_function(row)?))
    }

    /// Fraction of rows whose predicted label matches `labels`.
    pub fn score(&self, x: &CsMat<f64>, labels: &[Label]) -> Result<f64, LogisticRegressionError> {
        if x.rows() != labels.len() {
            return Err(LogisticRegressionError::LengthMismatch {
                rows: x.rows(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Ok(0.0);
        }
        let mut correct = 0usize;
        for (row, expected) in x.outer_iterator().zip(labels) {
            if self.predict(row)? == *expected {
                correct += 1;
            }
        }
        Ok(correct as f64 / labels.len() as f64)
    }
}

/// `n / (2 · n_class)` for every row, so both classes carry equal total weight.
fn balanced_sample_weights(labels: &[Label]) -> Result<Vec<f64>, LogisticRegressionError> {
    let n_real = labels.iter().filter(|l| **l == Label::Real).count();
    let n_fake = labels.len() - n_real;
    if n_real == 0 || n_fake == 0 {
        return Err(LogisticRegressionError::SingleClass);
    }

    let n = labels.len() as f64;
    let real_weight = n / (2.0 * n_real as f64);
    let fake_weight = n / (2.0 * n_fake as f64);
    Ok(labels
        .iter()
        .map(|l| match l {
            Label::Real => real_weight,
            Label::Fake => fake_weight,
        })
        .collect())
}

struct Problem<'a> {
    x: &'a CsMat<f64>,
    targets: &'a [f64],
    sample_weights: &'a [f64],
    weight_sum: f64,
    l2: f64,
}

impl Problem<'_> {
    fn gradient(&self, w: &Array1<f64>, b: f64) -> (Array1<f64>, f64) {
        let mut grad_w = w * self.l2;
        let mut grad_b = 0.0;

        for ((row, &y), &s) in self
            .x
            .outer_iterator()
            .zip(self.targets)
            .zip(self.sample_weights)
        {
            let p = sigmoid(dot(w, row) + b);
            let residual = s * (p - y) / self.weight_sum;
            for (j, &value) in row.iter() {
                grad_w[j] += residual * value;
            }
            grad_b += residual;
        }

        (grad_w, grad_b)
    }

    /// Upper bound on the gradient's Lipschitz constant.
    ///
    /// The loss Hessian is at most `0.25 · Xᵀ S X / S_sum` (bias column
    /// included); its largest eigenvalue is estimated by power iteration and
    /// padded by 10%.
    fn lipschitz_bound(&self) -> f64 {
        let n_features = self.x.cols();
        let mut v_w = Array1::<f64>::ones(n_features);
        let mut v_b = 1.0;
        let mut eigenvalue = 0.0;

        for _ in 0..POWER_ITERATIONS {
            let norm = (v_w.dot(&v_w) + v_b * v_b).sqrt();
            if norm == 0.0 {
                break;
            }
            v_w /= norm;
            v_b /= norm;

            let mut next_w = Array1::<f64>::zeros(n_features);
            let mut next_b = 0.0;
            for (row, &s) in self.x.outer_iterator().zip(self.sample_weights) {
                let u = s * (dot(&v_w, row) + v_b);
                for (j, &value) in row.iter() {
                    next_w[j] += u * value;
                }
                next_b += u;
            }

            eigenvalue = next_w.dot(&v_w) + next_b * v_b;
            v_w = next_w;
            v_b = next_b;
        }

        0.25 * eigenvalue.max(0.0) * 1.1 / self.weight_sum + self.l2
    }
}

fn dot(dense: &Array1<f64>, row: CsVecView<'_, f64>) -> f64 {
    row.iter().map(|(j, &value)| dense[j] * value).sum()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let exp_z = z.exp();
        exp_z / (1.0 + exp_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::CsVec;

    /// Dense rows to CSR.
    fn csr(rows: &[Vec<f64>]) -> CsMat<f64> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut indptr = vec![0];
        let mut indices = Vec::new();
        let mut data = Vec::new();
        for row in rows {
            for (j, &value) in row.iter().enumerate() {
                if value != 0.0 {
                    indices.push(j);
                    data.push(value);
                }
            }
            indptr.push(indices.len());
        }
        CsMat::new((rows.len(), cols), indptr, indices, data)
    }

    fn separable() -> (CsMat<f64>, Vec<Label>) {
        let x = csr(&[
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.8, 0.0],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
            vec![0.0, 0.8],
        ]);
        let y = vec![
            Label::Fake,
            Label::Fake,
            Label::Fake,
            Label::Real,
            Label::Real,
            Label::Real,
        ];
        (x, y)
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(-800.0).is_finite());
    }

    #[test]
    fn learns_a_separable_problem() {
        let (x, y) = separable();
        let model = LogisticRegression::fit(&x, &y, &LogisticRegressionConfig::default()).unwrap();
        assert_eq!(model.score(&x, &y).unwrap(), 1.0);
        assert!(model.coefficients()[0] < 0.0);
        assert!(model.coefficients()[1] > 0.0);
        assert!(model.n_iter() >= 1);
    }

    #[test]
    fn converges_on_a_small_problem() {
        let (x, y) = separable();
        let model = LogisticRegression::fit(&x, &y, &LogisticRegressionConfig::default()).unwrap();
        assert!(model.converged());
        assert!(model.n_iter() < 1000);
    }

    #[test]
    fn balanced_weights_equalise_class_mass() {
        let labels = [Label::Fake, Label::Fake, Label::Fake, Label::Real];
        let weights = balanced_sample_weights(&labels).unwrap();
        let fake_mass: f64 = weights[..3].iter().sum();
        let real_mass = weights[3];
        assert!((fake_mass - real_mass).abs() < 1e-12);
        assert!((fake_mass - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_class_is_rejected() {
        let x = csr(&[vec![1.0], vec![0.5]]);
        let err = LogisticRegression::fit(
            &x,
            &[Label::Real, Label::Real],
            &LogisticRegressionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, LogisticRegressionError::SingleClass);
    }

    #[test]
    fn label_count_must_match_rows() {
        let (x, _) = separable();
        let err = LogisticRegression::fit(&x, &[Label::Real], &LogisticRegressionConfig::default())
            .unwrap_err();
        assert_eq!(err, LogisticRegressionError::LengthMismatch { rows: 6, labels: 1 });
    }

    #[test]
    fn rejects_rows_of_the_wrong_width() {
        let model = LogisticRegression::from_weights(vec![1.0, -1.0], 0.0);
        let row = CsVec::new(3, vec![0], vec![1.0]);
        assert_eq!(
            model.predict(row.view()).unwrap_err(),
            LogisticRegressionError::DimensionMismatch { expected: 2, got: 3 }
        );
    }

    #[test]
    fn decision_sign_picks_the_label() {
        let model = LogisticRegression::from_weights(vec![2.0, -2.0], 0.0);
        let real = CsVec::new(2, vec![0], vec![1.0]);
        let fake = CsVec::new(2, vec![1], vec![1.0]);
        let empty = CsVec::new(2, vec![], vec![]);
        assert_eq!(model.predict(real.view()).unwrap(), Label::Real);
        assert_eq!(model.predict(fake.view()).unwrap(), Label::Fake);
        // Exactly on the boundary falls to the negative class.
        assert_eq!(model.predict(empty.view()).unwrap(), Label::Fake);
        assert!(model.predict_proba(real.view()).unwrap() > 0.5);
    }

    #[test]
    fn score_of_empty_set_is_zero() {
        let model = LogisticRegression::from_weights(vec![1.0], 0.0);
        let x = CsMat::new((0, 1), vec![0], vec![], vec![]);
        assert_eq!(model.score(&x, &[]).unwrap(), 0.0);
    }
}
