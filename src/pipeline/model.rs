//! Class-weighted logistic regression
//!
//! Full-batch gradient descent on the weighted mean log-loss with an L2
//! penalty on the coefficients (the intercept is not penalized). Each
//! class's rows are weighted by `n / (2 * n_class)` so the rarer class
//! contributes as much to the loss as the common one.

use faer::Mat;
use serde::Serialize;

use super::config::{DEFAULT_L2_PENALTY, DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
use super::error::{PipelineError, PipelineResult};
use super::target::count_classes;

/// Probability at or above which a row is predicted as class 1
const DECISION_THRESHOLD: f64 = 0.5;

/// How a fit ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitOutcome {
    /// Gradient norm fell below the tolerance within the iteration budget
    pub converged: bool,
    /// Gradient evaluations performed
    pub iterations: usize,
    /// Gradient norm at the last evaluation
    pub gradient_norm: f64,
}

/// Binary logistic regression with balanced class weights
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    pub max_iter: usize,
    pub tolerance: f64,
    pub learning_rate: f64,
    pub l2_penalty: f64,
    coefficients: Option<Mat<f64>>,
    intercept: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
            learning_rate: DEFAULT_LEARNING_RATE,
            l2_penalty: DEFAULT_L2_PENALTY,
            coefficients: None,
            intercept: 0.0,
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_l2_penalty(mut self, l2_penalty: f64) -> Self {
        self.l2_penalty = l2_penalty;
        self
    }

    /// Human-readable model description for reports
    pub fn describe(&self) -> String {
        "Logistic regression (class_weight='balanced')".to_string()
    }

    /// Fit on `x` (`n_rows x n_features`) and 0/1 labels `y`.
    ///
    /// Running out of iterations is not an error: the last parameters are
    /// kept, a warning is logged and the returned outcome has
    /// `converged == false`.
    pub fn fit(&mut self, x: &Mat<f64>, y: &[i32]) -> PipelineResult<FitOutcome> {
        let n = x.nrows();
        let p = x.ncols();

        if n != y.len() {
            return Err(PipelineError::RowCountMismatch {
                column: "label".to_string(),
                expected: n,
                actual: y.len(),
            });
        }
        if n == 0 {
            return Err(PipelineError::EmptyDataset);
        }

        let class_weights = balanced_class_weights(y);
        let sample_weights: Vec<f64> = y
            .iter()
            .map(|&label| class_weights[usize::from(label == 1)])
            .collect();
        let total_weight: f64 = sample_weights.iter().sum();

        let mut beta = Mat::<f64>::zeros(p, 1);
        let mut bias = 0.0;
        let mut outcome = FitOutcome {
            converged: false,
            iterations: 0,
            gradient_norm: f64::INFINITY,
        };

        for iter in 0..self.max_iter {
            let linear = x * &beta;

            let mut residual = Mat::<f64>::zeros(n, 1);
            let mut grad_bias = 0.0;
            for i in 0..n {
                let prob = sigmoid(linear[(i, 0)] + bias);
                let r = sample_weights[i] * (prob - f64::from(y[i])) / total_weight;
                residual[(i, 0)] = r;
                grad_bias += r;
            }

            let mut grad = x.transpose() * &residual;
            let mut norm_sq = grad_bias * grad_bias;
            for j in 0..p {
                grad[(j, 0)] += self.l2_penalty * beta[(j, 0)];
                norm_sq += grad[(j, 0)] * grad[(j, 0)];
            }

            outcome.iterations = iter + 1;
            outcome.gradient_norm = norm_sq.sqrt();
            if outcome.gradient_norm < self.tolerance {
                outcome.converged = true;
                break;
            }

            for j in 0..p {
                beta[(j, 0)] -= self.learning_rate * grad[(j, 0)];
            }
            bias -= self.learning_rate * grad_bias;
        }

        if outcome.converged {
            log::info!(
                "Logistic regression converged after {} iteration(s)",
                outcome.iterations
            );
        } else {
            log::warn!(
                "Logistic regression did not converge within {} iteration(s) \
                 (gradient norm {:.3e}); using last parameters",
                self.max_iter,
                outcome.gradient_norm
            );
        }

        self.coefficients = Some(beta);
        self.intercept = bias;

        Ok(outcome)
    }

    /// Probability of class 1 for each row
    pub fn predict_proba(&self, x: &Mat<f64>) -> PipelineResult<Vec<f64>> {
        let beta = self
            .coefficients
            .as_ref()
            .ok_or(PipelineError::ModelNotFitted)?;

        if x.ncols() != beta.nrows() {
            return Err(PipelineError::FeatureCountMismatch {
                expected: beta.nrows(),
                actual: x.ncols(),
            });
        }

        let linear = x * beta;
        Ok((0..x.nrows())
            .map(|i| sigmoid(linear[(i, 0)] + self.intercept))
            .collect())
    }

    pub fn predict(&self, x: &Mat<f64>) -> PipelineResult<Vec<i32>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|prob| i32::from(prob >= DECISION_THRESHOLD))
            .collect())
    }

    pub fn coefficients(&self) -> Option<Vec<f64>> {
        self.coefficients
            .as_ref()
            .map(|beta| (0..beta.nrows()).map(|j| beta[(j, 0)]).collect())
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Balanced weights `[w0, w1]` with `w_c = n / (2 * n_c)`; 0.0 for an absent class.
pub fn balanced_class_weights(labels: &[i32]) -> [f64; 2] {
    let (zeros, ones) = count_classes(labels);
    let n = labels.len() as f64;
    let weight = |count: usize| {
        if count == 0 {
            0.0
        } else {
            n / (2.0 * count as f64)
        }
    };
    [weight(zeros), weight(ones)]
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_mat(values: &[f64]) -> Mat<f64> {
        let mut mat = Mat::<f64>::zeros(values.len(), 1);
        for (i, &v) in values.iter().enumerate() {
            mat[(i, 0)] = v;
        }
        mat
    }

    #[test]
    fn test_balanced_class_weights() {
        let weights = balanced_class_weights(&[0, 0, 0, 1]);
        assert!((weights[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((weights[1] - 2.0).abs() < 1e-12);

        // n / (2 * n_0) = 2 / 4; the absent class gets no weight
        assert_eq!(balanced_class_weights(&[0, 0]), [0.5, 0.0]);
    }

    #[test]
    fn test_fit_separable_data() {
        let x = column_mat(&[-2.0, -1.5, -1.0, -0.5, 0.5, 1.0, 1.5, 2.0]);
        let y = [0, 0, 0, 0, 1, 1, 1, 1];

        let mut model = LogisticRegression::new();
        model.fit(&x, &y).unwrap();

        assert_eq!(model.predict(&x).unwrap(), y.to_vec());
        assert!(model.coefficients().unwrap()[0] > 0.0);
    }

    #[test]
    fn test_imbalanced_data_still_predicts_minority() {
        // 9 negatives, 1 positive at the far end
        let x = column_mat(&[-2.0, -1.8, -1.5, -1.2, -1.0, -0.8, -0.5, -0.2, 0.0, 2.0]);
        let y = [0, 0, 0, 0, 0, 0, 0, 0, 0, 1];

        let mut model = LogisticRegression::new();
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        assert_eq!(predictions[9], 1);
        assert_eq!(predictions[0], 0);
    }

    #[test]
    fn test_non_convergence_is_reported_not_fatal() {
        let x = column_mat(&[-1.0, 1.0, -0.5, 0.5]);
        let y = [0, 1, 0, 1];

        let mut model = LogisticRegression::new().with_max_iter(1).with_tolerance(1e-12);
        let outcome = model.fit(&x, &y).unwrap();

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert!(model.predict(&x).is_ok());
    }

    #[test]
    fn test_converges_with_loose_tolerance() {
        let x = column_mat(&[-1.0, 1.0]);
        let y = [0, 1];

        let mut model = LogisticRegression::new().with_tolerance(10.0);
        let outcome = model.fit(&x, &y).unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn test_predict_before_fit_errors() {
        let model = LogisticRegression::new();
        let x = column_mat(&[1.0]);
        assert!(matches!(model.predict(&x), Err(PipelineError::ModelNotFitted)));
    }

    #[test]
    fn test_feature_count_mismatch() {
        let mut model = LogisticRegression::new().with_max_iter(5);
        model.fit(&column_mat(&[-1.0, 1.0]), &[0, 1]).unwrap();

        let wide = Mat::<f64>::zeros(2, 3);
        assert!(matches!(
            model.predict(&wide),
            Err(PipelineError::FeatureCountMismatch { expected: 1, actual: 3 })
        ));
    }

    #[test]
    fn test_label_length_mismatch() {
        let mut model = LogisticRegression::new();
        let result = model.fit(&column_mat(&[1.0, 2.0]), &[0]);
        assert!(matches!(result, Err(PipelineError::RowCountMismatch { .. })));
    }
}
