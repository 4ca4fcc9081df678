//! Binary logistic regression backed by `linfa-logistic`.
//!
//! [`LogisticRegression`] holds hyperparameters only. [`LogisticRegression::fit`]
//! hands the feature matrix and labels to the external estimator and copies the
//! result into a [`FittedLogisticRegression`], which scores with
//! `P(y = true | x) = sigmoid(x · w + b)`.

use crate::model::{InferenceModel, ModelError};
use linfa::prelude::*;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Unfitted binary logistic regression.
///
/// Defaults: `alpha = 1.0`, `max_iterations = 100`, `gradient_tolerance = 1e-4`,
/// `fit_intercept = true`.
///
/// # Example
/// ```rust
/// use ndarray::{array, Array1};
/// use prefer_train::model::{InferenceModel, LogisticRegression};
///
/// let x = array![[0.0], [1.0], [2.0], [3.0]];
/// let y = Array1::from(vec![false, false, true, true]);
///
/// let fitted = LogisticRegression::new().fit(&x, &y).unwrap();
/// let p = fitted.predict_batch(&x).unwrap();
/// assert!(p[3] > p[0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    alpha: f64,
    max_iterations: u64,
    gradient_tolerance: f64,
    fit_intercept: bool,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            max_iterations: 100,
            gradient_tolerance: 1e-4,
            fit_intercept: true,
        }
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// L2 regularization strength.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Upper bound on optimizer iterations.
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Gradient norm at which the optimizer stops.
    pub fn gradient_tolerance(mut self, gradient_tolerance: f64) -> Self {
        self.gradient_tolerance = gradient_tolerance;
        self
    }

    /// Whether to fit an intercept term.
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    fn validate(&self) -> Result<(), ModelError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if !self.gradient_tolerance.is_finite() || self.gradient_tolerance <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "gradient_tolerance must be positive, got {}",
                self.gradient_tolerance
            )));
        }
        Ok(())
    }

    /// Fits the classifier on `x` (one sample per row) and boolean labels `y`.
    ///
    /// # Errors
    /// - [`ModelError::EmptyData`] if `x` has no rows
    /// - [`ModelError::InvalidParameter`] for bad hyperparameters or if `x` and
    ///   `y` disagree on the sample count
    /// - [`ModelError::Fit`] if the estimator fails, e.g. when `y` holds a
    ///   single class or `x` contains non-finite values
    pub fn fit(
        &self,
        x: &Array2<f64>,
        y: &Array1<bool>,
    ) -> Result<FittedLogisticRegression, ModelError> {
        self.validate()?;
        if x.nrows() == 0 {
            return Err(ModelError::EmptyData(
                "Cannot fit LogisticRegression without samples".to_string(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(ModelError::InvalidParameter(format!(
                "x has {} rows but y has {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::Fit(
                "feature matrix contains non-finite values".to_string(),
            ));
        }

        let dataset = Dataset::new(x.clone(), y.clone());
        let fitted = linfa_logistic::LogisticRegression::default()
            .alpha(self.alpha)
            .max_iterations(self.max_iterations)
            .gradient_tolerance(self.gradient_tolerance)
            .with_intercept(self.fit_intercept)
            .fit(&dataset)
            .map_err(|e| ModelError::Fit(e.to_string()))?;

        // linfa models the majority class; store weights that model `true`.
        let (coefficients, intercept) = if fitted.labels().pos.class {
            (fitted.params().clone(), fitted.intercept())
        } else {
            (-fitted.params(), -fitted.intercept())
        };

        Ok(FittedLogisticRegression {
            coefficients,
            intercept,
        })
    }
}

/// Serializable representation of a fitted logistic regression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Weights oriented toward the `true` class.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Fitted binary logistic regression.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedLogisticRegression {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl FittedLogisticRegression {
    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn check_width(&self, got: usize) -> Result<(), ModelError> {
        if got != self.coefficients.len() {
            return Err(ModelError::FeatureMismatch {
                expected_features: self.coefficients.len(),
                got_features: got,
            });
        }
        Ok(())
    }

    fn probability_of_true(&self, row: ArrayView1<'_, f64>) -> f64 {
        let z = row.dot(&self.coefficients) + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }

    /// Predicted labels using a 0.5 probability threshold.
    pub fn predict_labels(&self, x: &Array2<f64>) -> Result<Array1<bool>, ModelError> {
        Ok(self.predict_batch(x)?.mapv(|p| p >= 0.5))
    }
}

/// Scores probabilities of the `true` class.
impl InferenceModel for FittedLogisticRegression {
    type InputSingle = Array1<f64>;
    type OutputSingle = f64;
    type InputBatch = Array2<f64>;
    type OutputBatch = Array1<f64>;
    type ParamsRepr = LogisticParams;

    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle, ModelError> {
        self.check_width(input.len())?;
        Ok(self.probability_of_true(input.view()))
    }

    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch, ModelError> {
        self.check_width(input.ncols())?;
        Ok(input
            .rows()
            .into_iter()
            .map(|row| self.probability_of_true(row))
            .collect())
    }

    fn extract_params(&self) -> Self::ParamsRepr {
        LogisticParams {
            coefficients: self.coefficients.to_vec(),
            intercept: self.intercept,
        }
    }

    fn from_params(params: Self::ParamsRepr) -> Result<Self, ModelError> {
        if params.coefficients.is_empty() {
            return Err(ModelError::InvalidParameter(
                "LogisticParams has no coefficients".to_string(),
            ));
        }
        Ok(Self {
            coefficients: Array1::from(params.coefficients),
            intercept: params.intercept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable() -> (Array2<f64>, Array1<bool>) {
        let x = array![[-2.0, 0.5], [-1.0, 0.0], [-1.5, 1.0], [1.0, 0.0], [2.0, -0.5], [1.5, 1.0]];
        let y = Array1::from(vec![false, false, false, true, true, true]);
        (x, y)
    }

    #[test]
    fn test_logistic_regression_separates_classes() {
        let (x, y) = separable();
        let fitted = LogisticRegression::new().fit(&x, &y).unwrap();

        assert_eq!(fitted.n_features(), 2);
        assert!(fitted.coefficients()[0] > 0.0);
        assert_eq!(fitted.predict_labels(&x).unwrap(), y);
    }

    #[test]
    fn test_logistic_regression_probabilities_in_unit_interval() {
        let (x, y) = separable();
        let fitted = LogisticRegression::new().fit(&x, &y).unwrap();

        for p in fitted.predict_batch(&x).unwrap() {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_logistic_regression_single_matches_batch() {
        let (x, y) = separable();
        let fitted = LogisticRegression::new().fit(&x, &y).unwrap();

        let batch = fitted.predict_batch(&x).unwrap();
        let single = fitted.predict(&x.row(4).to_owned()).unwrap();
        assert_eq!(single, batch[4]);
    }

    #[test]
    fn test_logistic_regression_is_deterministic() {
        let (x, y) = separable();
        let a = LogisticRegression::new().fit(&x, &y).unwrap();
        let b = LogisticRegression::new().fit(&x, &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_logistic_regression_single_class_fails() {
        let x = array![[0.0], [1.0]];
        let y = Array1::from(vec![true, true]);

        let result = LogisticRegression::new().fit(&x, &y);
        assert!(matches!(result, Err(ModelError::Fit(_))));
    }

    #[test]
    fn test_logistic_regression_empty_data() {
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::<bool>::from(vec![]);

        let result = LogisticRegression::new().fit(&x, &y);
        assert!(matches!(result, Err(ModelError::EmptyData(_))));
    }

    #[test]
    fn test_logistic_regression_label_count_mismatch() {
        let x = array![[0.0], [1.0]];
        let y = Array1::from(vec![true]);

        let result = LogisticRegression::new().fit(&x, &y);
        assert!(matches!(result, Err(ModelError::InvalidParameter(_))));
    }

    #[test]
    fn test_logistic_regression_rejects_negative_alpha() {
        let (x, y) = separable();
        let result = LogisticRegression::new().alpha(-1.0).fit(&x, &y);
        assert!(matches!(result, Err(ModelError::InvalidParameter(_))));
    }

    #[test]
    fn test_predict_feature_mismatch() {
        let (x, y) = separable();
        let fitted = LogisticRegression::new().fit(&x, &y).unwrap();

        let result = fitted.predict_batch(&array![[1.0, 2.0, 3.0]]);
        assert!(matches!(
            result,
            Err(ModelError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            })
        ));
    }

    #[test]
    fn test_minority_true_class_orientation() {
        let x = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = Array1::from(vec![false, false, false, false, true, true]);

        let fitted = LogisticRegression::new().fit(&x, &y).unwrap();
        assert!(fitted.coefficients()[0] > 0.0);

        let p = fitted.predict_batch(&x).unwrap();
        for pair in p.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_probability_is_sigmoid_of_score() {
        let params = LogisticParams {
            coefficients: vec![1.0, -0.5],
            intercept: 0.25,
        };
        let model = FittedLogisticRegression::from_params(params).unwrap();

        let p = model.predict(&array![2.0, 1.0]).unwrap();
        let expected = 1.0 / (1.0 + (-1.75f64).exp());
        assert!((p - expected).abs() < 1e-15);
    }

    #[test]
    fn test_save_and_load() {
        let (x, y) = separable();
        let fitted = LogisticRegression::new().fit(&x, &y).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logistic.bin");

        fitted.save_to_file(&path).unwrap();
        let loaded = FittedLogisticRegression::load_from_file(&path).unwrap();

        assert_eq!(loaded, fitted);
        assert_eq!(
            loaded.predict_batch(&x).unwrap(),
            fitted.predict_batch(&x).unwrap()
        );
    }

    #[test]
    fn test_from_params_rejects_empty() {
        let params = LogisticParams {
            coefficients: vec![],
            intercept: 0.0,
        };
        assert!(FittedLogisticRegression::from_params(params).is_err());
    }
}
